use crate::format::{LOADING_MESSAGE, Run, RunStyle, Segment, render_plain};

#[derive(Debug, Default, Clone, PartialEq)]
pub enum Output {
    #[default]
    Empty,
    Loading,
    Itinerary(Vec<Segment>),
}

/// What the output area shows and whether the generate button is live.
/// Changed only through `begin_request` and `complete_request`.
#[derive(Debug, Default)]
pub struct PlannerView {
    output: Output,
    in_flight: bool,
}

impl PlannerView {
    pub fn can_generate(&self) -> bool {
        !self.in_flight
    }

    /// Returns false, and changes nothing, if a request is already running.
    pub fn begin_request(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        self.output = Output::Loading;
        true
    }

    pub fn complete_request(&mut self, segments: Vec<Segment>) {
        self.output = Output::Itinerary(segments);
        self.in_flight = false;
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    pub fn runs(&self) -> Vec<Run<'_>> {
        match &self.output {
            Output::Empty => vec![],
            Output::Loading => vec![Run::new(RunStyle::Loading, LOADING_MESSAGE)],
            Output::Itinerary(segments) => segments.iter()
                .flat_map(|segment| segment.runs())
                .collect(),
        }
    }

    // text for the clipboard, only once an itinerary is shown
    pub fn plain_text(&self) -> Option<String> {
        match &self.output {
            Output::Itinerary(segments) => Some(render_plain(segments)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::TripRequest;
    use crate::format::Formatter;

    fn segments(text: &str) -> Vec<Segment> {
        let request = TripRequest::new("Porto", 2, vec![]).unwrap();
        Formatter::default().format(text, &request).collect()
    }

    #[test]
    fn test_starts_idle() {
        let view = PlannerView::default();
        assert!(view.can_generate());
        assert_eq!(view.output(), &Output::Empty);
        assert!(view.runs().is_empty());
        assert_eq!(view.plain_text(), None);
    }

    #[test]
    fn test_begin_shows_loading_and_disables() {
        let mut view = PlannerView::default();

        assert!(view.begin_request());
        assert!(!view.can_generate());
        assert_eq!(view.runs(), vec![Run::new(RunStyle::Loading, LOADING_MESSAGE)]);
    }

    #[test]
    fn test_second_request_refused_while_in_flight() {
        let mut view = PlannerView::default();
        view.begin_request();

        assert!(!view.begin_request());
        assert_eq!(view.output(), &Output::Loading);
    }

    #[test]
    fn test_complete_replaces_content() {
        let mut view = PlannerView::default();
        view.begin_request();
        view.complete_request(segments("first"));
        view.begin_request();
        view.complete_request(segments("📅 Day 1"));

        assert!(view.can_generate());
        assert_eq!(view.plain_text().unwrap(),
            "🌍 2-Day Travel Plan for Porto 🌍\n\n\n📅 Day 1\n");
    }

    #[test]
    fn test_warning_text_completes_request() {
        let mut view = PlannerView::default();
        view.begin_request();
        view.complete_request(segments("⚠️ Could not generate itinerary. Please try again."));

        assert!(view.can_generate());
        let runs = view.runs();
        assert_eq!(runs.last().unwrap().style, RunStyle::Plain);
    }
}
