use std::borrow::Cow;
use std::str::Split;

use serde::Serialize;

use crate::common::TripRequest;

pub const LOADING_MESSAGE: &str = "⏳ Generating itinerary, please wait...\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Period {
    Morning,
    Afternoon,
    Evening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SegmentKind {
    Title,
    DayHeader,
    PeriodLabel(Period),
    PlainLine,
}

/// One classified line of the model's reply (or the title in front of it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub kind: SegmentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub body: String,
}

impl Segment {
    fn title(request: &TripRequest) -> Self {
        Self {
            kind: SegmentKind::Title,
            label: None,
            body: format!("🌍 {}-Day Travel Plan for {} 🌍",
                request.days(), request.city()),
        }
    }

    fn plain(line: &str) -> Self {
        Self {
            kind: SegmentKind::PlainLine,
            label: None,
            body: line.to_string(),
        }
    }

    /// Expands the segment into the styled spans the display shows.
    pub fn runs(&self) -> Vec<Run<'_>> {
        match self.kind {
            SegmentKind::Title => vec![
                Run::new(RunStyle::Title, format!("{}\n", self.body)),
                Run::new(RunStyle::Plain, "\n"),
            ],
            // the blank line in front separates days from each other
            SegmentKind::DayHeader => vec![
                Run::new(RunStyle::DayHeader, format!("\n{}\n", self.body)),
            ],
            SegmentKind::PeriodLabel(period) => vec![
                Run::new(RunStyle::Period(period),
                    self.label.as_deref().unwrap_or_default()),
                Run::new(RunStyle::Plain, format!("{}\n", self.body)),
            ],
            SegmentKind::PlainLine => vec![
                Run::new(RunStyle::Plain, format!("{}\n", self.body)),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStyle {
    Title,
    DayHeader,
    Period(Period),
    Plain,
    Loading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run<'a> {
    pub style: RunStyle,
    pub text: Cow<'a, str>,
}

impl<'a> Run<'a> {
    pub fn new(style: RunStyle, text: impl Into<Cow<'a, str>>) -> Self {
        Self { style, text: text.into() }
    }
}

/// Marker substrings used to recognise the parts of a generated itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub day_header: String,
    pub morning: String,
    pub afternoon: String,
    pub evening: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            day_header: "📅 Day".to_string(),
            morning: "🌅 Morning:".to_string(),
            afternoon: "🌞 Afternoon:".to_string(),
            evening: "🌙 Evening:".to_string(),
        }
    }
}

impl Markers {
    pub fn period(&self, period: Period) -> &str {
        match period {
            Period::Morning => &self.morning,
            Period::Afternoon => &self.afternoon,
            Period::Evening => &self.evening,
        }
    }

    // priority order matters: a day header wins over any period marker
    fn rules(&self) -> [(&str, SegmentKind); 4] {
        [
            (self.day_header.as_str(), SegmentKind::DayHeader),
            (self.morning.as_str(), SegmentKind::PeriodLabel(Period::Morning)),
            (self.afternoon.as_str(), SegmentKind::PeriodLabel(Period::Afternoon)),
            (self.evening.as_str(), SegmentKind::PeriodLabel(Period::Evening)),
        ]
    }

    pub fn classify(&self, line: &str) -> Segment {
        let Some((marker, kind)) = self.rules().into_iter()
                .find(|(marker, _)| line.contains(marker)) else {
            return Segment::plain(line);
        };

        match kind {
            SegmentKind::PeriodLabel(_) => Segment {
                kind,
                label: Some(format!("{} ", marker)),
                body: line.replace(marker, "").trim().to_string(),
            },
            _ => Segment {
                kind,
                label: None,
                body: line.to_string(),
            },
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Formatter {
    markers: Markers,
}

impl Formatter {
    pub fn new(markers: Markers) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Starts a fresh pass over `text`. Nothing is carried over between
    /// calls, so the same input always yields the same segments.
    pub fn format<'a>(&'a self, text: &'a str, request: &TripRequest)
            -> Segments<'a> {
        Segments {
            title: Some(Segment::title(request)),
            lines: text.split('\n'),
            markers: &self.markers,
        }
    }
}

/// Lazy segment sequence produced by [`Formatter::format`].
pub struct Segments<'a> {
    title: Option<Segment>,
    lines: Split<'a, char>,
    markers: &'a Markers,
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if let Some(title) = self.title.take() {
            return Some(title);
        }
        self.lines.next().map(|line| self.markers.classify(line))
    }
}

/// Concatenates the runs of every segment into the displayed text.
pub fn render_plain(segments: &[Segment]) -> String {
    segments.iter()
        .flat_map(|segment| segment.runs())
        .map(|run| run.text)
        .collect()
}
