use crate::common::TripRequest;
use crate::format::{Markers, Period};

pub const DEFAULT_INTERESTS: &str = "general sightseeing";

/// Splits the interests field on ", ". Blank input means no interests.
pub fn parse_interests(input: &str) -> Vec<String> {
    let input = input.trim();
    if input.is_empty() {
        return vec![];
    }
    input.split(", ").map(String::from).collect()
}

pub fn interest_phrase(interests: &[String]) -> String {
    if interests.is_empty() {
        DEFAULT_INTERESTS.to_string()
    } else {
        interests.join(", ")
    }
}

// The markers are spelled out in the prompt so that the reply can be
// split into days and periods by the formatter.
pub fn build_prompt(request: &TripRequest, markers: &Markers) -> String {
    let days = request.days();
    let city = request.city();
    let interests = interest_phrase(request.interests());
    let morning = markers.period(Period::Morning);
    let afternoon = markers.period(Period::Afternoon);
    let evening = markers.period(Period::Evening);
    let day = &markers.day_header;

    format!("\
Create a unique {days}-day travel itinerary for {city} based on these interests: {interests}.
Each day's plan should include:
- Morning: Activities like sightseeing, nature walks, or cultural visits.
- Afternoon: Adventure activities, historical tours, or food experiences.
- Evening: Entertainment, nightlife, or relaxation options.

Ensure variety across days. Format it in an easy-to-read structure.
Start each day on its own line with \"{day} N\" (N is the day number).
Start each part of the day on its own line with \"{morning}\", \"{afternoon}\" or \"{evening}\".
")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interests() {
        assert_eq!(parse_interests("food, hiking"), ["food", "hiking"]);
        assert!(parse_interests("").is_empty());
        assert_eq!(parse_interests(" museums "), ["museums"]);
        // only the exact ", " separator splits
        assert_eq!(parse_interests("food,hiking"), ["food,hiking"]);
    }

    #[test]
    fn test_interest_phrase() {
        assert_eq!(interest_phrase(&[]), "general sightseeing");
        assert_eq!(interest_phrase(&parse_interests("art, jazz")), "art, jazz");
    }

    #[test]
    fn test_prompt_contents() {
        let request = TripRequest::new("Tokyo", 4, parse_interests("anime, sushi"))
            .unwrap();
        let prompt = build_prompt(&request, &Markers::default());

        assert!(prompt.contains("4-day travel itinerary for Tokyo"));
        assert!(prompt.contains("interests: anime, sushi."));
        assert!(prompt.contains("Ensure variety across days"));
        assert!(prompt.contains("\"📅 Day N\""));
        assert!(prompt.contains("\"🌅 Morning:\""));
        assert!(prompt.contains("\"🌞 Afternoon:\""));
        assert!(prompt.contains("\"🌙 Evening:\""));
    }

    #[test]
    fn test_prompt_without_interests() {
        let request = TripRequest::new("Cairo", 1, vec![]).unwrap();
        let prompt = build_prompt(&request, &Markers::default());

        assert!(prompt.contains("interests: general sightseeing."));
    }
}
