use secrecy::SecretString;
use strum::{Display, EnumString};
use thiserror::Error;

use crate::planner::parse_interests;

pub static KEYRING_INFO: &'static [&str] = &["com.itinera.planner", "openr"];

#[derive(Default, Clone)]
pub struct ApiKey {
    pub key: SecretString,
    pub is_set: bool,
}

#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("City must not be empty")]
    EmptyCity,
    #[error("Number of days must be a positive whole number, got '{0}'")]
    InvalidDays(String),
}

#[derive(Default, Display, EnumString, Debug, Clone, Copy, PartialEq)]
#[strum(ascii_case_insensitive)]
pub enum ChatRouter {
    #[default]
    Openrouter,
    Ollama,
}

impl ChatRouter {
    pub fn default_model(&self) -> &'static str {
        match self {
            ChatRouter::Openrouter => "google/gemini-2.0-flash-001",
            ChatRouter::Ollama => "llama3.2",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ModelOptions {
    pub seed: Option<i32>, // we use i32 but do not allow negative values
    pub temperature: Option<f64>,
}

/// Validated input for one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    city: String,
    days: u32,
    interests: Vec<String>,
}

impl TripRequest {
    pub fn new(city: &str, days: u32, interests: Vec<String>)
            -> Result<Self, InputError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(InputError::EmptyCity);
        }
        if days == 0 {
            return Err(InputError::InvalidDays(days.to_string()));
        }
        Ok(Self {
            city: city.to_string(),
            days,
            interests,
        })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }
}

// raw text of the three input fields, as typed by the user
#[derive(Debug, Default, Clone)]
pub struct TripForm {
    pub city: String,
    pub days: String,
    pub interests: String,
}

impl TripForm {
    pub fn validate(&self) -> Result<TripRequest, InputError> {
        let days_text = self.days.trim();
        let days = days_text.parse::<i64>()
            .ok()
            .and_then(|d| u32::try_from(d).ok())
            .filter(|d| *d > 0)
            .ok_or_else(|| InputError::InvalidDays(days_text.to_string()))?;

        TripRequest::new(&self.city, days, parse_interests(&self.interests))
    }
}

pub fn mask_key_secure(key: &str) -> String {
    let char_count = key.chars().count();

    // If too short, don't even return it. Just return placeholders.
    if char_count <= 4 {
        return "***".to_string();
    }

    let start: String = key.chars().take(2).collect();

    // reverse, take 2, then un-reverse
    let end: String = key.chars().rev().take(2).collect::<Vec<_>>()
    .into_iter().rev().collect();

    format!("{}..{}", start, end)
}
