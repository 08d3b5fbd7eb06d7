use std::env;

use keyring::Entry;
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::common::{ApiKey, ChatRouter, KEYRING_INFO, ModelOptions};

pub const ROUTER_VAR: &str = "ITINERA_ROUTER";
pub const MODEL_VAR: &str = "ITINERA_MODEL";
pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Unknown router '{0}', expected 'openrouter' or 'ollama'")]
    UnknownRouter(String),
    #[error("Temperature must be between 0.0 and 2.0, got {0}")]
    Temperature(f64),
    #[error("Seed must not be negative, got {0}")]
    Seed(i32),
}

/// Which provider and model to ask, and with what options.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub router: ChatRouter,
    pub model: String,
    pub options: ModelOptions,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        let router = ChatRouter::default();
        Self {
            router,
            model: router.default_model().to_string(),
            options: ModelOptions::default(),
        }
    }
}

/// Values given on the command line, before falling back to the environment.
#[derive(Debug, Default, Clone)]
pub struct ConfigFlags {
    pub router: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub seed: Option<i32>,
}

impl PlannerConfig {
    pub fn from_env(flags: ConfigFlags) -> Result<Self, ConfigError> {
        Self::resolve(flags, |name| env::var(name).ok())
    }

    /// Flags win over variables, variables win over defaults.
    pub fn resolve(
        flags: ConfigFlags,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let router = match flags.router.or_else(|| lookup(ROUTER_VAR)) {
            Some(name) => name.trim().parse::<ChatRouter>()
                .map_err(|_| ConfigError::UnknownRouter(name.clone()))?,
            None => ChatRouter::default(),
        };

        let model = flags.model
            .or_else(|| lookup(MODEL_VAR))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| router.default_model().to_string());

        if let Some(t) = flags.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(ConfigError::Temperature(t));
            }
        }
        if let Some(seed) = flags.seed {
            if seed < 0 {
                return Err(ConfigError::Seed(seed));
            }
        }

        Ok(Self {
            router,
            model,
            options: ModelOptions {
                seed: flags.seed,
                temperature: flags.temperature,
            },
        })
    }
}

/// Looks for the OpenRouter key in the environment first, then in the
/// system keyring. The flag tells whether the keyring supplied it.
pub fn load_api_key() -> (ApiKey, bool) {
    let mut api_key = ApiKey::default();

    if let Ok(env_key) = env::var(API_KEY_VAR) {
        api_key.key = env_key.into();
        api_key.is_set = true;
        return (api_key, false);
    }

    match keyring_entry() {
        Ok(entry) => match entry.get_password() {
            Ok(retrieved) => {
                log::info!("API key retrieved from the system keyring");
                api_key.key = retrieved.into();
                api_key.is_set = true;
                return (api_key, true);
            }
            Err(error) => {
                log::warn!("Failed to retrieve key: {}", error);
            }
        },
        Err(error) => {
            log::warn!("Failed to access the system keyring: {}", error);
        }
    }
    (api_key, false)
}

fn keyring_entry() -> keyring::Result<Entry> {
    Entry::new(KEYRING_INFO[0], KEYRING_INFO[1])
}

/// Remembers the key in the system keyring for later runs.
pub fn store_api_key(api_key: &ApiKey) -> keyring::Result<()> {
    keyring_entry()?.set_password(api_key.key.expose_secret())?;
    log::info!("key saved to the system keyring");
    Ok(())
}

pub fn delete_stored_key() -> keyring::Result<()> {
    keyring_entry()?.delete_credential()?;
    log::info!("key deleted from the system keyring");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::resolve(ConfigFlags::default(), vars(&[]))
            .unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.model, "google/gemini-2.0-flash-001");
    }

    #[test]
    fn test_env_router_picks_its_default_model() {
        let config = PlannerConfig::resolve(ConfigFlags::default(),
            vars(&[(ROUTER_VAR, "ollama")])).unwrap();
        assert_eq!(config.router, ChatRouter::Ollama);
        assert_eq!(config.model, "llama3.2");
    }

    #[test]
    fn test_flags_win_over_env() {
        let flags = ConfigFlags {
            router: Some("openrouter".to_string()),
            model: Some("openai/gpt-4o-mini".to_string()),
            ..Default::default()
        };
        let config = PlannerConfig::resolve(flags,
            vars(&[(ROUTER_VAR, "ollama"), (MODEL_VAR, "mistral")])).unwrap();

        assert_eq!(config.router, ChatRouter::Openrouter);
        assert_eq!(config.model, "openai/gpt-4o-mini");
    }

    #[test]
    fn test_blank_model_falls_back() {
        let config = PlannerConfig::resolve(ConfigFlags::default(),
            vars(&[(MODEL_VAR, "  ")])).unwrap();
        assert_eq!(config.model, "google/gemini-2.0-flash-001");
    }

    #[test]
    fn test_unknown_router() {
        let flags = ConfigFlags {
            router: Some("gemini".to_string()),
            ..Default::default()
        };
        assert_eq!(PlannerConfig::resolve(flags, vars(&[])),
            Err(ConfigError::UnknownRouter("gemini".to_string())));
    }

    #[test]
    fn test_option_ranges() {
        let hot = ConfigFlags { temperature: Some(2.5), ..Default::default() };
        assert_eq!(PlannerConfig::resolve(hot, vars(&[])),
            Err(ConfigError::Temperature(2.5)));

        let negative = ConfigFlags { seed: Some(-1), ..Default::default() };
        assert_eq!(PlannerConfig::resolve(negative, vars(&[])),
            Err(ConfigError::Seed(-1)));

        let fine = ConfigFlags {
            temperature: Some(0.7),
            seed: Some(42),
            ..Default::default()
        };
        let config = PlannerConfig::resolve(fine, vars(&[])).unwrap();
        assert_eq!(config.options.temperature, Some(0.7));
        assert_eq!(config.options.seed, Some(42));
    }
}
