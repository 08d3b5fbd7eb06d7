use std::future::Future;

use ollama_rs::error::OllamaError;
use thiserror::Error;

use crate::common::{ApiKey, ChatRouter, TripRequest};
use crate::config::PlannerConfig;
use crate::format::{Formatter, Markers, Segment};
use crate::planner::build_prompt;

pub const WARNING_PREFIX: &str = "⚠️";

#[derive(Error, Debug)]
pub enum GenError {
    #[error("no OpenRouter API key is set")]
    MissingApiKey,
    #[error("{0}")]
    OpenRouter(String),
    #[error(transparent)]
    Ollama(#[from] OllamaError),
}

/// Anything that turns a prompt into generated text.
pub trait TextGenerator {
    fn complete(&self, prompt: &str)
        -> impl Future<Output = Result<String, GenError>> + Send;
}

/// Routes prompts to OpenRouter or a local Ollama server.
#[derive(Clone)]
pub struct ProviderClient {
    pub config: PlannerConfig,
    pub api_key: ApiKey,
}

impl TextGenerator for ProviderClient {
    async fn complete(&self, prompt: &str) -> Result<String, GenError> {
        let model = &self.config.model;
        log::info!("sending prompt to {} ({})", self.config.router, model);
        match self.config.router {
            ChatRouter::Openrouter => {
                if !self.api_key.is_set {
                    return Err(GenError::MissingApiKey);
                }
                crate::openr::do_openr_generate(
                    &self.api_key, model, &self.config.options, prompt)
                    .await
                    .map_err(|e| GenError::OpenRouter(e.to_string()))
            }
            ChatRouter::Ollama => {
                Ok(crate::ollama::do_ollama_generate(
                    model, &self.config.options, prompt).await?)
            }
        }
    }
}

/// Asks the generator for an itinerary. Failures come back as
/// warning-prefixed text, never as errors.
pub async fn generate<G: TextGenerator>(
    generator: &G,
    request: &TripRequest,
    markers: &Markers,
) -> String {
    let prompt = build_prompt(request, markers);
    match generator.complete(&prompt).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            log::warn!("empty reply for {}", request.city());
            format!("{} Could not generate itinerary. Please try again.",
                WARNING_PREFIX)
        }
        Err(e) => {
            log::warn!("generation failed: {}", e);
            format!("{} Error generating itinerary: {}", WARNING_PREFIX, e)
        }
    }
}

/// One full pass: generate the text, then split it into segments.
pub async fn plan_trip<G: TextGenerator>(
    generator: &G,
    request: &TripRequest,
    formatter: &Formatter,
) -> Vec<Segment> {
    let text = generate(generator, request, formatter.markers()).await;
    formatter.format(&text, request).collect()
}
