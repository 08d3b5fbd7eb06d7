use ollama_rs::{Ollama, error::OllamaError, generation::completion::request::GenerationRequest, models::ModelOptions as OllamaOptions};

use crate::common::ModelOptions;

pub async fn do_ollama_generate(
    model: &str,
    options: &ModelOptions,
    prompt: &str,
) -> Result<String, OllamaError> {
    let ollama = Ollama::default();

    let mut ollama_options = OllamaOptions::default();
    if let Some(t) = options.temperature {
        if t >= 0.0 && t <= 2.0 {
            ollama_options = ollama_options.temperature(t as f32);
        }
    }
    if let Some(seed) = options.seed {
        ollama_options = ollama_options.seed(seed);
    }

    let request = GenerationRequest::new(model.to_string(), prompt.to_string())
        .options(ollama_options);

    let response = ollama.generate(request).await?;
    log::debug!("Ollama generation finished for {}", model);
    Ok(response.response)
}
