use openrouter_rs::{OpenRouterClient, Message, api::chat::ChatCompletionRequest, types::Role};
use secrecy::ExposeSecret;

use crate::common::{ApiKey, ModelOptions, mask_key_secure};

// single request without streaming or history
pub async fn do_openr_generate(
    api_key: &ApiKey,
    model: &str,
    options: &ModelOptions,
    prompt: &str,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    // print the first two and last two characters of the key in case we are
    // not sure whether the right key is used
    log::info!("using key: {}", mask_key_secure(api_key.key.expose_secret()));

    let client = OpenRouterClient::builder()
        .api_key(api_key.key.expose_secret())
        .build()?;

    let mut request_builder = ChatCompletionRequest::builder();
    request_builder
        .model(model)
        .messages(vec![Message::new(Role::User, prompt)]);

    if let Some(seed) = options.seed {
        request_builder.seed(seed as u32);
    }

    if let Some(temp) = options.temperature {
        request_builder.temperature(temp);
    }

    let request = request_builder.build()?;

    let response = client.send_chat_completion(&request).await?;
    log::debug!("OpenRouter replied with {} choice(s)", response.choices.len());

    Ok(response.choices
        .first()
        .and_then(|choice| choice.content())
        .unwrap_or_default()
        .to_string())
}
