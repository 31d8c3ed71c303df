use crate::{
    config::GeminiConfig,
    error::{DoodleError, Result},
    logger,
    models::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GenerationRequest},
    transport::HttpTransport,
};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct TextClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    timeout: Duration,
}

impl TextClient {
    pub fn new(transport: Arc<dyn HttpTransport>, config: &GeminiConfig) -> Self {
        Self {
            transport,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn endpoint(&self, model: &str, api_key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            model,
            urlencoding::encode(api_key)
        )
    }

    /// One generateContent call; returns the first candidate's first text part.
    pub async fn generate(
        &self,
        api_key: &str,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<String> {
        let payload = serde_json::to_value(GenerateContentRequest::from(request))?;

        log::info!("Invoking model: {}", model);
        log::debug!(
            "generateContent: {} chars of instructions, {} bytes of {}",
            request.instruction_text.len(),
            request.image.encoded_data.len(),
            request.image.media_type
        );

        let response = {
            let _timer = logger::timer("generateContent");
            self.transport
                .post_json(&self.endpoint(model, api_key), &payload, Some(self.timeout))
                .await?
        };

        if !response.is_success() {
            let message = response
                .json::<ErrorEnvelope>()
                .ok()
                .and_then(|envelope| envelope.error)
                .and_then(|error| error.message)
                .unwrap_or_else(|| "request was rejected".to_string());
            log::error!("Gemini returned HTTP {}: {}", response.status, message);
            return Err(DoodleError::NetworkFailure(message));
        }

        let body: GenerateContentResponse = response.json()?;
        extract_text(body)
    }
}

fn extract_text(body: GenerateContentResponse) -> Result<String> {
    let candidate = body
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or(DoodleError::EmptyGenerationResult)?;

    candidate
        .content
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| DoodleError::MalformedResponse("candidate has no text part".into()))
}
