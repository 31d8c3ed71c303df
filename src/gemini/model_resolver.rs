use crate::{
    config::GeminiConfig,
    error::{DoodleError, Result},
    logger,
    models::{ModelPolicy, ModelPreference, ModelsListResponse},
    transport::HttpTransport,
};
use std::sync::Arc;
use std::time::Duration;

/// Picks the model name for a generation call. Never fails: every problem
/// degrades to the fallback model with a warning.
#[derive(Clone)]
pub struct ModelResolver {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    policy: ModelPolicy,
    fallback_model: String,
    preferences: Vec<ModelPreference>,
    timeout: Duration,
}

impl ModelResolver {
    pub fn new(transport: Arc<dyn HttpTransport>, config: &GeminiConfig) -> Self {
        Self {
            transport,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            policy: config.policy.clone(),
            fallback_model: config.fallback_model.clone(),
            preferences: config.preferences.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn policy(&self) -> &ModelPolicy {
        &self.policy
    }

    pub fn fallback_model(&self) -> &str {
        &self.fallback_model
    }

    pub async fn resolve(&self, api_key: &str) -> String {
        match &self.policy {
            ModelPolicy::Fixed(model) => model.clone(),
            ModelPolicy::Discovered => match self.discover(api_key).await {
                Ok(model) => {
                    log::info!("Auto-selected model: {}", model);
                    model
                }
                Err(e) => {
                    log::warn!(
                        "Model discovery failed, using {}: {}",
                        self.fallback_model,
                        e
                    );
                    self.fallback_model.clone()
                }
            },
        }
    }

    async fn discover(&self, api_key: &str) -> Result<String> {
        let url = format!(
            "{}/models?key={}",
            self.base_url,
            urlencoding::encode(api_key)
        );

        let response = {
            let _timer = logger::timer("list models");
            self.transport.get(&url, Some(self.timeout)).await?
        };

        // The body is inspected even on non-2xx; an error envelope simply has no models.
        let listing: ModelsListResponse = response.json()?;
        let models = listing
            .models
            .ok_or_else(|| DoodleError::MalformedResponse("Could not fetch the model list".into()))?;
        let ids: Vec<&str> = models.iter().map(|m| m.id()).collect();
        log::debug!("Models available: {:?}", ids);

        Ok(select_model(&ids, &self.preferences)
            .unwrap_or(self.fallback_model.as_str())
            .to_string())
    }
}

/// First rule with any match wins; ties go to the listing order.
pub fn select_model<'a>(models: &[&'a str], preferences: &[ModelPreference]) -> Option<&'a str> {
    preferences
        .iter()
        .find_map(|rule| models.iter().copied().find(|m| rule.matches(m)))
}
