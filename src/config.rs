use crate::models::{ModelPolicy, ModelPreference};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const FALLBACK_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_POLLINATIONS_BASE_URL: &str = "https://image.pollinations.ai";
pub const DOWNLOAD_FILENAME: &str = "doodle-art.png";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub policy: ModelPolicy,
    pub fallback_model: String,
    pub preferences: Vec<ModelPreference>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct PollinationsConfig {
    pub base_url: String,
    pub model: String,
    pub width: u32,
    pub height: u32,
    pub preload_timeout_secs: u64,
    pub download_filename: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub pollinations: PollinationsConfig,
    pub output_dir: PathBuf,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            policy: ModelPolicy::Discovered,
            fallback_model: FALLBACK_MODEL.to_string(),
            preferences: ModelPreference::defaults(),
            timeout_secs: 60,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.api_key = env::var("GEMINI_API_KEY").ok();

        if let Ok(base_url) = env::var("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(secs) = env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.timeout_secs = secs;
        }

        config.policy = match env::var("GEMINI_MODEL_POLICY").ok().as_deref() {
            Some("fixed") => ModelPolicy::Fixed(config.fallback_model.clone()),
            _ => ModelPolicy::Discovered,
        };
        if let Ok(model) = env::var("GEMINI_MODEL") {
            config.policy = ModelPolicy::Fixed(model);
        }

        config
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_fixed_model(mut self, model: impl Into<String>) -> Self {
        self.policy = ModelPolicy::Fixed(model.into());
        self
    }

    pub fn with_discovered_model(mut self) -> Self {
        self.policy = ModelPolicy::Discovered;
        self
    }

    pub fn with_fallback_model(mut self, model: impl Into<String>) -> Self {
        self.fallback_model = model.into();
        self
    }

    pub fn with_preferences(mut self, preferences: Vec<ModelPreference>) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for PollinationsConfig {
    fn default() -> Self {
        PollinationsConfig {
            base_url: DEFAULT_POLLINATIONS_BASE_URL.to_string(),
            model: "flux".to_string(),
            width: 1024,
            height: 1024,
            preload_timeout_secs: 60,
            download_filename: DOWNLOAD_FILENAME.to_string(),
        }
    }
}

impl PollinationsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        PollinationsConfig {
            base_url: env::var("POLLINATIONS_BASE_URL").unwrap_or(defaults.base_url),
            model: env::var("POLLINATIONS_MODEL").unwrap_or(defaults.model),
            width: env::var("POLLINATIONS_WIDTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.width),
            height: env::var("POLLINATIONS_HEIGHT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.height),
            preload_timeout_secs: env::var("POLLINATIONS_PRELOAD_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.preload_timeout_secs),
            download_filename: defaults.download_filename,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_preload_timeout(mut self, secs: u64) -> Self {
        self.preload_timeout_secs = secs;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gemini: GeminiConfig::default(),
            pollinations: PollinationsConfig::default(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Config {
            gemini: GeminiConfig::from_env(),
            pollinations: PollinationsConfig::from_env(),
            output_dir: env::var("DOODLE_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = config;
        self
    }

    pub fn with_pollinations(mut self, config: PollinationsConfig) -> Self {
        self.pollinations = config;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.gemini.policy, ModelPolicy::Discovered);
        assert_eq!(config.gemini.fallback_model, "gemini-1.5-flash");
        assert_eq!(config.gemini.preferences.len(), 3);
        assert_eq!(config.pollinations.width, 1024);
        assert_eq!(config.pollinations.download_filename, "doodle-art.png");
    }

    #[test]
    fn test_builders() {
        let gemini = GeminiConfig::new()
            .with_api_key("key")
            .with_fixed_model("gemini-2.0-flash")
            .with_timeout(5);
        assert_eq!(gemini.api_key.as_deref(), Some("key"));
        assert_eq!(gemini.policy, ModelPolicy::Fixed("gemini-2.0-flash".into()));
        assert_eq!(gemini.timeout_secs, 5);

        let pollinations = PollinationsConfig::new().with_size(512, 768).with_model("turbo");
        assert_eq!((pollinations.width, pollinations.height), (512, 768));
        assert_eq!(pollinations.model, "turbo");
    }
}
