use serde::{Deserialize, Serialize};

/// How the generation model name is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelPolicy {
    /// Always use this model, no lookup.
    Fixed(String),
    /// Ask the models-list endpoint and pick by preference.
    Discovered,
}

/// One rule in the ordered model preference list.
///
/// Rules are evaluated in order; the first rule that matches any listed model
/// wins, and within a rule the first listed model wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPreference {
    pub needle: String,
}

impl ModelPreference {
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }

    pub fn matches(&self, model: &str) -> bool {
        model.contains(&self.needle)
    }

    /// flash > pro > any gemini
    pub fn defaults() -> Vec<Self> {
        vec![Self::new("flash"), Self::new("pro"), Self::new("gemini")]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowMode {
    Story,
    Art,
}

impl std::str::FromStr for WorkflowMode {
    type Err = crate::error::DoodleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "story" => Ok(WorkflowMode::Story),
            "art" => Ok(WorkflowMode::Art),
            other => Err(crate::error::DoodleError::ConfigError(format!(
                "Unknown workflow mode: {}",
                other
            ))),
        }
    }
}
