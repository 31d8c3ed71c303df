use thiserror::Error;

#[derive(Debug, Error)]
pub enum DoodleError {
    #[error("Please enter an API key first")]
    MissingCredential,
    #[error("Please upload a doodle first")]
    MissingInput,
    #[error("There is no artwork to download yet")]
    NoArtwork,
    #[error("Network error: {0}")]
    NetworkFailure(String),
    #[error("The AI returned empty content, please try again")]
    EmptyGenerationResult,
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DoodleError {
    /// Input problems are caught before any network call is made.
    pub fn is_precondition(&self) -> bool {
        matches!(self, DoodleError::MissingCredential | DoodleError::MissingInput)
    }
}

impl From<serde_json::Error> for DoodleError {
    fn from(err: serde_json::Error) -> Self {
        DoodleError::MalformedResponse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DoodleError>;
