use serde::{Deserialize, Serialize};

use crate::error::{DoodleError, Result};

pub const DEFAULT_MEDIA_TYPE: &str = "image/jpeg";

/// The selected doodle, base64 without any `data:` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub encoded_data: String,
    pub media_type: String,
}

impl UploadedImage {
    pub fn new(encoded_data: impl Into<String>, media_type: impl Into<String>) -> Self {
        let media_type = media_type.into();
        Self {
            encoded_data: encoded_data.into(),
            media_type: if media_type.trim().is_empty() {
                DEFAULT_MEDIA_TYPE.to_string()
            } else {
                media_type
            },
        }
    }

    /// Parse a `data:<mime>;base64,<payload>` URI.
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let rest = uri.strip_prefix("data:").ok_or(DoodleError::MissingInput)?;
        let (header, payload) = rest.split_once(',').ok_or(DoodleError::MissingInput)?;
        let media_type = header.strip_suffix(";base64").ok_or(DoodleError::MissingInput)?;
        if payload.is_empty() {
            return Err(DoodleError::MissingInput);
        }
        Ok(Self::new(payload, media_type))
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.encoded_data)
    }
}

/// A rendered image URL and the seed it was requested with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedArtwork {
    pub url: String,
    pub seed: u32,
    pub prompt: String,
}
