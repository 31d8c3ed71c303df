//! Per-user session state: the selected doodle and the artwork currently shown.
//!
//! The controller that owns a [`Session`] is its only writer; workflows borrow it
//! read-only for the duration of a run.

use crate::{
    error::Result,
    models::{RenderedArtwork, UploadedImage, DEFAULT_MEDIA_TYPE},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::path::Path;

#[derive(Debug, Default, Clone)]
pub struct Session {
    image: Option<UploadedImage>,
    artwork: Option<RenderedArtwork>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    pub fn artwork(&self) -> Option<&RenderedArtwork> {
        self.artwork.as_ref()
    }

    /// Replace the current image. No type or size checks: whatever is handed in
    /// goes to the API verbatim.
    pub fn set_image_bytes(&mut self, bytes: &[u8], media_type: &str) -> &UploadedImage {
        let image = UploadedImage::new(BASE64.encode(bytes), media_type);
        log::info!(
            "Image selected: {} ({} bytes)",
            image.media_type,
            bytes.len()
        );
        self.image.insert(image)
    }

    pub async fn set_image_from_path(&mut self, path: impl AsRef<Path>) -> Result<&UploadedImage> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let media_type = media_type_for(path);
        Ok(self.set_image_bytes(&bytes, media_type))
    }

    pub fn set_image_from_data_uri(&mut self, uri: &str) -> Result<&UploadedImage> {
        let image = UploadedImage::from_data_uri(uri)?;
        Ok(self.image.insert(image))
    }

    pub(crate) fn set_artwork(&mut self, artwork: RenderedArtwork) {
        self.artwork = Some(artwork);
    }
}

/// Declared media type of a file, from its extension.
pub fn media_type_for(path: &Path) -> &'static str {
    image::ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(DEFAULT_MEDIA_TYPE)
}
