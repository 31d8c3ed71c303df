pub mod image_client;
pub mod model_resolver;
pub mod text_client;

use crate::{config::Config, error::Result, transport::HttpTransport, transport::ReqwestTransport};
use std::sync::Arc;

pub use image_client::ImageClient;
pub use model_resolver::ModelResolver;
pub use text_client::TextClient;

/// Bundles the three remote collaborators over one shared transport. Each
/// collaborator applies its own configured timeout per request.
#[derive(Clone)]
pub struct DoodleClient {
    resolver: ModelResolver,
    text_client: TextClient,
    image_client: ImageClient,
}

impl DoodleClient {
    pub fn new(config: &Config) -> Result<Self> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    pub fn with_transport(transport: Arc<dyn HttpTransport>, config: &Config) -> Self {
        Self {
            resolver: ModelResolver::new(transport.clone(), &config.gemini),
            text_client: TextClient::new(transport.clone(), &config.gemini),
            image_client: ImageClient::new(transport, config.pollinations.clone()),
        }
    }

    pub fn resolver(&self) -> &ModelResolver {
        &self.resolver
    }

    pub fn text(&self) -> &TextClient {
        &self.text_client
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}
