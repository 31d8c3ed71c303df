use crate::{
    config::PollinationsConfig,
    error::{DoodleError, Result},
    logger,
    models::RenderedArtwork,
    transport::HttpTransport,
};
use rand::Rng;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Renders prompts through the Pollinations image endpoint, which serves the
/// image directly at a templated GET URL.
#[derive(Clone)]
pub struct ImageClient {
    transport: Arc<dyn HttpTransport>,
    config: PollinationsConfig,
}

impl ImageClient {
    pub fn new(transport: Arc<dyn HttpTransport>, config: PollinationsConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &PollinationsConfig {
        &self.config
    }

    pub fn random_seed() -> u32 {
        rand::thread_rng().gen_range(0..1_000_000)
    }

    pub fn build_url(&self, prompt: &str, seed: u32) -> String {
        format!(
            "{}/prompt/{}?width={}&height={}&seed={}&model={}&nologo=true",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(prompt),
            self.config.width,
            self.config.height,
            seed,
            urlencoding::encode(&self.config.model)
        )
    }

    /// Fresh seed every call, so repeated prompts give different pictures.
    pub fn artwork_for(&self, prompt: &str) -> RenderedArtwork {
        let seed = Self::random_seed();
        RenderedArtwork {
            url: self.build_url(prompt, seed),
            seed,
            prompt: prompt.to_string(),
        }
    }

    fn preload_limit(&self) -> Duration {
        Duration::from_secs(self.config.preload_timeout_secs)
    }

    async fn fetch(&self, url: &str, timeout: Option<Duration>) -> Result<Vec<u8>> {
        let response = self.transport.get(url, timeout).await?;
        if !response.is_success() {
            return Err(DoodleError::NetworkFailure(format!(
                "Image endpoint returned HTTP {}",
                response.status
            )));
        }
        if response.body.is_empty() {
            return Err(DoodleError::NetworkFailure("Image endpoint returned no data".into()));
        }
        Ok(response.body)
    }

    /// Load the image fully before it is shown, bounded by the preload timeout.
    pub async fn preload(&self, artwork: &RenderedArtwork) -> Result<Vec<u8>> {
        let limit = self.preload_limit();
        let _timer = logger::timer("image preload");
        match tokio::time::timeout(limit, self.fetch(&artwork.url, None)).await {
            Ok(result) => result,
            Err(_) => Err(DoodleError::NetworkFailure(format!(
                "Image did not load within {}s",
                limit.as_secs()
            ))),
        }
    }

    /// Save the image at `url` into `dir` under the fixed download filename.
    pub async fn download(&self, url: &str, dir: &Path) -> Result<PathBuf> {
        let bytes = {
            let _timer = logger::timer("image download");
            self.fetch(url, Some(self.preload_limit())).await?
        };
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.config.download_filename);
        tokio::fs::write(&path, &bytes).await?;
        log::info!("Saved artwork to {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;

    fn client(transport: MockTransport, config: PollinationsConfig) -> ImageClient {
        ImageClient::new(Arc::new(transport), config)
    }

    fn config() -> PollinationsConfig {
        PollinationsConfig::new()
            .with_base_url("https://img.test/")
            .with_size(768, 512)
    }

    #[test]
    fn test_url_encodes_prompt() {
        let client = client(MockTransport::new(), config());
        let url = client.build_url("A cat & dog, 100% cute/fluffy?", 42);
        assert_eq!(
            url,
            "https://img.test/prompt/A%20cat%20%26%20dog%2C%20100%25%20cute%2Ffluffy%3F\
             ?width=768&height=512&seed=42&model=flux&nologo=true"
        );
    }

    #[test]
    fn test_seed_varies() {
        let client = client(MockTransport::new(), config());
        let seeds: std::collections::HashSet<u32> =
            (0..20).map(|_| client.artwork_for("same prompt").seed).collect();
        assert!(seeds.len() > 1);
        let artwork = client.artwork_for("same prompt");
        assert!(artwork.url.contains(&format!("seed={}", artwork.seed)));
    }

    #[tokio::test]
    async fn test_preload_success() {
        let client = client(MockTransport::new().respond("/prompt/", 200, vec![1u8, 2, 3]), config());
        let artwork = client.artwork_for("x");
        assert_eq!(client.preload(&artwork).await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_preload_http_error() {
        let client = client(MockTransport::new().respond("/prompt/", 502, "bad gateway"), config());
        let artwork = client.artwork_for("x");
        assert!(matches!(
            client.preload(&artwork).await,
            Err(DoodleError::NetworkFailure(_))
        ));
    }

    #[tokio::test]
    async fn test_preload_times_out() {
        let client = client(
            MockTransport::new().hang("/prompt/"),
            config().with_preload_timeout(1),
        );
        let artwork = client.artwork_for("x");
        match client.preload(&artwork).await {
            Err(DoodleError::NetworkFailure(message)) => assert!(message.contains("1s")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_preload_limit_outlasts_gemini_timeout() {
        let base = crate::transport::http::tests::stalled_server().await;
        let config = crate::config::Config::new()
            .with_gemini(crate::config::GeminiConfig::new().with_timeout(1))
            .with_pollinations(PollinationsConfig::new().with_base_url(base).with_preload_timeout(2));
        let client = crate::gemini::DoodleClient::new(&config).unwrap();
        let artwork = client.image().artwork_for("x");

        let started = std::time::Instant::now();
        match client.image().preload(&artwork).await {
            Err(DoodleError::NetworkFailure(message)) => {
                assert_eq!(message, "Image did not load within 2s")
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_download_writes_fixed_filename() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(MockTransport::new().respond("/prompt/", 200, b"PNGDATA".to_vec()), config());
        let artwork = client.artwork_for("x");

        let path = client.download(&artwork.url, dir.path()).await.unwrap();
        assert_eq!(path, dir.path().join("doodle-art.png"));
        assert_eq!(std::fs::read(path).unwrap(), b"PNGDATA");
    }
}
