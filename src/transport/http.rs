use crate::{
    error::{DoodleError, Result},
    transport::traits::{HttpResponse, HttpTransport},
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

/// reqwest-backed transport. The client has no global timeout; every call
/// states its own, so one slow endpoint never caps another.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| DoodleError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    fn bounded(request: RequestBuilder, timeout: Option<Duration>) -> RequestBuilder {
        match timeout {
            Some(limit) => request.timeout(limit),
            None => request,
        }
    }

    async fn collect(response: reqwest::Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| DoodleError::NetworkFailure(format!("Failed reading body: {}", e.without_url())))?;
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, timeout: Option<Duration>) -> Result<HttpResponse> {
        let response = Self::bounded(self.client.get(url), timeout)
            .send()
            .await
            .map_err(|e| DoodleError::NetworkFailure(format!("GET request failed: {}", e.without_url())))?;
        Self::collect(response).await
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        timeout: Option<Duration>,
    ) -> Result<HttpResponse> {
        let request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(body);
        let response = Self::bounded(request, timeout)
            .send()
            .await
            .map_err(|e| DoodleError::NetworkFailure(format!("POST request failed: {}", e.without_url())))?;
        Self::collect(response).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::time::Instant;
    use tokio::net::TcpListener;

    /// Accepts connections and never answers them.
    pub(crate) async fn stalled_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_per_request_timeout() {
        let base = stalled_server().await;
        let transport = ReqwestTransport::new().unwrap();

        let started = Instant::now();
        let result = transport
            .get(&format!("{}/slow?key=secret", base), Some(Duration::from_millis(300)))
            .await;

        match result {
            Err(DoodleError::NetworkFailure(message)) => assert!(!message.contains("secret")),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
