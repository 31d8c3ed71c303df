use crate::{
    error::{DoodleError, Result},
    transport::traits::{HttpResponse, HttpTransport},
};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

enum Reply {
    Respond(HttpResponse),
    Fail(String),
    Hang,
}

struct Route {
    fragment: String,
    reply: Reply,
}

/// Scripted transport: the first route whose fragment appears in the URL answers.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, fragment: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.push(fragment, Reply::Respond(HttpResponse::new(status, body)))
    }

    pub fn respond_json(self, fragment: &str, status: u16, body: serde_json::Value) -> Self {
        self.respond(fragment, status, body.to_string())
    }

    pub fn fail(self, fragment: &str, message: &str) -> Self {
        self.push(fragment, Reply::Fail(message.to_string()))
    }

    pub fn hang(self, fragment: &str) -> Self {
        self.push(fragment, Reply::Hang)
    }

    fn push(self, fragment: &str, reply: Reply) -> Self {
        self.routes.lock().unwrap().push(Route {
            fragment: fragment.to_string(),
            reply,
        });
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    async fn answer(&self, method: Method, url: &str, body: Option<serde_json::Value>) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_string(),
            body,
        });

        let outcome = {
            let routes = self.routes.lock().unwrap();
            match routes.iter().find(|r| url.contains(&r.fragment)) {
                Some(Route {
                    reply: Reply::Respond(response),
                    ..
                }) => Some(Ok(response.clone())),
                Some(Route {
                    reply: Reply::Fail(message),
                    ..
                }) => Some(Err(DoodleError::NetworkFailure(message.clone()))),
                Some(Route {
                    reply: Reply::Hang, ..
                }) => None,
                None => Some(Err(DoodleError::NetworkFailure(format!(
                    "no route for {}",
                    url
                )))),
            }
        };

        match outcome {
            Some(result) => result,
            None => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(DoodleError::NetworkFailure("hung request woke up".into()))
            }
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, url: &str, _timeout: Option<Duration>) -> Result<HttpResponse> {
        self.answer(Method::Get, url, None).await
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        _timeout: Option<Duration>,
    ) -> Result<HttpResponse> {
        self.answer(Method::Post, url, Some(body.clone())).await
    }
}
