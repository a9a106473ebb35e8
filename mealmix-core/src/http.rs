//! HTTP transport seam.
//!
//! Everything that touches the network goes through the [`HttpClient`]
//! trait so the fetch and remix flows can be driven by [`MockClient`] in
//! tests. The production client is a thin wrapper over `reqwest` with no
//! caching and no explicit timeout; the transport's defaults apply.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::HttpError;

/// A decoded HTTP response: status code plus UTF-8 body.
///
/// Status handling is left to the caller. TheMealDB responses are parsed
/// regardless of status, while the remix flow turns non-2xx into its own
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for HTTP clients, enabling mockability in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a GET and return the response whatever its status.
    async fn get(&self, url: &str) -> Result<HttpResponse, HttpError>;

    /// POST a JSON body, optionally with a bearer token.
    async fn post_json(
        &self,
        url: &str,
        bearer_token: Option<&str>,
        body: serde_json::Value,
    ) -> Result<HttpResponse, HttpError>;
}

/// Production HTTP client backed by a pooled `reqwest::Client`.
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, HttpError> {
        let inner = reqwest::Client::builder()
            .user_agent(concat!("mealmix/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HttpError::Request(e.to_string()))?;
        Ok(Self { inner })
    }

    async fn read(response: reqwest::Response) -> Result<HttpResponse, HttpError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::Request(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;
        let response = self
            .inner
            .get(parsed)
            .send()
            .await
            .map_err(|e| HttpError::Request(e.to_string()))?;
        Self::read(response).await
    }

    async fn post_json(
        &self,
        url: &str,
        bearer_token: Option<&str>,
        body: serde_json::Value,
    ) -> Result<HttpResponse, HttpError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;
        let mut request = self.inner.post(parsed).json(&body);
        if let Some(token) = bearer_token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| HttpError::Request(e.to_string()))?;
        Self::read(response).await
    }
}

/// A request seen by [`MockClient`], for asserting what went (or did not
/// go) over the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub bearer_token: Option<String>,
    pub body: Option<serde_json::Value>,
}

#[derive(Clone)]
enum Canned {
    Response(HttpResponse),
    Error(String),
}

/// Mock HTTP client for testing.
///
/// Responses are keyed by exact URL; every call is recorded whether or not
/// a response is registered.
#[derive(Default)]
pub struct MockClient {
    responses: HashMap<String, Canned>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a 200 response with the given JSON body.
    pub fn with_json(self, url: &str, body: serde_json::Value) -> Self {
        self.with_response(url, 200, body.to_string())
    }

    /// Register a response with an explicit status and raw body.
    pub fn with_response(mut self, url: &str, status: u16, body: impl Into<String>) -> Self {
        self.responses.insert(
            url.to_string(),
            Canned::Response(HttpResponse {
                status,
                body: body.into(),
            }),
        );
        self
    }

    /// Register a transport error for a URL.
    pub fn with_error(mut self, url: &str, error: &str) -> Self {
        self.responses
            .insert(url.to_string(), Canned::Error(error.to_string()));
        self
    }

    /// Requests seen so far, in call order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn record(&self, request: RecordedRequest) {
        self.requests.lock().unwrap().push(request);
    }

    fn respond(&self, url: &str) -> Result<HttpResponse, HttpError> {
        match self.responses.get(url) {
            Some(Canned::Response(response)) => Ok(response.clone()),
            Some(Canned::Error(e)) => Err(HttpError::Request(e.clone())),
            None => Err(HttpError::Request(format!(
                "No mock response for URL: {url}"
            ))),
        }
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        self.record(RecordedRequest {
            method: "GET",
            url: url.to_string(),
            bearer_token: None,
            body: None,
        });
        self.respond(url)
    }

    async fn post_json(
        &self,
        url: &str,
        bearer_token: Option<&str>,
        body: serde_json::Value,
    ) -> Result<HttpResponse, HttpError> {
        self.record(RecordedRequest {
            method: "POST",
            url: url.to_string(),
            bearer_token: bearer_token.map(str::to_string),
            body: Some(body),
        });
        self.respond(url)
    }
}
