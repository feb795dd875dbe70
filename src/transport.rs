// Transport seam — one HTTP exchange per call, nothing else.
//
// The facade builds a fully-described ApiRequest (method, URL, token,
// JSON body) and hands it here. The production transport is a thin
// reqwest wrapper; tests inject their own implementation to observe or
// forbid traffic. Status handling stays out of this layer: a completed
// exchange is Ok regardless of status code, and only a failed exchange
// (connect, DNS, protocol) is an error.

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

use crate::error::Result;

/// A fully-resolved request, ready to put on the wire.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Sent as the `Authentication` header when present.
    pub auth_token: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// The raw outcome of a completed exchange.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Issues one HTTP request per invocation. No retries, no timeouts —
/// those belong to the embedding application or the external queue.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// Production transport backed by a shared `reqwest::Client`.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("sift/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        debug!(method = %request.method, url = %request.url, "moderation service request");

        let mut builder = self.client.request(request.method, &request.url);
        if let Some(token) = &request.auth_token {
            builder = builder.header("Authentication", token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status = status, "moderation service response");

        Ok(ApiResponse { status, body })
    }
}
