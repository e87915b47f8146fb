use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};

use super::error::Result;

/// Status and body of one GET.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    body: String,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Performs a single GET, no retries. Transport failures come back as
/// `DownloadError::Transport` with the client's own message.
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<HttpResponse>;
}

/// `HttpClient` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<HttpResponse> {
        let res = self
            .client
            .get(url)
            .header("User-Agent", "compat-tree-rust/1.0")
            .headers(headers)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        Ok(HttpResponse::new(status, body))
    }
}
