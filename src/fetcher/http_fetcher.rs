use async_trait::async_trait;
use reqwest::Client;

use crate::fetcher::{FetchError, Fetcher};

pub const DEFAULT_USER_AGENT: &str = concat!("multifetch/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed [`Fetcher`]. No request timeout is set: a hanging server
/// holds the call until the transport gives up.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .gzip(true)
            .brotli(true)
            .user_agent(user_agent)
            .build()
            .map_err(FetchError::client)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::request)?;

        let status = response.status();
        let body = response.bytes().await.map_err(FetchError::body)?;

        tracing::debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
