pub mod http_fetcher;
pub mod parallel;

use std::error::Error as StdError;

use async_trait::async_trait;
use thiserror::Error;

/// Why a single URL could not be fetched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("GET request failed: {0}")]
    Request(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    pub(crate) fn request(err: reqwest::Error) -> Self {
        FetchError::Request(describe(&err))
    }

    pub(crate) fn body(err: reqwest::Error) -> Self {
        FetchError::Body(describe(&err))
    }

    pub(crate) fn client(err: reqwest::Error) -> Self {
        FetchError::Client(describe(&err))
    }
}

/// reqwest keeps the interesting part (refused, dns, reset...) in the source
/// chain, so flatten the whole chain into one line.
fn describe(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Fetches one URL and returns its full body as text.
///
/// Implementations perform exactly one attempt and do not look at the HTTP
/// status: an error page is still a body.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
