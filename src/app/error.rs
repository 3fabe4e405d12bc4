use thiserror::Error;

use crate::config::ConfigError;
use crate::fetcher::FetchError;

#[derive(Error, Debug)]
pub enum MultifetchError {
    #[error("Invalid URL batch: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error("Unknown response format: {0}")]
    UnknownFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MultifetchError>;
