use serde::Deserialize;

use crate::app::{MultifetchError, Result};

/// Ordered list of URLs submitted together. Duplicates are kept and fetched
/// once per occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct UrlBatch(Vec<String>);

impl UrlBatch {
    pub fn new(urls: Vec<String>) -> Self {
        Self(urls)
    }

    /// Decode a JSON array of strings. Anything else is rejected.
    pub fn from_json(payload: &[u8]) -> Result<Self> {
        serde_json::from_slice(payload).map_err(MultifetchError::Decode)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn urls(&self) -> &[String] {
        &self.0
    }

    pub fn into_urls(self) -> Vec<String> {
        self.0
    }
}

impl Extend<String> for UrlBatch {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}
