use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::MultifetchError;

/// Prefix marking a failed fetch in the legacy wire format.
pub const ERROR_PREFIX: &str = "Erreur: ";

/// Result of fetching a single URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Full response body, whatever the HTTP status was
    Success(String),
    /// Human-readable reason the body could not be obtained
    Failure(String),
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }

    /// Flatten into the legacy string entry: the body itself, or the
    /// failure message behind [`ERROR_PREFIX`].
    pub fn into_legacy(self) -> String {
        match self {
            FetchOutcome::Success(body) => body,
            FetchOutcome::Failure(message) => format!("{}{}", ERROR_PREFIX, message),
        }
    }

    pub fn into_tagged(self) -> TaggedOutcome {
        match self {
            FetchOutcome::Success(body) => TaggedOutcome {
                ok: true,
                body: Some(body),
                error: None,
            },
            FetchOutcome::Failure(message) => TaggedOutcome {
                ok: false,
                body: None,
                error: Some(message),
            },
        }
    }
}

/// Wire representation of an outcome in the `tagged` format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedOutcome {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Plain string array, failures recognisable by [`ERROR_PREFIX`]
    #[default]
    Legacy,
    /// Array of `{ok, body | error}` objects
    Tagged,
}

impl FromStr for ResponseFormat {
    type Err = MultifetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "legacy" => Ok(ResponseFormat::Legacy),
            "tagged" => Ok(ResponseFormat::Tagged),
            other => Err(MultifetchError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseFormat::Legacy => write!(f, "legacy"),
            ResponseFormat::Tagged => write!(f, "tagged"),
        }
    }
}

/// Result batch encoded for the wire, index-aligned with the request batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResultBatch {
    Legacy(Vec<String>),
    Tagged(Vec<TaggedOutcome>),
}

impl ResultBatch {
    pub fn encode(outcomes: Vec<FetchOutcome>, format: ResponseFormat) -> Self {
        match format {
            ResponseFormat::Legacy => {
                ResultBatch::Legacy(outcomes.into_iter().map(FetchOutcome::into_legacy).collect())
            }
            ResponseFormat::Tagged => {
                ResultBatch::Tagged(outcomes.into_iter().map(FetchOutcome::into_tagged).collect())
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ResultBatch::Legacy(entries) => entries.len(),
            ResultBatch::Tagged(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
