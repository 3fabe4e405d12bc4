use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::app::MultifetchError;

/// Error returned by a handler, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(MultifetchError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            MultifetchError::Decode(_)
            | MultifetchError::InvalidQuery(_)
            | MultifetchError::UnknownFormat(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::debug!("Request rejected: {}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<MultifetchError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
