use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Extension, Query},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::app::{AppContext, MultifetchError};
use crate::domain::{ResponseFormat, ResultBatch, UrlBatch};
use crate::server::error::ApiError;

pub const GREETING: &str = "Hello from the multifetch server!\n";

/// Liveness check.
pub async fn process() -> &'static str {
    GREETING
}

/// Proxy the configured versions document as-is.
pub async fn versions(Extension(ctx): Extension<Arc<AppContext>>) -> Result<Response, ApiError> {
    let body = ctx.fetcher.fetch(&ctx.config.server.versions_url).await?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

#[derive(Debug, Default, Deserialize)]
pub struct MultiFetchParams {
    pub format: Option<String>,
}

/// Fetch every URL of a JSON string array concurrently and answer with the
/// index-aligned results.
///
/// No `Content-Type` is required. Any payload that isn't a JSON string array
/// is a 400 and nothing is fetched.
pub async fn multi_fetch(
    Extension(ctx): Extension<Arc<AppContext>>,
    query: Result<Query<MultiFetchParams>, QueryRejection>,
    body: Bytes,
) -> Result<Json<ResultBatch>, ApiError> {
    let Query(params) = query.map_err(|e| MultifetchError::InvalidQuery(e.body_text()))?;
    let format = match params.format.as_deref() {
        Some(format) => format.parse::<ResponseFormat>()?,
        None => ctx.config.server.response_format,
    };

    let batch = UrlBatch::from_json(&body)?;
    tracing::info!("Multi-fetch of {} URLs ({} format)", batch.len(), format);

    let outcomes = ctx.parallel_fetcher.fetch_all(batch.into_urls()).await;

    Ok(Json(ResultBatch::encode(outcomes, format)))
}
