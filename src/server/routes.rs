use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::app::AppContext;
use crate::server::handlers;

/// Build the application router around a shared context.
///
/// Each path accepts a single method; anything else gets a 405 before the
/// handler runs. Batch payloads have no size cap.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/process", get(handlers::process))
        .route("/versions", get(handlers::versions))
        .route(
            "/multi-fetch",
            post(handlers::multi_fetch).layer(DefaultBodyLimit::disable()),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(ctx)),
        )
}
