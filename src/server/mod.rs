//! HTTP front end over the fetchers.

pub mod error;
pub mod handlers;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::app::{AppContext, Result};

pub use error::ApiError;
pub use routes::router;

/// Bind `addr` and serve until Ctrl-C or SIGTERM.
pub async fn serve(ctx: Arc<AppContext>, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    let app = router(ctx.clone());

    tracing::info!(
        "Listening on {} (max concurrency: {})",
        listener.local_addr()?,
        ctx.parallel_fetcher
            .max_concurrency()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "unbounded".to_string())
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to set up SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining in-flight requests");
}
