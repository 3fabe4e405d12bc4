//! # multifetch
//!
//! Fetches a batch of URLs concurrently and returns every body, or an error
//! marker, in the order the URLs were given.
//!
//! ## Architecture
//!
//! ```text
//! HTTP / CLI → UrlBatch → ParallelFetcher → Fetcher (one task per URL) → ResultBatch
//! ```
//!
//! - [`fetcher`]: single-URL GET primitive and the fan-out/fan-in fetcher
//! - [`domain`]: URL batches, per-URL outcomes and their wire formats
//! - [`server`]: axum routes (`/multi-fetch`, `/versions`, `/process`)
//!
//! ## Quick Start
//!
//! ```bash
//! # Serve on 127.0.0.1:8085
//! multifetch serve
//!
//! curl -X POST http://127.0.0.1:8085/multi-fetch \
//!      -d '["https://example.com", "https://example.org"]'
//!
//! # One-off batch from the command line
//! multifetch fetch https://example.com https://example.org
//! ```

/// Application context and error types.
///
/// [`AppContext`](app::AppContext) wires the configuration, the single-URL
/// fetcher and the parallel fetcher together.
pub mod app;

/// Command-line interface using clap.
///
/// - `serve [--listen ADDR]` - Run the HTTP server
/// - `fetch [--format F] [--input FILE] URL...` - Fetch one batch and print it
pub mod cli;

/// Configuration loaded from `~/.config/multifetch/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`UrlBatch`](domain::UrlBatch): ordered URLs of one request
/// - [`FetchOutcome`](domain::FetchOutcome): success or failure of one URL
/// - [`ResultBatch`](domain::ResultBatch): outcomes encoded for the wire
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait for fetching one URL
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`ParallelFetcher`](fetcher::parallel::ParallelFetcher): one task per URL, optional ceiling
pub mod fetcher;

/// HTTP server built on axum.
pub mod server;
