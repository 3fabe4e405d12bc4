use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::parallel::ParallelFetcher;
use crate::fetcher::Fetcher;

/// Everything a request handler or command needs, built once at startup.
pub struct AppContext {
    pub config: Config,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub parallel_fetcher: ParallelFetcher,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> =
            Arc::new(HttpFetcher::with_user_agent(&config.fetcher.user_agent)?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Wire the context around an existing fetcher, e.g. a scripted one in tests.
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        let parallel_fetcher =
            ParallelFetcher::with_max_concurrency(fetcher.clone(), config.fetcher.max_concurrency);

        Self {
            config,
            fetcher,
            parallel_fetcher,
        }
    }
}
