use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::domain::FetchOutcome;
use crate::fetcher::Fetcher;

/// Fans a batch of URLs out to one task per URL and collects the outcomes
/// back in input order.
///
/// Without a ceiling every URL of a batch is in flight at once. With one, at
/// most `max_concurrency` fetches run at a time and the rest wait for a permit.
pub struct ParallelFetcher {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    semaphore: Option<Arc<Semaphore>>,
    max_concurrency: Option<NonZeroUsize>,
}

impl ParallelFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self::with_max_concurrency(fetcher, None)
    }

    pub fn with_max_concurrency(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        max_concurrency: Option<NonZeroUsize>,
    ) -> Self {
        Self {
            fetcher,
            semaphore: max_concurrency.map(|n| Arc::new(Semaphore::new(n.get()))),
            max_concurrency,
        }
    }

    pub fn max_concurrency(&self) -> Option<NonZeroUsize> {
        self.max_concurrency
    }

    /// Fetch every URL and return exactly one outcome per URL, at the same
    /// index. Returns once all fetches have finished.
    pub async fn fetch_all(&self, urls: Vec<String>) -> Vec<FetchOutcome> {
        if urls.is_empty() {
            return Vec::new();
        }

        let started = Instant::now();
        let total = urls.len();

        let handles: Vec<_> = urls
            .into_iter()
            .enumerate()
            .map(|(index, url)| {
                let fetcher = self.fetcher.clone();
                let semaphore = self.semaphore.clone();

                tokio::spawn(async move {
                    let _permit = match semaphore {
                        Some(semaphore) => match semaphore.acquire_owned().await {
                            Ok(permit) => Some(permit),
                            Err(e) => return FetchOutcome::Failure(e.to_string()),
                        },
                        None => None,
                    };

                    fetch_single_url(fetcher.as_ref(), index, &url).await
                })
            })
            .collect();

        // Handles are joined in spawn order, so slot i always belongs to url i.
        let outcomes: Vec<FetchOutcome> = join_all(handles)
            .await
            .into_iter()
            .enumerate()
            .map(|(index, joined)| match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!("Fetch task #{} did not complete: {}", index, e);
                    FetchOutcome::Failure(format!("fetch task did not complete: {}", e))
                }
            })
            .collect();

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        tracing::info!(
            "Fetched {} URLs in {:?} ({} failed)",
            total,
            started.elapsed(),
            failed
        );

        outcomes
    }
}

async fn fetch_single_url(
    fetcher: &(dyn Fetcher + Send + Sync),
    index: usize,
    url: &str,
) -> FetchOutcome {
    match fetcher.fetch(url).await {
        Ok(body) => FetchOutcome::Success(body),
        Err(e) => {
            tracing::warn!("Fetch #{} {} failed: {}", index, url, e);
            FetchOutcome::Failure(e.to_string())
        }
    }
}
