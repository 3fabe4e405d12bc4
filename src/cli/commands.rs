use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::app::{AppContext, Result};
use crate::domain::{ResponseFormat, ResultBatch, UrlBatch};
use crate::server;

pub async fn serve(ctx: Arc<AppContext>) -> Result<()> {
    let addr = ctx.config.listen_addr()?;
    server::serve(ctx, addr).await
}

/// Fetch one batch and print it to stdout in the requested format.
pub async fn fetch(ctx: &AppContext, batch: UrlBatch, format: ResponseFormat) -> Result<()> {
    let rendered = fetch_to_json(ctx, batch, format).await?;
    println!("{}", rendered);
    Ok(())
}

pub async fn fetch_to_json(
    ctx: &AppContext,
    batch: UrlBatch,
    format: ResponseFormat,
) -> Result<String> {
    if batch.is_empty() {
        tracing::warn!("No URLs to fetch");
    }

    let outcomes = ctx.parallel_fetcher.fetch_all(batch.into_urls()).await;
    let results = ResultBatch::encode(outcomes, format);

    Ok(serde_json::to_string_pretty(&results)?)
}

/// Assemble the batch for `fetch`: URLs from the JSON input first, then the
/// ones given on the command line.
pub fn collect_urls(input: Option<&Path>, urls: Vec<String>) -> Result<UrlBatch> {
    let mut batch = match input {
        Some(path) if path == Path::new("-") => {
            let mut payload = Vec::new();
            std::io::stdin().read_to_end(&mut payload)?;
            UrlBatch::from_json(&payload)?
        }
        Some(path) => UrlBatch::from_json(&std::fs::read(path)?)?,
        None => UrlBatch::default(),
    };

    batch.extend(urls);
    Ok(batch)
}
