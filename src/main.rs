use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use multifetch::app::AppContext;
use multifetch::cli::{commands, Cli, Commands};
use multifetch::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `fetch` output stays pipeable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(max_concurrency) = cli.max_concurrency {
        config.fetcher.max_concurrency = Some(max_concurrency);
    }

    match cli.command {
        Commands::Serve { listen } => {
            if let Some(listen) = listen {
                config.server.listen = listen;
            }
            config.validate()?;

            let ctx = Arc::new(AppContext::new(config)?);
            commands::serve(ctx).await?;
        }
        Commands::Fetch {
            format,
            input,
            urls,
        } => {
            let format = format.unwrap_or(config.server.response_format);
            let batch = commands::collect_urls(input.as_deref(), urls)?;

            let ctx = AppContext::new(config)?;
            commands::fetch(&ctx, batch, format).await?;
        }
    }

    Ok(())
}
