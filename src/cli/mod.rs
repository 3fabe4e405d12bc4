pub mod commands;

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::ResponseFormat;

#[derive(Parser)]
#[command(name = "multifetch")]
#[command(about = "Fetch batches of URLs concurrently", long_about = None)]
pub struct Cli {
    /// Configuration file (default: ~/.config/multifetch/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Maximum number of fetches in flight per batch (default: unbounded)
    #[arg(short = 'j', long, global = true)]
    pub max_concurrency: Option<NonZeroUsize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to listen on, e.g. 127.0.0.1:8085
        #[arg(short, long)]
        listen: Option<String>,
    },
    /// Fetch a batch of URLs and print the JSON results
    Fetch {
        /// Output format: legacy or tagged
        #[arg(short, long)]
        format: Option<ResponseFormat>,

        /// JSON array of URLs to fetch first ("-" reads stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// URLs to fetch, after those from --input
        urls: Vec<String>,
    },
}
