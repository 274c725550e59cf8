//! Main entry point for the unzip-data CLI application.
//!
//! With no arguments it extracts `data.zip` into the current directory
//! and prints nothing unless something goes wrong.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use unzip_data::{Cli, extract_zip_archive};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.log_filter().into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    extract_zip_archive(&cli.file, &cli.extract_dir).await
}
