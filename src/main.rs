//! mkpkg CLI entry point.
//!
//! Handles command-line argument parsing, logging setup, error display,
//! and hands off to the scaffolder.

use anyhow::Result;
use clap::Parser;
use mkpkg::cli::Cli;
use mkpkg::core::user_friendly_error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // An explicit RUST_LOG wins over the verbosity flags.
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(cli.log_filter())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
