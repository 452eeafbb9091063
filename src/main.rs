use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod catalog;
mod cli;
mod config;
mod error;
mod geo;
mod output;
mod planner;
mod provider;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing - only show logs with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("walkplan=debug")
    } else {
        EnvFilter::new("walkplan=warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Plan(args) => cli::plan::execute(args).await,
        Commands::Places(args) => cli::places::execute(args),
        Commands::Schema => cli::schema::execute(),
    }
}
