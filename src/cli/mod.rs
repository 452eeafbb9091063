pub mod places;
pub mod plan;
pub mod schema;

use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "walkplan")]
#[command(
    author,
    version,
    about = "Interest-driven walking itineraries from a catalog of places"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build an itinerary for the given interests and time budget
    Plan(PlanArgs),

    /// List catalog places with their coordinates
    Places(PlacesArgs),

    /// Print JSON Schema for config validation
    Schema,
}

#[derive(Args, Clone)]
pub struct SourceArgs {
    /// Path to config file (defaults apply when it does not exist)
    #[arg(short, long, default_value = "walkplan.yaml")]
    pub config: PathBuf,

    /// Override the catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

#[derive(Parser, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Free-text interests, e.g. "парки и архитектура"
    #[arg(short, long)]
    pub interests: String,

    /// Available time in hours
    #[arg(long)]
    pub hours: f64,

    /// Start latitude
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Start longitude
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Write the itinerary to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the maximum number of stops
    #[arg(long)]
    pub max_stops: Option<usize>,

    /// Override max parallel external calls
    #[arg(long)]
    pub concurrency: Option<usize>,
}

#[derive(Parser, Clone)]
pub struct PlacesArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}
