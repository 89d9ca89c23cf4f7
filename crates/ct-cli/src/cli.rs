//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ct_core::Granularity;

/// Construction-site carbon tracker.
///
/// Aggregates logged site activity (energy, fuel, transport, material,
/// waste, water) into emission and saving trends and projects net
/// emissions a few buckets ahead.
#[derive(Debug, Parser)]
#[command(name = "ct", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Bucket granularity (daily or monthly). Overrides the config default.
    #[arg(short, long, global = true)]
    pub granularity: Option<Granularity>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Aggregate activity records into the emission trend.
    Trend {
        /// JSON file of activity records, or `-` for stdin.
        input: PathBuf,

        /// Output as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Project net emissions six buckets past the observed trend.
    Forecast {
        /// JSON file of activity records, or `-` for stdin.
        input: PathBuf,

        /// Output as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show the effective emission-factor table.
    Factors {
        /// Output as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}
