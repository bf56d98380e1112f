use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable colored report
    Terminal,
    /// Pretty-printed JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "causemap")]
#[command(about = "Change-event incident correlation and risk analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score change events against an incident and rank likely causes
    Analyze {
        /// Path to a JSON array of normalized change events
        #[arg(short, long)]
        events: PathBuf,

        /// Incident timestamp (RFC 3339, e.g. 2026-08-05T12:00:00Z)
        #[arg(long)]
        incident_at: String,

        /// Service the incident was reported against
        #[arg(long)]
        service: Option<String>,

        /// Environment the incident occurred in
        #[arg(long)]
        environment: Option<String>,

        /// Incident severity (critical, high, medium, low)
        #[arg(long)]
        severity: Option<String>,

        /// Free-text incident description
        #[arg(long)]
        description: Option<String>,

        /// Only consider events within this many hours before the incident
        #[arg(long, default_value = "24")]
        window_hours: i64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the scoring methodology (factors, weights, buckets, thresholds)
    Methodology {
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
