//! CLI argument definitions using clap
//!
//! Commands:
//! - indexadvisor analyze --profile <path> --data <path> --namespace <ns>
//! - indexadvisor workload --profile <path> --namespace <ns>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Workload-driven index recommendations for document databases
#[derive(Parser, Debug)]
#[command(name = "indexadvisor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a profiled workload and recommend indexes
    Analyze(AnalyzeArgs),

    /// Parse a profile export and print the normalized workload
    Workload(WorkloadArgs),
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to the newline-delimited JSON profile export
    #[arg(long)]
    pub profile: PathBuf,

    /// Path to the newline-delimited JSON collection export
    #[arg(long)]
    pub data: PathBuf,

    /// Namespace to analyze, as "<db>.<collection>"
    #[arg(long)]
    pub namespace: String,

    /// Fraction of the collection to sample for estimates
    #[arg(long, default_value_t = 0.001)]
    pub sample_ratio: f64,

    /// Seed for the sample draw (defaults to entropy)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Longest index key to consider
    #[arg(long, default_value_t = 3)]
    pub max_index_fields: usize,

    /// Print queries, candidates and the score table
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug)]
pub struct WorkloadArgs {
    /// Path to the newline-delimited JSON profile export
    #[arg(long)]
    pub profile: PathBuf,

    /// Namespace to analyze, as "<db>.<collection>"
    #[arg(long)]
    pub namespace: String,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
