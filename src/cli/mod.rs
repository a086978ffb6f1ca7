//! CLI module
//!
//! Provides the command-line interface:
//! - analyze: full recommendation pipeline over a profile and data export
//! - workload: parse and print the normalized workload only

mod args;
mod commands;
mod errors;
mod io;

pub use args::{AnalyzeArgs, Cli, Command, WorkloadArgs};
pub use commands::{analyze, run, run_command, workload};
pub use errors::{CliError, CliResult};
pub use io::{read_documents, read_profile_records, ProfileScan};
