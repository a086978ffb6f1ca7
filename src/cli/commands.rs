//! CLI command implementations

use super::args::{AnalyzeArgs, Cli, Command, WorkloadArgs};
use super::errors::CliResult;
use super::io;
use crate::advisor::{self, AdvisorConfig};
use crate::estimator::SampleEstimator;
use crate::observability::{log_event, Event, ObservationScope};
use crate::scorer::CostModel;
use crate::workload::{build_workload, Workload, WorkloadReport};

/// Parses arguments and dispatches to the requested command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args())
}

/// Dispatches an already-parsed invocation
pub fn run_command(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Analyze(args) => analyze(&args),
        Command::Workload(args) => workload(&args),
    }
}

/// Full pipeline: ingest profile and data, score, select, report
pub fn analyze(args: &AnalyzeArgs) -> CliResult<()> {
    let scope = ObservationScope::new("ANALYZE");

    let (workload, report) = scan_workload(&args.profile, &args.namespace)?;
    print_workload_summary(&args.namespace, &report);
    if workload.is_empty() {
        println!("no queries found for {}; nothing to recommend", args.namespace);
        scope.complete();
        return Ok(());
    }
    if args.verbose {
        print_queries(&workload);
    }

    let documents = io::read_documents(&args.data)?;
    let estimator = SampleEstimator::from_collection(&documents, args.sample_ratio, args.seed)?;
    println!(
        "sampled {} of {} documents (ratio {})",
        estimator.sample_size(),
        documents.len(),
        args.sample_ratio
    );

    let config = AdvisorConfig {
        max_index_fields: args.max_index_fields,
        cost_model: CostModel::default(),
    };
    let recommendation = match advisor::recommend(&workload, &estimator, &config) {
        Ok(recommendation) => recommendation,
        Err(err) => {
            scope.fail(&err.to_string());
            return Err(err.into());
        }
    };

    println!(
        "evaluated {} candidate indexes in {} ms ({} distinct estimates)",
        recommendation.candidates.len(),
        recommendation.scoring_millis,
        recommendation.cached_estimates
    );
    if args.verbose {
        for (i, candidate) in recommendation.candidates.iter().enumerate() {
            println!("  {:<3} {}", i, candidate);
        }
        print!("{}", recommendation.scores.format_table());
    }

    println!("recommending {} index(es)", recommendation.indexes.len());
    for index in &recommendation.indexes {
        println!("  {}", index);
    }

    scope.complete();
    Ok(())
}

/// Parses the profile export and prints the normalized workload
pub fn workload(args: &WorkloadArgs) -> CliResult<()> {
    let (workload, report) = scan_workload(&args.profile, &args.namespace)?;
    print_workload_summary(&args.namespace, &report);
    print_queries(&workload);
    Ok(())
}

fn scan_workload(
    profile: &std::path::Path,
    namespace: &str,
) -> CliResult<(Workload, WorkloadReport)> {
    log_event(Event::ProfileScanStart, &[("ns", namespace)]);
    let scan = io::read_profile_records(profile)?;
    let (workload, report) = build_workload(&scan.records, namespace);
    log_event(
        Event::WorkloadBuilt,
        &[
            ("kept", &report.kept.to_string()),
            ("skipped", &report.skipped.to_string()),
            ("malformed_lines", &scan.malformed.to_string()),
        ],
    );
    Ok((workload, report))
}

fn print_workload_summary(namespace: &str, report: &WorkloadReport) {
    println!(
        "found {} queries for namespace {} ({} skipped)",
        report.kept, namespace, report.skipped
    );
    if let (Some(first), Some(last)) = (report.first_ts, report.last_ts) {
        println!("profile spans {} .. {}", first.to_rfc3339(), last.to_rfc3339());
    }
}

fn print_queries(workload: &Workload) {
    for (i, query) in workload.iter().enumerate() {
        println!("  query #{:<3} {}", i, query);
    }
}
