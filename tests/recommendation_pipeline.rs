//! End-to-End Pipeline Tests
//!
//! Drives the advisor the way the CLI does: profile records in, sample
//! estimates from real documents, recommended key patterns out.

use std::io::Write;

use indexadvisor::advisor::{recommend, AdvisorConfig};
use indexadvisor::candidates::IndexKey;
use indexadvisor::cli::{run_command, AnalyzeArgs, Cli, Command, WorkloadArgs};
use indexadvisor::estimator::SampleEstimator;
use indexadvisor::workload::{build_workload, ProfileRecord};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn profile_record(body: serde_json::Value) -> ProfileRecord {
    serde_json::from_value(body).unwrap()
}

/// Orders collection: status alone matches half the documents, region
/// narrows to a few percent, and the two fields vary independently
fn order_documents(n: usize) -> Vec<serde_json::Value> {
    (0..n)
        .map(|i| {
            json!({
                "_id": i,
                "status": if i % 2 == 0 { "open" } else { "closed" },
                "region": format!("r{}", (i / 2) % 50),
                "total": i,
            })
        })
        .collect()
}

fn write_ndjson(values: &[serde_json::Value]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for value in values {
        writeln!(file, "{}", value).unwrap();
    }
    file
}

// =============================================================================
// Library Pipeline Tests
// =============================================================================

/// A selective two-field filter earns a compound index over the sampled
/// collection.
#[test]
fn test_sampled_pipeline_recommends_compound_index() {
    let records = vec![
        profile_record(json!({
            "ns": "shop.orders", "op": "query",
            "command": {"filter": {"status": "open", "region": "r7"}}
        })),
        profile_record(json!({
            "ns": "shop.orders", "op": "query",
            "command": {"filter": {"status": "open", "region": "r7"}}
        })),
    ];
    let (workload, report) = build_workload(&records, "shop.orders");
    assert_eq!(report.kept, 2);

    let documents = order_documents(2000);
    let estimator = SampleEstimator::from_collection(&documents, 0.5, Some(42)).unwrap();

    let rec = recommend(&workload, &estimator, &AdvisorConfig::default()).unwrap();
    // both orderings of (status, region) clear the bar; ties go lexicographic
    assert_eq!(rec.indexes.first(), Some(&IndexKey::new(["region", "status"])));
    // one index serves the whole workload
    assert_eq!(rec.indexes.len(), 1);
}

/// Validation failures shrink the workload but never sink the run.
#[test]
fn test_pipeline_survives_malformed_records() {
    let records = vec![
        profile_record(json!({
            "ns": "shop.orders", "op": "query",
            "command": {"filter": {"tag": {"$in": [1, 2]}}}
        })),
        profile_record(json!({
            "ns": "shop.orders", "op": "query",
            "command": {"filter": {"status": "open", "region": "r3"}}
        })),
    ];
    let (workload, report) = build_workload(&records, "shop.orders");
    assert_eq!(report.kept, 1);
    assert_eq!(report.skipped, 1);

    let documents = order_documents(500);
    let estimator = SampleEstimator::from_collection(&documents, 1.0, Some(1)).unwrap();
    let rec = recommend(&workload, &estimator, &AdvisorConfig::default()).unwrap();
    assert!(!rec.candidates.is_empty());
}

// =============================================================================
// CLI Tests
// =============================================================================

#[test]
fn test_analyze_command_end_to_end() {
    let profile = write_ndjson(&[
        json!({
            "ns": "shop.orders", "op": "query",
            "ts": "2024-05-01T00:00:00Z",
            "command": {"filter": {"status": "open", "region": "r1"}, "limit": 10}
        }),
        json!({
            "ns": "shop.orders", "op": "insert",
            "command": {}
        }),
    ]);
    let data = write_ndjson(&order_documents(1000));

    let cli = Cli {
        command: Command::Analyze(AnalyzeArgs {
            profile: profile.path().to_path_buf(),
            data: data.path().to_path_buf(),
            namespace: "shop.orders".into(),
            sample_ratio: 0.5,
            seed: Some(7),
            max_index_fields: 3,
            verbose: true,
        }),
    };
    run_command(cli).unwrap();
}

#[test]
fn test_analyze_with_no_matching_queries_succeeds() {
    let profile = write_ndjson(&[json!({
        "ns": "other.coll", "op": "query",
        "command": {"filter": {"a": 1}}
    })]);
    let data = write_ndjson(&order_documents(10));

    let cli = Cli {
        command: Command::Analyze(AnalyzeArgs {
            profile: profile.path().to_path_buf(),
            data: data.path().to_path_buf(),
            namespace: "shop.orders".into(),
            sample_ratio: 1.0,
            seed: None,
            max_index_fields: 3,
            verbose: false,
        }),
    };
    // empty workload is not an error
    run_command(cli).unwrap();
}

#[test]
fn test_workload_command() {
    let profile = write_ndjson(&[json!({
        "ns": "shop.orders", "op": "query",
        "command": {"filter": {"status": "open"}, "sort": ["total"]}
    })]);

    let cli = Cli {
        command: Command::Workload(WorkloadArgs {
            profile: profile.path().to_path_buf(),
            namespace: "shop.orders".into(),
        }),
    };
    run_command(cli).unwrap();
}

#[test]
fn test_analyze_missing_file_fails() {
    let data = write_ndjson(&order_documents(10));
    let cli = Cli {
        command: Command::Analyze(AnalyzeArgs {
            profile: "/nonexistent/profile.ndjson".into(),
            data: data.path().to_path_buf(),
            namespace: "shop.orders".into(),
            sample_ratio: 1.0,
            seed: None,
            max_index_fields: 3,
            verbose: false,
        }),
    };
    assert!(run_command(cli).is_err());
}
