//! Newline-delimited JSON file ingestion
//!
//! Two policies: the collection export is read strictly (a corrupt
//! document would silently skew every estimate), while the profile export
//! is read leniently (a malformed record is one lost workload entry, not a
//! lost run).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::Value;

use super::errors::{CliError, CliResult};
use crate::observability::Logger;
use crate::workload::ProfileRecord;

/// Outcome of a lenient profile scan
#[derive(Debug)]
pub struct ProfileScan {
    /// Records that parsed
    pub records: Vec<ProfileRecord>,
    /// Lines that did not parse as profile records
    pub malformed: usize,
}

/// Reads a collection export; any malformed line is fatal
pub fn read_documents(path: &Path) -> CliResult<Vec<Value>> {
    let file = File::open(path).map_err(|e| CliError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut documents = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| CliError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let document: Value =
            serde_json::from_str(&line).map_err(|e| CliError::json(path, number + 1, e))?;
        documents.push(document);
    }
    Ok(documents)
}

/// Reads a profile export; malformed lines are skipped with a warning
pub fn read_profile_records(path: &Path) -> CliResult<ProfileScan> {
    let file = File::open(path).map_err(|e| CliError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut scan = ProfileScan {
        records: Vec::new(),
        malformed: 0,
    };
    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| CliError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<ProfileRecord>(&line) {
            Ok(record) => scan.records.push(record),
            Err(err) => {
                scan.malformed += 1;
                Logger::warn(
                    "PROFILE_LINE_SKIPPED",
                    &[
                        ("line", &(number + 1).to_string()),
                        ("reason", &err.to_string()),
                    ],
                );
            }
        }
    }
    Ok(scan)
}
