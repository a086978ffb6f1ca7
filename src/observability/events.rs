//! Lifecycle events
//!
//! Events are explicit and typed; one per pipeline phase boundary.

use std::fmt;

/// Observable events over one advisor run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Profile export scan begins
    ProfileScanStart,
    /// Workload normalized (kept/skipped counts attached)
    WorkloadBuilt,
    /// Candidate enumeration complete
    CandidatesGenerated,
    /// Score matrix computation begins
    ScoringStart,
    /// Score matrix computed (duration and cache size attached)
    ScoringComplete,
    /// Greedy selection complete
    SelectionComplete,
}

impl Event {
    /// Returns the event name as logged
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ProfileScanStart => "PROFILE_SCAN_START",
            Event::WorkloadBuilt => "WORKLOAD_BUILT",
            Event::CandidatesGenerated => "CANDIDATES_GENERATED",
            Event::ScoringStart => "SCORING_START",
            Event::ScoringComplete => "SCORING_COMPLETE",
            Event::SelectionComplete => "SELECTION_COMPLETE",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
