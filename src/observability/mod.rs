//! Observability
//!
//! Structured logging, lifecycle events and phase timers. Observability is
//! read-only: no side effects on the recommendation pipeline, no async, no
//! background threads.

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::{ObservationScope, Timer};

/// Log a lifecycle event with fields at INFO level
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::info(event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event_does_not_panic() {
        log_event(Event::ProfileScanStart, &[("ns", "db.coll")]);
        log_event(Event::SelectionComplete, &[]);
    }
}
