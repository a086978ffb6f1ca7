//! Phase scopes and timers

use std::cell::Cell;
use std::time::Instant;

use super::logger::Logger;

/// A scope that logs `{name}_BEGIN` on creation, `{name}_COMPLETE` on
/// `complete()`, and a warning if dropped without completing
pub struct ObservationScope<'a> {
    name: &'a str,
    completed: Cell<bool>,
}

impl<'a> ObservationScope<'a> {
    /// Opens a scope and logs its begin event
    pub fn new(name: &'a str) -> Self {
        Logger::info(&format!("{}_BEGIN", name), &[]);
        Self {
            name,
            completed: Cell::new(false),
        }
    }

    /// Marks the scope successfully completed
    pub fn complete(self) {
        self.completed.set(true);
        Logger::info(&format!("{}_COMPLETE", self.name), &[]);
    }

    /// Marks the scope failed with a reason
    pub fn fail(self, reason: &str) {
        self.completed.set(true);
        Logger::error(&format!("{}_FAILED", self.name), &[("reason", reason)]);
    }

    /// True once `complete()` or `fail()` ran
    pub fn is_completed(&self) -> bool {
        self.completed.get()
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.completed.get() {
            Logger::warn(
                &format!("{}_INCOMPLETE", self.name),
                &[("reason", "scope dropped without completion")],
            );
        }
    }
}

/// A simple duration timer for phase reporting
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Starts the timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed wall-clock milliseconds
    pub fn elapsed_millis(&self) -> u128 {
        self.start.elapsed().as_millis()
    }
}
