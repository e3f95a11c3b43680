//! Run timing helper.
//!
//! Logs elapsed wall-clock time through `tracing` when dropped.

use std::time::Instant;
use tracing::debug;

/// A profiling scope that measures elapsed time using RAII.
pub struct ProfilerScope {
    start: Instant,
    name: &'static str,
}

impl ProfilerScope {
    /// Creates a new profiling scope.
    pub fn new(name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            name,
        }
    }

    /// Gets elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ProfilerScope {
    fn drop(&mut self) {
        debug!("{} took {:.3} ms", self.name, self.elapsed_ms());
    }
}
