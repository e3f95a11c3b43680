//! Time discretization

use crate::config::require_positive;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Duration, step size and the derived step count `nt = floor(T/dt)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeParameters {
    total_time: f64,
    dt: f64,
    nt: usize,
}

impl TimeParameters {
    /// # Errors
    ///
    /// `InvalidParameter` if either value is not finite and positive.
    pub fn new(total_time: f64, dt: f64) -> Result<Self> {
        require_positive("total_time", total_time)?;
        require_positive("dt", dt)?;

        Ok(Self {
            total_time,
            dt,
            nt: (total_time / dt).floor() as usize,
        })
    }

    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Step count; the integrator visits steps `1..nt`
    pub fn nt(&self) -> usize {
        self.nt
    }

    /// Number of stencil applications in a full run
    pub fn transitions(&self) -> usize {
        self.nt.saturating_sub(1)
    }

    /// Simulated time at step `n`
    pub fn time_at(&self, step: usize) -> f64 {
        step as f64 * self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HeatError;

    #[test]
    fn test_reference_step_count() {
        let time = TimeParameters::new(2.0, 0.001).unwrap();
        assert_eq!(time.nt(), 2000);
        assert_eq!(time.transitions(), 1999);
        assert_eq!(time.time_at(20), 0.02);
    }

    #[test]
    fn test_duration_shorter_than_step() {
        let time = TimeParameters::new(0.0005, 0.001).unwrap();
        assert_eq!(time.nt(), 0);
        assert_eq!(time.transitions(), 0);
    }

    #[test]
    fn test_rejects_non_positive_dt() {
        assert!(matches!(
            TimeParameters::new(1.0, 0.0),
            Err(HeatError::InvalidParameter { name: "dt", .. })
        ));
        assert!(matches!(
            TimeParameters::new(f64::INFINITY, 0.1),
            Err(HeatError::InvalidParameter {
                name: "total_time",
                ..
            })
        ));
    }
}
