//! Stability analysis for the explicit scheme
//!
//! The forward-Euler diffusion update is stable only while
//! `s = α·dt/dx²` stays below `1/(2d)` for `d` spatial dimensions.

use crate::config::StabilityPolicy;
use crate::error::{HeatError, Result};
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Dimensionless stability ratio `α·dt/spacing²`
#[must_use]
pub fn stability_ratio(alpha: f64, dt: f64, spacing: f64) -> f64 {
    alpha * dt / spacing.powi(2)
}

/// Stability ratio of a configured run together with the bound it must meet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilityReport {
    pub ratio: f64,
    pub limit: f64,
    pub dimensions: usize,
}

impl StabilityReport {
    /// Analyze a run on `grid`
    #[must_use]
    pub fn analyze<G: Grid + ?Sized>(alpha: f64, dt: f64, grid: &G) -> Self {
        Self {
            ratio: stability_ratio(alpha, dt, grid.spacing()),
            limit: grid.stability_limit(),
            dimensions: grid.dimensions(),
        }
    }

    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.ratio <= self.limit
    }

    /// Emit the diagnostic line and apply `policy`
    ///
    /// # Errors
    ///
    /// `UnstableScheme` when the ratio exceeds the bound and the policy is
    /// `Enforce`. Under `Warn` the violation is only logged.
    pub fn check(&self, policy: StabilityPolicy) -> Result<()> {
        info!(
            "Stability factor (s): {:.4} (should be <= {} for {}D explicit)",
            self.ratio, self.limit, self.dimensions
        );

        if self.is_stable() {
            return Ok(());
        }

        match policy {
            StabilityPolicy::Warn => {
                warn!(
                    "Stability factor {:.4} exceeds {}; results will diverge",
                    self.ratio, self.limit
                );
                Ok(())
            }
            StabilityPolicy::Enforce => Err(HeatError::UnstableScheme {
                ratio: self.ratio,
                limit: self.limit,
                dimensions: self.dimensions,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{PlateGrid, RodGrid};
    use approx::assert_relative_eq;

    #[test]
    fn test_rod_reference_ratio() {
        let grid = RodGrid::new(1.0, 100).unwrap();
        let report = StabilityReport::analyze(0.01, 0.001, &grid);
        assert_relative_eq!(report.ratio, 0.09801, epsilon = 1e-12);
        assert_eq!(report.limit, 0.5);
        assert!(report.is_stable());
    }

    #[test]
    fn test_plate_reference_ratio() {
        let grid = PlateGrid::new(1.0, 1.0, 50, 50).unwrap();
        let report = StabilityReport::analyze(0.01, 0.001, &grid);
        assert_relative_eq!(report.ratio, 0.02401, epsilon = 1e-12);
        assert_eq!(report.limit, 0.25);
        assert!(report.check(StabilityPolicy::Enforce).is_ok());
    }

    #[test]
    fn test_ratio_on_bound_is_stable() {
        let report = StabilityReport {
            ratio: 0.5,
            limit: 0.5,
            dimensions: 1,
        };
        assert!(report.is_stable());
    }

    #[test]
    fn test_policy_controls_violation() {
        let grid = PlateGrid::new(1.0, 1.0, 50, 50).unwrap();
        let report = StabilityReport::analyze(0.01, 0.02, &grid);
        assert!(!report.is_stable());

        assert!(report.check(StabilityPolicy::Warn).is_ok());
        assert!(matches!(
            report.check(StabilityPolicy::Enforce),
            Err(HeatError::UnstableScheme { dimensions: 2, .. })
        ));
    }
}
