//! Simulation configuration
//!
//! A single structure describes both domains. Rod runs only read the `x`
//! parameters; `length_y` and `ny` are carried along so a config can be
//! switched between domains without rebuilding it.

use crate::error::{HeatError, Result};
use serde::{Deserialize, Serialize};

/// Which physical domain to integrate over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainKind {
    /// 1D rod of length `length_x`
    Rod,
    /// 2D rectangular plate `length_x` × `length_y`
    Plate,
}

/// What to do when the stability ratio exceeds the scheme's bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StabilityPolicy {
    /// Log a warning and integrate anyway
    Warn,
    /// Refuse to build the solver
    #[default]
    Enforce,
}

/// Full set of run parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub domain: DomainKind,
    /// Domain length along x (m)
    pub length_x: f64,
    /// Domain length along y (m), plate only
    pub length_y: f64,
    /// Thermal diffusivity (m²/s)
    pub alpha: f64,
    /// Total simulated duration (s)
    pub total_time: f64,
    /// Time step (s)
    pub dt: f64,
    /// Grid points along x
    pub nx: usize,
    /// Grid points along y, plate only
    pub ny: usize,
    /// Record a snapshot every this many steps
    pub snapshot_interval: usize,
    pub stability_policy: StabilityPolicy,
}

impl SimulationConfig {
    /// Default sampling interval between recorded snapshots
    pub const DEFAULT_SNAPSHOT_INTERVAL: usize = 20;

    /// 1 m rod, 100 points, α = 0.01 m²/s, 2 s at dt = 1 ms
    #[must_use]
    pub fn rod() -> Self {
        Self {
            domain: DomainKind::Rod,
            nx: 100,
            ny: 1,
            ..Self::plate()
        }
    }

    /// 1 m × 1 m plate, 50 × 50 points, α = 0.01 m²/s, 2 s at dt = 1 ms
    #[must_use]
    pub fn plate() -> Self {
        Self {
            domain: DomainKind::Plate,
            length_x: 1.0,
            length_y: 1.0,
            alpha: 0.01,
            total_time: 2.0,
            dt: 0.001,
            nx: 50,
            ny: 50,
            snapshot_interval: Self::DEFAULT_SNAPSHOT_INTERVAL,
            stability_policy: StabilityPolicy::default(),
        }
    }

    /// Check every numeric parameter the solver depends on
    ///
    /// # Errors
    ///
    /// Returns `InvalidGrid` when a used axis has fewer than two points and
    /// `InvalidParameter` for non-finite or non-positive physical values or a
    /// zero snapshot interval.
    pub fn validate(&self) -> Result<()> {
        require_positive("length_x", self.length_x)?;
        require_positive("alpha", self.alpha)?;
        require_positive("total_time", self.total_time)?;
        require_positive("dt", self.dt)?;

        if self.nx < 2 {
            return Err(HeatError::InvalidGrid {
                axis: "x",
                points: self.nx,
            });
        }

        if self.domain == DomainKind::Plate {
            require_positive("length_y", self.length_y)?;
            if self.ny < 2 {
                return Err(HeatError::InvalidGrid {
                    axis: "y",
                    points: self.ny,
                });
            }
        }

        if self.snapshot_interval == 0 {
            return Err(HeatError::invalid_parameter(
                "snapshot_interval",
                self.snapshot_interval,
                "must be at least 1",
            ));
        }

        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::plate()
    }
}

pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(HeatError::invalid_parameter(
            name,
            value,
            "must be finite and positive",
        ))
    }
}
