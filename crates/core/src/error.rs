//! Error types for the heat solver
//!
//! Grid and parameter validation happens before any field buffer is allocated,
//! so every error here is fatal for the run that produced it: no partial
//! result is ever returned alongside an error.

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, HeatError>;

/// Errors produced while configuring, running or exporting a simulation
#[derive(Debug, Error)]
pub enum HeatError {
    /// A grid axis has fewer than two points, so its spacing `L/(n-1)` is undefined
    #[error("invalid grid: axis '{axis}' needs at least 2 points, got {points}")]
    InvalidGrid {
        /// Axis name (`"x"` or `"y"`)
        axis: &'static str,
        /// Requested point count
        points: usize,
    },

    /// A physical or numerical parameter is out of range
    #[error("invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in `SimulationConfig`
        name: &'static str,
        /// Offending value, rendered for display
        value: String,
        /// Constraint that was violated
        reason: &'static str,
    },

    /// Stability ratio exceeds the explicit scheme's bound
    #[error(
        "unstable explicit scheme: s = {ratio:.4} exceeds {limit} for {dimensions}D diffusion"
    )]
    UnstableScheme {
        /// Computed ratio `alpha * dt / dx^2`
        ratio: f64,
        /// Bound for this dimensionality (0.5 or 0.25)
        limit: f64,
        /// Number of spatial dimensions
        dimensions: usize,
    },

    /// Snapshot holds NaN or infinite values, which JSON cannot represent
    #[error("snapshot at step {step} contains non-finite values (diverged run?)")]
    NonFiniteField {
        /// Step index of the first offending snapshot
        step: usize,
    },

    /// Streaming consumer dropped its receiver
    #[error("snapshot sink closed before the run completed")]
    SinkClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HeatError {
    /// Build an `InvalidParameter` error from any displayable value
    pub(crate) fn invalid_parameter(
        name: &'static str,
        value: impl std::fmt::Display,
        reason: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
