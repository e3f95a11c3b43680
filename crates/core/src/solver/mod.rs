//! Explicit heat-equation solver module
//!
//! The core abstraction is the `Integrator` trait, implemented by the generic
//! `HeatSolver<G>` for both the rod (`RodGrid`) and plate (`PlateGrid`)
//! domains. Stability analysis, the double-buffered step and snapshot
//! recording are shared; only the stencil differs per grid.
//!
//! # Example
//!
//! ```rust
//! use heat_sim_core::solver::{create_solver, Integrator};
//! use heat_sim_core::SimulationConfig;
//!
//! let config = SimulationConfig {
//!     total_time: 0.1,
//!     ..SimulationConfig::rod()
//! };
//! let mut solver = create_solver(&config).unwrap();
//! let snapshots = solver.run();
//! assert_eq!(snapshots.len(), 5);
//! ```

pub mod diffusion;
mod explicit;
mod fields;
mod profiler;
mod stability;
mod time;
#[allow(clippy::module_name_repetitions)]
mod r#trait;

// Re-exports
pub use diffusion::{step_plate_cpu, step_rod_cpu};
pub use explicit::{HeatSolver, PlateSolver, RodSolver, SolverState};
pub use fields::Field;
pub use profiler::ProfilerScope;
pub use r#trait::Integrator;
pub use stability::{stability_ratio, StabilityReport};
pub use time::TimeParameters;

use crate::config::{DomainKind, SimulationConfig};
use crate::error::Result;
use tracing::info;

/// Create a solver for the domain selected in `config`
///
/// # Arguments
///
/// * `config` - Run parameters; `config.domain` picks rod or plate
///
/// # Returns
///
/// A boxed `Integrator` with the initial snapshot already recorded
///
/// # Errors
///
/// Any validation error of `config`, or `UnstableScheme` when the stability
/// ratio exceeds the bound under `StabilityPolicy::Enforce`.
pub fn create_solver(config: &SimulationConfig) -> Result<Box<dyn Integrator>> {
    match config.domain {
        DomainKind::Rod => {
            info!(
                "Using rod solver ({} points over {} m)",
                config.nx, config.length_x
            );
            Ok(Box::new(RodSolver::from_config(config)?))
        }
        DomainKind::Plate => {
            info!(
                "Using plate solver ({}x{} points over {}x{} m)",
                config.nx, config.ny, config.length_x, config.length_y
            );
            Ok(Box::new(PlateSolver::from_config(config)?))
        }
    }
}
