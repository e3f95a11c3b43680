//! Heat Simulation Core Library
//!
//! Explicit finite-difference integration of the heat equation on a 1D rod and
//! a 2D plate with fixed (Dirichlet zero) edges.
//!
//! ## Pipeline
//!
//! - Grid construction with derived spacing and coordinates
//! - Stability analysis of `s = α·dt/dx²` against the scheme's bound
//! - Unit-pulse initial condition at the grid centre
//! - Double-buffered explicit stepping
//! - Snapshot recording every `K` steps for downstream visualization

pub mod config;
pub mod error;
pub mod grid;
pub mod snapshot;
pub mod solver;

pub use config::{DomainKind, SimulationConfig, StabilityPolicy};
pub use error::{HeatError, Result};
pub use grid::{Grid, PlateGrid, RodGrid};
pub use snapshot::{
    read_snapshots_json, write_snapshots_json, ChannelSink, Snapshot, SnapshotRecorder,
    SnapshotSink,
};
pub use solver::{
    create_solver, Field, HeatSolver, Integrator, PlateSolver, RodSolver, SolverState,
    StabilityReport, TimeParameters,
};
