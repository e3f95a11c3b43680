//! Integrator trait definition
//!
//! This module defines the `Integrator` trait, which provides a
//! dimension-agnostic interface over the rod and plate solvers.

use super::{Field, SolverState, StabilityReport};
use crate::error::Result;
use crate::snapshot::{Snapshot, SnapshotSink};

/// Dimension-agnostic interface for explicit heat-equation solvers
///
/// Both `RodSolver` and `PlateSolver` implement this trait, so callers that
/// only consume snapshots never need to know which domain is running.
pub trait Integrator: Send + Sync {
    /// Apply one explicit step
    ///
    /// Records a snapshot if the new step index is a sampling point.
    ///
    /// # Returns
    ///
    /// `true` if a step was taken, `false` once the run is `Completed`
    fn step(&mut self) -> bool;

    /// Step until `Completed` and return every recorded snapshot
    fn run(&mut self) -> &[Snapshot];

    /// Step until `Completed`, forwarding each new snapshot to `sink`
    ///
    /// Snapshots already recorded (at least the initial condition) are
    /// forwarded first, so the sink always sees the full sequence.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by the sink; the solver keeps the
    /// steps it has already taken.
    fn run_with_sink(&mut self, sink: &mut dyn SnapshotSink) -> Result<()>;

    /// Snapshots recorded so far, ordered by step
    fn snapshots(&self) -> &[Snapshot];

    /// Live field at the current step
    fn current_field(&self) -> &Field;

    fn state(&self) -> SolverState;

    /// Index of the most recent step (0 before any stepping)
    fn step_index(&self) -> usize;

    /// Simulated time of the current step in seconds
    fn time(&self) -> f64;

    /// Stability ratio and bound for this run
    fn stability(&self) -> StabilityReport;

    /// Number of spatial dimensions (1 or 2)
    fn dimensions(&self) -> usize;
}
