//! Explicit time integrator
//!
//! `HeatSolver` owns its grid, a current/next buffer pair and the snapshot
//! recorder. Each step writes the stencil result into the spare buffer and
//! then swaps, so the update never reads a value written in the same step.
//!
//! ```text
//! Initialized --step--> Stepping --step--> ... --last step--> Completed
//! ```

use super::profiler::ProfilerScope;
use super::{Field, Integrator, StabilityReport, TimeParameters};
use crate::config::{require_positive, DomainKind, SimulationConfig, StabilityPolicy};
use crate::error::{HeatError, Result};
use crate::grid::{Grid, PlateGrid, RodGrid};
use crate::snapshot::{Snapshot, SnapshotRecorder, SnapshotSink};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Lifecycle of a solver run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolverState {
    /// Built, initial snapshot recorded, no step taken yet
    Initialized,
    /// At least one step taken, more remain
    Stepping,
    /// All `nt - 1` steps taken; further calls to `step` are no-ops
    Completed,
}

/// Explicit finite-difference heat solver over any `Grid`
#[derive(Debug, Clone)]
pub struct HeatSolver<G: Grid> {
    grid: G,
    alpha: f64,
    time: TimeParameters,
    stability: StabilityReport,
    current: Field,
    next: Field,
    step_index: usize,
    state: SolverState,
    recorder: SnapshotRecorder,
}

/// 1D rod solver
pub type RodSolver = HeatSolver<RodGrid>;

/// 2D plate solver
pub type PlateSolver = HeatSolver<PlateGrid>;

impl<G: Grid> HeatSolver<G> {
    /// Build a solver starting from a unit pulse at the grid centre
    ///
    /// # Errors
    ///
    /// See [`HeatSolver::with_initial_field`].
    pub fn new(
        grid: G,
        alpha: f64,
        time: TimeParameters,
        snapshot_interval: usize,
        policy: StabilityPolicy,
    ) -> Result<Self> {
        let initial = Field::unit_pulse(&grid);
        Self::with_initial_field(grid, alpha, time, snapshot_interval, policy, initial)
    }

    /// Build a solver from an arbitrary initial field
    ///
    /// Boundary values of `initial` are held fixed for the whole run.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `alpha` is not finite and positive, the snapshot
    ///   interval is zero, or `initial` does not match the grid's shape
    /// - `UnstableScheme` if the stability ratio exceeds the bound and
    ///   `policy` is `Enforce`
    pub fn with_initial_field(
        grid: G,
        alpha: f64,
        time: TimeParameters,
        snapshot_interval: usize,
        policy: StabilityPolicy,
        initial: Field,
    ) -> Result<Self> {
        require_positive("alpha", alpha)?;
        let mut recorder = SnapshotRecorder::new(snapshot_interval)?;

        let (width, height) = grid.shape();
        if (initial.width, initial.height) != (width, height)
            || initial.data.len() != width * height
        {
            return Err(HeatError::invalid_parameter(
                "initial_field",
                format!("{}x{}", initial.width, initial.height),
                "must match the grid shape",
            ));
        }

        let stability = StabilityReport::analyze(alpha, time.dt(), &grid);
        stability.check(policy)?;

        recorder.record(0, 0.0, &initial);

        Ok(Self {
            next: initial.clone(),
            current: initial,
            grid,
            alpha,
            time,
            stability,
            step_index: 0,
            state: SolverState::Initialized,
            recorder,
        })
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn time_parameters(&self) -> TimeParameters {
        self.time
    }

    /// Consume the solver and keep only its snapshot sequence
    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.recorder.into_snapshots()
    }
}

impl HeatSolver<RodGrid> {
    /// Build a rod solver from the `x` parameters of `config`
    ///
    /// # Errors
    ///
    /// Any validation error of `config`, or `UnstableScheme` under `Enforce`.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        let config = SimulationConfig {
            domain: DomainKind::Rod,
            ..*config
        };
        config.validate()?;

        let grid = RodGrid::new(config.length_x, config.nx)?;
        let time = TimeParameters::new(config.total_time, config.dt)?;
        Self::new(
            grid,
            config.alpha,
            time,
            config.snapshot_interval,
            config.stability_policy,
        )
    }
}

impl HeatSolver<PlateGrid> {
    /// Build a plate solver from `config`
    ///
    /// # Errors
    ///
    /// Any validation error of `config`, or `UnstableScheme` under `Enforce`.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        let config = SimulationConfig {
            domain: DomainKind::Plate,
            ..*config
        };
        config.validate()?;

        let grid = PlateGrid::new(config.length_x, config.length_y, config.nx, config.ny)?;
        let time = TimeParameters::new(config.total_time, config.dt)?;
        Self::new(
            grid,
            config.alpha,
            time,
            config.snapshot_interval,
            config.stability_policy,
        )
    }
}

impl<G: Grid> Integrator for HeatSolver<G> {
    fn step(&mut self) -> bool {
        if self.state == SolverState::Completed {
            return false;
        }

        let transitions = self.time.transitions();
        if self.step_index >= transitions {
            self.state = SolverState::Completed;
            return false;
        }

        self.grid.diffuse(
            self.stability.ratio,
            self.current.as_slice(),
            self.next.as_mut_slice(),
        );
        std::mem::swap(&mut self.current, &mut self.next);
        self.step_index += 1;

        let time = self.time.time_at(self.step_index);
        self.recorder.observe(self.step_index, time, &self.current);

        self.state = if self.step_index >= transitions {
            SolverState::Completed
        } else {
            SolverState::Stepping
        };
        true
    }

    fn run(&mut self) -> &[Snapshot] {
        let _scope = ProfilerScope::new("heat solver run");
        info!(
            "Integrating {}D heat equation: {} steps, dt = {} s, snapshot every {} steps",
            self.grid.dimensions(),
            self.time.transitions(),
            self.time.dt(),
            self.recorder.interval()
        );

        while self.step() {}

        debug!(
            "Run complete at step {}: {} snapshots",
            self.step_index,
            self.recorder.len()
        );
        self.recorder.snapshots()
    }

    fn run_with_sink(&mut self, sink: &mut dyn SnapshotSink) -> Result<()> {
        let _scope = ProfilerScope::new("heat solver streaming run");

        for snapshot in self.recorder.snapshots() {
            sink.emit(snapshot)?;
        }

        let mut forwarded = self.recorder.len();
        while self.step() {
            if self.recorder.len() > forwarded {
                sink.emit(&self.recorder.snapshots()[forwarded])?;
                forwarded += 1;
            }
        }
        Ok(())
    }

    fn snapshots(&self) -> &[Snapshot] {
        self.recorder.snapshots()
    }

    fn current_field(&self) -> &Field {
        &self.current
    }

    fn state(&self) -> SolverState {
        self.state
    }

    fn step_index(&self) -> usize {
        self.step_index
    }

    fn time(&self) -> f64 {
        self.time.time_at(self.step_index)
    }

    fn stability(&self) -> StabilityReport {
        self.stability
    }

    fn dimensions(&self) -> usize {
        self.grid.dimensions()
    }
}
