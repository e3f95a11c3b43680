//! Invariants of the explicit scheme under stable parameters
//!
//! - Fixed edges never change
//! - The maximum never grows and the field never goes negative
//! - Identical configurations produce bit-identical snapshot sequences
//! - Streaming delivers the same sequence as in-memory recording
//! - Diverged runs are refused by the JSON export instead of written lossily

use heat_sim_core::{
    read_snapshots_json, write_snapshots_json, ChannelSink, Field, HeatError, Integrator,
    PlateGrid, PlateSolver, RodGrid, RodSolver, SimulationConfig, Snapshot, StabilityPolicy,
    TimeParameters,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::thread;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Allowance for rounding in the final addition of a stencil update
const ROUNDING: f64 = 4.0 * f64::EPSILON;

fn assert_boundary_zero(field: &Field, step: usize) {
    for idx in 0..field.len() {
        if field.is_boundary(idx) {
            assert_eq!(
                field.data[idx], 0.0,
                "Boundary point {idx} changed at step {step}"
            );
        }
    }
}

fn check_every_step(solver: &mut dyn Integrator) {
    let mut previous_max = solver.current_field().max();
    assert_boundary_zero(solver.current_field(), 0);

    while solver.step() {
        let field = solver.current_field();
        let step = solver.step_index();

        assert_boundary_zero(field, step);

        let max = field.max();
        assert!(
            max <= previous_max + ROUNDING,
            "Maximum grew at step {step}: {previous_max} -> {max}"
        );
        previous_max = max;

        let min = field.min();
        assert!(min >= 0.0, "Negative temperature {min} at step {step}");
    }
}

#[test]
fn test_rod_invariants_hold_every_step() {
    init_tracing();
    let mut solver = RodSolver::from_config(&SimulationConfig::rod()).unwrap();
    check_every_step(&mut solver);
}

#[test]
fn test_plate_invariants_hold_every_step() {
    init_tracing();
    let config = SimulationConfig {
        total_time: 0.5,
        ..SimulationConfig::plate()
    };
    let mut solver = PlateSolver::from_config(&config).unwrap();
    check_every_step(&mut solver);
}

#[test]
fn test_random_initial_conditions_obey_maximum_principle() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..5 {
        let nx = rng.random_range(3..40);
        let ny = rng.random_range(3..40);
        // Square cells: length_y follows from the point counts
        let length_y = (ny - 1) as f64 / (nx - 1) as f64;
        let grid = PlateGrid::new(1.0, length_y, nx, ny).unwrap();

        // Largest stable dt for this spacing, scaled back a little
        let alpha = 0.01;
        let dt = 0.9 * 0.25 * grid.dx().powi(2) / alpha;
        let time = TimeParameters::new(200.0 * dt, dt).unwrap();

        let mut initial = Field::new(nx, ny);
        for idx in 0..initial.len() {
            if !initial.is_boundary(idx) {
                initial.data[idx] = rng.random::<f64>();
            }
        }

        let mut solver = PlateSolver::with_initial_field(
            grid,
            alpha,
            time,
            20,
            StabilityPolicy::Enforce,
            initial,
        )
        .unwrap();
        check_every_step(&mut solver);
    }
}

#[test]
fn test_runs_are_bit_identical() {
    for config in [
        SimulationConfig {
            total_time: 0.5,
            ..SimulationConfig::rod()
        },
        SimulationConfig {
            total_time: 0.5,
            ..SimulationConfig::plate()
        },
    ] {
        let mut first = heat_sim_core::create_solver(&config).unwrap();
        let mut second = heat_sim_core::create_solver(&config).unwrap();

        let a: Vec<Snapshot> = first.run().to_vec();
        let b: Vec<Snapshot> = second.run().to_vec();

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.step, y.step);
            assert!(
                x.field
                    .data
                    .iter()
                    .zip(&y.field.data)
                    .all(|(p, q)| p.to_bits() == q.to_bits()),
                "Snapshot at step {} differs between runs",
                x.step
            );
        }
    }
}

#[test]
fn test_snapshots_are_not_aliased() {
    let mut solver = RodSolver::from_config(&SimulationConfig::rod()).unwrap();
    let initial = solver.snapshots()[0].clone();

    for _ in 0..50 {
        solver.step();
    }

    assert_eq!(solver.snapshots()[0], initial);
    assert_ne!(solver.snapshots()[1].field, solver.snapshots()[2].field);
    assert_ne!(&solver.snapshots()[0].field, solver.current_field());
}

#[test]
fn test_unstable_run_diverges_under_warn_policy() {
    init_tracing();
    let grid = RodGrid::new(1.0, 100).unwrap();
    // s = 0.01 * 0.01 / dx^2 ~= 0.98, well past the 0.5 bound
    let time = TimeParameters::new(0.5, 0.01).unwrap();
    let mut solver = RodSolver::new(grid, 0.01, time, 20, StabilityPolicy::Warn).unwrap();
    assert!(!solver.stability().is_stable());

    solver.run();
    let field = solver.current_field();
    assert!(
        field.max() > 1.0 || field.min() < 0.0,
        "Unstable scheme should leave [0, 1]"
    );
}

#[test]
fn test_streaming_to_concurrent_consumer() {
    let mut solver = PlateSolver::from_config(&SimulationConfig {
        total_time: 0.5,
        ..SimulationConfig::plate()
    })
    .unwrap();

    let (mut sink, receiver) = ChannelSink::bounded(2);
    let consumer = thread::spawn(move || receiver.iter().collect::<Vec<Snapshot>>());

    solver.run_with_sink(&mut sink).unwrap();
    drop(sink);

    let received = consumer.join().unwrap();
    assert_eq!(received.as_slice(), solver.snapshots());
    assert_eq!(received.len(), 1 + 499 / 20);
}

#[test]
fn test_diverged_run_is_not_exported() {
    init_tracing();
    let config = SimulationConfig {
        dt: 0.01,
        total_time: 20.0,
        stability_policy: StabilityPolicy::Warn,
        ..SimulationConfig::rod()
    };
    let mut solver = RodSolver::from_config(&config).unwrap();
    solver.run();
    assert!(
        solver
            .snapshots()
            .iter()
            .any(|s| s.field.data.iter().any(|v| !v.is_finite())),
        "Run at s ~ 0.98 should overflow"
    );

    let path = std::env::temp_dir().join(format!(
        "heat-sim-diverged-{}.json",
        std::process::id()
    ));
    let result = write_snapshots_json(&path, solver.snapshots());
    assert!(
        matches!(result, Err(HeatError::NonFiniteField { .. })),
        "Expected NonFiniteField, got {result:?}"
    );
    assert!(!path.exists(), "No partial file should be written");
}

#[test]
fn test_stable_run_export_reads_back() {
    let mut solver = RodSolver::from_config(&SimulationConfig {
        total_time: 0.5,
        ..SimulationConfig::rod()
    })
    .unwrap();
    solver.run();

    let path = std::env::temp_dir().join(format!(
        "heat-sim-stable-{}.json",
        std::process::id()
    ));
    write_snapshots_json(&path, solver.snapshots()).unwrap();
    let loaded = read_snapshots_json(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.len(), solver.snapshots().len());
    for (read, written) in loaded.iter().zip(solver.snapshots()) {
        assert_eq!(read.step, written.step);
        assert_eq!(read.field.data.len(), written.field.data.len());
        for (a, b) in read.field.data.iter().zip(&written.field.data) {
            assert!((a - b).abs() <= 1e-15, "Value changed on reload: {b} -> {a}");
        }
    }
}
