use clap::Parser;
use heat_sim_core::{
    create_solver, write_snapshots_json, ChannelSink, DomainKind, Integrator, RodSolver,
    SimulationConfig, Snapshot, StabilityPolicy,
};
use std::path::PathBuf;
use std::process;
use std::thread;
use tracing_subscriber::EnvFilter;

/// Heat equation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "heat-sim-demo")]
#[command(about = "Explicit heat diffusion on a rod or plate", long_about = None)]
struct Args {
    /// Domain to simulate (rod, plate)
    #[arg(long, default_value = "plate")]
    domain: String,

    /// Domain length along x in meters
    #[arg(short = 'x', long, default_value_t = 1.0)]
    length_x: f64,

    /// Domain length along y in meters (plate only)
    #[arg(short = 'y', long, default_value_t = 1.0)]
    length_y: f64,

    /// Thermal diffusivity in m²/s
    #[arg(short, long, default_value_t = 0.01)]
    alpha: f64,

    /// Simulated duration in seconds
    #[arg(short, long, default_value_t = 2.0)]
    duration: f64,

    /// Time step in seconds
    #[arg(long, default_value_t = 0.001)]
    dt: f64,

    /// Grid points along x (default: 100 for rod, 50 for plate)
    #[arg(long)]
    nx: Option<usize>,

    /// Grid points along y (plate only, default 50)
    #[arg(long)]
    ny: Option<usize>,

    /// Record a snapshot every N steps
    #[arg(short, long, default_value_t = SimulationConfig::DEFAULT_SNAPSHOT_INTERVAL)]
    interval: usize,

    /// Integrate even if the stability ratio exceeds the scheme's bound
    #[arg(long)]
    allow_unstable: bool,

    /// Stream snapshots to a reporting thread while integrating
    #[arg(short, long)]
    stream: bool,

    /// Write the snapshot sequence to this JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Run validation checks against the reference rod scenario
    #[arg(short, long)]
    validate: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    println!("=== Heat Equation Demo ===\n");

    let preset = match args.domain.to_lowercase().as_str() {
        "rod" | "1d" => SimulationConfig::rod(),
        "plate" | "2d" => SimulationConfig::plate(),
        other => {
            println!("Unknown domain '{}', using plate", other);
            SimulationConfig::plate()
        }
    };

    let config = SimulationConfig {
        length_x: args.length_x,
        length_y: args.length_y,
        alpha: args.alpha,
        total_time: args.duration,
        dt: args.dt,
        nx: args.nx.unwrap_or(preset.nx),
        ny: args.ny.unwrap_or(preset.ny),
        snapshot_interval: args.interval,
        stability_policy: if args.allow_unstable {
            StabilityPolicy::Warn
        } else {
            StabilityPolicy::Enforce
        },
        ..preset
    };

    match config.domain {
        DomainKind::Rod => println!(
            "Rod: {:.2} m, {} points, α = {} m²/s",
            config.length_x, config.nx, config.alpha
        ),
        DomainKind::Plate => println!(
            "Plate: {:.2} x {:.2} m, {} x {} points, α = {} m²/s",
            config.length_x, config.length_y, config.nx, config.ny, config.alpha
        ),
    }
    println!(
        "Time: {:.3} s at dt = {} s, snapshot every {} steps\n",
        config.total_time, config.dt, config.snapshot_interval
    );

    let mut solver = match create_solver(&config) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let stability = solver.stability();
    println!(
        "Stability factor (s): {:.4} (limit {}, {})\n",
        stability.ratio,
        stability.limit,
        if stability.is_stable() {
            "stable"
        } else {
            "UNSTABLE"
        }
    );

    println!("Step   | Time(s) | Max       | Min        | Total heat");
    println!("-------|---------|-----------|------------|-----------");

    if args.stream {
        let (mut sink, receiver) = ChannelSink::bounded(4);
        let reporter = thread::spawn(move || {
            for snapshot in receiver {
                print_row(&snapshot);
            }
        });

        let result = solver.run_with_sink(&mut sink);
        drop(sink);
        if reporter.join().is_err() {
            eprintln!("Error: reporting thread panicked");
        }
        if let Err(e) = result {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    } else {
        for snapshot in solver.run() {
            print_row(snapshot);
        }
    }

    let field = solver.current_field();
    println!("\n=== Simulation Complete ===");
    println!(
        "Final step: {} (t = {:.3} s)",
        solver.step_index(),
        solver.time()
    );
    println!("Snapshots recorded: {}", solver.snapshots().len());
    println!("Peak temperature: {:.6}", field.max());
    println!("Remaining heat: {:.6}", field.sum());

    if let Some(path) = &args.output {
        match write_snapshots_json(path, solver.snapshots()) {
            Ok(()) => println!("Snapshots written to {}", path.display()),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    }

    if args.validate {
        run_validation_tests();
    }
}

fn print_row(snapshot: &Snapshot) {
    println!(
        "{:6} | {:7.3} | {:9.6} | {:10.3e} | {:9.6}",
        snapshot.step,
        snapshot.time,
        snapshot.field.max(),
        snapshot.field.min(),
        snapshot.field.sum()
    );
}

fn run_validation_tests() {
    println!("\n=== Running Validation Tests ===\n");

    let mut sim = match RodSolver::from_config(&SimulationConfig::rod()) {
        Ok(sim) => sim,
        Err(e) => {
            println!("  ✗ FAIL: could not build reference rod: {e}");
            return;
        }
    };
    let s = sim.stability().ratio;

    // Test 1: First step matches the stencil
    println!("Test 1: Single Step Stencil");
    sim.step();
    let field = sim.current_field();
    println!("  Pulse: {:.6} (expected {:.6})", field.data[50], 1.0 - 2.0 * s);
    println!("  Neighbours: {:.6}, {:.6} (expected {:.6})", field.data[49], field.data[51], s);
    if (field.data[50] - (1.0 - 2.0 * s)).abs() < 1e-12
        && (field.data[49] - s).abs() < 1e-12
        && (field.data[51] - s).abs() < 1e-12
    {
        println!("  ✓ PASS: Pulse spreads to neighbours");
    } else {
        println!("  ✗ FAIL: Stencil mismatch");
    }

    // Test 2: Boundaries and maximum principle over the full run
    println!("\nTest 2: Fixed Edges and Maximum Principle");
    let mut previous_max = sim.current_field().max();
    let mut edges_fixed = true;
    let mut max_monotone = true;
    let mut non_negative = true;
    while sim.step() {
        let field = sim.current_field();
        let last = field.len() - 1;
        edges_fixed &= field.data[0] == 0.0 && field.data[last] == 0.0;
        max_monotone &= field.max() <= previous_max + 4.0 * f64::EPSILON;
        non_negative &= field.min() >= 0.0;
        previous_max = field.max();
    }
    for (name, ok) in [
        ("Edges stay at zero", edges_fixed),
        ("Maximum never grows", max_monotone),
        ("Field stays non-negative", non_negative),
    ] {
        if ok {
            println!("  ✓ PASS: {name}");
        } else {
            println!("  ✗ FAIL: {name}");
        }
    }

    // Test 3: Snapshot cadence
    println!("\nTest 3: Snapshot Cadence");
    let count = sim.snapshots().len();
    println!("  Snapshots: {count} (expected 100)");
    if count == 100 {
        println!("  ✓ PASS: One snapshot every 20 steps");
    } else {
        println!("  ✗ FAIL: Unexpected snapshot count");
    }

    println!("\n=== Validation Complete ===");
}
