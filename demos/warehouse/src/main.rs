//! warehouse — command-line driver for the warehouse robot simulation.
//!
//! Gathers the run configuration (defaults, then an optional JSON file, then
//! flags), steps the simulation until every box is racked or a budget runs
//! out, and reports boxes remaining and moves made.  With `--output`, floor
//! snapshots and per-step counters are recorded as CSV for later playback.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use wh_core::WarehouseConfig;
use wh_output::{CsvWriter, SimOutputObserver};
use wh_sim::{NoopObserver, Sim, SimObserver};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "warehouse", about = "Robots relocating boxes onto racks on a grid floor")]
struct Args {
    /// JSON file holding a warehouse config; flags below override its fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Floor width in cells.
    #[arg(long)]
    width: Option<u32>,

    /// Floor height in cells.
    #[arg(long)]
    height: Option<u32>,

    /// Total boxes, including the ones that become racks.
    #[arg(long)]
    boxes: Option<u32>,

    /// Number of robots.
    #[arg(long)]
    robots: Option<u32>,

    /// RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Wall-clock budget in seconds.
    #[arg(long, default_value_t = 10)]
    max_seconds: u64,

    /// Stop after this many steps even if boxes remain.
    #[arg(long)]
    max_steps: Option<u64>,

    /// Directory for CSV output.  Nothing is written when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Record the floor every N steps (0 = final floor only).
    #[arg(long, default_value_t = 1)]
    snapshot_interval: u64,

    /// Print the floor before and after the run.
    #[arg(long)]
    show: bool,
}

// ── Configuration ─────────────────────────────────────────────────────────────

fn load_config(args: &Args) -> Result<WarehouseConfig> {
    let config = match &args.config {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let cfg: WarehouseConfig = serde_json::from_str(&contents)
                .with_context(|| format!("parsing config {}", path.display()))?;
            info!("loaded config from {}", path.display());
            cfg
        }
        None => WarehouseConfig::default(),
    };
    Ok(apply_overrides(config, args))
}

fn apply_overrides(mut config: WarehouseConfig, args: &Args) -> WarehouseConfig {
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(boxes) = args.boxes {
        config.total_boxes = boxes;
    }
    if let Some(robots) = args.robots {
        config.num_robots = robots;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    Complete,
    OutOfTime,
    OutOfSteps,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StopReason::Complete   => "all boxes racked",
            StopReason::OutOfTime  => "time budget exhausted",
            StopReason::OutOfSteps => "step budget exhausted",
        })
    }
}

struct Budget {
    wall:  Duration,
    steps: Option<u64>,
}

/// Step until the floor is cleared or a budget runs out.
fn drive<O: SimObserver>(sim: &mut Sim, observer: &mut O, budget: &Budget) -> StopReason {
    let t0 = Instant::now();
    loop {
        if sim.is_complete() {
            return StopReason::Complete;
        }
        if t0.elapsed() >= budget.wall {
            return StopReason::OutOfTime;
        }
        if budget.steps.is_some_and(|max| sim.steps_taken() >= max) {
            return StopReason::OutOfSteps;
        }
        sim.step_with(observer);
    }
}

fn run_recorded(sim: &mut Sim, dir: &Path, interval: u64, budget: &Budget) -> Result<StopReason> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let writer = CsvWriter::new(dir)?;
    let mut obs = SimOutputObserver::new(writer, interval);

    let reason = drive(sim, &mut obs, budget);
    sim.finish(&mut obs);

    if let Some(e) = obs.take_error() {
        warn!("output error: {e}");
    }
    Ok(reason)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    info!(
        "floor {}x{}, {} boxes, {} robots, seed {}",
        config.width, config.height, config.total_boxes, config.num_robots, config.seed,
    );

    let mut sim = Sim::new(config).context("cannot build warehouse")?;
    if args.show {
        println!("{}", sim.grid());
    }

    let budget = Budget {
        wall:  Duration::from_secs(args.max_seconds),
        steps: args.max_steps,
    };

    let t0 = Instant::now();
    let reason = match &args.output {
        Some(dir) => run_recorded(&mut sim, dir, args.snapshot_interval, &budget)?,
        None => drive(&mut sim, &mut NoopObserver, &budget),
    };
    let elapsed = t0.elapsed();

    if args.show {
        println!("{}", sim.grid());
    }
    println!("Stopped:          {reason}");
    println!("Elapsed:          {:.3} s", elapsed.as_secs_f64());
    println!("Steps:            {}", sim.steps_taken());
    println!("Boxes remaining:  {}", sim.boxes_remaining());
    println!("Moves made:       {}", sim.moves_made());
    if let Some(dir) = &args.output {
        println!("Output:           {}", dir.display());
    }

    Ok(())
}
