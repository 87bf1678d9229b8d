//! corridor — two opposing pedestrian streams sharing a corridor.
//!
//! Walkers spawn at both ends and patrol to the opposite end and back, so the
//! streams cross in the middle every lap.  By default each tick resolves
//! collisions (`Model::step`); `--direct` commits desired cells without
//! resolution (`Model::tick`) and reports how many agents ended up sharing a
//! cell.
//!
//! Logging goes through `tracing`; set `RUST_LOG=info` (or `debug` for
//! per-tick timings) to see it.

mod scenario;

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use ped_agent::Agent;
use ped_core::{IndexKind, SimConfig, Strategy, Tick};
use ped_sim::{ModelBuilder, SimObserver, StepStats};

use scenario::Corridor;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "corridor", about = "Bidirectional pedestrian flow in a corridor")]
struct Args {
    /// Number of walkers, split evenly between the two streams.
    #[arg(short, long, default_value_t = 2_000)]
    agents: usize,

    /// Ticks to simulate.
    #[arg(short, long, default_value_t = 200)]
    ticks: u64,

    /// Execution strategy: serial, batch, workshare.
    #[arg(short, long, default_value = "serial")]
    strategy: Strategy,

    /// Worker threads for the parallel strategies (default: all cores).
    #[arg(short, long)]
    workers: Option<usize>,

    /// Neighbor index: brute, grid, grid:<cell_size>, rtree.
    #[arg(long, default_value = "grid")]
    index: IndexKind,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Corridor length in cells.
    #[arg(long, default_value_t = 200)]
    length: i32,

    /// Corridor width in cells.
    #[arg(long, default_value_t = 40)]
    width: i32,

    /// Log a progress line every N ticks (0 disables).
    #[arg(long, default_value_t = 25)]
    interval: u64,

    /// Commit desired cells directly, without collision resolution.
    #[arg(long)]
    direct: bool,
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Accumulates resolver outcomes and logs a line per snapshot.
#[derive(Default)]
struct FlowLog {
    moved:       usize,
    sidestepped: usize,
    blocked:     usize,
}

impl SimObserver for FlowLog {
    fn on_tick_end(&mut self, _tick: Tick, stats: &StepStats) {
        self.moved += stats.moved;
        self.sidestepped += stats.sidestepped;
        self.blocked += stats.blocked;
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &[Agent]) {
        let displaced = agents.iter().filter(|a| a.position != a.desired).count();
        info!(
            %tick,
            moved = self.moved,
            sidestepped = self.sidestepped,
            blocked = self.blocked,
            displaced,
            "progress"
        );
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        info!(%final_tick, "run complete");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let corridor = Corridor { length: args.length, width: args.width };
    let population = corridor.populate(args.agents, args.seed)?;

    let config = SimConfig {
        total_ticks:           args.ticks,
        seed:                  args.seed,
        worker_count:          args.workers,
        strategy:              args.strategy,
        index:                 args.index,
        output_interval_ticks: args.interval,
    };

    println!("=== corridor — pedsim ===");
    println!(
        "Agents: {}  |  Corridor: {}x{}  |  Ticks: {}  |  Seed: {}",
        args.agents, args.length, args.width, args.ticks, args.seed
    );

    let mut model = ModelBuilder::new(config).population(population).build()?;
    println!(
        "Strategy: {} ({} workers)  |  Index: {}  |  Mode: {}",
        model.strategy(),
        model.workers(),
        model.index_name(),
        if args.direct { "direct commit" } else { "collision resolution" },
    );
    println!();

    let t0 = Instant::now();
    let mut log = FlowLog::default();
    let mut peak_collisions = 0;
    if args.direct {
        let mut moved = 0;
        for _ in 0..args.ticks {
            moved += model.tick();
            peak_collisions = peak_collisions.max(model.collisions());
        }
        log.moved = moved;
    } else {
        model.run(&mut log);
    }
    let elapsed = t0.elapsed();

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!(
        "  {:.1} µs per tick",
        elapsed.as_secs_f64() * 1e6 / args.ticks.max(1) as f64
    );
    println!("  moves        : {}", log.moved);
    if args.direct {
        println!("  collisions   : {} now, {} peak", model.collisions(), peak_collisions);
    } else {
        println!("  sidesteps    : {}", log.sidestepped);
        println!("  blocked      : {}", log.blocked);
        println!("  collisions   : {}", model.collisions());
    }

    Ok(())
}
