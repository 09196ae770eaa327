//! Dino Dash Headless Simulator
//!
//! Runs the world tick loop without a terminal, with the autopilot at the
//! keys, and reports how runs went. Uses the same `tick()` as the real game.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --ticks N       Ticks per run (default: 10000, about 5.5 minutes at 30 fps)
//!   --seed N        RNG seed (default: 42)
//!   --runs N        Number of runs with incrementing seeds (default: 1)
//!   --speed X       Obstacle scroll speed (default: 8)
//!   --lead A..B     Autopilot jump window (default: 60..84)
//!   --quiet         Only the final summary line

use dino_dash::autopilot::Autopilot;
use dino_dash::world::{
    tick, PoolKind, TickEvent, WorldState, DEFAULT_CLOUD_SPEED, DEFAULT_OBSTACLE_SPEED,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::str::FromStr;

// ── CLI Configuration ────────────────────────────────────────────────

struct SimConfig {
    ticks: u64,
    seed: u64,
    runs: u32,
    speed: f64,
    lead: (f64, f64),
    quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks: 10_000,
            seed: 42,
            runs: 1,
            speed: DEFAULT_OBSTACLE_SPEED,
            lead: (60.0, 84.0),
            quiet: false,
        }
    }
}

fn parse_args() -> SimConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = SimConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--ticks" => {
                i += 1;
                config.ticks = parse_value(&args, i, "--ticks");
            }
            "--seed" => {
                i += 1;
                config.seed = parse_value(&args, i, "--seed");
            }
            "--runs" => {
                i += 1;
                config.runs = parse_value(&args, i, "--runs");
            }
            "--speed" => {
                i += 1;
                config.speed = parse_value(&args, i, "--speed");
                if !config.speed.is_finite() || config.speed <= 0.0 {
                    eprintln!("--speed must be positive");
                    std::process::exit(1);
                }
            }
            "--lead" => {
                i += 1;
                let raw: String = parse_value(&args, i, "--lead");
                config.lead = match parse_lead(&raw) {
                    Some(lead) => lead,
                    None => {
                        eprintln!("--lead expects MIN..MAX, got {raw}");
                        std::process::exit(1);
                    }
                };
            }
            "--quiet" => config.quiet = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }
    config
}

fn parse_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|raw| raw.parse()) {
        Some(Ok(value)) => value,
        _ => {
            eprintln!("{flag} requires a valid value");
            std::process::exit(1);
        }
    }
}

fn parse_lead(raw: &str) -> Option<(f64, f64)> {
    let (min, max) = raw.split_once("..")?;
    let (min, max) = (min.trim().parse().ok()?, max.trim().parse().ok()?);
    (min <= max).then_some((min, max))
}

fn print_usage() {
    eprintln!(
        "Dino Dash Headless Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --ticks N       Ticks per run (default: 10000)\n\
         \x20 --seed N        RNG seed (default: 42)\n\
         \x20 --runs N        Number of runs with incrementing seeds (default: 1)\n\
         \x20 --speed X       Obstacle scroll speed (default: 8)\n\
         \x20 --lead A..B     Autopilot jump window (default: 60..84)\n\
         \x20 --quiet         Only final summary line\n\
         \x20 --help, -h      Show this help"
    );
}

// ── Simulation Statistics ────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
struct SimStats {
    ticks: u64,
    jumps: u64,
    crashes: u64,
    /// Displayed score at each crash.
    crash_scores: Vec<u64>,
    crashes_by_obstacle: HashMap<&'static str, u64>,
    spawned: HashMap<PoolKind, u64>,
    final_score: u64,
}

impl SimStats {
    fn record(&mut self, event: &TickEvent) {
        match event {
            TickEvent::Jumped => self.jumps += 1,
            TickEvent::Crashed { obstacle, score } => {
                self.crashes += 1;
                self.crash_scores.push(*score);
                *self.crashes_by_obstacle.entry(obstacle.name()).or_default() += 1;
            }
            TickEvent::Spawned { pool, .. } => *self.spawned.entry(*pool).or_default() += 1,
            TickEvent::Started | TickEvent::Restarted { .. } => {}
        }
    }

    /// Best score reached, counting the run still going at the end.
    fn best_score(&self) -> u64 {
        self.crash_scores
            .iter()
            .copied()
            .chain(std::iter::once(self.final_score))
            .max()
            .unwrap_or(0)
    }

    fn mean_crash_score(&self) -> Option<f64> {
        if self.crash_scores.is_empty() {
            return None;
        }
        Some(self.crash_scores.iter().sum::<u64>() as f64 / self.crash_scores.len() as f64)
    }

    fn spawned(&self, kind: PoolKind) -> u64 {
        self.spawned.get(&kind).copied().unwrap_or(0)
    }
}

// ── Simulation ───────────────────────────────────────────────────────

fn simulate(config: &SimConfig, seed: u64) -> SimStats {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut world = WorldState::with_speeds(config.speed, DEFAULT_CLOUD_SPEED);
    let pilot = Autopilot::new(config.lead.0..=config.lead.1);
    let mut stats = SimStats::default();

    for _ in 0..config.ticks {
        let keys = pilot.keys(&world);
        for event in tick(&mut world, &keys, &mut rng) {
            stats.record(&event);
        }
    }

    stats.ticks = world.tick_count;
    stats.final_score = world.display_score();
    stats
}

/// Seed for the `run`-th run; wraps instead of overflowing near `u64::MAX`.
fn run_seed(base: u64, run: u32) -> u64 {
    base.wrapping_add(run as u64)
}

fn print_run(seed: u64, stats: &SimStats) {
    println!("── Run (seed {seed}) ──");
    println!("  ticks:      {}", stats.ticks);
    println!("  jumps:      {}", stats.jumps);
    println!("  crashes:    {}", stats.crashes);
    if let Some(mean) = stats.mean_crash_score() {
        println!("  mean score at crash: {mean:.1}");
    }
    let mut by_obstacle: Vec<_> = stats.crashes_by_obstacle.iter().collect();
    by_obstacle.sort();
    for (name, count) in by_obstacle {
        println!("    {name}: {count}");
    }
    println!(
        "  spawned:    {} obstacles, {} clouds, {} ground",
        stats.spawned(PoolKind::Obstacle),
        stats.spawned(PoolKind::Cloud),
        stats.spawned(PoolKind::Ground)
    );
    println!("  best score: {}", stats.best_score());
    println!("  final score: {}", stats.final_score);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let config = parse_args();
    let mut all = Vec::new();

    for run in 0..config.runs {
        let seed = run_seed(config.seed, run);
        let stats = simulate(&config, seed);
        if !config.quiet {
            print_run(seed, &stats);
        }
        all.push(stats);
    }

    let crashes: u64 = all.iter().map(|s| s.crashes).sum();
    let jumps: u64 = all.iter().map(|s| s.jumps).sum();
    let obstacles: u64 = all.iter().map(|s| s.spawned(PoolKind::Obstacle)).sum();
    let best = all.iter().map(SimStats::best_score).max().unwrap_or(0);
    println!(
        "runs={} ticks={} crashes={} jumps={} obstacles={} best={}",
        config.runs, config.ticks, crashes, jumps, obstacles, best
    );
}
