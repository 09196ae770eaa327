//! Dino Dash - terminal side-scroller.
//!
//! Usage:
//!   dino-dash [--seed N] [--config FILE]
//!
//! S starts, Space jumps, R restarts after a crash. q, Esc or Ctrl-C quits.

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use dino_dash::build_info;
use dino_dash::config::GameConfig;
use dino_dash::render::run_frame;
use dino_dash::ui::{is_quit, KeyLatch, TerminalCanvas};
use dino_dash::world::{TickEvent, WorldState};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

#[derive(Default)]
struct CliArgs {
    seed: Option<u64>,
    config_path: Option<PathBuf>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                cli.seed = Some(parse_value(&args, i, "--seed"));
            }
            "--config" => {
                i += 1;
                cli.config_path = Some(parse_value(&args, i, "--config"));
            }
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                eprintln!("Run 'dino-dash --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }
    cli
}

/// Value following a flag, or exit with a usage error.
fn parse_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|raw| raw.parse()) {
        Some(Ok(value)) => value,
        _ => {
            eprintln!("{flag} requires a valid value");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        "Dino Dash - jump the cacti\n\
         \n\
         Usage: dino-dash [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --seed N       Fixed random seed\n\
         \x20 --config FILE  Settings file (default: platform config dir)\n\
         \x20 --version, -v  Show version information\n\
         \x20 --help, -h     Show this help\n\
         \n\
         Keys: S start, Space jump, R restart, q/Esc quit"
    );
}

/// Logging stays off unless a log file is configured; the TUI owns the terminal.
fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    builder.format_timestamp(None);

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> io::Result<()> {
    let cli = parse_args();

    let mut config = GameConfig::load(cli.config_path.as_deref())?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    init_logging(config.log_file.as_deref())?;

    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let mut world = WorldState::with_speeds(config.obstacle_speed, config.cloud_speed);
    log::info!(
        "{} starting (seed {:?}, obstacle speed {})",
        build_info::version_line(),
        config.seed,
        config.obstacle_speed
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.hide_cursor()?;
    let mut canvas = TerminalCanvas::new(terminal);

    let result = run_game(&mut world, &mut rng, &mut canvas, &config);

    // Cleanup terminal, even if the loop failed
    disable_raw_mode()?;
    canvas
        .terminal_mut()
        .backend_mut()
        .execute(LeaveAlternateScreen)?;
    canvas.terminal_mut().show_cursor()?;

    let crashes = result?;
    log::info!("quit after {} ticks", world.tick_count);
    println!(
        "Score: {} ({} crash{})",
        world.display_score(),
        crashes,
        if crashes == 1 { "" } else { "es" }
    );
    Ok(())
}

/// Fixed-interval frame loop. Returns the number of crashes when the player quits.
fn run_game<B: Backend>(
    world: &mut WorldState,
    rng: &mut ChaCha8Rng,
    canvas: &mut TerminalCanvas<B>,
    config: &GameConfig,
) -> io::Result<u32> {
    let frame_interval = config.frame_interval();
    let mut keys = KeyLatch::new(config.key_hold());
    let mut crashes = 0;
    let mut next_frame = Instant::now();

    loop {
        // Drain input until the next frame is due
        loop {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            if let Event::Key(key_event) = event::read()? {
                if is_quit(&key_event) {
                    return Ok(crashes);
                }
                keys.handle_key_event(&key_event, Instant::now());
            }
        }

        keys.set_now(Instant::now());
        let events = run_frame(world, &keys, rng, canvas)?;
        crashes += events
            .iter()
            .filter(|e| matches!(e, TickEvent::Crashed { .. }))
            .count() as u32;

        next_frame += frame_interval;
        // Skip missed frames after a stall instead of bursting
        let now = Instant::now();
        if next_frame < now {
            next_frame = now;
        }
    }
}
