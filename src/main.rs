use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use snake_charmer::config::{GridSize, SimulationConfig, THEME_CHARMER};
use snake_charmer::engine::SimulationEngine;
use snake_charmer::headless;
use snake_charmer::input::{poll_input, GameInput};
use snake_charmer::logging::{self, LogTarget};
use snake_charmer::terminal_runtime::{install_panic_hook, TerminalSession};
use snake_charmer::ticker::{drive, Ticker};
use tracing::info;

/// Longest wait for a key press before the loop re-checks the ticker.
const MAX_INPUT_WAIT: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON settings file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells per side of the square grid.
    #[arg(long)]
    grid_size: Option<u16>,

    /// Milliseconds between simulation ticks.
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for target placement, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a terminal UI and print one JSON snapshot per tick.
    #[arg(long)]
    headless: bool,

    /// Stop a headless run after this many ticks.
    #[arg(long, requires = "headless")]
    max_ticks: Option<u64>,

    /// Per-tick target nudges for a headless run, e.g. "uu.rl".
    #[arg(long, requires = "headless")]
    script: Option<String>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if cli.headless {
        logging::init(LogTarget::Stderr)?;
        return run_headless(&cli, &config);
    }

    logging::init(LogTarget::File)?;
    install_panic_hook();
    run_interactive(&config)
}

fn resolve_config(cli: &Cli) -> io::Result<SimulationConfig> {
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };

    if let Some(cells) = cli.grid_size {
        config.grid = GridSize::square(cells);
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_interval_ms = tick_ms;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    config
        .validate()
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
    Ok(config)
}

fn run_headless(cli: &Cli, config: &SimulationConfig) -> io::Result<()> {
    let nudges = headless::parse_script(cli.script.as_deref().unwrap_or_default())
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
    let mut engine = SimulationEngine::from_config(config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    headless::run(&mut engine, &nudges, cli.max_ticks, &mut out)?;
    Ok(())
}

fn run_interactive(config: &SimulationConfig) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut engine = SimulationEngine::from_config(config);
    let mut ticker = Ticker::new(
        Duration::from_millis(config.tick_interval_ms),
        Instant::now(),
    );
    info!(
        width = config.grid.width,
        height = config.grid.height,
        tick_ms = config.tick_interval_ms,
        "simulation started"
    );

    loop {
        session.draw(&engine.snapshot(), &THEME_CHARMER)?;

        let wait = ticker
            .remaining(Instant::now())
            .map_or(MAX_INPUT_WAIT, |remaining| remaining.min(MAX_INPUT_WAIT));
        if let Some(input) = poll_input(wait)? {
            match input {
                GameInput::Quit => break,
                GameInput::Direction(direction) => engine.relocate_target(direction),
                GameInput::Restart if engine.is_terminal() => {
                    engine.reset();
                    ticker.restart(Instant::now());
                }
                GameInput::Restart => {}
            }
        }

        drive(&mut ticker, &mut engine, Instant::now());
    }

    info!(score = engine.snapshot().score, "quit");
    Ok(())
}
