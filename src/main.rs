use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{LevelFilter, error, info, warn};
use simplelog::{Config, WriteLogger};
use snake::config::{ConfigError, GameConfig, TICK_INTERVAL, default_config_path, default_log_path};
use snake::game::{GameState, TickOutcome};
use snake::input::{GameInput, InputHandler};
use snake::renderer;
use snake::terminal_runtime::{TerminalSession, install_panic_hook};
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Read grid dimensions from this JSON file instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Field width in cells; overrides the configuration file.
    #[arg(long)]
    grid_width: Option<u16>,

    /// Field height in cells; overrides the configuration file.
    #[arg(long)]
    grid_height: Option<u16>,

    /// Seed the random number generator for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the log here instead of the default data directory.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to set up logging")]
    Logger(#[from] log::SetLoggerError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("toroid-snake: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    init_logging(cli.log_file.clone().unwrap_or_else(default_log_path))?;

    let config = load_config(&cli)?;
    let bounds = config.bounds();
    info!(
        "starting on a {}×{} grid, tick every {:?}",
        bounds.width, bounds.height, TICK_INTERVAL
    );

    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(bounds, seed),
        None => GameState::new(bounds),
    };

    install_panic_hook();
    let mut session = TerminalSession::enter()?;
    game_loop(&mut session, state)?;
    drop(session);

    info!("quit");
    Ok(())
}

fn init_logging(path: PathBuf) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    WriteLogger::init(LevelFilter::Info, Config::default(), File::create(path)?)?;
    Ok(())
}

fn load_config(cli: &Cli) -> Result<GameConfig, ConfigError> {
    let file_config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => match default_config_path() {
            Ok(path) => GameConfig::load(&path)?,
            Err(e) => {
                warn!("{e}; using default grid");
                GameConfig::default()
            }
        },
    };

    let config = file_config.with_overrides(cli.grid_width, cli.grid_height);
    config.validate()?;
    Ok(config)
}

fn game_loop(session: &mut TerminalSession, mut state: GameState) -> io::Result<()> {
    let mut input = InputHandler::new();
    let mut last_tick = Instant::now();

    loop {
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &state))?;

        let timeout = TICK_INTERVAL.saturating_sub(last_tick.elapsed());
        for game_input in input.poll_frame(timeout)? {
            if game_input == GameInput::Quit {
                info!(
                    "quit after {} ticks, {} eaten, {} resets",
                    state.tick_count, state.collectibles_eaten, state.resets
                );
                return Ok(());
            }
            state.apply_input(game_input);
        }

        if last_tick.elapsed() >= TICK_INTERVAL {
            if state.tick() == TickOutcome::Collided {
                info!("reset #{}", state.resets);
            }
            last_tick = Instant::now();
        }
    }
}
