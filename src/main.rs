use std::panic;
use std::path::PathBuf;
use std::time::Instant;

use bonus_snake::audio::{AudioSink, Silent, TerminalBell};
use bonus_snake::config::{GRID, INPUT_POLL_INTERVAL, THEME};
use bonus_snake::error::AppError;
use bonus_snake::game::GameState;
use bonus_snake::input::{self, GameInput, RawInput};
use bonus_snake::lifecycle::Controller;
use bonus_snake::logging;
use bonus_snake::renderer;
use bonus_snake::terminal_runtime::{restore_terminal_after_panic, TerminalSession};
use bonus_snake::ui::hud::HudInfo;
use clap::Parser;
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Snake with a timed bonus food, in the terminal")]
struct Cli {
    /// Seed food placement for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Do not ring the terminal bell on game events.
    #[arg(long)]
    mute: bool,

    /// Disable mouse capture and the clickable control pad.
    #[arg(long = "no-mouse")]
    no_mouse: bool,

    /// Write a diagnostic log to the platform data directory.
    #[arg(long)]
    log: bool,

    /// Write a diagnostic log to PATH (implies --log).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Minimum level written to the log.
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    if let Some(path) = log_path(&cli)? {
        logging::init(&path, cli.log_level)?;
    }

    install_panic_hook();
    run(&cli)
}

fn log_path(cli: &Cli) -> Result<Option<PathBuf>, AppError> {
    if let Some(path) = &cli.log_file {
        return Ok(Some(path.clone()));
    }
    if !cli.log {
        return Ok(None);
    }

    logging::default_log_path()
        .map(Some)
        .ok_or(AppError::NoLogDir)
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(GRID, seed),
        None => GameState::new(GRID),
    };
    let audio: Box<dyn AudioSink> = if cli.mute {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell)
    };
    let mut controller = Controller::new(state, audio);

    let mut session = TerminalSession::enter(!cli.no_mouse)?;
    controller.start(Instant::now());

    loop {
        let hud_info = HudInfo {
            bonus_remaining: controller.bonus_remaining(Instant::now()),
        };
        let mut pad = None;
        session.terminal_mut().draw(|frame| {
            pad = Some(renderer::render(frame, controller.state(), hud_info, &THEME));
        })?;

        let game_input = match input::poll_input(INPUT_POLL_INTERVAL)? {
            Some(RawInput::Game(game_input)) => Some(game_input),
            Some(RawInput::Click { column, row }) => {
                pad.and_then(|pad| pad.hit_test(column, row))
            }
            None => None,
        };

        match game_input {
            Some(GameInput::Quit) => break,
            Some(GameInput::Direction(direction)) => {
                controller.change_direction(direction);
            }
            Some(GameInput::Restart) => {
                controller.restart(Instant::now());
            }
            None => {}
        }

        controller.advance(Instant::now());
        for event in controller.drain_events() {
            log::trace!("{event:?}");
        }
    }

    log::info!("quit with score {}", controller.state().score);
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal_after_panic();
        default_hook(panic_info);
    }));
}
