use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{OffLevel, Verbosity};
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use minepad_core::{
    Buttons, CellCount, Coord, DEFAULT_MINES, DEFAULT_SIZE, DriveOutcome, InputSource, Session,
    drive, new_session,
};

mod keyboard;
mod screen;

use keyboard::Keyboard;
use screen::Screen;

/// Pause after a game ends before input is accepted again.
const RESULT_GRACE: Duration = Duration::from_millis(500);

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper on a six-button pad, played in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<OffLevel>,

    /// Where log output goes, the terminal itself is taken by the board
    #[arg(long, default_value = "minepad.log")]
    log_file: PathBuf,

    /// Board side length
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: Coord,

    /// Number of mines
    #[arg(long, default_value_t = DEFAULT_MINES)]
    mines: CellCount,

    /// Force a seed instead of random, only for the first game
    #[arg(short, long)]
    seed: Option<u64>,

    /// Input sampling interval in milliseconds
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,
}

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let Some(level) = args.verbose.log_level() else {
        return Ok(());
    };
    let file = File::create(&args.log_file)
        .with_context(|| format!("could not create log file {}", args.log_file.display()))?;
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn start_session(args: &Args, seed: Option<u64>) -> anyhow::Result<Session> {
    let seed = seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);
    Ok(new_session(args.size, args.mines, seed)?)
}

/// Plays sessions back to back until the player quits.
fn play(args: &Args) -> anyhow::Result<()> {
    let mut keyboard = Keyboard::new(Duration::from_millis(args.tick_ms));
    let mut screen = Screen::new(io::stdout());
    let mut session = start_session(args, args.seed)?;

    loop {
        match drive(&mut session, &mut keyboard, &mut screen)? {
            DriveOutcome::Quit => return Ok(()),
            DriveOutcome::Finished(status) => log::info!("Session ended: {:?}", status),
        }

        keyboard.discard_for(RESULT_GRACE)?;
        loop {
            match keyboard.next_sample()? {
                None => return Ok(()),
                Some(buttons) if buttons.contains(Buttons::A) => break,
                Some(_) => {}
            }
        }
        session = start_session(args, None)?;
        keyboard.discard_for(RESULT_GRACE)?;
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;
    // fail before touching the terminal
    minepad_core::GameConfig::square(args.size, args.mines)?;
    log::debug!("App started with {:?}", args);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let res = play(&args);

    // Restore terminal, always runs, even on error
    let _ = execute!(stdout, Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();

    res
}
