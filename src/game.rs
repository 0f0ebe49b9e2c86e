use std::io::{stdout, Stdout, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::clock::FixedRateTicker;
use crate::config::Config;
use crate::sim::Session;
use crate::terminal::{ensure_fits, TerminalCanvas, TerminalInput};

/// A terminal play session: owns the simulation and its collaborators.
pub struct Game {
    session: Session,
    input: TerminalInput,
    canvas: TerminalCanvas<Stdout>,
    ticker: FixedRateTicker,
}

impl Game {
    pub fn new(config: &Config) -> Result<Self> {
        let grid = config.grid()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Game {
            session: Session::new(grid, rng),
            input: TerminalInput::new(),
            canvas: TerminalCanvas::new(stdout()),
            ticker: FixedRateTicker::new(config.tick_period()),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        let size = terminal::size().context("Failed to read terminal size")?;
        ensure_fits(self.session.grid(), size)?;

        let screen = RawScreen::enter()?;
        let result = self
            .session
            .run(&mut self.input, &mut self.canvas, &mut self.ticker);

        let restore = screen.leave();
        info!(ticks = self.session.ticks(), "game closed");
        result.and(restore)
    }
}

/// Raw mode on the alternate screen. Dropping it, including while a panic
/// unwinds, puts the terminal back.
struct RawScreen {
    active: bool,
}

impl RawScreen {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        let screen = RawScreen { active: true };
        execute!(
            stdout(),
            EnterAlternateScreen,
            SetTitle("Snake"),
            Hide,
            Clear(ClearType::All)
        )
        .context("Failed to prepare terminal")?;
        Ok(screen)
    }

    fn leave(mut self) -> Result<()> {
        self.active = false;
        Self::restore()
    }

    fn restore() -> Result<()> {
        let mut out = stdout();
        execute!(out, Show, LeaveAlternateScreen).context("Failed to leave alternate screen")?;
        terminal::disable_raw_mode().context("Failed to disable raw mode")?;
        out.flush()?;
        Ok(())
    }
}

impl Drop for RawScreen {
    fn drop(&mut self) {
        if self.active {
            let _ = Self::restore();
        }
    }
}
