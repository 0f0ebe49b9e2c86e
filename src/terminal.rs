use std::io::Write;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use crate::sim::{
    Color, Direction, Drawable, Grid, InputEvent, InputSource, RenderTarget, BACKGROUND_COLOR,
    BORDER_COLOR,
};

const CELL: &str = "██";
const EMPTY: &str = "  ";
const HINT: &str = "Use arrow keys or WASD to move, 'q' to quit";

/// Translates a key press into a game intent.
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputEvent::Quit);
    }

    let event = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => InputEvent::Turn(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => InputEvent::Turn(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => InputEvent::Turn(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => InputEvent::Turn(Direction::Right),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputEvent::Quit,
        _ => return None,
    };
    Some(event)
}

/// Key events buffered by the terminal since the last tick.
#[derive(Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for TerminalInput {
    fn drain(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO).context("Failed to poll terminal events")? {
            if let Event::Key(key) = event::read().context("Failed to read terminal event")? {
                events.extend(map_key(key));
            }
        }
        Ok(events)
    }
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Columns and rows the board takes on screen: two columns per cell, a
/// border on every side and two status lines below.
pub fn board_size(grid: &Grid) -> (u16, u16) {
    (
        grid.columns().saturating_mul(2).saturating_add(2),
        grid.rows().saturating_add(4),
    )
}

/// Fails when a `(columns, rows)` terminal is too small for `grid`.
pub fn ensure_fits(grid: &Grid, terminal: (u16, u16)) -> Result<()> {
    let (width, height) = board_size(grid);
    ensure!(
        width <= terminal.0 && height <= terminal.1,
        "a {}x{} board needs a {width}x{height} terminal, this one is {}x{}",
        grid.columns(),
        grid.rows(),
        terminal.0,
        terminal.1
    );
    Ok(())
}

/// Per-cell colors for one frame, row-major. Later entities paint over
/// earlier ones.
pub fn paint(grid: &Grid, entities: &[&dyn Drawable]) -> Vec<Vec<Option<Color>>> {
    let columns = usize::from(grid.columns());
    let mut frame = vec![vec![None; columns]; usize::from(grid.rows())];

    for entity in entities {
        let color = entity.display_attribute();
        for cell in entity.occupies_cells() {
            if !grid.contains(cell) {
                continue;
            }
            let (col, row) = grid.index_of(cell);
            if let (Ok(col), Ok(row)) = (usize::try_from(col), usize::try_from(row)) {
                frame[row][col] = Some(color);
            }
        }
    }
    frame
}

/// Draws the board inside a `#` border, each cell two columns wide.
pub struct TerminalCanvas<W: Write> {
    out: W,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn border_row(&mut self, y: u16, inner: u16) -> std::io::Result<()> {
        queue!(
            self.out,
            MoveTo(0, y),
            SetForegroundColor(term_color(BORDER_COLOR)),
            Print("#".repeat(usize::from(inner) + 2)),
        )
    }
}

impl<W: Write> RenderTarget for TerminalCanvas<W> {
    fn render(&mut self, grid: &Grid, entities: &[&dyn Drawable]) -> Result<()> {
        let frame = paint(grid, entities);
        let inner = grid.columns().saturating_mul(2);

        queue!(self.out, SetBackgroundColor(term_color(BACKGROUND_COLOR)))?;
        self.border_row(0, inner).context("Failed to draw border")?;
        for (y, row) in (1u16..).zip(&frame) {
            queue!(
                self.out,
                MoveTo(0, y),
                SetForegroundColor(term_color(BORDER_COLOR)),
                Print("#"),
            )?;
            for cell in row {
                match cell {
                    Some(color) => queue!(self.out, SetForegroundColor(term_color(*color)), Print(CELL))?,
                    None => queue!(self.out, Print(EMPTY))?,
                }
            }
            queue!(self.out, SetForegroundColor(term_color(BORDER_COLOR)), Print("#"))?;
        }
        let bottom = grid.rows().saturating_add(1);
        self.border_row(bottom, inner).context("Failed to draw border")?;

        let length = entities.first().map_or(0, |body| body.occupies_cells().len());
        queue!(
            self.out,
            ResetColor,
            MoveTo(0, bottom.saturating_add(1)),
            Print(format!("Length: {length:<6}")),
            MoveTo(0, bottom.saturating_add(2)),
            Print(HINT),
        )?;

        self.out.flush().context("Failed to flush terminal")?;
        Ok(())
    }
}
