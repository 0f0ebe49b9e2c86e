use std::ops::ControlFlow;

use anyhow::Result;
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use super::direction::Direction;
use super::draw::Drawable;
use super::food::Food;
use super::grid::Grid;
use super::snake::{MoveOutcome, Snake};

/// A discrete intent from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Turn(Direction),
    Quit,
}

/// Source of player input, drained once at the start of every tick.
pub trait InputSource {
    /// Every event buffered since the previous call, oldest first.
    fn drain(&mut self) -> Result<Vec<InputEvent>>;
}

/// Sink for the per-tick picture.
pub trait RenderTarget {
    fn render(&mut self, grid: &Grid, entities: &[&dyn Drawable]) -> Result<()>;
}

/// Blocks until the next tick is due.
pub trait Ticker {
    fn wait(&mut self);
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate,
    Reset,
}

/// One game: the grid, the snake, its food and the food RNG.
pub struct Session {
    grid: Grid,
    snake: Snake,
    food: Food,
    rng: StdRng,
    ticks: u64,
}

impl Session {
    pub fn new(grid: Grid, mut rng: StdRng) -> Self {
        let snake = Snake::new(grid);
        let food = Food::spawn(&grid, &mut rng, &snake.occupied());
        Self::from_parts(grid, snake, food, rng)
    }

    pub fn from_parts(grid: Grid, snake: Snake, food: Food, rng: StdRng) -> Self {
        info!(
            columns = grid.columns(),
            rows = grid.rows(),
            cell_size = grid.cell_size(),
            "session started"
        );
        Self {
            grid,
            snake,
            food,
            rng,
            ticks: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Renderable entities, body first.
    pub fn entities(&self) -> [&dyn Drawable; 2] {
        [&self.snake, &self.food]
    }

    pub fn request_direction(&mut self, direction: Direction) {
        self.snake.set_pending_direction(direction);
    }

    /// Forwards buffered input to the snake. Breaks on a quit request.
    pub fn apply_input(&mut self, events: &[InputEvent]) -> ControlFlow<()> {
        for event in events {
            match *event {
                InputEvent::Turn(direction) => self.request_direction(direction),
                InputEvent::Quit => return ControlFlow::Break(()),
            }
        }
        ControlFlow::Continue(())
    }

    /// Advances the simulation by one step.
    pub fn tick(&mut self) -> TickOutcome {
        self.ticks += 1;
        self.snake.update_direction();

        if self.snake.advance() == MoveOutcome::Collided {
            self.snake.reset();
            return TickOutcome::Reset;
        }

        let head = self.snake.head();
        trace!(tick = self.ticks, x = head.x, y = head.y, "moved");
        if head != self.food.position() {
            return TickOutcome::Moved;
        }

        self.snake.grow();
        let occupied = self.snake.occupied();
        assert!(
            occupied.len() < self.grid.cell_count(),
            "snake fills all {} cells, food has nowhere to go",
            self.grid.cell_count()
        );
        let relocated = self.food.randomize_position(&self.grid, &mut self.rng, &occupied);
        debug!(
            target_length = self.snake.target_length(),
            x = relocated.x,
            y = relocated.y,
            "food eaten"
        );
        TickOutcome::Ate
    }

    /// Runs ticks until the input source asks to quit.
    pub fn run<I, R, T>(&mut self, input: &mut I, target: &mut R, ticker: &mut T) -> Result<()>
    where
        I: InputSource + ?Sized,
        R: RenderTarget + ?Sized,
        T: Ticker + ?Sized,
    {
        target.render(&self.grid, &self.entities())?;
        loop {
            ticker.wait();
            let events = input.drain()?;
            if self.apply_input(&events).is_break() {
                info!(ticks = self.ticks, "quit requested");
                return Ok(());
            }
            self.tick();
            target.render(&self.grid, &self.entities())?;
        }
    }
}
