//! Simulation core: grid arithmetic, the snake body, food placement and the
//! per-tick driver. Nothing in here touches the terminal.

pub mod direction;
pub mod draw;
pub mod food;
pub mod grid;
pub mod session;
pub mod snake;

pub use direction::Direction;
pub use draw::{Color, Drawable, BACKGROUND_COLOR, BORDER_COLOR, FOOD_COLOR, SNAKE_COLOR};
pub use food::Food;
pub use grid::{wrap, Cell, Grid};
pub use session::{InputEvent, InputSource, RenderTarget, Session, TickOutcome, Ticker};
pub use snake::{MoveOutcome, Snake};
