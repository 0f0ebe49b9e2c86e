//! Snake on a wrap-around grid, played in the terminal.
//!
//! - `sim` holds the game rules and the tick driver
//! - `terminal`, `clock` and `game` are the crossterm front-end
//! - `config` and `logging` are the process-level setup

pub mod clock;
pub mod config;
pub mod game;
pub mod logging;
pub mod sim;
pub mod terminal;
