use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Result};
use clap::Parser;

use crate::sim::Grid;

/// Smallest board accepted on either axis.
pub const MIN_SIDE: u16 = 10;

/// Command-line configuration for a session.
#[derive(Parser, Debug, Clone)]
#[command(name = "toroid-snake")]
#[command(version, about = "Snake on a wrap-around grid")]
pub struct Config {
    /// Grid width in cells
    #[arg(long, default_value_t = 32, value_parser = clap::value_parser!(u16).range(1..=500))]
    pub columns: u16,

    /// Grid height in cells
    #[arg(long, default_value_t = 18, value_parser = clap::value_parser!(u16).range(1..=500))]
    pub rows: u16,

    /// Surface units per cell
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=64))]
    pub cell_size: u16,

    /// Ticks per second
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub speed: u32,

    /// Seed for food placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            columns: 32,
            rows: 18,
            cell_size: 1,
            speed: 20,
            seed: None,
            log_file: None,
        }
    }
}

impl Config {
    pub fn grid(&self) -> Result<Grid> {
        ensure!(
            self.columns >= MIN_SIDE && self.rows >= MIN_SIDE,
            "board must be at least {MIN_SIDE}x{MIN_SIDE}, got {}x{}",
            self.columns,
            self.rows
        );
        Ok(Grid::new(self.columns, self.rows, self.cell_size))
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.speed.max(1)
    }
}
