use std::collections::HashSet;

use rand::Rng;

use super::draw::{Color, Drawable, FOOD_COLOR};
use super::grid::{Cell, Grid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Cell,
}

impl Food {
    pub fn at(position: Cell) -> Self {
        Self { position }
    }

    /// Food on a random cell outside `excluded`.
    pub fn spawn<R: Rng + ?Sized>(grid: &Grid, rng: &mut R, excluded: &HashSet<Cell>) -> Self {
        let mut food = Self::at(grid.center());
        food.randomize_position(grid, rng, excluded);
        food
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Rejection-samples a new position until it misses `excluded`.
    ///
    /// At least one grid cell must lie outside `excluded`, otherwise this
    /// never returns.
    pub fn randomize_position<R: Rng + ?Sized>(
        &mut self,
        grid: &Grid,
        rng: &mut R,
        excluded: &HashSet<Cell>,
    ) -> Cell {
        debug_assert!(excluded.iter().filter(|c| grid.contains(**c)).count() < grid.cell_count());
        loop {
            let candidate = grid.random_cell(rng);
            if !excluded.contains(&candidate) {
                self.position = candidate;
                return candidate;
            }
        }
    }
}

impl Drawable for Food {
    fn occupies_cells(&self) -> Vec<Cell> {
        vec![self.position]
    }

    fn display_attribute(&self) -> Color {
        FOOD_COLOR
    }
}
