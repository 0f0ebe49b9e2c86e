use rand::Rng;

/// A position on the playing surface, in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Maps a raw coordinate onto a `width` x `height` torus.
pub fn wrap(cell: Cell, width: i32, height: i32) -> Cell {
    Cell {
        x: cell.x.rem_euclid(width),
        y: cell.y.rem_euclid(height),
    }
}

/// Fixed coordinate space for a session: `columns` x `rows` cells, each
/// `cell_size` surface units wide. Cells are always aligned to multiples of
/// `cell_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    columns: u16,
    rows: u16,
    cell_size: u16,
}

impl Grid {
    pub fn new(columns: u16, rows: u16, cell_size: u16) -> Self {
        Self {
            columns,
            rows,
            cell_size,
        }
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cell_size(&self) -> i32 {
        i32::from(self.cell_size)
    }

    /// Surface width, `columns * cell_size`.
    pub fn width(&self) -> i32 {
        i32::from(self.columns) * self.cell_size()
    }

    /// Surface height, `rows * cell_size`.
    pub fn height(&self) -> i32 {
        i32::from(self.rows) * self.cell_size()
    }

    pub fn cell_count(&self) -> usize {
        usize::from(self.columns) * usize::from(self.rows)
    }

    pub fn wrap(&self, cell: Cell) -> Cell {
        wrap(cell, self.width(), self.height())
    }

    /// Wraps `cell` and snaps it down to the cell it falls in.
    pub fn align(&self, cell: Cell) -> Cell {
        let (col, row) = self.index_of(self.wrap(cell));
        Cell::new(col * self.cell_size(), row * self.cell_size())
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width()).contains(&cell.x) && (0..self.height()).contains(&cell.y)
    }

    /// Start cell of a fresh snake.
    pub fn center(&self) -> Cell {
        Cell::new(
            i32::from(self.columns / 2) * self.cell_size(),
            i32::from(self.rows / 2) * self.cell_size(),
        )
    }

    /// Column/row index of an aligned cell, used by renderers.
    pub fn index_of(&self, cell: Cell) -> (i32, i32) {
        (cell.x / self.cell_size(), cell.y / self.cell_size())
    }

    /// Uniformly random aligned cell.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell::new(
            rng.gen_range(0..i32::from(self.columns)) * self.cell_size(),
            rng.gen_range(0..i32::from(self.rows)) * self.cell_size(),
        )
    }
}
