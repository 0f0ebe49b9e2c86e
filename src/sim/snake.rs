use std::collections::{HashSet, VecDeque};

use tracing::info;

use super::direction::Direction;
use super::draw::{Color, Drawable, SNAKE_COLOR};
use super::grid::{Cell, Grid};

/// Result of a single `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The head moved to the given cell.
    Moved(Cell),
    /// The head would have entered the body; nothing moved and the caller
    /// must `reset`.
    Collided,
}

/// The controllable body. Head is at the front of `positions`.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    grid: Grid,
    start: Cell,
    positions: VecDeque<Cell>,
    direction: Direction,
    next_direction: Option<Direction>,
    target_length: usize,
}

impl Snake {
    /// A one-cell snake at the grid center, heading right.
    pub fn new(grid: Grid) -> Self {
        let start = grid.center();
        Self {
            grid,
            start,
            positions: VecDeque::from([start]),
            direction: Direction::Right,
            next_direction: None,
            target_length: 1,
        }
    }

    /// A snake with an explicit body, head first, already at full length.
    /// Cells are wrapped and snapped onto the grid; they must be distinct.
    /// An empty body falls back to the fresh one-cell snake.
    pub fn with_body(grid: Grid, body: impl IntoIterator<Item = Cell>, direction: Direction) -> Self {
        let mut snake = Self::new(grid);
        let positions: VecDeque<Cell> = body.into_iter().map(|cell| grid.align(cell)).collect();
        debug_assert_eq!(
            positions.iter().collect::<HashSet<_>>().len(),
            positions.len(),
            "snake body overlaps itself"
        );
        if !positions.is_empty() {
            snake.target_length = positions.len();
            snake.positions = positions;
            snake.direction = direction;
        }
        snake
    }

    /// Buffers a turn for the next tick. Reversals of the current direction
    /// are dropped; a later request overwrites an earlier one.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        if self.direction.is_reversal(direction) {
            return;
        }
        self.next_direction = Some(direction);
    }

    pub fn update_direction(&mut self) {
        if let Some(direction) = self.next_direction.take() {
            self.direction = direction;
        }
    }

    pub fn advance(&mut self) -> MoveOutcome {
        let head = self.head();
        let (dx, dy) = self.direction.delta();
        let step = self.grid.cell_size();
        let new_head = self.grid.wrap(head.offset(dx * step, dy * step));

        // The segment right behind the head can never be hit moving forward.
        if self.positions.iter().skip(2).any(|&cell| cell == new_head) {
            return MoveOutcome::Collided;
        }

        self.positions.push_front(new_head);
        if self.positions.len() > self.target_length {
            self.positions.pop_back();
        }
        MoveOutcome::Moved(new_head)
    }

    /// Lengthens the snake by one segment, visible from the next `advance`.
    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    pub fn reset(&mut self) {
        info!(length = self.positions.len(), "snake bit itself, restarting");
        self.target_length = 1;
        self.positions.clear();
        self.positions.push_back(self.start);
        self.direction = Direction::Right;
        self.next_direction = None;
    }

    pub fn head(&self) -> Cell {
        *self
            .positions
            .front()
            .expect("snake body is never empty")
    }

    pub fn positions(&self) -> &VecDeque<Cell> {
        &self.positions
    }

    pub fn occupied(&self) -> HashSet<Cell> {
        self.positions.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    pub fn current_direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.next_direction
    }

    pub fn start(&self) -> Cell {
        self.start
    }
}

impl Drawable for Snake {
    fn occupies_cells(&self) -> Vec<Cell> {
        self.positions.iter().copied().collect()
    }

    fn display_attribute(&self) -> Color {
        SNAKE_COLOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(32, 24, 1)
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(grid());
        assert_eq!(snake.head(), Cell::new(16, 12));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.target_length(), 1);
        assert_eq!(snake.current_direction(), Direction::Right);
        assert_eq!(snake.pending_direction(), None);
    }

    #[test]
    fn test_reversal_request_is_dropped() {
        let mut snake = Snake::new(grid());
        snake.set_pending_direction(Direction::Left);
        assert_eq!(snake.pending_direction(), None);
        snake.update_direction();
        assert_eq!(snake.current_direction(), Direction::Right);
        assert_eq!(snake.pending_direction(), None);
    }

    #[test]
    fn test_reversal_keeps_earlier_pending_turn() {
        let mut snake = Snake::new(grid());
        snake.set_pending_direction(Direction::Up);
        snake.set_pending_direction(Direction::Left);
        assert_eq!(snake.pending_direction(), Some(Direction::Up));
    }

    #[test]
    fn test_last_pending_direction_wins() {
        let mut snake = Snake::new(grid());
        snake.set_pending_direction(Direction::Up);
        snake.set_pending_direction(Direction::Down);
        snake.update_direction();
        assert_eq!(snake.current_direction(), Direction::Down);
        assert_eq!(snake.pending_direction(), None);
    }

    #[test]
    fn test_update_without_pending_keeps_direction() {
        let mut snake = Snake::new(grid());
        snake.update_direction();
        assert_eq!(snake.current_direction(), Direction::Right);
    }

    #[test]
    fn test_advance_moves_head() {
        let mut snake = Snake::new(grid());
        assert_eq!(snake.advance(), MoveOutcome::Moved(Cell::new(17, 12)));
        assert_eq!(snake.positions(), &VecDeque::from([Cell::new(17, 12)]));
    }

    #[test]
    fn test_advance_steps_by_cell_size() {
        let mut snake = Snake::new(Grid::new(32, 24, 20));
        assert_eq!(snake.head(), Cell::new(320, 240));
        assert_eq!(snake.advance(), MoveOutcome::Moved(Cell::new(340, 240)));
    }

    #[test]
    fn test_length_catches_up_one_segment_per_tick() {
        let mut snake = Snake::new(grid());
        for _ in 0..3 {
            snake.grow();
        }
        assert_eq!(snake.target_length(), 4);

        for n in 1..=8 {
            assert!(matches!(snake.advance(), MoveOutcome::Moved(_)));
            assert_eq!(snake.len(), (n + 1).min(4));
        }
    }

    #[test]
    fn test_body_has_no_overlap_while_moving() {
        let mut snake = Snake::new(grid());
        for _ in 0..5 {
            snake.grow();
        }
        for turn in [Direction::Up, Direction::Left, Direction::Down, Direction::Left] {
            snake.set_pending_direction(turn);
            snake.update_direction();
            for _ in 0..3 {
                assert!(matches!(snake.advance(), MoveOutcome::Moved(_)));
                assert_eq!(snake.occupied().len(), snake.len());
            }
        }
    }

    #[test]
    fn test_fresh_snake_never_collides() {
        for direction in Direction::ALL {
            let mut snake = Snake::new(grid());
            snake.set_pending_direction(direction);
            snake.update_direction();
            assert!(matches!(snake.advance(), MoveOutcome::Moved(_)));
        }
    }

    #[test]
    fn test_two_segment_snake_cannot_collide() {
        let mut snake = Snake::with_body(
            grid(),
            [Cell::new(5, 5), Cell::new(4, 5)],
            Direction::Right,
        );
        // Adjacent segment is exempt even if the move lands on it.
        snake.direction = Direction::Left;
        assert_eq!(snake.advance(), MoveOutcome::Moved(Cell::new(4, 5)));
    }

    #[test]
    fn test_wrap_into_own_tail_collides() {
        let small = Grid::new(5, 5, 1);
        let mut snake = Snake::with_body(
            small,
            [
                Cell::new(4, 2),
                Cell::new(3, 2),
                Cell::new(2, 2),
                Cell::new(1, 2),
                Cell::new(0, 2),
            ],
            Direction::Right,
        );
        let before = snake.positions().clone();
        assert_eq!(snake.advance(), MoveOutcome::Collided);
        assert_eq!(snake.positions(), &before);

        snake.reset();
        assert_eq!(snake.positions(), &VecDeque::from([small.center()]));
        assert_eq!(snake.target_length(), 1);
        assert_eq!(snake.current_direction(), Direction::Right);
    }

    #[test]
    fn test_turning_into_body_collides() {
        // Head at (5,5) moving up, body curls around to (5,4).
        let mut snake = Snake::with_body(
            grid(),
            [
                Cell::new(5, 5),
                Cell::new(5, 6),
                Cell::new(4, 6),
                Cell::new(4, 5),
                Cell::new(4, 4),
                Cell::new(5, 4),
            ],
            Direction::Up,
        );
        assert_eq!(snake.advance(), MoveOutcome::Collided);
    }

    #[test]
    fn test_reset_clears_pending_direction() {
        let mut snake = Snake::new(grid());
        snake.grow();
        snake.advance();
        snake.set_pending_direction(Direction::Up);
        snake.reset();
        assert_eq!(snake.pending_direction(), None);
        assert_eq!(snake.head(), snake.start());
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_horizontal_wrap() {
        let mut snake = Snake::with_body(grid(), [Cell::new(31, 10)], Direction::Right);
        assert_eq!(snake.advance(), MoveOutcome::Moved(Cell::new(0, 10)));
        assert_eq!(snake.head(), Cell::new(0, 10));
    }

    #[test]
    fn test_vertical_wrap() {
        let mut snake = Snake::with_body(grid(), [Cell::new(3, 0)], Direction::Up);
        assert_eq!(snake.advance(), MoveOutcome::Moved(Cell::new(3, 23)));
    }

    #[test]
    fn test_body_snapped_to_cell_size() {
        let coarse = Grid::new(32, 24, 20);
        let mut snake = Snake::with_body(
            coarse,
            [Cell::new(625, 103), Cell::new(-35, 100)],
            Direction::Right,
        );
        assert_eq!(
            snake.occupies_cells(),
            vec![Cell::new(620, 100), Cell::new(600, 100)]
        );
        assert_eq!(snake.advance(), MoveOutcome::Moved(Cell::new(0, 100)));
    }

    #[test]
    fn test_empty_body_falls_back_to_fresh_snake() {
        let snake = Snake::with_body(grid(), [], Direction::Up);
        assert_eq!(snake, Snake::new(grid()));
    }

    #[test]
    fn test_drawable() {
        let snake = Snake::new(grid());
        assert_eq!(snake.occupies_cells(), vec![Cell::new(16, 12)]);
        assert_eq!(snake.display_attribute(), SNAKE_COLOR);
    }
}
