use crate::grid::{Cell, Direction::{self, *}, Grid};

#[derive(Clone, Debug)]
pub struct Snake {
    // Tail first, head last
    body: Vec<Cell>,
    direction: Direction,
    pending_direction: Direction,
    growth_pending: u32,
}

impl Snake {
    /// Lays out `size` segments ending at `head`, trailing away from `direction`.
    pub fn new(grid: &Grid, head: Cell, size: usize, direction: Direction) -> Self {
        assert!(size >= 1, "a snake needs at least one segment");
        let back = direction.opposite();

        let mut body = Vec::with_capacity(size);
        let mut pos = head;
        body.push(pos);
        for _ in 1..size {
            pos = grid.step(pos, back);
            body.push(pos);
        }
        body.reverse();

        Snake { body, direction, pending_direction: direction, growth_pending: 0 }
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Requests a new heading for the next step. Turning straight back onto
    /// the neck is ignored.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if self.body.len() > 1 && new_direction == self.direction.opposite() {
            return;
        }
        self.pending_direction = new_direction;
    }

    /// Keeps the tail in place for the next `segments` steps.
    pub fn grow(&mut self, segments: u32) {
        self.growth_pending += segments;
    }

    /// Commits the pending heading and advances one cell. The tail stays put
    /// while growth is owed.
    pub fn step(&mut self, grid: &Grid) {
        self.direction = self.pending_direction;

        let new_head = grid.step(self.head(), self.direction);
        self.body.push(new_head);

        if self.growth_pending > 0 {
            self.growth_pending -= 1;
        } else {
            self.body.remove(0);
        }
    }

    pub fn hits_self(&self) -> bool {
        let (head, rest) = match self.body.split_last() {
            Some(split) => split,
            None => return false,
        };
        rest.contains(head)
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

#[cfg(test)]
impl Snake {
    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn growth_pending(&self) -> u32 {
        self.growth_pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_from(cells: &[(i32, i32)], direction: Direction) -> Snake {
        Snake {
            body: cells.iter().map(|&(x, y)| Cell::new(x, y)).collect(),
            direction,
            pending_direction: direction,
            growth_pending: 0,
        }
    }

    #[test]
    fn new_snake_is_centered_and_heads_right() {
        let grid = Grid::new(32);
        let snake = Snake::new(&grid, grid.center(), 3, Right);
        assert_eq!(snake.body(), &[Cell::new(14, 16), Cell::new(15, 16), Cell::new(16, 16)]);
        assert_eq!(snake.head(), Cell::new(16, 16));
    }

    #[test]
    fn step_shifts_without_growing() {
        let grid = Grid::new(32);
        let mut snake = Snake::new(&grid, grid.center(), 3, Right);

        snake.step(&grid);

        assert_eq!(snake.body(), &[Cell::new(15, 16), Cell::new(16, 16), Cell::new(17, 16)]);
        assert!(!snake.occupies(Cell::new(14, 16)));
    }

    #[test]
    fn step_wraps_off_the_right_edge() {
        let grid = Grid::new(32);
        let mut snake = snake_from(&[(30, 4), (31, 4)], Right);
        snake.step(&grid);
        assert_eq!(snake.head(), Cell::new(0, 4));
        assert!(snake.body().iter().all(|&c| grid.contains(c)));
    }

    #[test]
    fn growth_suppresses_tail_removal_one_step_at_a_time() {
        let grid = Grid::new(32);
        let mut snake = Snake::new(&grid, grid.center(), 3, Right);
        snake.grow(2);

        snake.step(&grid);
        assert_eq!(snake.body()[0], Cell::new(14, 16));
        assert_eq!((snake.len(), snake.growth_pending()), (4, 1));

        snake.step(&grid);
        assert_eq!(snake.body()[0], Cell::new(14, 16));
        assert_eq!((snake.len(), snake.growth_pending()), (5, 0));

        snake.step(&grid);
        assert_eq!(snake.body()[0], Cell::new(15, 16));
        assert_eq!((snake.len(), snake.growth_pending()), (5, 0));
    }

    #[test]
    fn reversal_is_ignored_when_longer_than_one() {
        let grid = Grid::new(32);
        let mut snake = Snake::new(&grid, grid.center(), 3, Right);

        snake.set_direction(Left);
        assert_eq!(snake.pending_direction(), Right);

        snake.set_direction(Up);
        assert_eq!(snake.pending_direction(), Up);
        // Still measured against the committed heading
        snake.set_direction(Left);
        assert_eq!(snake.pending_direction(), Up);
    }

    #[test]
    fn single_segment_may_reverse() {
        let grid = Grid::new(32);
        let mut snake = Snake::new(&grid, grid.center(), 1, Right);
        snake.set_direction(Left);
        assert_eq!(snake.pending_direction(), Left);
    }

    #[test]
    fn direction_is_committed_only_on_step() {
        let grid = Grid::new(32);
        let mut snake = Snake::new(&grid, grid.center(), 3, Right);
        snake.set_direction(Down);
        assert_eq!(snake.get_direction(), Right);
        snake.step(&grid);
        assert_eq!(snake.get_direction(), Down);
        assert_eq!(snake.head(), Cell::new(16, 17));
    }

    #[test]
    fn running_into_the_body_is_detected() {
        let grid = Grid::new(32);
        // A hook shape whose head turns back into its second segment
        let mut snake = snake_from(&[(5, 5), (6, 5), (7, 5), (7, 6), (6, 6)], Left);
        assert!(!snake.hits_self());
        snake.grow(1);
        snake.set_direction(Up);
        snake.step(&grid);
        assert_eq!(snake.head(), Cell::new(6, 5));
        assert!(snake.hits_self());
    }

    #[test]
    fn chasing_the_tail_is_not_a_collision() {
        let grid = Grid::new(32);
        let mut snake = snake_from(&[(5, 5), (6, 5), (6, 6), (5, 6)], Left);
        snake.set_direction(Up);
        snake.step(&grid);
        assert_eq!(snake.head(), Cell::new(5, 5));
        assert!(!snake.hits_self());
    }
}
