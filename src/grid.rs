use Direction::*;

pub type GridInt = i32;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: GridInt,
    pub y: GridInt,
}

impl Cell {
    pub const fn new(x: GridInt, y: GridInt) -> Self {
        Cell { x, y }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in grid coordinates. `y` grows downwards.
    pub fn delta(self) -> (GridInt, GridInt) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

/// A square board whose edges wrap onto each other.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: GridInt,
}

impl Grid {
    pub fn new(size: GridInt) -> Self {
        assert!(size >= 2, "grid must be at least 2x2");
        Grid { size }
    }

    pub fn size(&self) -> GridInt {
        self.size
    }

    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell::new(cell.x.rem_euclid(self.size), cell.y.rem_euclid(self.size))
    }

    /// The neighbour of `cell` in `direction`, reappearing on the far edge
    /// when it walks off the board.
    pub fn step(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        self.wrap(Cell::new(cell.x + dx, cell.y + dy))
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.size / 2, self.size / 2)
    }

    /// The 2x2 block whose bottom-right cell is the centre.
    pub fn center_block(&self) -> [Cell; 4] {
        let (cx, cy) = (self.size / 2 - 1, self.size / 2 - 1);
        [
            Cell::new(cx, cy),
            Cell::new(cx + 1, cy),
            Cell::new(cx, cy + 1),
            Cell::new(cx + 1, cy + 1),
        ]
    }
}

#[cfg(test)]
impl Grid {
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.size).contains(&cell.x) && (0..self.size).contains(&cell.y)
    }
}
