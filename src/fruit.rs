use rand::Rng;

use crate::grid::{Cell, Grid};

/// Rejection sampling gives up after this many misses and scans the board
/// instead, so a nearly full board still finds its last free cells.
const MAX_RANDOM_ATTEMPTS: usize = 4096;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, PartialEq, Eq)]
pub struct FruitKind {
    pub name: &'static str,
    pub color: Rgb,
    pub points: u32,
    /// Relative odds against the rest of the table.
    pub weight: u32,
}

pub static FRUIT_TABLE: [FruitKind; 5] = [
    FruitKind { name: "Apple", color: Rgb(235, 64, 52), points: 1, weight: 50 },
    FruitKind { name: "Orange", color: Rgb(255, 165, 0), points: 2, weight: 30 },
    FruitKind { name: "Banana", color: Rgb(255, 215, 0), points: 3, weight: 15 },
    FruitKind { name: "Berry", color: Rgb(186, 85, 211), points: 4, weight: 4 },
    FruitKind { name: "Starfruit", color: Rgb(30, 144, 255), points: 5, weight: 1 },
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Fruit {
    pub cell: Cell,
    pub kind: &'static FruitKind,
}

/// Single weighted draw by walking the cumulative weights.
pub fn pick_kind<R: Rng + ?Sized>(rng: &mut R, table: &'static [FruitKind]) -> &'static FruitKind {
    let total: u32 = table.iter().map(|kind| kind.weight).sum();
    let mut roll = rng.gen_range(0..total.max(1));

    for kind in table {
        if roll < kind.weight {
            return kind;
        }
        roll -= kind.weight;
    }

    &table[table.len() - 1]
}

/// Uniformly random cell for which `blocked` is false, or `None` when the
/// whole board is taken.
pub fn random_free_cell<R, F>(rng: &mut R, grid: &Grid, blocked: F) -> Option<Cell>
where
    R: Rng + ?Sized,
    F: Fn(Cell) -> bool,
{
    let size = grid.size();

    for _ in 0..MAX_RANDOM_ATTEMPTS {
        let cell = Cell::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if !blocked(cell) {
            return Some(cell);
        }
    }

    let free: Vec<Cell> = (0..size)
        .flat_map(|y| (0..size).map(move |x| Cell::new(x, y)))
        .filter(|&cell| !blocked(cell))
        .collect();

    if free.is_empty() {
        None
    } else {
        Some(free[rng.gen_range(0..free.len())])
    }
}

/// Draws a fruit type and drops it on a free cell.
pub fn roll_new_fruit<R, F>(rng: &mut R, grid: &Grid, blocked: F) -> Option<Fruit>
where
    R: Rng + ?Sized,
    F: Fn(Cell) -> bool,
{
    let kind = pick_kind(rng, &FRUIT_TABLE);
    random_free_cell(rng, grid, blocked).map(|cell| Fruit { cell, kind })
}
