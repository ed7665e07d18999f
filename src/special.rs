use rand::Rng;

use crate::config::{GameConfig, Millis};
use crate::grid::{Cell, Grid};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MegaFruit {
    pub cells: [Cell; 4],
    pub spawned_at: Millis,
}

impl MegaFruit {
    pub fn covers(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }
}

/// The rare 2x2 fruit. At most one is on the board, and it disappears on its
/// own after `duration_ms`.
#[derive(Clone, Debug)]
pub struct SpecialFruit {
    current: Option<MegaFruit>,
    spawn_chance: f64,
    points: u32,
    duration_ms: Millis,
}

impl SpecialFruit {
    pub fn new(config: &GameConfig) -> Self {
        SpecialFruit {
            current: None,
            spawn_chance: config.special_spawn_chance,
            points: config.special_points,
            duration_ms: config.special_duration_ms,
        }
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&MegaFruit> {
        self.current.as_ref()
    }

    /// One spawn roll. A hit whose footprint is `blocked` is dropped, not retried.
    pub fn maybe_spawn<R, F>(&mut self, rng: &mut R, grid: &Grid, now: Millis, blocked: F) -> bool
    where
        R: Rng + ?Sized,
        F: Fn(Cell) -> bool,
    {
        if self.is_active() || rng.gen::<f64>() >= self.spawn_chance {
            return false;
        }

        let cells = grid.center_block();
        if cells.iter().any(|&c| blocked(c)) {
            tracing::trace!(now, "mega fruit spawn blocked");
            return false;
        }

        self.current = Some(MegaFruit { cells, spawned_at: now });
        true
    }

    /// Clears the fruit once its lifetime has run out. Returns whether it did.
    pub fn expire(&mut self, now: Millis) -> bool {
        let expired = matches!(
            &self.current,
            Some(fruit) if now.saturating_sub(fruit.spawned_at) >= self.duration_ms
        );

        if expired {
            self.current = None;
        }
        expired
    }

    /// Consumes the fruit if `head` lands on it, returning the points earned.
    pub fn try_eat(&mut self, head: Cell) -> Option<u32> {
        if !self.current.map_or(false, |fruit| fruit.covers(head)) {
            return None;
        }
        self.current = None;
        Some(self.points)
    }
}
