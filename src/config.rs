use std::{env, path::PathBuf};

use crate::grid::GridInt;

/// Milliseconds on the host's monotonic clock.
pub type Millis = u64;

const SCORES_ENV: &str = "SNAKE_SCORES";
const LOG_ENV: &str = "SNAKE_LOG";
const DEFAULT_SCORES_FILE: &str = "scores.json";
const DEFAULT_LOG_FILE: &str = "snake32.log";

/// Tunables for one game session.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub grid_size: GridInt,
    pub initial_length: usize,
    /// Logical moves per second without turbo.
    pub ticks_per_second: u64,

    pub special_spawn_chance: f64,
    pub special_points: u32,
    pub special_duration_ms: Millis,
    pub glow_duration_ms: Millis,

    pub turbo_duration_ms: Millis,
    pub turbo_cooldown_ms: Millis,
    pub turbo_multiplier: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid_size: 32,
            initial_length: 3,
            ticks_per_second: 12,
            special_spawn_chance: 0.01,
            special_points: 10,
            special_duration_ms: 5000,
            glow_duration_ms: 2000,
            turbo_duration_ms: 1200,
            turbo_cooldown_ms: 12000,
            turbo_multiplier: 0.45,
        }
    }
}

impl GameConfig {
    pub fn base_interval_ms(&self) -> Millis {
        1000 / self.ticks_per_second.max(1)
    }
}

/// Where the process keeps its files. Nothing here is required to be set.
#[derive(Clone, Debug)]
pub struct Paths {
    pub scores: PathBuf,
    pub log: PathBuf,
}

impl Paths {
    pub fn from_env() -> Self {
        let pick = |key: &str, default: &str| {
            env::var_os(key).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(default))
        };

        Paths {
            scores: pick(SCORES_ENV, DEFAULT_SCORES_FILE),
            log: pick(LOG_ENV, DEFAULT_LOG_FILE),
        }
    }
}
