use rand::{rngs::ThreadRng, Rng};

use crate::clock::SimClock;
use crate::config::{GameConfig, Millis};
use crate::fruit::{self, Fruit};
use crate::grid::{Cell, Direction, Grid};
use crate::snake::Snake;
use crate::special::SpecialFruit;
use crate::turbo::{Turbo, TurboGauge};

/// What a single `update` call did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Update {
    /// No move this call. Timers may still have run.
    Idle,
    Stepped,
    Ate { points: u32 },
    AteMega { points: u32 },
    /// The snake bit itself. Reported once, on the transition.
    GameOver { score: u32 },
}

/// Everything a renderer may look at. Borrowed, never mutable.
#[derive(Clone, Debug)]
pub struct Snapshot<'a> {
    pub grid_size: i32,
    /// Tail first, head last.
    pub body: &'a [Cell],
    pub head_char: char,
    pub fruit: Option<Fruit>,
    pub mega: Option<[Cell; 4]>,
    pub mega_hue: f64,
    pub glow_hue: Option<f64>,
    pub score: u32,
    pub turbo: TurboGauge,
    pub game_over: bool,
}

/// One session of play. Owns every piece of mutable game state; callers feed
/// it intents and the current time.
pub struct GameState<R = ThreadRng> {
    rng: R,
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    fruit: Option<Fruit>,
    fruit_rolls: u64,
    special: SpecialFruit,
    turbo: Turbo,
    clock: SimClock,
    score: u32,
    glow_until: Millis,
    game_over: bool,
}

impl GameState<ThreadRng> {
    pub fn new(config: GameConfig, now: Millis) -> Self {
        GameState::new_with_rng(config, now, rand::thread_rng())
    }
}

impl<R: Rng> GameState<R> {
    pub fn new_with_rng(config: GameConfig, now: Millis, rng: R) -> Self {
        let grid = Grid::new(config.grid_size);
        let snake = Snake::new(&grid, grid.center(), config.initial_length, Direction::Right);

        let mut game = GameState {
            rng,
            grid,
            snake,
            fruit: None,
            fruit_rolls: 0,
            special: SpecialFruit::new(&config),
            turbo: Turbo::new(&config),
            clock: SimClock::new(config.base_interval_ms(), now),
            score: 0,
            glow_until: 0,
            game_over: false,
            config,
        };
        game.roll_new_fruit();

        tracing::info!(grid = game.grid.size(), now, "new game");
        game
    }

    pub fn update(&mut self, now: Millis) -> Update {
        if self.game_over {
            return Update::Idle;
        }

        if self.turbo.expire(now) {
            tracing::debug!(now, "turbo off");
        }

        let did_step = self.clock.tick(now, self.turbo.multiplier());
        if did_step {
            self.snake.step(&self.grid);
        }

        if self.snake.hits_self() {
            self.game_over = true;
            tracing::info!(score = self.score, len = self.snake.len(), now, "game over");
            return Update::GameOver { score: self.score };
        }

        let head = self.snake.head();

        if did_step && !self.special.is_active() {
            let (snake, fruit) = (&self.snake, self.fruit);
            let blocked = |c: Cell| snake.occupies(c) || fruit.map_or(false, |f| f.cell == c);
            if self.special.maybe_spawn(&mut self.rng, &self.grid, now, blocked) {
                tracing::debug!(now, "mega fruit spawned");
            }
        }

        if self.special.expire(now) {
            tracing::debug!(now, "mega fruit expired");
        }

        if did_step {
            if let Some(points) = self.special.try_eat(head) {
                self.score += points;
                self.snake.grow(points);
                self.glow_until = now + self.config.glow_duration_ms;
                self.roll_new_fruit();
                tracing::debug!(points, score = self.score, "ate mega fruit");
                return Update::AteMega { points };
            }
        }

        if !did_step {
            return Update::Idle;
        }

        let current = self.fruit;
        match current {
            Some(fruit) if fruit.cell == head => {
                let points = fruit.kind.points;
                self.score += points;
                self.snake.grow(points);
                self.roll_new_fruit();
                tracing::debug!(fruit = fruit.kind.name, points, score = self.score, "ate fruit");
                Update::Ate { points }
            }
            _ => Update::Stepped,
        }
    }

    /// Requested heading for the next move.
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.game_over {
            self.snake.set_direction(direction);
        }
    }

    pub fn activate_turbo(&mut self, now: Millis) -> bool {
        if self.game_over {
            return false;
        }
        let started = self.turbo.activate(now);
        if started {
            tracing::debug!(now, "turbo on");
        }
        started
    }

    fn roll_new_fruit(&mut self) {
        let (snake, special) = (&self.snake, &self.special);
        let blocked = |c: Cell| {
            snake.occupies(c) || special.current().map_or(false, |mega| mega.covers(c))
        };

        self.fruit = fruit::roll_new_fruit(&mut self.rng, &self.grid, blocked);
        self.fruit_rolls += 1;

        match &self.fruit {
            Some(f) => tracing::trace!(
                roll = self.fruit_rolls,
                fruit = f.kind.name,
                x = f.cell.x,
                y = f.cell.y,
                "fruit placed"
            ),
            None => tracing::info!(len = self.snake.len(), "board is full, no fruit placed"),
        }
    }
}

impl<R> GameState<R> {
    #[cfg(test)]
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    #[cfg(test)]
    pub fn fruit(&self) -> Option<Fruit> {
        self.fruit
    }

    pub fn snapshot(&self, now: Millis) -> Snapshot<'_> {
        let seconds = now as f64 / 1000.0;

        Snapshot {
            grid_size: self.grid.size(),
            body: self.snake.body(),
            head_char: self.snake.head_char(),
            fruit: self.fruit,
            mega: self.special.current().map(|mega| mega.cells),
            mega_hue: (seconds * 0.5) % 1.0,
            glow_hue: if now < self.glow_until { Some(seconds % 1.0) } else { None },
            score: self.score,
            turbo: self.turbo.gauge(now),
            game_over: self.game_over,
        }
    }
}
