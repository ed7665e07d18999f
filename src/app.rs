use std::{panic::{self, AssertUnwindSafe}, time::{Duration, Instant}};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::{GameConfig, Millis};
use crate::game::{GameState, Update};
use crate::grid::Direction::{self, *};
use crate::scores::ScoreStore;
use crate::term::TermManager;
use crate::view;

const FRAME_INTERVAL_MS: u64 = 16;
const MENU_OPTIONS: [&str; 4] = ["Start Game", "Leaderboard", "Fruits", "Exit Game"];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Screen {
    Menu,
    Play,
    Leaderboard,
    Fruits,
}

/// The host loop: owns the terminal, the score store and the current game,
/// and turns key presses into intents.
pub struct SnakeApp {
    term: TermManager,
    store: Box<dyn ScoreStore>,
    config: GameConfig,
    started: Instant,
    screen: Screen,
    menu_index: usize,
    leaderboard: Vec<u32>,
    game: GameState,
    running: bool,
}

impl SnakeApp {
    pub fn new(config: GameConfig, store: Box<dyn ScoreStore>) -> Result<Self> {
        let game = GameState::new(config.clone(), 0);

        Ok(SnakeApp {
            term: TermManager::new()?,
            store,
            config,
            started: Instant::now(),
            screen: Screen::Menu,
            menu_index: 0,
            leaderboard: vec![],
            game,
            running: true,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        tracing::info!("started");

        let result = self.main_loop();
        let restored = self.term.restore();
        tracing::info!("stopped");
        settle(result, restored)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn main_loop(&mut self) -> Result<()> {
        while self.running {
            let keys = self.term.read_key_events_queue(Duration::from_millis(FRAME_INTERVAL_MS))?;
            let now = self.now();

            // A broken frame is reported and the loop moves on to the next one
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.frame(now, &keys)));
            let failure = match outcome {
                Ok(Ok(())) => None,
                Ok(Err(err)) => Some(format!("Error: {:#}", err)),
                Err(payload) => Some(format!("Error: {}", panic_message(payload.as_ref()))),
            };

            if let Some(message) = failure {
                tracing::error!(%message, "frame failed");
                self.term.clear();
                view::draw_error(&mut self.term, &message);
                self.term.present()?;
            }
        }

        Ok(())
    }

    fn now(&self) -> Millis {
        self.started.elapsed().as_millis() as Millis
    }

    fn frame(&mut self, now: Millis, keys: &[KeyEvent]) -> Result<()> {
        for key in keys {
            if is_ctrl_c(key) {
                self.running = false;
                return Ok(());
            }
            self.handle_key(key, now);
        }

        if self.screen == Screen::Play {
            if let Update::GameOver { score } = self.game.update(now) {
                self.store.save_score(score);
            }
        }

        self.draw(now)
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Millis) {
        match self.screen {
            Screen::Menu => match key.code {
                KeyCode::Char('w') | KeyCode::Up => {
                    let count = MENU_OPTIONS.len();
                    self.menu_index = (self.menu_index + count - 1) % count;
                }
                KeyCode::Char('s') | KeyCode::Down => {
                    self.menu_index = (self.menu_index + 1) % MENU_OPTIONS.len();
                }
                KeyCode::Enter | KeyCode::Char(' ') => self.select(now),
                KeyCode::Esc => self.running = false,
                _ => {}
            },
            Screen::Play => {
                if let Some(dir) = direction_for(key.code) {
                    self.game.set_direction(dir);
                    return;
                }
                match key.code {
                    KeyCode::Esc => self.screen = Screen::Menu,
                    KeyCode::Char(' ') | KeyCode::Char('t') => {
                        self.game.activate_turbo(now);
                    }
                    KeyCode::Char('r') if self.game.is_over() => self.new_game(now),
                    KeyCode::Enter if self.game.is_over() => self.screen = Screen::Menu,
                    _ => {}
                }
            }
            Screen::Leaderboard | Screen::Fruits => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Backspace) {
                    self.screen = Screen::Menu;
                }
            }
        }
    }

    fn select(&mut self, now: Millis) {
        match MENU_OPTIONS[self.menu_index] {
            "Start Game" => self.new_game(now),
            "Leaderboard" => {
                self.leaderboard = self.store.load_scores();
                self.screen = Screen::Leaderboard;
            }
            "Fruits" => self.screen = Screen::Fruits,
            _ => self.running = false,
        }
    }

    fn new_game(&mut self, now: Millis) {
        self.game = GameState::new(self.config.clone(), now);
        self.screen = Screen::Play;
    }

    fn draw(&mut self, now: Millis) -> Result<()> {
        self.term.clear();

        match self.screen {
            Screen::Menu => view::draw_menu(&mut self.term, &MENU_OPTIONS, self.menu_index),
            Screen::Play => view::draw_game(&mut self.term, &self.game.snapshot(now)),
            Screen::Leaderboard => view::draw_leaderboard(&mut self.term, &self.leaderboard),
            Screen::Fruits => view::draw_fruits(&mut self.term),
        }

        self.term.present()
    }
}

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Char('w') | KeyCode::Up => Some(Up),
        KeyCode::Char('a') | KeyCode::Left => Some(Left),
        KeyCode::Char('s') | KeyCode::Down => Some(Down),
        KeyCode::Char('d') | KeyCode::Right => Some(Right),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

/// A loop error outranks a failed terminal restore, which is only logged then.
fn settle(result: Result<()>, restored: Result<()>) -> Result<()> {
    match (result, restored) {
        (Err(err), Err(restore_err)) => {
            tracing::warn!(err = %restore_err, "could not restore the terminal");
            Err(err)
        }
        (Ok(()), restored) => restored,
        (result, Ok(())) => result,
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn wasd_and_arrows_steer() {
        assert_eq!(direction_for(KeyCode::Char('a')), Some(Left));
        assert_eq!(direction_for(KeyCode::Up), Some(Up));
        assert_eq!(direction_for(KeyCode::Char('d')), Some(Right));
        assert_eq!(direction_for(KeyCode::Char('x')), None);
    }

    #[test]
    fn ctrl_c_is_recognized() {
        let ctrl_c = KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL };
        let plain_c = KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::NONE };
        assert!(is_ctrl_c(&ctrl_c));
        assert!(!is_ctrl_c(&plain_c));
    }

    #[test]
    fn panic_payloads_are_readable() {
        let payload = panic::catch_unwind(|| panic!("boom {}", 1)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "boom 1");
        let payload = panic::catch_unwind(|| panic!("static")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "static");
    }

    #[test]
    fn loop_error_survives_a_failed_restore() {
        let err = settle(Err(anyhow!("loop failed")), Err(anyhow!("restore failed"))).unwrap_err();
        assert_eq!(err.to_string(), "loop failed");
    }

    #[test]
    fn restore_error_surfaces_after_a_clean_loop() {
        let err = settle(Ok(()), Err(anyhow!("restore failed"))).unwrap_err();
        assert_eq!(err.to_string(), "restore failed");
        assert!(settle(Err(anyhow!("loop failed")), Ok(())).is_err());
        assert!(settle(Ok(()), Ok(())).is_ok());
    }
}
