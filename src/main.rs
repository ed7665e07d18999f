mod app;
mod clock;
mod config;
mod fruit;
mod game;
mod grid;
mod logging;
mod scores;
mod snake;
mod special;
mod term;
mod turbo;
mod view;

use config::{GameConfig, Paths};
use scores::FileStore;

pub type TermInt = u16;
pub type Coords = (u16, u16);

fn main() -> anyhow::Result<()> {
    let paths = Paths::from_env();
    if !logging::init(&paths.log) {
        eprintln!("logging disabled: could not open {}", paths.log.display());
    }

    let store = FileStore::new(&paths.scores);
    tracing::debug!(scores = %store.path().display(), "using score file");

    let mut app = app::SnakeApp::new(GameConfig::default(), Box::new(store))?;
    app.run()
}
