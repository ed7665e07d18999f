use std::{fs::OpenOptions, path::Path, sync::Mutex};

use tracing_subscriber::EnvFilter;

/// Sends tracing output to `path`, since the terminal itself belongs to the
/// game. Returns whether logging was set up; when the file can't be opened,
/// logs are dropped and panics keep the default hook.
pub fn init(path: &Path) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(_) => return false,
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .is_ok();

    if installed {
        // Panic output would scribble over the alternate screen
        std::panic::set_hook(Box::new(|info| {
            tracing::error!(%info, "panic");
        }));
    }
    installed
}
