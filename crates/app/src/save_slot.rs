//! The single save slot and how a session starts from it.

use std::path::{Path, PathBuf};

use crawl_core::{EngineConfig, Game, GameStatus, PersistenceError};
use directories::ProjectDirs;
use tracing::{info, warn};

use crate::seed::SeedChoice;

pub const SAVE_FILE_NAME: &str = "savegame.json";

pub fn default_save_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "Crawl").map(|proj_dirs| proj_dirs.data_dir().join(SAVE_FILE_NAME))
}

/// How the running game came to be.
#[derive(Debug)]
pub enum SessionStart {
    Resumed,
    Fresh(SeedChoice),
    /// The slot existed but could not be loaded; a fresh run replaced it.
    Recovered { seed: SeedChoice, error: PersistenceError },
}

/// Resume from `path` when it holds a live save, else start a new run.
///
/// A corrupt slot is reported through [`SessionStart::Recovered`] rather than
/// aborting, and a save whose player already died starts over.
pub fn open_session(path: &Path, seed: SeedChoice, config: EngineConfig) -> (Game, SessionStart) {
    if !path.exists() {
        return (Game::new(seed.value(), config), SessionStart::Fresh(seed));
    }
    match Game::load_from_slot(path, config.clone()) {
        Ok(game) if game.status() == GameStatus::Playing => {
            info!(path = %path.display(), "resumed from save slot");
            (game, SessionStart::Resumed)
        }
        Ok(_) => {
            info!(path = %path.display(), "save slot holds a finished run; starting over");
            (Game::new(seed.value(), config), SessionStart::Fresh(seed))
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "save slot unreadable; starting a new run");
            (Game::new(seed.value(), config), SessionStart::Recovered { seed, error })
        }
    }
}

pub fn save_session(game: &Game, path: &Path) -> Result<(), PersistenceError> {
    game.save_to_slot(path)
}
