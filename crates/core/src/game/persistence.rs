//! Save and restore of a running game.
//! This module exists to bridge the engine to the save-slot codec.
//! It does not own the byte format; see [`crate::save_file`].

use std::path::Path;

use tracing::{info, warn};

use super::*;
use crate::error::PersistenceError;
use crate::save_file;

impl Game {
    /// Serialize the full engine state.
    pub fn save(&self) -> Result<Vec<u8>, PersistenceError> {
        let bytes = save_file::encode(&self.state)?;
        info!(turn = self.state.turn, dungeon_level = self.state.dungeon_level, "game saved");
        Ok(bytes)
    }

    /// Build a game from save bytes.
    pub fn load(bytes: &[u8], config: EngineConfig) -> Result<Self, PersistenceError> {
        let state = save_file::decode(bytes).inspect_err(|err| warn!(%err, "load failed"))?;
        info!(turn = state.turn, dungeon_level = state.dungeon_level, "game loaded");
        Ok(Self::from_state(config, state))
    }

    /// Replace the running state with a saved one. On any error the current
    /// game is left exactly as it was.
    pub fn restore(&mut self, bytes: &[u8]) -> Result<(), PersistenceError> {
        let state = save_file::decode(bytes).inspect_err(|err| warn!(%err, "restore failed"))?;
        self.state = state;
        self.panel = None;
        self.visibility = Visibility::new(self.state.map.width, self.state.map.height);
        self.refresh_visibility();
        info!(turn = self.state.turn, dungeon_level = self.state.dungeon_level, "game restored");
        Ok(())
    }

    pub fn save_to_slot(&self, path: &Path) -> Result<(), PersistenceError> {
        save_file::write_slot(path, &self.save()?)
    }

    pub fn load_from_slot(path: &Path, config: EngineConfig) -> Result<Self, PersistenceError> {
        let bytes = save_file::read_slot(path)?;
        Self::load(&bytes, config)
    }
}
