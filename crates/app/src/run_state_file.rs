//! Small sidecar record of the last session, shown as a hint on the next start.
//! The save slot itself lives in [`crate::save_slot`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crawl_core::{Game, GameStatus};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::format_snapshot_hash;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RunStateFile {
    pub run_seed: u64,
    pub snapshot_hash_hex: String,
    pub turn: u64,
    pub dungeon_level: u32,
    pub player_dead: bool,
    pub updated_at_unix_ms: u64,
}

impl RunStateFile {
    pub fn from_game(game: &Game) -> Self {
        let updated_at_unix_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |duration| duration.as_millis() as u64);
        Self {
            run_seed: game.state().run_seed,
            snapshot_hash_hex: format_snapshot_hash(game.snapshot_hash()),
            turn: game.state().turn,
            dungeon_level: game.state().dungeon_level,
            player_dead: game.status() == GameStatus::Dead,
            updated_at_unix_ms,
        }
    }

    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "Crawl").map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("last_run_state.json");
            path
        })
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let state: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(state)
    }

    pub fn summary_line(&self) -> String {
        let outcome = if self.player_dead { "died" } else { "saved" };
        format!(
            "Last run: seed={} {} on dungeon level {} at turn {} (hash {})",
            self.run_seed, outcome, self.dungeon_level, self.turn, self.snapshot_hash_hex
        )
    }
}

#[cfg(test)]
mod tests {
    use crawl_core::EngineConfig;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_atomic_write_and_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("state.json");
        let game = Game::new(99, EngineConfig::default());

        let state = RunStateFile::from_game(&game);
        state.write_atomic(&path).expect("write");
        assert!(path.exists());

        let loaded = RunStateFile::load(&path).expect("load");
        assert_eq!(state, loaded);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_summary_line_reports_the_run() {
        let state = RunStateFile {
            run_seed: 12345,
            snapshot_hash_hex: "0x00000000deadbeef".to_string(),
            turn: 100,
            dungeon_level: 2,
            player_dead: true,
            updated_at_unix_ms: 1_645_956_000_000,
        };
        assert_eq!(
            state.summary_line(),
            "Last run: seed=12345 died on dungeon level 2 at turn 100 (hash 0x00000000deadbeef)"
        );
    }
}
