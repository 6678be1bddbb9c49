//! Single-slot save files.
//!
//! The file is one JSON object carrying the serialized [`GameState`] as a
//! string plus the SHA-256 of that string:
//! `{"sha256_hex": "...", "state_json": "..."}`.
//!
//! Writes go to a sibling temp file that is renamed over the slot, so a crash
//! mid-write leaves the previous save intact. Loading verifies the checksum
//! and the state's structural invariants before anything is handed back.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::error::PersistenceError;
use crate::state::GameState;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct SaveEnvelope {
    sha256_hex: String,
    state_json: String,
}

fn compute_sha256(body: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body.as_bytes());
    let result = hasher.finalize();
    format!("{result:064x}")
}

/// Serialize a state into save bytes.
pub fn encode(state: &GameState) -> Result<Vec<u8>, PersistenceError> {
    let state_json = serde_json::to_string(state)?;
    let envelope = SaveEnvelope { sha256_hex: compute_sha256(&state_json), state_json };
    Ok(serde_json::to_vec(&envelope)?)
}

/// Parse and verify save bytes.
pub fn decode(bytes: &[u8]) -> Result<GameState, PersistenceError> {
    let envelope: SaveEnvelope = serde_json::from_slice(bytes)?;
    let found = compute_sha256(&envelope.state_json);
    if found != envelope.sha256_hex {
        warn!("save checksum mismatch");
        return Err(PersistenceError::ChecksumMismatch { expected: envelope.sha256_hex, found });
    }
    let state: GameState = serde_json::from_str(&envelope.state_json)?;
    state.check_invariants().map_err(PersistenceError::Inconsistent)?;
    Ok(state)
}

/// Write save bytes to `path` through a temp file and rename.
pub fn write_slot(path: &Path, bytes: &[u8]) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, bytes)?;
    fs::rename(&tmp_path, path)?;
    info!(path = %path.display(), bytes = bytes.len(), "save slot written");
    Ok(())
}

pub fn read_slot(path: &Path) -> Result<Vec<u8>, PersistenceError> {
    Ok(fs::read(path)?)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::config::EngineConfig;
    use crate::game::Game;

    #[test]
    fn encode_then_decode_preserves_the_state() {
        let game = Game::new(2024, EngineConfig::default());
        let bytes = encode(game.state()).expect("encode");
        let decoded = decode(&bytes).expect("decode");
        assert_eq!(decoded.live, game.state().live);
        assert_eq!(decoded.inventory, game.state().inventory);
        assert_eq!(decoded.messages, game.state().messages);
        assert_eq!(decoded.map, game.state().map);
    }

    #[test]
    fn tampered_state_fails_the_checksum() {
        let game = Game::new(5, EngineConfig::default());
        let bytes = encode(game.state()).expect("encode");
        let mut envelope: SaveEnvelope = serde_json::from_slice(&bytes).expect("envelope");
        envelope.state_json =
            envelope.state_json.replacen("\"dungeon_level\":1", "\"dungeon_level\":9", 1);
        let tampered = serde_json::to_vec(&envelope).expect("re-encode");

        let err = decode(&tampered).expect_err("tampered save");
        assert!(matches!(err, PersistenceError::ChecksumMismatch { .. }), "{err}");
    }

    #[test]
    fn garbage_bytes_are_malformed() {
        let err = decode(b"not a save").expect_err("garbage");
        assert!(matches!(err, PersistenceError::Malformed(_)), "{err}");
    }

    #[test]
    fn inconsistent_state_is_rejected_even_with_a_valid_checksum() {
        let game = Game::new(8, EngineConfig::default());
        let mut state = game.state().clone();
        let player = state.player_id;
        state.inventory.push(player);
        let bytes = encode(&state).expect("encode");

        let err = decode(&bytes).expect_err("player in inventory");
        assert!(matches!(err, PersistenceError::Inconsistent(_)), "{err}");
    }

    #[test]
    fn atomic_write_and_read_round_trip() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("savegame.json");
        let game = Game::new(77, EngineConfig::default());
        let bytes = encode(game.state()).expect("encode");

        write_slot(&path, &bytes).expect("write");

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(read_slot(&path).expect("read"), bytes);
    }

    #[test]
    fn missing_slot_is_an_io_error() {
        let dir = tempdir().expect("tempdir");
        let err = read_slot(&dir.path().join("absent.json")).expect_err("missing");
        assert!(matches!(err, PersistenceError::Io(_)));
    }
}
