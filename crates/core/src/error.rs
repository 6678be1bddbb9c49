//! Error types surfaced by the engine.
//!
//! Gameplay failures that the player can cause (full inventory, cancelled
//! targeting, healing at full health) are not errors: they are logged to the
//! message log and reported through outcome enums. The types here cover the
//! cases a host has to handle: intents that do not fit the current mode,
//! persistence failures, and invalid configuration.

use std::io;

use thiserror::Error;

use crate::types::Intent;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("intent {intent:?} is not accepted while a {prompt} prompt is pending")]
    PromptPending { intent: Intent, prompt: &'static str },
    #[error("intent {intent:?} requires a pending target selection")]
    NoPendingTarget { intent: Intent },
    #[error("intent {intent:?} requires a pending level-up choice")]
    NoPendingLevelUp { intent: Intent },
    #[error("menu has {options} options but only {max} are addressable")]
    MenuOverflow { options: usize, max: usize },
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("save slot i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("save data is not a valid save: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("save checksum mismatch (expected {expected}, found {found})")]
    ChecksumMismatch { expected: String, found: String },
    #[error("save data is inconsistent: {0}")]
    Inconsistent(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("config file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid configuration: {reason}")]
    Invalid { reason: String },
}
