pub mod components;
pub mod config;
pub mod content;
pub mod dice;
pub mod error;
pub mod game;
pub mod mapgen;
pub mod save_file;
pub mod state;
pub mod types;

pub use config::{EngineConfig, MAX_MENU_OPTIONS};
pub use error::{ConfigError, GameError, PersistenceError};
pub use game::{
    CharacterSheet, Frame, Game, Menu, PickUpOutcome, Sprite, StatusPanel, TileShade, UseOutcome,
};
pub use state::{GameState, Map, Message, MessageLog, PendingPrompt, Tile};
pub use types::*;
