//! Engine tuning knobs, loadable from a JSON file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Letters `a..=z` address inventory and menu entries.
pub const MAX_MENU_OPTIONS: usize = 26;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub map_width: usize,
    pub map_height: usize,
    pub room_min_size: usize,
    pub room_max_size: usize,
    pub max_rooms: usize,
    pub fov_radius: i32,
    pub level_up_base: u32,
    pub level_up_factor: u32,
    pub inventory_capacity: usize,
    pub message_log_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            map_width: 80,
            map_height: 43,
            room_min_size: 6,
            room_max_size: 10,
            max_rooms: 30,
            fov_radius: 10,
            level_up_base: 200,
            level_up_factor: 150,
            inventory_capacity: 26,
            message_log_capacity: 32,
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| Err(ConfigError::Invalid { reason });
        if self.room_min_size < 3 {
            return invalid(format!("room_min_size {} leaves no interior", self.room_min_size));
        }
        if self.room_min_size > self.room_max_size {
            return invalid(format!(
                "room_min_size {} exceeds room_max_size {}",
                self.room_min_size, self.room_max_size
            ));
        }
        if self.room_max_size + 1 >= self.map_width || self.room_max_size + 1 >= self.map_height {
            return invalid(format!(
                "rooms up to {} tiles do not fit a {}x{} map",
                self.room_max_size, self.map_width, self.map_height
            ));
        }
        if self.max_rooms == 0 {
            return invalid("max_rooms must allow at least one room".to_string());
        }
        if self.fov_radius < 1 {
            return invalid(format!("fov_radius {} is below 1", self.fov_radius));
        }
        if self.inventory_capacity == 0 || self.inventory_capacity > MAX_MENU_OPTIONS {
            return invalid(format!(
                "inventory_capacity {} must be within 1..={MAX_MENU_OPTIONS}",
                self.inventory_capacity
            ));
        }
        if self.message_log_capacity == 0 {
            return invalid("message_log_capacity must be positive".to_string());
        }
        Ok(())
    }

    /// Experience needed to advance from `level` to `level + 1`.
    pub fn level_up_threshold(&self, level: u32) -> u32 {
        self.level_up_base + level * self.level_up_factor
    }
}
