//! Starting world construction and level installation.
//! This module exists to isolate initialization details from turn resolution.
//! It does not own descending policy or persistence.

use std::mem;

use slotmap::SlotMap;
use tracing::info;

use super::*;
use crate::content;
use crate::dice::{Dice, mix_seed_stream};
use crate::mapgen::generate_level;
use crate::state::{Map, MessageLog};

/// Stream id for the run-level combat and AI dice, kept apart from level generation.
const PLAY_DICE_STREAM: u64 = 0x504C_4159;

impl Game {
    /// Start a new run on dungeon level 1 with the starting kit equipped.
    pub fn new(seed: u64, config: EngineConfig) -> Self {
        let mut objects = SlotMap::with_key();
        let origin = Pos { y: 0, x: 0 };
        let player_id = objects.insert(content::player(origin));
        let placeholder_stairs = objects.insert(content::stairs(origin));

        let mut dagger = content::dagger(origin);
        if let Some(equipment) = dagger.equipment.as_mut() {
            equipment.is_equipped = true;
        }
        let dagger_id = objects.insert(dagger);

        let state = GameState {
            map: Map::new(config.map_width, config.map_height),
            objects,
            live: vec![placeholder_stairs, player_id],
            inventory: vec![dagger_id],
            player_id,
            stairs_id: placeholder_stairs,
            messages: MessageLog::new(config.message_log_capacity),
            dungeon_level: 1,
            status: GameStatus::Playing,
            pending_prompt: None,
            dice: Dice::new(mix_seed_stream(seed, PLAY_DICE_STREAM)),
            turn: 0,
            run_seed: seed,
        };

        let mut game = Self::from_state(config, state);
        game.install_level(1);
        game.log(
            "Welcome stranger! Prepare to perish in the Tombs of the Ancient Kings.",
            Color::RED,
        );
        info!(seed, "new run started");
        game
    }

    /// Wrap an existing state; visibility is derived, so it is rebuilt here.
    pub(super) fn from_state(config: EngineConfig, state: GameState) -> Self {
        let visibility = Visibility::new(state.map.width, state.map.height);
        let mut game = Self { config, state, visibility, panel: None };
        game.refresh_visibility();
        game
    }

    /// Replace the map and every non-player object on it with a freshly
    /// generated level, keeping the player and the inventory.
    pub(super) fn install_level(&mut self, dungeon_level: u32) {
        let generated = generate_level(self.state.run_seed, dungeon_level, &self.config);
        let player_id = self.state.player_id;

        for id in mem::take(&mut self.state.live) {
            if id != player_id {
                self.state.objects.remove(id);
            }
        }

        self.state.map = generated.map;
        self.state.dungeon_level = dungeon_level;
        self.state.objects[player_id].pos = generated.player_start;

        let stairs_id = self.state.objects.insert(content::stairs(generated.stairs));
        self.state.stairs_id = stairs_id;
        self.state.live.push(stairs_id);
        for spawn in generated.spawns {
            let id = self.state.objects.insert(spawn);
            self.state.live.push(id);
        }
        self.state.live.push(player_id);

        self.visibility = Visibility::new(self.state.map.width, self.state.map.height);
        self.refresh_visibility();
        info!(dungeon_level, objects = self.state.live.len(), "level installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_starts_on_level_one_with_equipped_dagger() {
        let game = Game::new(42, EngineConfig::default());
        assert_eq!(game.state.dungeon_level, 1);
        assert_eq!(game.state.status, GameStatus::Playing);
        assert_eq!(game.state.inventory.len(), 1);

        let dagger = &game.state.objects[game.state.inventory[0]];
        assert_eq!(dagger.name, "dagger");
        assert!(dagger.is_equipped());
        assert_eq!(game.state.power(game.state.player_id), 4);
        assert!(game.state.messages.contains("Welcome stranger"));
    }

    #[test]
    fn new_game_has_exactly_one_player_in_the_live_set() {
        let game = Game::new(9, EngineConfig::default());
        let players =
            game.state.live.iter().filter(|id| **id == game.state.player_id).count();
        assert_eq!(players, 1);
        assert!(game.state.live.contains(&game.state.stairs_id));
        assert!(!game.state.live.contains(&game.state.inventory[0]));
    }

    #[test]
    fn player_starts_on_a_walkable_visible_tile() {
        let game = Game::new(1234, EngineConfig::default());
        let start = game.state.player_pos();
        assert!(!game.state.map.is_blocked(start));
        assert!(game.is_visible(start));
        assert!(game.state.map.is_explored(start));
    }

    #[test]
    fn installing_a_level_drops_previous_level_objects() {
        let mut game = Game::new(77, EngineConfig::default());
        let old_live: Vec<ObjectId> = game.state.live.clone();
        game.install_level(2);

        for id in old_live {
            if id == game.state.player_id {
                continue;
            }
            assert!(game.state.objects.get(id).is_none(), "stale object {id:?} survived");
        }
        assert_eq!(game.state.dungeon_level, 2);
        assert_eq!(game.state.live.last(), Some(&game.state.player_id));
        assert_eq!(
            game.state.objects.len(),
            game.state.live.len() + game.state.inventory.len()
        );
    }

    #[test]
    fn same_seed_builds_the_same_opening() {
        let left = Game::new(5, EngineConfig::default());
        let right = Game::new(5, EngineConfig::default());
        assert_eq!(left.snapshot_hash(), right.snapshot_hash());
        assert_ne!(left.snapshot_hash(), Game::new(6, EngineConfig::default()).snapshot_hash());
    }
}
