//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from simulation control code.
//! It does not own persistence.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;
use crate::components::Ai;

impl Game {
    /// Fingerprint of the simulation state. Equal seeds fed equal intents
    /// produce equal hashes.
    pub fn snapshot_hash(&self) -> u64 {
        let state = &self.state;
        let mut hasher = Xxh3::new();
        hasher.write_u64(state.run_seed);
        hasher.write_u64(state.turn);
        hasher.write_u32(state.dungeon_level);
        hasher.write_u64(state.dice.cursor());
        hasher.write_u8(match state.status {
            GameStatus::Playing => 0,
            GameStatus::Dead => 1,
        });
        hasher.write_u8(match state.pending_prompt {
            None => 0,
            Some(PendingPrompt::Target { .. }) => 1,
            Some(PendingPrompt::LevelUp) => 2,
        });
        for tile in &state.map.tiles {
            let flags = u8::from(tile.blocked)
                | (u8::from(tile.block_sight) << 1)
                | (u8::from(tile.explored) << 2);
            hasher.write_u8(flags);
        }
        for id in state.live.iter().chain(&state.inventory) {
            let Some(object) = state.objects.get(*id) else {
                continue;
            };
            hash_object(&mut hasher, object);
        }
        hasher.write_usize(state.messages.len());
        hasher.finish()
    }
}

fn hash_object(hasher: &mut Xxh3, object: &GameObject) {
    hasher.write_i32(object.pos.y);
    hasher.write_i32(object.pos.x);
    hasher.write_u32(u32::from(object.glyph));
    hasher.write(object.name.as_bytes());
    hasher.write_u8(u8::from(object.blocks));
    if let Some(fighter) = &object.fighter {
        hasher.write_i32(fighter.hp);
        hasher.write_i32(fighter.base_max_hp);
        hasher.write_i32(fighter.base_power);
        hasher.write_i32(fighter.base_defense);
        hasher.write_i32(fighter.base_dodge);
        hasher.write_u32(fighter.xp);
        hasher.write_u32(fighter.level);
    }
    if let Some(ai) = &object.ai {
        hasher.write_u32(match ai {
            Ai::Idle => 0,
            Ai::Basic => 1,
            Ai::Confused { turns_left, .. } => 2 + *turns_left,
        });
    }
    if let Some(equipment) = &object.equipment {
        hasher.write_u8(u8::from(equipment.is_equipped));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn hash_changes_when_the_player_moves() {
        let mut game = arena_game();
        let before = game.snapshot_hash();
        game.act(Intent::Move(Direction::South)).expect("move");
        assert_ne!(game.snapshot_hash(), before);
    }

    #[test]
    fn hash_ignores_informational_intents() {
        let mut game = arena_game();
        let before = game.snapshot_hash();
        game.act(Intent::OpenInventory).expect("inventory");
        assert_eq!(game.snapshot_hash(), before);
    }
}
