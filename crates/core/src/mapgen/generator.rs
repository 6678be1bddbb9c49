//! Room placement loop that composes layout carving and spawn placement.

use tracing::debug;

use crate::config::EngineConfig;
use crate::dice::Dice;
use crate::state::Map;
use crate::types::Pos;

use super::layout::{Rect, carve_l_shaped_corridor, carve_room};
use super::model::GeneratedLevel;
use super::seed::derive_level_seed;
use super::spawns::{SpawnContext, place_objects};

pub struct MapGenerator {
    run_seed: u64,
    width: usize,
    height: usize,
    room_min_size: i32,
    room_max_size: i32,
    max_rooms: usize,
}

impl MapGenerator {
    pub fn new(run_seed: u64, config: &EngineConfig) -> Self {
        Self {
            run_seed,
            width: config.map_width,
            height: config.map_height,
            room_min_size: config.room_min_size as i32,
            room_max_size: config.room_max_size as i32,
            max_rooms: config.max_rooms,
        }
    }

    pub fn generate(&self, dungeon_level: u32) -> GeneratedLevel {
        let mut dice = Dice::new(derive_level_seed(self.run_seed, dungeon_level));
        let mut map = Map::new(self.width, self.height);
        let mut rooms: Vec<Rect> = Vec::new();
        let mut spawns = Vec::new();

        for _ in 0..self.max_rooms {
            let room_width = dice.range(self.room_min_size, self.room_max_size);
            let room_height = dice.range(self.room_min_size, self.room_max_size);
            let x = dice.range(0, self.width as i32 - room_width - 1);
            let y = dice.range(0, self.height as i32 - room_height - 1);
            let candidate = Rect::new(x, y, room_width, room_height);

            if rooms.iter().any(|existing| existing.intersects(&candidate)) {
                continue;
            }
            carve_room(&mut map, &candidate);

            let center = candidate.center();
            if let Some(previous) = rooms.last() {
                let horizontal_first = dice.coin_flip();
                carve_l_shaped_corridor(&mut map, previous.center(), center, horizontal_first);
            }

            let reserved = rooms.is_empty().then_some(center);
            let context = SpawnContext { map: &map, dungeon_level, reserved };
            place_objects(&context, &candidate, &mut dice, &mut spawns);
            rooms.push(candidate);
        }

        // Validated configs always accept the first candidate; the fallback only
        // covers hand-built generators with impossible room bounds.
        let fallback = Pos { y: self.height as i32 / 2, x: self.width as i32 / 2 };
        let player_start = rooms.first().map_or(fallback, |room| room.center());
        let stairs = rooms.last().map_or(fallback, |room| room.center());

        debug!(
            dungeon_level,
            rooms = rooms.len(),
            spawns = spawns.len(),
            "generated dungeon level"
        );

        GeneratedLevel { map, rooms, player_start, stairs, spawns }
    }
}
