//! Shared test fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating map and object setup across many tests.
//! It does not own production gameplay logic.

use slotmap::SlotMap;

use super::*;
use crate::components::Fighter;
use crate::content::{self, ItemKind, MonsterKind};
use crate::dice::Dice;
use crate::state::{Map, MessageLog, Tile};

/// Walls on the outer ring, floor everywhere else.
pub(super) fn open_arena(width: usize, height: usize) -> Map {
    let mut map = Map::new(width, height);
    for y in 1..(height as i32 - 1) {
        for x in 1..(width as i32 - 1) {
            map.carve(Pos { y, x });
        }
    }
    map
}

pub(super) fn open_room_fixture() -> (Map, Pos) {
    let mut map = Map::new(10, 10);
    for y in 0..10 {
        for x in 0..10 {
            map.carve(Pos { y, x });
        }
    }
    (map, Pos { y: 5, x: 5 })
}

pub(super) fn wall_occlusion_fixture() -> (Map, Pos) {
    let mut map = Map::new(11, 11);
    for x in 1..10 {
        map.carve(Pos { y: 5, x });
    }
    map.set_tile(Pos { y: 5, x: 6 }, Tile::wall());
    (map, Pos { y: 5, x: 3 })
}

/// 20x20 rock with a 5x5 room whose walls run from (4,4) to (10,10).
pub(super) fn closed_room_fixture() -> Map {
    let mut map = Map::new(20, 20);
    for y in 5..10 {
        for x in 5..10 {
            map.carve(Pos { y, x });
        }
    }
    map
}

/// Small deterministic game: player at (5,5) in an open 16x12 arena, stairs
/// at (8,10), empty inventory, no monsters.
pub(super) fn arena_game() -> Game {
    let config = EngineConfig::default();
    let mut objects = SlotMap::with_key();
    let player_id = objects.insert(content::player(Pos { y: 5, x: 5 }));
    let stairs_id = objects.insert(content::stairs(Pos { y: 8, x: 10 }));
    let state = GameState {
        map: open_arena(16, 12),
        objects,
        live: vec![stairs_id, player_id],
        inventory: Vec::new(),
        player_id,
        stairs_id,
        messages: MessageLog::new(config.message_log_capacity),
        dungeon_level: 1,
        status: GameStatus::Playing,
        pending_prompt: None,
        dice: Dice::new(7),
        turn: 0,
        run_seed: 7,
    };
    Game::from_state(config, state)
}

pub(super) fn add_monster(game: &mut Game, kind: MonsterKind, pos: Pos) -> ObjectId {
    let id = game.state.objects.insert(content::monster(kind, pos));
    let player_index = game.state.live.len().saturating_sub(1);
    game.state.live.insert(player_index, id);
    id
}

pub(super) fn add_orc(game: &mut Game, pos: Pos) -> ObjectId {
    add_monster(game, MonsterKind::Orc, pos)
}

/// Place an item on the floor under the draw-order position of the player.
pub(super) fn place_item(game: &mut Game, kind: ItemKind, pos: Pos) -> ObjectId {
    let id = game.state.objects.insert(content::item(kind, pos));
    game.state.live.insert(0, id);
    id
}

/// Put an item straight into the inventory without equipping it.
pub(super) fn give_item(game: &mut Game, kind: ItemKind) -> ObjectId {
    let pos = game.state.player_pos();
    let id = game.state.objects.insert(content::item(kind, pos));
    game.state.inventory.push(id);
    id
}

pub(super) fn fighter(game: &Game, id: ObjectId) -> &Fighter {
    game.state.objects[id].fighter.as_ref().expect("object should have a fighter")
}

pub(super) fn fighter_mut(game: &mut Game, id: ObjectId) -> &mut Fighter {
    game.state.objects[id].fighter.as_mut().expect("object should have a fighter")
}

pub(super) fn player_hp(game: &Game) -> i32 {
    fighter(game, game.state.player_id).hp
}
