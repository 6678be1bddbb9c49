//! Monster and item placement for a freshly carved room.

use crate::components::GameObject;
use crate::content::{
    self, DepthTable, ITEM_TABLE, MAX_ROOM_ITEMS, MAX_ROOM_MONSTERS, MONSTER_TABLE,
};
use crate::dice::Dice;
use crate::state::Map;
use crate::types::Pos;

use super::layout::Rect;

pub(super) struct SpawnContext<'a> {
    pub(super) map: &'a Map,
    pub(super) dungeon_level: u32,
    pub(super) reserved: Option<Pos>,
}

/// Weighted pick over `weights`; `None` when every weight is zero.
pub fn random_choice_index(weights: &[u32], dice: &mut Dice) -> Option<usize> {
    let total: u32 = weights.iter().sum();
    if total == 0 {
        return None;
    }
    let roll = dice.range(1, total as i32) as u32;
    let mut running = 0_u32;
    for (index, weight) in weights.iter().enumerate() {
        running += weight;
        if roll <= running {
            return Some(index);
        }
    }
    None
}

fn pick_from_table<K: Copy>(table: &[(K, DepthTable)], level: u32, dice: &mut Dice) -> Option<K> {
    let weights: Vec<u32> =
        table.iter().map(|(_, tiers)| content::from_dungeon_level(tiers, level)).collect();
    random_choice_index(&weights, dice).map(|index| table[index].0)
}

fn random_interior_cell(room: &Rect, dice: &mut Dice) -> Pos {
    Pos { y: dice.range(room.y1 + 1, room.y2 - 1), x: dice.range(room.x1 + 1, room.x2 - 1) }
}

fn is_cell_blocked(context: &SpawnContext<'_>, spawned: &[GameObject], pos: Pos) -> bool {
    context.map.is_blocked(pos)
        || context.reserved == Some(pos)
        || spawned.iter().any(|object| object.blocks && object.pos == pos)
}

pub(super) fn place_objects(
    context: &SpawnContext<'_>,
    room: &Rect,
    dice: &mut Dice,
    spawned: &mut Vec<GameObject>,
) {
    let max_monsters = content::from_dungeon_level(MAX_ROOM_MONSTERS, context.dungeon_level);
    let monster_count = dice.range(0, max_monsters as i32);
    for _ in 0..monster_count {
        let pos = random_interior_cell(room, dice);
        if is_cell_blocked(context, spawned, pos) {
            continue;
        }
        if let Some(kind) = pick_from_table(MONSTER_TABLE, context.dungeon_level, dice) {
            spawned.push(content::monster(kind, pos));
        }
    }

    let max_items = content::from_dungeon_level(MAX_ROOM_ITEMS, context.dungeon_level);
    let item_count = dice.range(0, max_items as i32);
    for _ in 0..item_count {
        let pos = random_interior_cell(room, dice);
        if is_cell_blocked(context, spawned, pos) {
            continue;
        }
        if let Some(kind) = pick_from_table(ITEM_TABLE, context.dungeon_level, dice) {
            spawned.push(content::item(kind, pos));
        }
    }
}
