use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::components::{Bonuses, DEATH_THRESHOLD, Fighter, GameObject, ItemUse};
use crate::dice::Dice;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub blocked: bool,
    pub block_sight: bool,
    pub explored: bool,
}

impl Tile {
    /// A blocking tile also blocks sight unless overridden with [`Tile::see_through`].
    pub fn new(blocked: bool) -> Self {
        Self { blocked, block_sight: blocked, explored: false }
    }

    pub fn wall() -> Self {
        Self::new(true)
    }

    pub fn floor() -> Self {
        Self::new(false)
    }

    pub fn see_through(mut self) -> Self {
        self.block_sight = false;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Tile>,
}

impl Map {
    /// A fully blocked grid; generation carves rooms and tunnels out of it.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, tiles: vec![Tile::wall(); width * height] }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn tile(&self, pos: Pos) -> Option<&Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(&self.tiles[self.index(pos)])
    }

    pub fn set_tile(&mut self, pos: Pos, tile: Tile) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    /// Out-of-bounds cells count as blocked.
    pub fn is_blocked(&self, pos: Pos) -> bool {
        self.tile(pos).is_none_or(|tile| tile.blocked)
    }

    pub fn blocks_sight(&self, pos: Pos) -> bool {
        self.tile(pos).is_none_or(|tile| tile.block_sight)
    }

    pub fn is_explored(&self, pos: Pos) -> bool {
        self.tile(pos).is_some_and(|tile| tile.explored)
    }

    pub fn mark_explored(&mut self, pos: Pos) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx].explored = true;
    }

    pub fn carve(&mut self, pos: Pos) {
        self.set_tile(pos, Tile::floor());
    }

    pub fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub color: Color,
}

/// Bounded log of recent messages; the oldest line drops out first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLog {
    capacity: usize,
    lines: VecDeque<Message>,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        Self { capacity: capacity.max(1), lines: VecDeque::new() }
    }

    pub fn add(&mut self, text: impl Into<String>, color: Color) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(Message { text: text.into(), color });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.lines.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.lines.back()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.text.contains(needle))
    }
}

/// A decision the player must make before play resumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingPrompt {
    Target { item: ObjectId, effect: ItemUse },
    LevelUp,
}

impl PendingPrompt {
    pub fn label(self) -> &'static str {
        match self {
            PendingPrompt::Target { .. } => "target selection",
            PendingPrompt::LevelUp => "level-up",
        }
    }
}

/// Everything that makes up a running game. Replaced wholesale on new game or load.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub map: Map,
    pub objects: SlotMap<ObjectId, GameObject>,
    /// Objects on the map, in draw order (first drawn first).
    pub live: Vec<ObjectId>,
    pub inventory: Vec<ObjectId>,
    pub player_id: ObjectId,
    pub stairs_id: ObjectId,
    pub messages: MessageLog,
    pub dungeon_level: u32,
    pub status: GameStatus,
    pub pending_prompt: Option<PendingPrompt>,
    pub dice: Dice,
    pub turn: u64,
    pub run_seed: u64,
}

impl GameState {
    pub fn player(&self) -> &GameObject {
        &self.objects[self.player_id]
    }

    pub fn player_mut(&mut self) -> &mut GameObject {
        &mut self.objects[self.player_id]
    }

    pub fn player_pos(&self) -> Pos {
        self.player().pos
    }

    /// A cell is blocked by its tile or by any blocking object standing on it.
    pub fn is_blocked(&self, pos: Pos) -> bool {
        self.map.is_blocked(pos)
            || self.live.iter().any(|id| {
                self.objects.get(*id).is_some_and(|object| object.blocks && object.pos == pos)
            })
    }

    /// Move an object to the front of the draw order so others render over it.
    pub fn send_to_back(&mut self, id: ObjectId) {
        if let Some(index) = self.live.iter().position(|live_id| *live_id == id) {
            let id = self.live.remove(index);
            self.live.insert(0, id);
        }
    }

    pub fn remove_from_live(&mut self, id: ObjectId) -> bool {
        match self.live.iter().position(|live_id| *live_id == id) {
            Some(index) => {
                self.live.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn fighter_at(&self, pos: Pos) -> Option<ObjectId> {
        self.live.iter().copied().find(|id| {
            self.objects
                .get(*id)
                .is_some_and(|object| object.pos == pos && object.fighter.is_some())
        })
    }

    /// Equipped item currently occupying `slot`, if any.
    pub fn equipped_in_slot(&self, slot: Slot) -> Option<ObjectId> {
        self.inventory.iter().copied().find(|id| {
            self.objects
                .get(*id)
                .and_then(|object| object.equipment)
                .is_some_and(|equipment| equipment.is_equipped && equipment.slot == slot)
        })
    }

    /// Sum of bonuses from equipped items. Only the player carries an inventory,
    /// so every other owner gets zero bonuses.
    pub fn equipped_bonuses(&self, owner: ObjectId) -> Bonuses {
        if owner != self.player_id {
            return Bonuses::default();
        }
        self.inventory
            .iter()
            .filter_map(|id| self.objects.get(*id).and_then(|object| object.equipment))
            .filter(|equipment| equipment.is_equipped)
            .fold(Bonuses::default(), |total, equipment| total.add(equipment.bonuses))
    }

    pub fn max_hp(&self, id: ObjectId) -> i32 {
        self.derived_stat(id, |fighter| fighter.base_max_hp, |bonuses| bonuses.max_hp)
    }

    pub fn power(&self, id: ObjectId) -> i32 {
        self.derived_stat(id, |fighter| fighter.base_power, |bonuses| bonuses.power)
    }

    pub fn defense(&self, id: ObjectId) -> i32 {
        self.derived_stat(id, |fighter| fighter.base_defense, |bonuses| bonuses.defense)
    }

    pub fn dodge(&self, id: ObjectId) -> i32 {
        self.derived_stat(id, |fighter| fighter.base_dodge, |bonuses| bonuses.dodge)
    }

    pub fn light_radius_bonus(&self) -> i32 {
        self.equipped_bonuses(self.player_id).light_radius
    }

    /// Structural invariants every reachable state satisfies. Returns a
    /// description of the first violation.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.map.tiles.len() != self.map.width * self.map.height {
            return Err(format!(
                "map has {} tiles for {}x{}",
                self.map.tiles.len(),
                self.map.width,
                self.map.height
            ));
        }
        if !self.objects.contains_key(self.player_id) {
            return Err("player object is missing".to_string());
        }
        if !self.objects.contains_key(self.stairs_id) {
            return Err("stairs object is missing".to_string());
        }
        let player_entries = self.live.iter().filter(|id| **id == self.player_id).count();
        if player_entries != 1 {
            return Err(format!("player appears {player_entries} times in the live set"));
        }

        let mut seen = HashSet::new();
        for id in self.live.iter().chain(&self.inventory) {
            if !self.objects.contains_key(*id) {
                return Err(format!("dangling object {id:?}"));
            }
            if !seen.insert(*id) {
                return Err(format!("object {id:?} is listed twice"));
            }
        }
        if seen.len() != self.objects.len() {
            return Err("objects exist outside the live set and inventory".to_string());
        }

        for id in &self.live {
            if self.objects[*id].is_equipped() {
                return Err(format!("equipped {} lies on the map", self.objects[*id].name));
            }
        }
        let mut occupied = HashSet::new();
        for id in &self.inventory {
            if let Some(equipment) = self.objects[*id].equipment
                && equipment.is_equipped
                && !occupied.insert(equipment.slot)
            {
                return Err(format!("slot {} holds two items", equipment.slot.label()));
            }
        }

        if let Some(PendingPrompt::Target { item, .. }) = self.pending_prompt
            && !self.inventory.contains(&item)
        {
            return Err("target prompt refers to an item outside the inventory".to_string());
        }
        for (id, object) in &self.objects {
            if let Some(fighter) = &object.fighter
                && (fighter.hp < DEATH_THRESHOLD || fighter.hp > self.max_hp(id))
            {
                return Err(format!("{} has hp {} outside its bounds", object.name, fighter.hp));
            }
        }
        Ok(())
    }

    fn derived_stat(
        &self,
        id: ObjectId,
        base: impl Fn(&Fighter) -> i32,
        bonus: impl Fn(&Bonuses) -> i32,
    ) -> i32 {
        let Some(fighter) = self.objects.get(id).and_then(|object| object.fighter.as_ref()) else {
            return 0;
        };
        base(fighter) + bonus(&self.equipped_bonuses(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_tiles_block_sight_by_default() {
        assert!(Tile::wall().block_sight);
        assert!(!Tile::floor().block_sight);
        let glass = Tile::wall().see_through();
        assert!(glass.blocked);
        assert!(!glass.block_sight);
    }

    #[test]
    fn new_map_is_fully_blocked_and_unexplored() {
        let map = Map::new(8, 6);
        assert!(map.tiles.iter().all(|tile| tile.blocked && tile.block_sight && !tile.explored));
    }

    #[test]
    fn out_of_bounds_is_blocked() {
        let map = Map::new(4, 4);
        assert!(map.is_blocked(Pos { y: -1, x: 0 }));
        assert!(map.is_blocked(Pos { y: 0, x: 4 }));
        assert!(map.blocks_sight(Pos { y: 9, x: 9 }));
    }

    #[test]
    fn message_log_drops_oldest_line_at_capacity() {
        let mut log = MessageLog::new(3);
        for line in ["one", "two", "three", "four"] {
            log.add(line, Color::WHITE);
        }
        let texts: Vec<&str> = log.iter().map(|message| message.text.as_str()).collect();
        assert_eq!(texts, ["two", "three", "four"]);
    }
}
