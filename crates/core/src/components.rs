//! Entity and component data.
//!
//! A [`GameObject`] owns its components by value. Operations that need to know
//! "who owns this component" receive the owner's [`ObjectId`](crate::ObjectId)
//! instead of following a back-pointer.

use serde::{Deserialize, Serialize};

use crate::types::{Color, Pos, Slot};

/// Lowest hp a fighter is clamped to. Reaching it means death.
pub const DEATH_THRESHOLD: i32 = 0;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameObject {
    pub pos: Pos,
    pub glyph: char,
    pub name: String,
    pub color: Color,
    pub blocks: bool,
    pub always_visible: bool,
    pub fighter: Option<Fighter>,
    pub ai: Option<Ai>,
    pub item: Option<Item>,
    pub equipment: Option<Equipment>,
    pub status_effect: Option<StatusEffect>,
}

impl GameObject {
    pub fn new(pos: Pos, glyph: char, name: &str, color: Color, blocks: bool) -> Self {
        Self {
            pos,
            glyph,
            name: name.to_string(),
            color,
            blocks,
            always_visible: false,
            fighter: None,
            ai: None,
            item: None,
            equipment: None,
            status_effect: None,
        }
    }

    pub fn with_fighter(mut self, fighter: Fighter) -> Self {
        self.fighter = Some(fighter);
        self
    }

    pub fn with_ai(mut self, ai: Ai) -> Self {
        self.ai = Some(ai);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.item = Some(item);
        self
    }

    /// Attaching equipment also attaches an [`Item`] when the object has none,
    /// because equipment is picked up and dropped like any other item.
    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        if self.item.is_none() {
            self.item = Some(Item { use_effect: ItemUse::None });
        }
        self.equipment = Some(equipment);
        self
    }

    pub fn with_status_effect(mut self, effect: StatusEffect) -> Self {
        self.status_effect = Some(effect);
        self
    }

    pub fn always_visible(mut self) -> Self {
        self.always_visible = true;
        self
    }

    pub fn is_alive_fighter(&self) -> bool {
        self.fighter.as_ref().is_some_and(|fighter| fighter.hp > DEATH_THRESHOLD)
    }

    pub fn is_equipped(&self) -> bool {
        self.equipment.as_ref().is_some_and(|equipment| equipment.is_equipped)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathHandler {
    Player,
    Monster,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    pub base_max_hp: i32,
    pub hp: i32,
    pub base_defense: i32,
    pub base_power: i32,
    pub base_dodge: i32,
    pub to_hit: i32,
    /// Accumulated experience for the player, or the reward granted on death for monsters.
    pub xp: u32,
    pub level: u32,
    pub on_death: DeathHandler,
}

impl Fighter {
    pub fn new(
        hp: i32,
        defense: i32,
        power: i32,
        dodge: i32,
        to_hit: i32,
        xp: u32,
        on_death: DeathHandler,
    ) -> Self {
        Self {
            base_max_hp: hp,
            hp,
            base_defense: defense,
            base_power: power,
            base_dodge: dodge,
            to_hit,
            xp,
            level: 1,
            on_death,
        }
    }
}

/// Monster behavior. Exactly one variant is active per object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ai {
    Idle,
    Basic,
    Confused { previous: Box<Ai>, turns_left: u32 },
}

/// Named effect invoked when a non-equipment item is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemUse {
    None,
    Heal,
    Lightning,
    Fireball,
    Confuse,
}

impl ItemUse {
    pub fn needs_target(self) -> bool {
        matches!(self, ItemUse::Lightning | ItemUse::Fireball | ItemUse::Confuse)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub use_effect: ItemUse,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonuses {
    pub power: i32,
    pub defense: i32,
    pub max_hp: i32,
    pub dodge: i32,
    pub light_radius: i32,
}

impl Bonuses {
    pub fn add(self, other: Bonuses) -> Bonuses {
        Bonuses {
            power: self.power + other.power,
            defense: self.defense + other.defense,
            max_hp: self.max_hp + other.max_hp,
            dodge: self.dodge + other.dodge,
            light_radius: self.light_radius + other.light_radius,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub slot: Slot,
    pub bonuses: Bonuses,
    pub is_equipped: bool,
}

impl Equipment {
    pub fn new(slot: Slot, bonuses: Bonuses) -> Self {
        Self { slot, bonuses, is_equipped: false }
    }
}

/// Recurring per-turn effect carried by an item; active only while it is equipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusEffect {
    Regeneration { chance_percent: u8, amount: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equipment_attaches_item_when_missing() {
        let object = GameObject::new(Pos { y: 1, x: 1 }, '/', "sword", Color::SKY, false)
            .with_equipment(Equipment::new(Slot::RightHand, Bonuses::default()));
        assert_eq!(object.item, Some(Item { use_effect: ItemUse::None }));
    }

    #[test]
    fn equipment_keeps_existing_item_component() {
        let object = GameObject::new(Pos { y: 1, x: 1 }, '/', "odd sword", Color::SKY, false)
            .with_item(Item { use_effect: ItemUse::Heal })
            .with_equipment(Equipment::new(Slot::RightHand, Bonuses::default()));
        assert_eq!(object.item, Some(Item { use_effect: ItemUse::Heal }));
    }

    #[test]
    fn bonuses_add_component_wise() {
        let left = Bonuses { power: 1, defense: 2, max_hp: 3, dodge: 4, light_radius: 5 };
        let right = Bonuses { power: 10, defense: 0, max_hp: -3, dodge: 1, light_radius: 0 };
        assert_eq!(
            left.add(right),
            Bonuses { power: 11, defense: 2, max_hp: 0, dodge: 5, light_radius: 5 }
        );
    }
}
