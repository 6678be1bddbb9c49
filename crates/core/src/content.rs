//! Monster and item templates, plus the depth-keyed spawn tables.

use crate::components::{
    Ai, Bonuses, DeathHandler, Equipment, Fighter, GameObject, Item, ItemUse, StatusEffect,
};
use crate::types::{Color, Pos, Slot};

pub const HEAL_AMOUNT: i32 = 40;
pub const LIGHTNING_DAMAGE: i32 = 40;
pub const LIGHTNING_RANGE: f64 = 5.0;
pub const CONFUSE_RANGE: f64 = 8.0;
pub const CONFUSE_NUM_TURNS: u32 = 10;
pub const FIREBALL_RADIUS: f64 = 3.0;
pub const FIREBALL_DAMAGE: i32 = 25;

/// `(weight or cap, minimum dungeon level)` pairs; see [`from_dungeon_level`].
pub type DepthTable = &'static [(u32, u32)];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MonsterKind {
    Orc,
    Troll,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemKind {
    HealingPotion,
    LightningScroll,
    FireballScroll,
    ConfusionScroll,
    Sword,
    Shield,
    Helmet,
    AmuletOfLight,
    LeatherArmor,
    RingOfRegeneration,
}

pub const MAX_ROOM_MONSTERS: DepthTable = &[(2, 1), (3, 4), (5, 6)];
pub const MAX_ROOM_ITEMS: DepthTable = &[(1, 1), (2, 4)];

pub const MONSTER_TABLE: &[(MonsterKind, DepthTable)] =
    &[(MonsterKind::Orc, &[(80, 1)]), (MonsterKind::Troll, &[(15, 3), (30, 5), (60, 7)])];

pub const ITEM_TABLE: &[(ItemKind, DepthTable)] = &[
    (ItemKind::HealingPotion, &[(35, 1)]),
    (ItemKind::LightningScroll, &[(25, 4)]),
    (ItemKind::FireballScroll, &[(25, 6)]),
    (ItemKind::ConfusionScroll, &[(10, 2)]),
    (ItemKind::Sword, &[(5, 4)]),
    (ItemKind::Shield, &[(15, 8)]),
    (ItemKind::Helmet, &[(10, 3)]),
    (ItemKind::AmuletOfLight, &[(10, 2)]),
    (ItemKind::LeatherArmor, &[(10, 5)]),
    (ItemKind::RingOfRegeneration, &[(5, 5)]),
];

/// Value of the highest tier whose minimum level is at or below `level`.
/// Levels below every tier yield 0.
pub fn from_dungeon_level(table: &[(u32, u32)], level: u32) -> u32 {
    table
        .iter()
        .filter(|(_, min_level)| *min_level <= level)
        .max_by_key(|(_, min_level)| *min_level)
        .map_or(0, |(value, _)| *value)
}

pub fn player(pos: Pos) -> GameObject {
    GameObject::new(pos, '@', "player", Color::WHITE, true)
        .with_fighter(Fighter::new(100, 1, 2, 10, 80, 0, DeathHandler::Player))
}

pub fn monster(kind: MonsterKind, pos: Pos) -> GameObject {
    match kind {
        MonsterKind::Orc => GameObject::new(pos, 'o', "orc", Color::DESATURATED_GREEN, true)
            .with_fighter(Fighter::new(20, 0, 4, 5, 70, 35, DeathHandler::Monster))
            .with_ai(Ai::Basic),
        MonsterKind::Troll => GameObject::new(pos, 'T', "troll", Color::DARK_GREEN, true)
            .with_fighter(Fighter::new(30, 2, 8, 0, 60, 100, DeathHandler::Monster))
            .with_ai(Ai::Basic),
    }
}

pub fn item(kind: ItemKind, pos: Pos) -> GameObject {
    let scroll = |name: &str, effect: ItemUse| {
        GameObject::new(pos, '#', name, Color::LIGHT_YELLOW, false)
            .with_item(Item { use_effect: effect })
    };
    let gear = |glyph: char, name: &str, color: Color, slot: Slot, bonuses: Bonuses| {
        GameObject::new(pos, glyph, name, color, false)
            .with_equipment(Equipment::new(slot, bonuses))
    };
    match kind {
        ItemKind::HealingPotion => GameObject::new(pos, '!', "healing potion", Color::VIOLET, false)
            .with_item(Item { use_effect: ItemUse::Heal }),
        ItemKind::LightningScroll => scroll("scroll of lightning bolt", ItemUse::Lightning),
        ItemKind::FireballScroll => scroll("scroll of fireball", ItemUse::Fireball),
        ItemKind::ConfusionScroll => scroll("scroll of confusion", ItemUse::Confuse),
        ItemKind::Sword => gear(
            '/',
            "sword",
            Color::SKY,
            Slot::RightHand,
            Bonuses { power: 3, ..Bonuses::default() },
        ),
        ItemKind::Shield => gear(
            '[',
            "shield",
            Color::ORANGE,
            Slot::LeftHand,
            Bonuses { defense: 1, ..Bonuses::default() },
        ),
        ItemKind::Helmet => gear(
            '^',
            "helmet",
            Color::SILVER,
            Slot::Head,
            Bonuses { defense: 1, dodge: 2, ..Bonuses::default() },
        ),
        ItemKind::AmuletOfLight => gear(
            '"',
            "amulet of light",
            Color::GOLD,
            Slot::Neck,
            Bonuses { light_radius: 3, ..Bonuses::default() },
        ),
        ItemKind::LeatherArmor => gear(
            '&',
            "leather armor",
            Color::BRASS,
            Slot::Chest,
            Bonuses { max_hp: 10, ..Bonuses::default() },
        ),
        ItemKind::RingOfRegeneration => gear(
            '=',
            "ring of regeneration",
            Color::LIGHT_GREEN,
            Slot::Finger,
            Bonuses::default(),
        )
        .with_status_effect(StatusEffect::Regeneration { chance_percent: 20, amount: 1 }),
    }
}

pub fn dagger(pos: Pos) -> GameObject {
    GameObject::new(pos, '-', "dagger", Color::SKY, false)
        .with_equipment(Equipment::new(Slot::RightHand, Bonuses { power: 2, ..Bonuses::default() }))
}

pub fn stairs(pos: Pos) -> GameObject {
    GameObject::new(pos, '<', "stairs", Color::WHITE, false).always_visible()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_dungeon_level_picks_highest_tier_not_above_level() {
        let table: DepthTable = &[(15, 3), (30, 5), (60, 7)];
        assert_eq!(from_dungeon_level(table, 1), 0);
        assert_eq!(from_dungeon_level(table, 3), 15);
        assert_eq!(from_dungeon_level(table, 4), 15);
        assert_eq!(from_dungeon_level(table, 5), 30);
        assert_eq!(from_dungeon_level(table, 40), 60);
    }

    #[test]
    fn from_dungeon_level_ignores_table_order() {
        let table: DepthTable = &[(60, 7), (15, 3), (30, 5)];
        assert_eq!(from_dungeon_level(table, 6), 30);
    }

    #[test]
    fn empty_table_yields_zero() {
        assert_eq!(from_dungeon_level(&[], 9), 0);
    }

    #[test]
    fn each_scroll_is_wired_to_its_own_effect() {
        let origin = Pos { y: 0, x: 0 };
        let effect = |kind| item(kind, origin).item.map(|item| item.use_effect);
        assert_eq!(effect(ItemKind::HealingPotion), Some(ItemUse::Heal));
        assert_eq!(effect(ItemKind::LightningScroll), Some(ItemUse::Lightning));
        assert_eq!(effect(ItemKind::FireballScroll), Some(ItemUse::Fireball));
        assert_eq!(effect(ItemKind::ConfusionScroll), Some(ItemUse::Confuse));
    }

    #[test]
    fn every_equipment_kind_carries_an_item_component() {
        let origin = Pos { y: 0, x: 0 };
        for (kind, _) in ITEM_TABLE {
            let object = item(*kind, origin);
            assert!(object.item.is_some(), "{kind:?} must be an item");
            assert!(!object.blocks);
        }
    }
}
