//! Pending prompt resolution and the menus shown to the player.
//! This module exists to isolate modal decisions (target selection, level-up)
//! from regular turn intents.
//! It does not own the effects' damage rules beyond applying them.

use tracing::{debug, info};

use super::*;
use crate::components::Ai;
use crate::config::MAX_MENU_OPTIONS;
use crate::content::{
    CONFUSE_NUM_TURNS, CONFUSE_RANGE, FIREBALL_DAMAGE, FIREBALL_RADIUS, LIGHTNING_DAMAGE,
    LIGHTNING_RANGE,
};

/// Letter-addressed menu. Option `i` answers to the letter `b'a' + i`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Menu {
    pub header: String,
    pub options: Vec<String>,
}

impl Menu {
    pub fn new(header: impl Into<String>, options: Vec<String>) -> Result<Self, GameError> {
        if options.len() > MAX_MENU_OPTIONS {
            return Err(GameError::MenuOverflow { options: options.len(), max: MAX_MENU_OPTIONS });
        }
        Ok(Self { header: header.into(), options })
    }

    pub fn letter(index: usize) -> Option<char> {
        (index < MAX_MENU_OPTIONS).then(|| char::from(b'a' + index as u8))
    }

    pub fn index_of(letter: char) -> Option<usize> {
        let index = (letter as usize).checked_sub('a' as usize)?;
        (index < MAX_MENU_OPTIONS).then_some(index)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacterSheet {
    pub level: u32,
    pub experience: u32,
    pub experience_to_level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub power: i32,
    pub defense: i32,
    pub dodge: i32,
    pub to_hit: i32,
    pub dungeon_level: u32,
}

impl Game {
    pub fn inventory_menu(&self) -> Result<Menu, GameError> {
        let options: Vec<String> = self
            .state
            .inventory
            .iter()
            .filter_map(|id| self.object(*id))
            .map(|object| match object.equipment {
                Some(equipment) if equipment.is_equipped => {
                    format!("{} (on {})", object.name, equipment.slot.label())
                }
                _ => object.name.clone(),
            })
            .collect();
        let header = if options.is_empty() {
            "Inventory is empty."
        } else {
            "Press the key next to an item to use it, or any other to cancel."
        };
        Menu::new(header, options)
    }

    pub fn level_up_menu(&self) -> Result<Menu, GameError> {
        let player_id = self.state.player_id;
        let options = StatChoice::ALL
            .iter()
            .map(|choice| match choice {
                StatChoice::MaxHp => {
                    format!("Constitution (+20 HP, from {})", self.state.max_hp(player_id))
                }
                StatChoice::Power => {
                    format!("Strength (+1 attack, from {})", self.state.power(player_id))
                }
                StatChoice::Defense => {
                    format!("Agility (+1 defense, from {})", self.state.defense(player_id))
                }
                StatChoice::Dodge => {
                    format!("Reflexes (+2 dodge, from {})", self.state.dodge(player_id))
                }
            })
            .collect();
        Menu::new("Level up! Choose a stat to raise:", options)
    }

    pub fn character_sheet(&self) -> CharacterSheet {
        let player_id = self.state.player_id;
        let (level, experience, hp, to_hit) =
            self.state.player().fighter.as_ref().map_or((1, 0, 0, 0), |fighter| {
                (fighter.level, fighter.xp, fighter.hp, fighter.to_hit)
            });
        CharacterSheet {
            level,
            experience,
            experience_to_level: self.config.level_up_threshold(level),
            hp,
            max_hp: self.state.max_hp(player_id),
            power: self.state.power(player_id),
            defense: self.state.defense(player_id),
            dodge: self.state.dodge(player_id),
            to_hit,
            dungeon_level: self.state.dungeon_level,
        }
    }

    /// Apply a targeted effect. Invalid targets are logged and keep the prompt
    /// open; only a valid target consumes the item and the turn.
    pub(super) fn confirm_target(
        &mut self,
        item: ObjectId,
        effect: ItemUse,
        target: Pos,
    ) -> PlayerAction {
        if !self.visibility.is_visible(target) {
            self.log("You cannot see that spot.", Color::WHITE);
            return PlayerAction::DidntTakeTurn;
        }
        let player_pos = self.state.player_pos();
        let reach = match effect {
            ItemUse::Lightning => Some(LIGHTNING_RANGE),
            ItemUse::Confuse => Some(CONFUSE_RANGE),
            _ => None,
        };
        if let Some(range) = reach
            && player_pos.distance(target) > range
        {
            self.log("That target is out of range.", Color::WHITE);
            return PlayerAction::DidntTakeTurn;
        }

        let applied = match effect {
            ItemUse::Lightning => self.cast_lightning(target),
            ItemUse::Confuse => self.cast_confuse(target),
            ItemUse::Fireball => {
                self.cast_fireball(target);
                true
            }
            ItemUse::Heal | ItemUse::None => false,
        };
        if !applied {
            return PlayerAction::DidntTakeTurn;
        }
        debug!(effect = effect_name(effect), y = target.y, x = target.x, "targeted item used");
        self.state.pending_prompt = None;
        self.consume(item);
        PlayerAction::TookTurn
    }

    pub(super) fn cancel_target(&mut self) -> PlayerAction {
        self.state.pending_prompt = None;
        self.log("Cancelled.", Color::WHITE);
        PlayerAction::DidntTakeTurn
    }

    pub(super) fn choose_level_up(&mut self, choice: StatChoice) -> PlayerAction {
        let player_id = self.state.player_id;
        if let Some(fighter) = self.state.objects[player_id].fighter.as_mut() {
            match choice {
                StatChoice::MaxHp => {
                    fighter.base_max_hp += 20;
                    fighter.hp += 20;
                }
                StatChoice::Power => fighter.base_power += 1,
                StatChoice::Defense => fighter.base_defense += 1,
                StatChoice::Dodge => fighter.base_dodge += 2,
            }
        }
        info!(?choice, "level-up stat chosen");
        self.state.pending_prompt = None;
        self.check_level_up();
        PlayerAction::DidntTakeTurn
    }

    /// Living monster (fighter with an AI) on `pos`.
    fn monster_at(&self, pos: Pos) -> Option<ObjectId> {
        let player_id = self.state.player_id;
        self.state.live.iter().copied().find(|id| {
            *id != player_id
                && self.object(*id).is_some_and(|object| {
                    object.pos == pos && object.fighter.is_some() && object.ai.is_some()
                })
        })
    }

    fn cast_lightning(&mut self, target: Pos) -> bool {
        let Some(monster) = self.monster_at(target) else {
            self.log("There is no enemy there.", Color::WHITE);
            return false;
        };
        let name = self.name_of(monster);
        self.log(
            format!(
                "A lightning bolt strikes the {name} with a loud thunder! \
                 The damage is {LIGHTNING_DAMAGE} hit points."
            ),
            Color::LIGHT_BLUE,
        );
        self.take_damage(monster, LIGHTNING_DAMAGE);
        true
    }

    fn cast_confuse(&mut self, target: Pos) -> bool {
        let Some(monster) = self.monster_at(target) else {
            self.log("There is no enemy there.", Color::WHITE);
            return false;
        };
        let Some(object) = self.state.objects.get_mut(monster) else {
            return false;
        };
        // Re-confusing keeps the original behavior to restore.
        let previous = match object.ai.take() {
            Some(Ai::Confused { previous, .. }) => previous,
            Some(ai) => Box::new(ai),
            None => Box::new(Ai::Idle),
        };
        object.ai = Some(Ai::Confused { previous, turns_left: CONFUSE_NUM_TURNS });
        let name = object.name.clone();
        self.log(
            format!("The eyes of the {name} look vacant, as it starts to stumble around!"),
            Color::LIGHT_GREEN,
        );
        true
    }

    /// Burn every fighter within the blast, the player included.
    fn cast_fireball(&mut self, target: Pos) {
        self.log(
            format!("The fireball explodes, burning everything within {FIREBALL_RADIUS} tiles!"),
            Color::ORANGE,
        );
        let caught: Vec<ObjectId> = self
            .state
            .live
            .iter()
            .copied()
            .filter(|id| {
                self.object(*id).is_some_and(|object| {
                    object.fighter.is_some() && object.pos.distance(target) <= FIREBALL_RADIUS
                })
            })
            .collect();
        for id in caught {
            let name = self.name_of(id);
            self.log(
                format!("The {name} gets burned for {FIREBALL_DAMAGE} hit points."),
                Color::ORANGE,
            );
            self.take_damage(id, FIREBALL_DAMAGE);
        }
    }
}
