//! Attack resolution, damage, death handling, and experience.
//! This module exists to keep hit/damage rules in pure functions that the
//! engine applies to fighters.
//! It does not own AI movement or item targeting.

use tracing::{debug, info};

use super::*;
use crate::components::{DEATH_THRESHOLD, DeathHandler};
use crate::state::PendingPrompt;

/// An attack lands when the attacker's accuracy covers the roll plus the
/// defender's dodge.
pub fn attack_hits(to_hit: i32, roll: i32, dodge: i32) -> bool {
    to_hit >= roll + dodge
}

/// Raw damage before clamping; zero or less means the blow has no effect.
pub fn damage_dealt(power: i32, defense: i32) -> i32 {
    power - defense
}

impl Game {
    pub(super) fn attack(&mut self, attacker: ObjectId, defender: ObjectId) {
        let roll = self.state.dice.percent();
        self.attack_with_roll(attacker, defender, roll);
    }

    pub(super) fn attack_with_roll(&mut self, attacker: ObjectId, defender: ObjectId, roll: i32) {
        let Some(to_hit) = self
            .object(attacker)
            .and_then(|object| object.fighter.as_ref())
            .map(|fighter| fighter.to_hit)
        else {
            return;
        };
        let attacker_name = capitalize(&self.name_of(attacker));
        let defender_name = self.name_of(defender);
        let dodge = self.state.dodge(defender);

        if !attack_hits(to_hit, roll, dodge) {
            debug!(roll, to_hit, dodge, "attack missed");
            let text = format!("{attacker_name} swings at {defender_name} and misses!");
            self.log(text, Color::WHITE);
            return;
        }

        let damage = damage_dealt(self.state.power(attacker), self.state.defense(defender));
        if damage > 0 {
            self.log(
                format!("{attacker_name} attacks {defender_name} for {damage} hit points."),
                Color::WHITE,
            );
            self.take_damage(defender, damage);
        } else {
            self.log(
                format!("{attacker_name} attacks {defender_name} but it has no effect!"),
                Color::WHITE,
            );
        }
    }

    /// Subtract `damage` from a living fighter. A fighter already at or below
    /// the death threshold is left alone, so death fires once.
    pub(super) fn take_damage(&mut self, target: ObjectId, damage: i32) {
        let Some(fighter) =
            self.state.objects.get_mut(target).and_then(|object| object.fighter.as_mut())
        else {
            return;
        };
        if fighter.hp <= DEATH_THRESHOLD || damage <= 0 {
            return;
        }
        fighter.hp = (fighter.hp - damage).max(DEATH_THRESHOLD);
        if fighter.hp <= DEATH_THRESHOLD {
            let handler = fighter.on_death;
            self.handle_death(target, handler);
        }
    }

    pub(super) fn heal(&mut self, target: ObjectId, amount: i32) {
        let max_hp = self.state.max_hp(target);
        if let Some(fighter) =
            self.state.objects.get_mut(target).and_then(|object| object.fighter.as_mut())
        {
            fighter.hp = (fighter.hp + amount).min(max_hp);
        }
    }

    fn handle_death(&mut self, target: ObjectId, handler: DeathHandler) {
        match handler {
            DeathHandler::Player => {
                self.state.status = GameStatus::Dead;
                if let Some(player) = self.state.objects.get_mut(target) {
                    player.glyph = '%';
                    player.color = Color::DARK_RED;
                }
                self.log("You died!", Color::RED);
                info!(turn = self.state.turn, level = self.state.dungeon_level, "player died");
            }
            DeathHandler::Monster => {
                let Some(monster) = self.state.objects.get_mut(target) else {
                    return;
                };
                let xp = monster.fighter.as_ref().map_or(0, |fighter| fighter.xp);
                let name = monster.name.clone();
                monster.glyph = '%';
                monster.color = Color::DARK_RED;
                monster.blocks = false;
                monster.fighter = None;
                monster.ai = None;
                monster.name = format!("remains of {name}");
                self.state.send_to_back(target);

                let player_id = self.state.player_id;
                if let Some(fighter) = self.state.objects[player_id].fighter.as_mut() {
                    fighter.xp += xp;
                }
                self.log(
                    format!("{} is dead! You gain {xp} experience points.", capitalize(&name)),
                    Color::ORANGE,
                );
                debug!(monster = name.as_str(), xp, "monster died");
            }
        }
    }

    /// Raise a level-up prompt when the player's experience reaches the
    /// threshold for their current level.
    pub(super) fn check_level_up(&mut self) {
        if self.state.pending_prompt.is_some() {
            return;
        }
        let player_id = self.state.player_id;
        let Some(fighter) = self.state.objects[player_id].fighter.as_mut() else {
            return;
        };
        let threshold = self.config.level_up_threshold(fighter.level);
        if fighter.xp < threshold {
            return;
        }
        fighter.xp -= threshold;
        fighter.level += 1;
        let level = fighter.level;
        self.state.pending_prompt = Some(PendingPrompt::LevelUp);
        self.log(
            format!("Your battle skills grow stronger! You reached level {level}!"),
            Color::YELLOW,
        );
        info!(level, "player levelled up");
    }
}
