//! Inventory, equipment, and item-use behavior.
//! This module exists to keep pick-up, drop, equip, and use rules apart from
//! turn orchestration.
//! It does not own target confirmation; see the prompts module.

use tracing::debug;

use super::*;
use crate::components::StatusEffect;
use crate::content::HEAL_AMOUNT;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickUpOutcome {
    PickedUp,
    /// Inventory at capacity; nothing moved.
    InventoryFull,
    NothingHere,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UseOutcome {
    /// The item's effect applied and the item was consumed.
    Used,
    /// Equipment was equipped or unequipped.
    ToggledEquipment,
    /// Target selection started; nothing is consumed until it is confirmed.
    AwaitingTarget,
    /// The use was aborted. No turn passes and the item stays.
    Cancelled,
}

impl Game {
    pub(super) fn pick_up_here(&mut self) -> PickUpOutcome {
        let pos = self.state.player_pos();
        let player_id = self.state.player_id;
        let found = self.state.live.iter().rev().copied().find(|id| {
            *id != player_id
                && self.object(*id).is_some_and(|object| object.pos == pos && object.item.is_some())
        });
        match found {
            Some(id) => self.pick_up(id),
            None => {
                self.log("There is nothing here to pick up.", Color::WHITE);
                PickUpOutcome::NothingHere
            }
        }
    }

    pub(super) fn pick_up(&mut self, id: ObjectId) -> PickUpOutcome {
        let name = self.name_of(id);
        if self.state.inventory.len() >= self.config.inventory_capacity {
            self.log(format!("Your inventory is full, cannot pick up {name}."), Color::RED);
            return PickUpOutcome::InventoryFull;
        }
        if !self.state.remove_from_live(id) {
            return PickUpOutcome::NothingHere;
        }
        self.state.inventory.push(id);
        self.log(format!("You picked up a {name}!"), Color::GREEN);

        let free_slot = self
            .object(id)
            .and_then(|object| object.equipment)
            .is_some_and(|equipment| self.state.equipped_in_slot(equipment.slot).is_none());
        if free_slot {
            self.equip(id);
        }
        PickUpOutcome::PickedUp
    }

    pub(super) fn drop_item(&mut self, index: usize) -> PlayerAction {
        let Some(&id) = self.state.inventory.get(index) else {
            self.log("There is no item in that slot.", Color::WHITE);
            return PlayerAction::DidntTakeTurn;
        };
        if self.object(id).is_some_and(GameObject::is_equipped) {
            self.dequip(id);
        }
        self.state.inventory.remove(index);
        let pos = self.state.player_pos();
        self.state.objects[id].pos = pos;
        self.state.live.push(id);
        self.state.send_to_back(id);
        let name = self.name_of(id);
        self.log(format!("You dropped a {name}."), Color::YELLOW);
        PlayerAction::TookTurn
    }

    /// Equipment always toggles; otherwise the item's named effect runs.
    pub(super) fn use_item(&mut self, index: usize) -> UseOutcome {
        let Some(&id) = self.state.inventory.get(index) else {
            self.log("There is no item in that slot.", Color::WHITE);
            return UseOutcome::Cancelled;
        };
        let Some(object) = self.object(id) else {
            return UseOutcome::Cancelled;
        };
        if object.equipment.is_some() {
            self.toggle_equipment(id);
            return UseOutcome::ToggledEquipment;
        }
        let effect = object.item.map_or(ItemUse::None, |item| item.use_effect);
        let name = object.name.clone();
        debug!(item = name.as_str(), effect = effect_name(effect), "using item");

        match effect {
            ItemUse::None => {
                self.log(format!("The {name} cannot be used."), Color::WHITE);
                UseOutcome::Cancelled
            }
            ItemUse::Heal => {
                let player_id = self.state.player_id;
                let hp = self.state.player().fighter.as_ref().map_or(0, |fighter| fighter.hp);
                if hp >= self.state.max_hp(player_id) {
                    self.log("You are already at full health.", Color::RED);
                    return UseOutcome::Cancelled;
                }
                self.log("Your wounds start to feel better!", Color::LIGHT_VIOLET);
                self.heal(player_id, HEAL_AMOUNT);
                self.consume(id);
                UseOutcome::Used
            }
            ItemUse::Lightning | ItemUse::Fireball | ItemUse::Confuse => {
                self.state.pending_prompt = Some(PendingPrompt::Target { item: id, effect });
                let hint = match effect {
                    ItemUse::Fireball => "Choose a tile to throw the fireball at, or cancel.",
                    ItemUse::Confuse => "Choose an enemy to confuse, or cancel.",
                    _ => "Choose an enemy to strike, or cancel.",
                };
                self.log(hint, Color::LIGHT_CYAN);
                UseOutcome::AwaitingTarget
            }
        }
    }

    /// Remove a used item from the inventory and the world.
    pub(super) fn consume(&mut self, id: ObjectId) {
        self.state.inventory.retain(|held| *held != id);
        self.state.objects.remove(id);
    }

    pub(super) fn toggle_equipment(&mut self, id: ObjectId) {
        if self.object(id).is_some_and(GameObject::is_equipped) {
            self.dequip(id);
        } else {
            self.equip(id);
        }
    }

    /// Equip an inventory item, first unequipping whatever holds its slot.
    pub(super) fn equip(&mut self, id: ObjectId) {
        let Some(equipment) = self.object(id).and_then(|object| object.equipment) else {
            let name = self.name_of(id);
            self.log(format!("The {name} cannot be equipped."), Color::WHITE);
            return;
        };
        if equipment.is_equipped {
            return;
        }
        if let Some(current) = self.state.equipped_in_slot(equipment.slot)
            && current != id
        {
            self.dequip(current);
        }
        if let Some(held) = self.state.objects[id].equipment.as_mut() {
            held.is_equipped = true;
        }
        let name = self.name_of(id);
        self.log(format!("Equipped {name} on {}.", equipment.slot.label()), Color::LIGHT_GREEN);
        self.visibility.invalidate();
    }

    /// Unequip an item. Unequipping something already unequipped is a no-op.
    pub(super) fn dequip(&mut self, id: ObjectId) {
        let Some(equipment) = self.object(id).and_then(|object| object.equipment) else {
            return;
        };
        if !equipment.is_equipped {
            return;
        }
        if let Some(held) = self.state.objects[id].equipment.as_mut() {
            held.is_equipped = false;
        }
        let name = self.name_of(id);
        self.log(
            format!("Dequipped {name} from {}.", equipment.slot.label()),
            Color::LIGHT_YELLOW,
        );

        let player_id = self.state.player_id;
        let max_hp = self.state.max_hp(player_id);
        if let Some(fighter) = self.state.objects[player_id].fighter.as_mut() {
            fighter.hp = fighter.hp.min(max_hp);
        }
        self.visibility.invalidate();
    }

    /// Tick every status effect carried by an equipped item.
    pub(super) fn apply_status_effects(&mut self) {
        let effects: Vec<StatusEffect> = self
            .state
            .inventory
            .iter()
            .filter_map(|id| self.object(*id))
            .filter(|object| object.is_equipped())
            .filter_map(|object| object.status_effect)
            .collect();
        let player_id = self.state.player_id;
        for effect in effects {
            match effect {
                StatusEffect::Regeneration { chance_percent, amount } => {
                    if self.state.dice.chance(chance_percent) {
                        self.heal(player_id, amount);
                        debug!(amount, "regeneration ticked");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ItemKind;
    use crate::game::test_support::*;
    use crate::types::Slot;

    fn stats(game: &Game) -> (i32, i32, i32, i32) {
        let player = game.state.player_id;
        (
            game.state.power(player),
            game.state.defense(player),
            game.state.max_hp(player),
            game.state.dodge(player),
        )
    }

    #[test]
    fn pick_up_moves_item_from_map_to_inventory() {
        let mut game = arena_game();
        let potion = place_item(&mut game, ItemKind::HealingPotion, Pos { y: 5, x: 5 });

        assert_eq!(game.pick_up_here(), PickUpOutcome::PickedUp);

        assert!(!game.state.live.contains(&potion));
        assert_eq!(game.state.inventory, vec![potion]);
        assert!(game.state.messages.contains("You picked up a healing potion!"));
    }

    #[test]
    fn pick_up_with_nothing_underfoot_is_not_a_turn() {
        let mut game = arena_game();
        let action = game.act(Intent::PickUp).expect("pick up");
        assert_eq!(action, PlayerAction::DidntTakeTurn);
        assert_eq!(game.state.turn, 0);
    }

    #[test]
    fn pick_up_at_capacity_fails_and_leaves_inventory_unchanged() {
        let mut game = arena_game();
        for _ in 0..26 {
            give_item(&mut game, ItemKind::HealingPotion);
        }
        let extra = place_item(&mut game, ItemKind::HealingPotion, Pos { y: 5, x: 5 });

        let action = game.act(Intent::PickUp).expect("pick up");

        assert_eq!(action, PlayerAction::DidntTakeTurn);
        assert_eq!(game.state.inventory.len(), 26);
        assert!(game.state.live.contains(&extra));
        assert!(game.state.messages.contains("Your inventory is full"));
    }

    #[test]
    fn equipment_auto_equips_only_into_a_free_slot() {
        let mut game = arena_game();
        let sword = place_item(&mut game, ItemKind::Sword, Pos { y: 5, x: 5 });
        game.pick_up_here();
        assert!(game.state.objects[sword].is_equipped());

        let second = place_item(&mut game, ItemKind::Sword, Pos { y: 5, x: 5 });
        game.pick_up_here();
        assert!(!game.state.objects[second].is_equipped());
        assert_eq!(game.state.equipped_in_slot(Slot::RightHand), Some(sword));
    }

    #[test]
    fn equip_then_dequip_restores_derived_stats() {
        let mut game = arena_game();
        let helmet = give_item(&mut game, ItemKind::Helmet);
        let armor = give_item(&mut game, ItemKind::LeatherArmor);
        let before = stats(&game);

        game.equip(helmet);
        game.equip(armor);
        assert_ne!(stats(&game), before);

        game.dequip(helmet);
        game.dequip(armor);
        assert_eq!(stats(&game), before);
    }

    #[test]
    fn equipping_into_an_occupied_slot_swaps_the_occupant() {
        let mut game = arena_game();
        let first = give_item(&mut game, ItemKind::Sword);
        let second = give_item(&mut game, ItemKind::Sword);
        game.equip(first);

        game.equip(second);

        assert!(!game.state.objects[first].is_equipped());
        assert!(game.state.objects[second].is_equipped());
        let equipped_right_hand = game
            .state
            .inventory
            .iter()
            .filter(|id| {
                game.state.objects[**id]
                    .equipment
                    .is_some_and(|eq| eq.is_equipped && eq.slot == Slot::RightHand)
            })
            .count();
        assert_eq!(equipped_right_hand, 1);
        assert!(game.state.messages.contains("Dequipped sword from right hand."));
    }

    #[test]
    fn dequip_is_idempotent() {
        let mut game = arena_game();
        let shield = give_item(&mut game, ItemKind::Shield);
        let log_len = game.state.messages.len();
        game.dequip(shield);
        game.dequip(shield);
        assert!(!game.state.objects[shield].is_equipped());
        assert_eq!(game.state.messages.len(), log_len);
    }

    #[test]
    fn using_equipment_toggles_it_and_takes_a_turn() {
        let mut game = arena_game();
        let shield = give_item(&mut game, ItemKind::Shield);

        assert_eq!(game.act(Intent::UseItem(0)).expect("equip"), PlayerAction::TookTurn);
        assert!(game.state.objects[shield].is_equipped());
        assert_eq!(game.act(Intent::UseItem(0)).expect("dequip"), PlayerAction::TookTurn);
        assert!(!game.state.objects[shield].is_equipped());
        assert_eq!(game.state.inventory, vec![shield]);
    }

    #[test]
    fn equipment_overrides_a_configured_use_effect() {
        let mut game = arena_game();
        let ring = give_item(&mut game, ItemKind::RingOfRegeneration);
        if let Some(item) = game.state.objects[ring].item.as_mut() {
            item.use_effect = ItemUse::Heal;
        }
        assert_eq!(game.use_item(0), UseOutcome::ToggledEquipment);
        assert!(game.state.objects[ring].is_equipped());
    }

    #[test]
    fn healing_at_full_health_is_cancelled_without_consuming() {
        let mut game = arena_game();
        let potion = give_item(&mut game, ItemKind::HealingPotion);

        let action = game.act(Intent::UseItem(0)).expect("use");

        assert_eq!(action, PlayerAction::DidntTakeTurn);
        assert_eq!(game.state.inventory, vec![potion]);
        assert!(game.state.messages.contains("already at full health"));
    }

    #[test]
    fn healing_potion_heals_and_is_consumed() {
        let mut game = arena_game();
        let player = game.state.player_id;
        let potion = give_item(&mut game, ItemKind::HealingPotion);
        fighter_mut(&mut game, player).hp = 30;

        assert_eq!(game.use_item(0), UseOutcome::Used);

        assert_eq!(player_hp(&game), 70);
        assert!(game.state.inventory.is_empty());
        assert!(game.state.objects.get(potion).is_none());
    }

    #[test]
    fn bad_inventory_index_is_logged_not_an_error() {
        let mut game = arena_game();
        assert_eq!(game.act(Intent::UseItem(3)).expect("use"), PlayerAction::DidntTakeTurn);
        assert_eq!(game.act(Intent::DropItem(3)).expect("drop"), PlayerAction::DidntTakeTurn);
        assert!(game.state.messages.contains("no item in that slot"));
    }

    #[test]
    fn dropping_equipped_item_unequips_and_places_it_underfoot() {
        let mut game = arena_game();
        let sword = give_item(&mut game, ItemKind::Sword);
        game.equip(sword);
        let power_before = game.state.power(game.state.player_id);

        assert_eq!(game.act(Intent::DropItem(0)).expect("drop"), PlayerAction::TookTurn);

        let dropped = &game.state.objects[sword];
        assert!(!dropped.is_equipped());
        assert_eq!(dropped.pos, game.state.player_pos());
        assert!(game.state.live.contains(&sword));
        assert!(game.state.inventory.is_empty());
        assert_eq!(game.state.power(game.state.player_id), power_before - 3);
    }

    #[test]
    fn dequipping_max_hp_gear_clamps_current_hp() {
        let mut game = arena_game();
        let armor = give_item(&mut game, ItemKind::LeatherArmor);
        game.equip(armor);
        let player = game.state.player_id;
        fighter_mut(&mut game, player).hp = 110;

        game.dequip(armor);

        assert_eq!(player_hp(&game), 100);
    }

    #[test]
    fn equipping_light_gear_invalidates_visibility() {
        let mut game = arena_game();
        let amulet = give_item(&mut game, ItemKind::AmuletOfLight);
        assert!(!game.visibility.is_dirty());
        game.equip(amulet);
        assert!(game.visibility.is_dirty());
        assert_eq!(game.state.light_radius_bonus(), 3);
    }

    #[test]
    fn regeneration_only_ticks_while_equipped() {
        let mut game = arena_game();
        let player = game.state.player_id;
        let ring = give_item(&mut game, ItemKind::RingOfRegeneration);
        fighter_mut(&mut game, player).hp = 10;

        for _ in 0..200 {
            game.apply_status_effects();
        }
        assert_eq!(player_hp(&game), 10);

        game.equip(ring);
        for _ in 0..200 {
            game.apply_status_effects();
        }
        assert!(player_hp(&game) > 10);
    }
}
