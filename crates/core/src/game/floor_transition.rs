//! Descending to the next dungeon level.

use super::*;

impl Game {
    pub(super) fn descend_stairs(&mut self) -> PlayerAction {
        let stairs_pos = self.object(self.state.stairs_id).map(|stairs| stairs.pos);
        if stairs_pos != Some(self.state.player_pos()) {
            self.log("There are no stairs here.", Color::WHITE);
            return PlayerAction::DidntTakeTurn;
        }

        let player_id = self.state.player_id;
        self.log("You take a moment to rest, and recover your strength.", Color::LIGHT_VIOLET);
        let rest = self.state.max_hp(player_id) / 2;
        self.heal(player_id, rest);
        self.log(
            "After a rare moment of peace, you descend deeper into the heart of the dungeon...",
            Color::RED,
        );
        let next_level = self.state.dungeon_level + 1;
        self.install_level(next_level);
        PlayerAction::TookTurn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ItemKind;
    use crate::game::test_support::*;

    #[test]
    fn descending_off_the_stairs_is_refused() {
        let mut game = arena_game();
        let action = game.act(Intent::DescendStairs).expect("descend");
        assert_eq!(action, PlayerAction::DidntTakeTurn);
        assert_eq!(game.state.dungeon_level, 1);
        assert!(game.state.messages.contains("There are no stairs here."));
    }

    #[test]
    fn descending_heals_half_max_hp_and_keeps_inventory() {
        let mut game = Game::new(31, EngineConfig::default());
        let player = game.state.player_id;
        let stairs_pos = game.state.objects[game.state.stairs_id].pos;
        game.state.objects[player].pos = stairs_pos;
        fighter_mut(&mut game, player).hp = 10;
        let potion = give_item(&mut game, ItemKind::HealingPotion);

        game.descend_stairs();

        assert_eq!(game.state.dungeon_level, 2);
        assert_eq!(player_hp(&game), 60);
        assert!(game.state.inventory.contains(&potion));
        assert!(game.state.objects.get(potion).is_some());
        assert!(!game.state.map.is_blocked(game.state.player_pos()));
    }
}
