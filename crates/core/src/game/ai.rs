//! Monster turns: chase-and-melee and confused wandering.
//! This module exists to keep per-variant AI dispatch out of the turn scheduler.
//! It does not own attack resolution.

use tracing::debug;

use super::*;
use crate::components::Ai;

impl Game {
    /// One turn for every AI-bearing object, in draw order. The order is
    /// snapshotted first so deaths and removals mid-pass are harmless.
    pub(super) fn run_ai_pass(&mut self) {
        let order = self.state.live.clone();
        for id in order {
            if self.state.status != GameStatus::Playing {
                break;
            }
            if id == self.state.player_id {
                continue;
            }
            let Some(ai) = self.object(id).and_then(|object| object.ai.clone()) else {
                continue;
            };
            self.take_ai_turn(id, ai);
        }
    }

    fn take_ai_turn(&mut self, id: ObjectId, ai: Ai) {
        match ai {
            Ai::Idle => {}
            Ai::Basic => self.basic_turn(id),
            Ai::Confused { previous, turns_left } => self.confused_turn(id, *previous, turns_left),
        }
    }

    /// A monster acts only while the player can see it.
    fn basic_turn(&mut self, id: ObjectId) {
        let Some(pos) = self.object(id).map(|object| object.pos) else {
            return;
        };
        if !self.visibility.is_visible(pos) {
            return;
        }
        let player_id = self.state.player_id;
        let player_pos = self.state.player_pos();
        if pos.distance(player_pos) >= 2.0 {
            self.move_towards(id, player_pos);
        } else if self.state.player().is_alive_fighter() {
            self.attack(id, player_id);
        }
    }

    fn confused_turn(&mut self, id: ObjectId, previous: Ai, turns_left: u32) {
        if turns_left > 0 {
            let dy = self.state.dice.range(-1, 1);
            let dx = self.state.dice.range(-1, 1);
            self.move_by(id, dy, dx);
            if let Some(object) = self.state.objects.get_mut(id) {
                object.ai =
                    Some(Ai::Confused { previous: Box::new(previous), turns_left: turns_left - 1 });
            }
            return;
        }
        let Some(object) = self.state.objects.get_mut(id) else {
            return;
        };
        object.ai = Some(previous);
        let name = object.name.clone();
        self.log(format!("The {name} is no longer confused!"), Color::RED);
        debug!(monster = name.as_str(), "confusion wore off");
    }

    /// Step one cell along the normalized vector towards `target`.
    fn move_towards(&mut self, id: ObjectId, target: Pos) {
        let Some(pos) = self.object(id).map(|object| object.pos) else {
            return;
        };
        let dx = f64::from(target.x - pos.x);
        let dy = f64::from(target.y - pos.y);
        let distance = (dx * dx + dy * dy).sqrt();
        if distance == 0.0 {
            return;
        }
        let step_x = (dx / distance).round() as i32;
        let step_y = (dy / distance).round() as i32;
        self.move_by(id, step_y, step_x);
    }
}
