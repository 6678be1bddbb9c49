//! Turn-resolution engine over a [`GameState`].
//! This file owns intent dispatch and the end-of-turn sequence; the focused
//! submodules below add combat, AI, items, prompts, and level transitions.

use tracing::{debug, warn};

use crate::components::{GameObject, ItemUse};
use crate::config::EngineConfig;
use crate::error::GameError;
use crate::state::{GameState, PendingPrompt};
use crate::types::*;

mod ai;
mod bootstrap;
mod combat;
mod floor_transition;
mod frame;
mod hash;
mod items;
mod persistence;
mod prompts;
#[cfg(test)]
mod test_support;
mod visibility;

pub use combat::{attack_hits, damage_dealt};
pub use frame::{Frame, Sprite, StatusPanel, TileShade};
pub use items::{PickUpOutcome, UseOutcome};
pub use prompts::{CharacterSheet, Menu};
pub use visibility::Visibility;

pub struct Game {
    config: EngineConfig,
    state: GameState,
    visibility: Visibility,
    panel: Option<Panel>,
}

impl Game {
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn pending_prompt(&self) -> Option<PendingPrompt> {
        self.state.pending_prompt
    }

    /// Side panel requested by the last informational intent.
    pub fn panel(&self) -> Option<Panel> {
        self.panel
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn is_visible(&self, pos: Pos) -> bool {
        self.visibility.is_visible(pos)
    }

    /// Apply one pre-decoded player intent and, when it consumed a turn, run the
    /// monster and status-effect passes before returning.
    pub fn act(&mut self, intent: Intent) -> Result<PlayerAction, GameError> {
        if intent == Intent::Quit {
            return Ok(PlayerAction::Exit);
        }
        if self.state.status == GameStatus::Dead {
            return Ok(PlayerAction::DidntTakeTurn);
        }
        self.panel = None;

        let action = match self.state.pending_prompt {
            Some(PendingPrompt::Target { item, effect }) => match intent {
                Intent::ConfirmTarget(pos) => self.confirm_target(item, effect, pos),
                Intent::CancelTarget => self.cancel_target(),
                Intent::ChooseLevelUp(_) => return Err(GameError::NoPendingLevelUp { intent }),
                _ => return Err(self.reject_for_prompt(intent)),
            },
            Some(PendingPrompt::LevelUp) => match intent {
                Intent::ChooseLevelUp(choice) => self.choose_level_up(choice),
                Intent::ConfirmTarget(_) | Intent::CancelTarget => {
                    return Err(GameError::NoPendingTarget { intent });
                }
                _ => return Err(self.reject_for_prompt(intent)),
            },
            None => match intent {
                Intent::Move(direction) => self.move_or_attack(direction),
                Intent::PickUp => match self.pick_up_here() {
                    PickUpOutcome::PickedUp => PlayerAction::TookTurn,
                    PickUpOutcome::InventoryFull | PickUpOutcome::NothingHere => {
                        PlayerAction::DidntTakeTurn
                    }
                },
                Intent::OpenInventory => {
                    self.panel = Some(Panel::Inventory);
                    PlayerAction::DidntTakeTurn
                }
                Intent::ShowCharacterSheet => {
                    self.panel = Some(Panel::CharacterSheet);
                    PlayerAction::DidntTakeTurn
                }
                Intent::UseItem(index) => match self.use_item(index) {
                    UseOutcome::Used | UseOutcome::ToggledEquipment => PlayerAction::TookTurn,
                    UseOutcome::Cancelled | UseOutcome::AwaitingTarget => {
                        PlayerAction::DidntTakeTurn
                    }
                },
                Intent::DropItem(index) => self.drop_item(index),
                Intent::DescendStairs => self.descend_stairs(),
                Intent::ConfirmTarget(_) | Intent::CancelTarget => {
                    return Err(GameError::NoPendingTarget { intent });
                }
                Intent::ChooseLevelUp(_) => return Err(GameError::NoPendingLevelUp { intent }),
                Intent::Quit => PlayerAction::Exit,
            },
        };

        if action == PlayerAction::TookTurn {
            self.end_turn();
        }
        self.refresh_visibility();
        Ok(action)
    }

    fn reject_for_prompt(&self, intent: Intent) -> GameError {
        let prompt = self.state.pending_prompt.map_or("no", PendingPrompt::label);
        warn!(?intent, prompt, "intent rejected while a prompt is pending");
        GameError::PromptPending { intent, prompt }
    }

    /// One full pass after an accepted player action: monsters act in draw
    /// order, equipped status effects tick, then experience is checked.
    fn end_turn(&mut self) {
        self.state.turn += 1;
        self.refresh_visibility();
        if self.state.status == GameStatus::Playing {
            self.run_ai_pass();
        }
        if self.state.status == GameStatus::Playing {
            self.apply_status_effects();
        }
        if self.state.status == GameStatus::Playing {
            self.check_level_up();
        }
        debug!(turn = self.state.turn, "turn resolved");
    }

    fn move_or_attack(&mut self, direction: Direction) -> PlayerAction {
        let (dy, dx) = direction.delta();
        let player_id = self.state.player_id;
        let target = self.state.player_pos().offset(dy, dx);

        match self.state.fighter_at(target) {
            Some(defender) if defender != player_id => self.attack(player_id, defender),
            _ => {
                self.move_by(player_id, dy, dx);
            }
        }
        PlayerAction::TookTurn
    }

    /// Step an object by one cell unless the destination is blocked.
    fn move_by(&mut self, id: ObjectId, dy: i32, dx: i32) -> bool {
        let Some(from) = self.state.objects.get(id).map(|object| object.pos) else {
            return false;
        };
        let to = from.offset(dy, dx);
        if self.state.is_blocked(to) {
            return false;
        }
        self.state.objects[id].pos = to;
        if id == self.state.player_id {
            self.visibility.invalidate();
        }
        true
    }

    fn object(&self, id: ObjectId) -> Option<&GameObject> {
        self.state.objects.get(id)
    }

    fn name_of(&self, id: ObjectId) -> String {
        self.object(id).map_or_else(String::new, |object| object.name.clone())
    }

    fn log(&mut self, text: impl Into<String>, color: Color) {
        self.state.messages.add(text, color);
    }
}

/// Upper-case the first letter so names can open a sentence.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn effect_name(effect: ItemUse) -> &'static str {
    match effect {
        ItemUse::None => "none",
        ItemUse::Heal => "heal",
        ItemUse::Lightning => "lightning",
        ItemUse::Fireball => "fireball",
        ItemUse::Confuse => "confuse",
    }
}
