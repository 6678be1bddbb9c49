//! Output of one level generation pass.

use crate::components::GameObject;
use crate::state::Map;
use crate::types::Pos;

use super::layout::Rect;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedLevel {
    pub map: Map,
    /// Accepted rooms in acceptance order.
    pub rooms: Vec<Rect>,
    pub player_start: Pos,
    pub stairs: Pos,
    /// Monsters and items in placement order.
    pub spawns: Vec<GameObject>,
}

impl GeneratedLevel {
    /// One glyph per cell, with spawns drawn over tiles. Used by tools and test diagnostics.
    pub fn to_ascii(&self) -> String {
        let mut text = String::with_capacity((self.map.width + 1) * self.map.height);
        for y in 0..self.map.height {
            for x in 0..self.map.width {
                let pos = Pos { y: y as i32, x: x as i32 };
                let spawn = self.spawns.iter().rev().find(|object| object.pos == pos);
                let glyph = if pos == self.player_start {
                    '@'
                } else if pos == self.stairs {
                    '<'
                } else if let Some(object) = spawn {
                    object.glyph
                } else if self.map.is_blocked(pos) {
                    '#'
                } else {
                    '.'
                };
                text.push(glyph);
            }
            text.push('\n');
        }
        text
    }
}
