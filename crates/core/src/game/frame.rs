//! Per-frame render payload handed to the host.
//! This module exists to keep drawing policy (lit, dark, hidden) in the engine
//! while the host only paints what it is given.

use super::*;
use crate::state::Message;

const DARK_WALL: Color = Color::rgb(0, 0, 100);
const LIGHT_WALL: Color = Color::rgb(130, 110, 50);
const DARK_GROUND: Color = Color::rgb(50, 50, 150);
const LIGHT_GROUND: Color = Color::rgb(200, 180, 50);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileShade {
    Unexplored,
    LitWall,
    LitGround,
    DarkWall,
    DarkGround,
}

impl TileShade {
    /// Background color, or `None` for tiles that are not drawn.
    pub fn color(self) -> Option<Color> {
        match self {
            TileShade::Unexplored => None,
            TileShade::LitWall => Some(LIGHT_WALL),
            TileShade::LitGround => Some(LIGHT_GROUND),
            TileShade::DarkWall => Some(DARK_WALL),
            TileShade::DarkGround => Some(DARK_GROUND),
        }
    }

    pub fn is_wall(self) -> bool {
        matches!(self, TileShade::LitWall | TileShade::DarkWall)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub pos: Pos,
    pub glyph: char,
    pub color: Color,
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusPanel {
    pub hp: i32,
    pub max_hp: i32,
    pub dungeon_level: u32,
    pub names_under_cursor: Vec<String>,
    pub messages: Vec<Message>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    /// Row-major, one entry per map cell.
    pub tiles: Vec<TileShade>,
    /// Draw order; later sprites paint over earlier ones.
    pub sprites: Vec<Sprite>,
    pub status: StatusPanel,
    pub prompt: Option<PendingPrompt>,
    pub panel: Option<Panel>,
}

impl Frame {
    pub fn shade_at(&self, pos: Pos) -> TileShade {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height
        {
            return TileShade::Unexplored;
        }
        self.tiles[(pos.y as usize) * self.width + (pos.x as usize)]
    }
}

impl Game {
    /// Snapshot of everything a renderer needs. `cursor` is the tile under
    /// the pointer, if any.
    pub fn frame(&self, cursor: Option<Pos>) -> Frame {
        let map = &self.state.map;
        let mut tiles = Vec::with_capacity(map.width * map.height);
        for y in 0..map.height {
            for x in 0..map.width {
                let pos = Pos { y: y as i32, x: x as i32 };
                let wall = map.blocks_sight(pos);
                let shade = if self.visibility.is_visible(pos) {
                    if wall { TileShade::LitWall } else { TileShade::LitGround }
                } else if map.is_explored(pos) {
                    if wall { TileShade::DarkWall } else { TileShade::DarkGround }
                } else {
                    TileShade::Unexplored
                };
                tiles.push(shade);
            }
        }

        // The player is drawn last so nothing covers it.
        let player_id = self.state.player_id;
        let sprites = self
            .state
            .live
            .iter()
            .copied()
            .filter(|id| *id != player_id)
            .chain([player_id])
            .filter_map(|id| self.object(id))
            .map(|object| Sprite {
                pos: object.pos,
                glyph: object.glyph,
                color: object.color,
                visible: self.object_is_shown(object),
            })
            .collect();

        let names_under_cursor = cursor.map_or_else(Vec::new, |pos| {
            self.state
                .live
                .iter()
                .filter_map(|id| self.object(*id))
                .filter(|object| object.pos == pos && self.object_is_shown(object))
                .map(|object| object.name.clone())
                .collect()
        });

        let player = self.state.player();
        Frame {
            width: map.width,
            height: map.height,
            tiles,
            sprites,
            status: StatusPanel {
                hp: player.fighter.as_ref().map_or(0, |fighter| fighter.hp),
                max_hp: self.state.max_hp(player_id),
                dungeon_level: self.state.dungeon_level,
                names_under_cursor,
                messages: self.state.messages.iter().cloned().collect(),
            },
            prompt: self.state.pending_prompt,
            panel: self.panel,
        }
    }

    /// Visible now, or a persistent marker whose tile was explored.
    fn object_is_shown(&self, object: &GameObject) -> bool {
        self.visibility.is_visible(object.pos)
            || (object.always_visible && self.state.map.is_explored(object.pos))
    }
}
