//! Room rectangles and tunnel carving for base map topology.

use crate::state::Map;
use crate::types::Pos;

/// Room candidate. The outer ring (`x1`, `x2`, `y1`, `y2`) stays wall; only the
/// interior is carved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x1: x, y1: y, x2: x + width, y2: y + height }
    }

    pub fn center(self) -> Pos {
        Pos { y: (self.y1 + self.y2) / 2, x: (self.x1 + self.x2) / 2 }
    }

    /// Inclusive test: rectangles sharing an edge also intersect, which keeps a
    /// wall between any two accepted rooms.
    pub fn intersects(self, other: &Self) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    pub fn interior_contains(self, pos: Pos) -> bool {
        pos.x > self.x1 && pos.x < self.x2 && pos.y > self.y1 && pos.y < self.y2
    }
}

pub(super) fn carve_room(map: &mut Map, room: &Rect) {
    for y in (room.y1 + 1)..room.y2 {
        for x in (room.x1 + 1)..room.x2 {
            map.carve(Pos { y, x });
        }
    }
}

pub(super) fn carve_l_shaped_corridor(map: &mut Map, start: Pos, end: Pos, horizontal_first: bool) {
    if horizontal_first {
        carve_horizontal_line(map, start.y, start.x, end.x);
        carve_vertical_line(map, end.x, start.y, end.y);
    } else {
        carve_vertical_line(map, start.x, start.y, end.y);
        carve_horizontal_line(map, end.y, start.x, end.x);
    }
}

fn carve_horizontal_line(map: &mut Map, y: i32, left_x: i32, right_x: i32) {
    for x in left_x.min(right_x)..=left_x.max(right_x) {
        map.carve(Pos { y, x });
    }
}

fn carve_vertical_line(map: &mut Map, x: i32, top_y: i32, bottom_y: i32) {
    for y in top_y.min(bottom_y)..=top_y.max(bottom_y) {
        map.carve(Pos { y, x });
    }
}
