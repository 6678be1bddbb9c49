//! Field-of-view and line-of-sight calculations for map visibility.
//! This module exists to keep sight rules deterministic and isolated.
//! It does not own movement or targeting policy decisions.

use tracing::debug;

use super::*;
use crate::state::Map;

/// Derived per-tile "visible now" set. Never persisted; rebuilt on load.
#[derive(Clone, Debug)]
pub struct Visibility {
    width: usize,
    height: usize,
    visible: Vec<bool>,
    dirty: bool,
    recomputes: u64,
}

impl Visibility {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, visible: vec![false; width * height], dirty: true, recomputes: 0 }
    }

    /// Mark the cached set stale. The next refresh recomputes it.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_visible(&self, pos: Pos) -> bool {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height
        {
            return false;
        }
        self.visible[(pos.y as usize) * self.width + (pos.x as usize)]
    }

    /// Number of full recomputations performed so far.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Recompute from `origin` and mark every visible tile explored.
    pub(super) fn recompute(&mut self, map: &mut Map, origin: Pos, radius: i32) {
        self.visible = compute_fov(map, origin, radius);
        for (index, visible) in self.visible.iter().enumerate() {
            if *visible {
                map.tiles[index].explored = true;
            }
        }
        self.dirty = false;
        self.recomputes += 1;
    }
}

impl Game {
    /// Recompute the field of view if something invalidated it.
    pub(super) fn refresh_visibility(&mut self) {
        if !self.visibility.is_dirty() {
            return;
        }
        let origin = self.state.player_pos();
        let radius = self.config.fov_radius + self.state.light_radius_bonus();
        self.visibility.recompute(&mut self.state.map, origin, radius);
        debug!(y = origin.y, x = origin.x, radius, "visibility recomputed");
    }
}

fn transform_octant(orig: Pos, x: i32, y: i32, oct: u8) -> Pos {
    match oct {
        0 => Pos { y: orig.y - y, x: orig.x + x },
        1 => Pos { y: orig.y - x, x: orig.x + y },
        2 => Pos { y: orig.y - x, x: orig.x - y },
        3 => Pos { y: orig.y - y, x: orig.x - x },
        4 => Pos { y: orig.y + y, x: orig.x - x },
        5 => Pos { y: orig.y + x, x: orig.x - y },
        6 => Pos { y: orig.y + x, x: orig.x + y },
        7 => Pos { y: orig.y + y, x: orig.x + x },
        _ => orig,
    }
}

fn within_radius(orig: Pos, p: Pos, radius: i32) -> bool {
    let dx = p.x - orig.x;
    let dy = p.y - orig.y;
    dx * dx + dy * dy <= radius * radius
}

pub(super) fn compute_fov(map: &Map, origin: Pos, radius: i32) -> Vec<bool> {
    let radius = radius.max(0);
    let mut visible = vec![false; map.width * map.height];
    if !map.in_bounds(origin) {
        return visible;
    }
    visible[map.index(origin)] = true;
    for octant in 0..8 {
        let (top, bottom) = (Slope::new(1, 1), Slope::new(0, 1));
        scan_octant(map, &mut visible, origin, radius, 1, top, bottom, octant);
    }

    let min_y = (origin.y - radius).max(0);
    let max_y = (origin.y + radius + 1).min(map.height as i32);
    let min_x = (origin.x - radius).max(0);
    let max_x = (origin.x + radius + 1).min(map.width as i32);

    for y in min_y..max_y {
        for x in min_x..max_x {
            let p = Pos { y, x };
            let idx = map.index(p);
            if p == origin || !visible[idx] {
                continue;
            }
            if !has_direct_line_of_sight(map, origin, p) {
                visible[idx] = false;
            }
        }
    }
    visible
}

#[derive(Clone, Copy)]
struct Slope {
    y: i32,
    x: i32,
}

impl Slope {
    fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    fn greater_or_equal(&self, other: &Slope) -> bool {
        self.y * other.x >= other.y * self.x
    }

    fn greater_than(&self, other: &Slope) -> bool {
        self.y * other.x > other.y * self.x
    }
}

#[allow(clippy::too_many_arguments)]
fn scan_octant(
    map: &Map,
    visible: &mut [bool],
    orig: Pos,
    range: i32,
    dist: i32,
    start: Slope,
    end: Slope,
    oct: u8,
) {
    if dist > range {
        return;
    }
    let mut blocked = false;
    let mut cur_start = start;
    for y in (0..=dist).rev() {
        let top = Slope::new(2 * y + 1, 2 * dist - 1);
        let bot = Slope::new(2 * y - 1, 2 * dist + 1);
        if cur_start.greater_or_equal(&bot) && top.greater_than(&end) {
            let p = transform_octant(orig, dist, y, oct);
            if map.in_bounds(p) && within_radius(orig, p, range) {
                visible[map.index(p)] = true;
            }
            if map.blocks_sight(p) {
                if !blocked {
                    scan_octant(map, visible, orig, range, dist + 1, cur_start, top, oct);
                    blocked = true;
                }
                cur_start = bot;
            } else if blocked {
                blocked = false;
            }
        }
    }
    if !blocked {
        scan_octant(map, visible, orig, range, dist + 1, cur_start, end, oct);
    }
}

fn has_direct_line_of_sight(map: &Map, origin: Pos, target: Pos) -> bool {
    let dx = target.x - origin.x;
    let dy = target.y - origin.y;
    let sx = dx.signum();
    let sy = dy.signum();
    let total_dist_x = dx.abs();
    let total_dist_y = dy.abs();

    let mut x = origin.x;
    let mut y = origin.y;
    let mut current_step_x = 0;
    let mut current_step_y = 0;

    while current_step_x < total_dist_x || current_step_y < total_dist_y {
        let lhs = (1 + 2 * current_step_x) * total_dist_y;
        let rhs = (1 + 2 * current_step_y) * total_dist_x;

        if lhs == rhs {
            x += sx;
            y += sy;
            current_step_x += 1;
            current_step_y += 1;
        } else if lhs < rhs {
            x += sx;
            current_step_x += 1;
        } else {
            y += sy;
            current_step_y += 1;
        }

        if x == target.x && y == target.y {
            break;
        }
        if map.blocks_sight(Pos { y, x }) {
            return false;
        }
    }
    true
}

#[cfg(test)]
pub(super) fn draw_visibility_diag(map: &Map, visible: &[bool], player: Pos) -> String {
    let mut text = String::new();
    for y in 0..map.height {
        for x in 0..map.width {
            let p = Pos { y: y as i32, x: x as i32 };
            let c = if p == player {
                '@'
            } else if visible[map.index(p)] {
                if map.blocks_sight(p) { '#' } else { '.' }
            } else if map.is_explored(p) {
                '~'
            } else {
                ' '
            };
            text.push(c);
        }
        text.push('\n');
    }
    text
}
