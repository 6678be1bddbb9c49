use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct ObjectId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn offset(self, dy: i32, dx: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }

    pub fn distance(self, other: Pos) -> f64 {
        let dx = f64::from(other.x - self.x);
        let dy = f64::from(other.y - self.y);
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// `(dy, dx)` step for one move in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const DARK_RED: Color = Color::rgb(128, 0, 0);
    pub const ORANGE: Color = Color::rgb(255, 127, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const LIGHT_GREEN: Color = Color::rgb(63, 255, 63);
    pub const GREEN: Color = Color::rgb(0, 191, 0);
    pub const DARK_GREEN: Color = Color::rgb(0, 128, 0);
    pub const DESATURATED_GREEN: Color = Color::rgb(63, 127, 63);
    pub const VIOLET: Color = Color::rgb(127, 0, 255);
    pub const LIGHT_VIOLET: Color = Color::rgb(185, 115, 255);
    pub const LIGHT_CYAN: Color = Color::rgb(115, 255, 255);
    pub const LIGHT_BLUE: Color = Color::rgb(115, 115, 255);
    pub const SKY: Color = Color::rgb(0, 191, 255);
    pub const GOLD: Color = Color::rgb(191, 151, 0);
    pub const SILVER: Color = Color::rgb(203, 203, 203);
    pub const BRASS: Color = Color::rgb(191, 151, 96);
    pub const LIGHT_YELLOW: Color = Color::rgb(255, 255, 115);
}

/// Equipment slots. Each slot holds at most one equipped item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Slot {
    RightHand,
    LeftHand,
    Head,
    Neck,
    Chest,
    Finger,
}

impl Slot {
    pub fn label(self) -> &'static str {
        match self {
            Slot::RightHand => "right hand",
            Slot::LeftHand => "left hand",
            Slot::Head => "head",
            Slot::Neck => "neck",
            Slot::Chest => "chest",
            Slot::Finger => "finger",
        }
    }
}

/// Stat picked from the level-up menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatChoice {
    MaxHp,
    Power,
    Defense,
    Dodge,
}

impl StatChoice {
    pub const ALL: [StatChoice; 4] =
        [StatChoice::MaxHp, StatChoice::Power, StatChoice::Defense, StatChoice::Dodge];
}

/// Pre-decoded player intent. No raw keycodes cross this boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Move(Direction),
    PickUp,
    OpenInventory,
    UseItem(usize),
    DropItem(usize),
    DescendStairs,
    ShowCharacterSheet,
    ConfirmTarget(Pos),
    CancelTarget,
    ChooseLevelUp(StatChoice),
    Quit,
}

/// Result of one player intent, as seen by the turn scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerAction {
    /// The player moved, attacked, or otherwise spent the turn; monsters react.
    TookTurn,
    DidntTakeTurn,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Dead,
}

/// Side panel the host may show after an informational intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    Inventory,
    CharacterSheet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_cover_all_eight_neighbors() {
        let mut deltas: Vec<(i32, i32)> = Direction::ALL.iter().map(|d| d.delta()).collect();
        deltas.sort();
        deltas.dedup();
        assert_eq!(deltas.len(), 8);
        assert!(!deltas.contains(&(0, 0)));
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Pos { y: 0, x: 0 };
        let b = Pos { y: 4, x: 3 };
        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
    }
}
