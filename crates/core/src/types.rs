use serde::{Deserialize, Serialize};

use crate::mazegen::features::{
    EAST_DOOR, EAST_WALL, NORTH_DOOR, NORTH_WALL, SOUTH_DOOR, SOUTH_WALL, WEST_DOOR, WEST_WALL,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self { y: self.y + dy, x: self.x + dx }
    }
}

/// Cardinal directions in feature-bit order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::East, Direction::South, Direction::West];

    /// Direction owning feature bit `bit` (0..8).
    pub fn from_bit_index(bit: u32) -> Self {
        Self::ALL[(bit as usize / 2) % 4]
    }

    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    pub fn door(self) -> u8 {
        match self {
            Self::North => NORTH_DOOR,
            Self::East => EAST_DOOR,
            Self::South => SOUTH_DOOR,
            Self::West => WEST_DOOR,
        }
    }

    pub fn wall(self) -> u8 {
        match self {
            Self::North => NORTH_WALL,
            Self::East => EAST_WALL,
            Self::South => SOUTH_WALL,
            Self::West => WEST_WALL,
        }
    }

    /// Door and wall bits together.
    pub fn mask(self) -> u8 {
        self.door() | self.wall()
    }
}
