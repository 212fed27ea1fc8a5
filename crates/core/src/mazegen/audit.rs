//! Structural checks over a finished feature grid.

use std::fmt;

use crate::grid::BoundedGrid;
use crate::types::{Direction, Pos};

use super::features::{has_side, opposite};
use super::passage::reachable_rooms;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MazeDefect {
    /// Two painted neighbors disagree about the edge between them.
    EdgeMismatch { at: Pos, direction: Direction },
    /// A side opens onto an empty cell or off the grid.
    DanglingSide { at: Pos, direction: Direction },
    /// A painted room cannot be walked to from the start.
    Unreachable { at: Pos },
}

impl fmt::Display for MazeDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EdgeMismatch { at, direction } => {
                write!(f, "edge mismatch at ({}, {}) facing {direction:?}", at.x, at.y)
            }
            Self::DanglingSide { at, direction } => {
                write!(f, "dangling side at ({}, {}) facing {direction:?}", at.x, at.y)
            }
            Self::Unreachable { at } => write!(f, "room at ({}, {}) is unreachable", at.x, at.y),
        }
    }
}

/// Lists every defect in `maze`, with connectivity measured from `start`.
///
/// Edge mismatches are reported once, from the room that lies north or west
/// of the shared edge.
pub fn audit(maze: &BoundedGrid<u8>, start: Pos) -> Vec<MazeDefect> {
    let mut defects = Vec::new();

    for (x, y, room) in maze.iter() {
        if room == 0 {
            continue;
        }
        let at = Pos::new(x, y);
        for direction in Direction::ALL {
            let neighbor = at.step(direction);
            let other = maze.get_or(neighbor.x, neighbor.y, 0);
            if other == 0 {
                if has_side(room, direction) {
                    defects.push(MazeDefect::DanglingSide { at, direction });
                }
                continue;
            }
            let reported_here = matches!(direction, Direction::East | Direction::South);
            let facing = opposite(other) & direction.mask();
            if reported_here && room & direction.mask() != facing {
                defects.push(MazeDefect::EdgeMismatch { at, direction });
            }
        }
    }

    let reached = reachable_rooms(maze, start);
    for (x, y, room) in maze.iter() {
        let at = Pos::new(x, y);
        if room != 0 && !reached.contains(&at) {
            defects.push(MazeDefect::Unreachable { at });
        }
    }

    defects
}
