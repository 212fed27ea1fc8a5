//! Random selection of free rooms in a finished maze.
//!
//! Sampling draws random coordinates and keeps those that land on a painted,
//! unoccupied room. The number of draws is capped, so a crowded or tiny maze
//! yields fewer rooms than requested instead of looping forever.

use crate::grid::BoundedGrid;
use crate::random::SeededRandom;
use crate::types::Pos;

pub const PLACEMENT_ATTEMPTS: usize = 1_000;

/// How many rooms to request for one kind of content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpawnRule {
    /// One room with probability `p`, otherwise none.
    Chance(f64),
    /// Uniformly rounded count between `min` and `max`.
    Range { min: u32, max: u32 },
}

impl SpawnRule {
    /// Draws the requested count. Consumes exactly one random value.
    pub fn roll_count(self, rng: &mut SeededRandom) -> usize {
        match self {
            Self::Chance(probability) => usize::from(rng.next_f64() < probability),
            Self::Range { min, max } => {
                let span = f64::from(max.saturating_sub(min));
                min as usize + (rng.next_f64() * span).round() as usize
            }
        }
    }
}

/// Picks up to `count` distinct painted rooms not listed in `occupied`.
pub fn scatter(
    maze: &BoundedGrid<u8>,
    occupied: &[Pos],
    count: usize,
    rng: &mut SeededRandom,
) -> Vec<Pos> {
    let mut placed = Vec::with_capacity(count);
    let mut attempts = 0_usize;
    let max_x = maze.width() as i32 - 1;
    let max_y = maze.height() as i32 - 1;

    while placed.len() < count && attempts < PLACEMENT_ATTEMPTS {
        attempts += 1;
        let x = ((rng.next_f64() * maze.width() as f64) as i32).min(max_x);
        let y = ((rng.next_f64() * maze.height() as f64) as i32).min(max_y);
        let pos = Pos::new(x, y);
        if maze.get(x, y) != 0 && !occupied.contains(&pos) && !placed.contains(&pos) {
            placed.push(pos);
        }
    }

    if placed.len() < count {
        tracing::warn!(
            requested = count,
            placed = placed.len(),
            attempts,
            "placement attempts exhausted"
        );
    }
    placed
}

/// Rolls `rule` and scatters that many rooms.
pub fn place(
    maze: &BoundedGrid<u8>,
    occupied: &[Pos],
    rule: SpawnRule,
    rng: &mut SeededRandom,
) -> Vec<Pos> {
    let count = rule.roll_count(rng);
    scatter(maze, occupied, count, rng)
}
