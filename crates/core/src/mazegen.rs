//! Procedural maze generation split into feature bits, growth, fixed layouts,
//! movement queries and structural audits.

pub mod features;

mod audit;
mod generator;
mod layouts;
mod passage;

pub use audit::{MazeDefect, audit};
pub use generator::MazeGenerator;
pub use layouts::stamp_merchant_hall;
pub use passage::{can_move, open_neighbors, reachable_rooms};

use crate::grid::BoundedGrid;
use crate::random::SeededRandom;
use crate::types::Pos;

/// Builds a `width`x`height` feature grid grown from its center cell.
pub fn generate_maze(
    width: usize,
    height: usize,
    iterations: u32,
    rng: &mut SeededRandom,
) -> BoundedGrid<u8> {
    let mut grid = BoundedGrid::new(width, height, 0_u8);
    let center = Pos::new((width / 2) as i32, (height / 2) as i32);
    MazeGenerator::new(iterations).generate(&mut grid, rng, center);
    grid
}
