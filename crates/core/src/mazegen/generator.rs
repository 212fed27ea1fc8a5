//! Depth-limited randomized room growth over a feature grid.
//!
//! Cells are painted depth-first from a start cell. Every new room takes its
//! facing bits from already painted neighbors, so adjacent rooms always agree
//! on whether their shared edge is closed, a door, or fully open.

use crate::grid::BoundedGrid;
use crate::random::SeededRandom;
use crate::types::{Direction, Pos};

use super::features::{NO_ENTRY, combine_doors_and_walls, merge_from_neighbor, opposite};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeGenerator {
    iterations: u32,
}

/// One pending room on the work stack. `next_bit` is the next feature bit to
/// consider for expansion.
struct Frame {
    pos: Pos,
    previous: u8,
    remaining: i64,
    features: u8,
    next_bit: u32,
}

impl MazeGenerator {
    /// `iterations` bounds how deep rooms keep receiving random extra sides.
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Grows a maze from `start` and returns the number of rooms painted.
    pub fn generate(&self, grid: &mut BoundedGrid<u8>, rng: &mut SeededRandom, start: Pos) -> usize {
        self.generate_with_entry(grid, rng, start, NO_ENTRY)
    }

    /// Like [`MazeGenerator::generate`], but the start room is treated as
    /// entered through `entry` (a feature bit of the room it came from).
    pub fn generate_with_entry(
        &self,
        grid: &mut BoundedGrid<u8>,
        rng: &mut SeededRandom,
        start: Pos,
        entry: u8,
    ) -> usize {
        let mut stack = vec![enter_room(grid, rng, start, entry, i64::from(self.iterations))];
        let mut painted = 1_usize;

        while let Some(frame) = stack.last_mut() {
            match next_expansion(grid, frame) {
                Some((target, bit, remaining)) => {
                    stack.push(enter_room(grid, rng, target, bit, remaining));
                    painted += 1;
                }
                None => {
                    stack.pop();
                }
            }
        }

        tracing::debug!(
            start_x = start.x,
            start_y = start.y,
            iterations = self.iterations,
            painted,
            "maze generated"
        );
        painted
    }
}

fn enter_room(
    grid: &mut BoundedGrid<u8>,
    rng: &mut SeededRandom,
    pos: Pos,
    entry: u8,
    remaining: i64,
) -> Frame {
    let previous = opposite(entry);
    let mut features = previous;
    if remaining > 0 {
        features = random_features(rng, previous);
    }
    features = merge_adjacent(grid, pos, features);
    grid.set(pos.x, pos.y, features);
    Frame { pos, previous, remaining, features, next_bit: 0 }
}

/// Finds the next unvisited neighbor this room opens onto, advancing the
/// frame's cursor past every bit it inspects.
fn next_expansion(grid: &BoundedGrid<u8>, frame: &mut Frame) -> Option<(Pos, u8, i64)> {
    while frame.next_bit < 8 {
        let bit_index = frame.next_bit;
        frame.next_bit += 1;

        let bit = 1_u8 << bit_index;
        let target = frame.pos.step(Direction::from_bit_index(bit_index));
        if !grid.within(target.x, target.y) {
            continue;
        }
        let has_feature = frame.features & bit != 0;
        let is_entry = bit == frame.previous;
        let is_free = grid.get(target.x, target.y) == 0;
        if has_feature && !is_entry && is_free {
            return Some((target, bit, frame.remaining - 1));
        }
    }
    None
}

fn random_features(rng: &mut SeededRandom, previous: u8) -> u8 {
    let random_doors = (rng.next_byte_span() & 0xFF) as u8;
    let random_walls = (rng.next_byte_span() & 0xFF) as u8;
    combine_doors_and_walls(random_doors | previous, random_walls | previous)
}

/// Clears sides that face off the grid and adopts the facing bits of every
/// painted neighbor.
fn merge_adjacent(grid: &BoundedGrid<u8>, pos: Pos, mut features: u8) -> u8 {
    for direction in Direction::ALL {
        let neighbor = pos.step(direction);
        if !grid.within(neighbor.x, neighbor.y) {
            features &= !direction.mask();
            continue;
        }
        let existing = grid.get(neighbor.x, neighbor.y);
        if existing != 0 {
            features = merge_from_neighbor(features, existing, direction);
        }
    }
    features
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::mazegen::features::{DOOR_MASK, SOUTH_DOOR};

    fn generate_fixture(width: usize, height: usize, seed: &str, iterations: u32) -> (Vec<u8>, String) {
        let mut grid = BoundedGrid::new(width, height, 0_u8);
        let mut rng = SeededRandom::new(Some(seed));
        let start = Pos::new((width / 2) as i32, (height / 2) as i32);
        MazeGenerator::new(iterations).generate(&mut grid, &mut rng, start);
        (grid.cells().to_vec(), rng.state_string())
    }

    /// Straightforward recursive formulation used to check the work stack.
    fn generate_recursive(
        grid: &mut BoundedGrid<u8>,
        rng: &mut SeededRandom,
        pos: Pos,
        entry: u8,
        remaining: i64,
    ) {
        let frame = enter_room(grid, rng, pos, entry, remaining);
        for bit_index in 0..8 {
            let bit = 1_u8 << bit_index;
            let target = pos.step(Direction::from_bit_index(bit_index));
            if !grid.within(target.x, target.y) {
                continue;
            }
            if frame.features & bit != 0
                && bit != frame.previous
                && grid.get(target.x, target.y) == 0
            {
                generate_recursive(grid, rng, target, bit, remaining - 1);
            }
        }
    }

    #[test]
    fn three_by_three_seed_one_matches_reference_layout() {
        let (cells, state) = generate_fixture(3, 3, "1", 12);
        assert_eq!(cells, vec![24, 148, 80, 21, 85, 81, 5, 69, 65]);
        assert_eq!(state, "1c0m88r");
    }

    #[test]
    fn larger_grids_match_reference_layouts() {
        let (cells, state) = generate_fixture(5, 5, "1", 12);
        assert_eq!(
            cells,
            vec![
                40, 132, 84, 84, 96, 18, 24, 149, 69, 82, 37, 69, 85, 80, 33, 34, 8, 149, 81, 18,
                6, 64, 5, 69, 65,
            ]
        );
        assert_eq!(state, "17scavb");

        let (cells, state) = generate_fixture(7, 5, "gems", 12);
        assert_eq!(
            cells,
            vec![
                4, 84, 64, 20, 80, 8, 160, 0, 5, 72, 145, 25, 148, 82, 0, 24, 132, 85, 65, 33, 33,
                16, 17, 4, 65, 16, 6, 82, 5, 73, 128, 4, 69, 68, 65,
            ]
        );
        assert_eq!(state, "v8hbai");
    }

    #[test]
    fn shallow_iterations_leave_unvisited_cells() {
        let (cells, state) = generate_fixture(4, 4, "42", 3);
        assert_eq!(cells, vec![0, 4, 96, 0, 8, 152, 150, 64, 0, 5, 85, 96, 0, 0, 5, 66]);
        assert_eq!(state, "1wwz3eg");
    }

    #[test]
    fn single_cell_grid_clears_every_side() {
        let mut grid = BoundedGrid::new(1, 1, 0_u8);
        let mut rng = SeededRandom::from_state(1);
        let painted = MazeGenerator::new(12).generate(&mut grid, &mut rng, Pos::new(0, 0));
        assert_eq!(painted, 1);
        assert_eq!(grid.get(0, 0), 0);
        assert_eq!(rng.state(), 3_663_131_627, "start room draws doors then walls");
    }

    #[test]
    fn zero_iterations_keep_only_forced_sides() {
        let mut grid = BoundedGrid::new(3, 3, 0_u8);
        let mut rng = SeededRandom::from_state(5);
        let painted = MazeGenerator::new(0).generate(&mut grid, &mut rng, Pos::new(1, 1));

        assert_eq!(rng.state(), 5, "no random draws without iterations");
        assert_eq!(grid.get(1, 1), DOOR_MASK);
        assert_eq!(painted, 5);
        for direction in Direction::ALL {
            let neighbor = Pos::new(1, 1).step(direction);
            assert_eq!(grid.get(neighbor.x, neighbor.y), direction.opposite().door());
        }
    }

    #[test]
    fn explicit_entry_is_not_expanded_back_into() {
        let mut grid = BoundedGrid::new(3, 1, 0_u8);
        let mut rng = SeededRandom::from_state(9);
        MazeGenerator::new(0).generate_with_entry(&mut grid, &mut rng, Pos::new(1, 0), SOUTH_DOOR);
        assert_eq!(grid.cells(), &[0, 0, 0], "north side faces off-grid and is cleared");
    }

    proptest! {
        #[test]
        fn work_stack_matches_recursive_order(
            width in 1_usize..9,
            height in 1_usize..9,
            seed in any::<u32>(),
            iterations in 0_u32..16,
        ) {
            let start = Pos::new((width / 2) as i32, (height / 2) as i32);

            let mut iterative = BoundedGrid::new(width, height, 0_u8);
            let mut iterative_rng = SeededRandom::from_state(seed);
            MazeGenerator::new(iterations).generate(&mut iterative, &mut iterative_rng, start);

            let mut recursive = BoundedGrid::new(width, height, 0_u8);
            let mut recursive_rng = SeededRandom::from_state(seed);
            generate_recursive(
                &mut recursive,
                &mut recursive_rng,
                start,
                NO_ENTRY,
                i64::from(iterations),
            );

            prop_assert_eq!(iterative.cells(), recursive.cells());
            prop_assert_eq!(iterative_rng.state(), recursive_rng.state());
        }
    }
}
