//! Movement queries answered purely from a feature grid.

use std::collections::VecDeque;

use crate::grid::BoundedGrid;
use crate::types::{Direction, Pos};

use super::features::has_side;

/// True when the room at `from` opens toward `direction` and the room beyond
/// opens back. Cells off the grid count as empty.
pub fn can_move(maze: &BoundedGrid<u8>, from: Pos, direction: Direction) -> bool {
    let to = from.step(direction);
    let room_from = maze.get_or(from.x, from.y, 0);
    let room_to = maze.get_or(to.x, to.y, 0);
    has_side(room_from, direction) && has_side(room_to, direction.opposite())
}

/// Rooms one move away from `from`.
pub fn open_neighbors(maze: &BoundedGrid<u8>, from: Pos) -> Vec<Pos> {
    Direction::ALL
        .into_iter()
        .filter(|&direction| can_move(maze, from, direction))
        .map(|direction| from.step(direction))
        .collect()
}

/// Every room reachable from `start`, in breadth-first order.
pub fn reachable_rooms(maze: &BoundedGrid<u8>, start: Pos) -> Vec<Pos> {
    if maze.get_or(start.x, start.y, 0) == 0 {
        return Vec::new();
    }
    let mut seen = vec![false; maze.width() * maze.height()];
    let mut order = Vec::new();
    let mut queue = VecDeque::from([start]);
    seen[start.y as usize * maze.width() + start.x as usize] = true;

    while let Some(pos) = queue.pop_front() {
        order.push(pos);
        for next in open_neighbors(maze, pos) {
            let index = next.y as usize * maze.width() + next.x as usize;
            if !seen[index] {
                seen[index] = true;
                queue.push_back(next);
            }
        }
    }
    order
}
