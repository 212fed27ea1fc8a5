//! Hand-authored room layouts stamped in place of a generated maze.

use crate::grid::BoundedGrid;
use crate::types::Pos;

use super::features::{EAST_WALL, NORTH_DOOR, NORTH_WALL, SOUTH_DOOR, SOUTH_WALL, WEST_WALL};

/// Stamps the merchant hall: a central room open to the north, east and west
/// alcoves, with a door south into the exit room.
///
/// Needs a grid of at least 3x3 around `center`; on smaller grids the clamped
/// writes overlap.
pub fn stamp_merchant_hall(grid: &mut BoundedGrid<u8>, center: Pos) {
    grid.set(center.x, center.y, NORTH_WALL | EAST_WALL | SOUTH_DOOR | WEST_WALL);
    grid.set(center.x, center.y - 1, SOUTH_WALL);
    grid.set(center.x, center.y + 1, NORTH_DOOR);
    grid.set(center.x - 1, center.y, EAST_WALL);
    grid.set(center.x + 1, center.y, WEST_WALL);
}
