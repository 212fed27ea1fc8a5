//! Room feature bits: one door flag and one wall flag per direction.
//!
//! Door and wall bits are interleaved (`N door, N wall, E door, ...`) so that
//! rotating a feature byte left by four lands every direction's pair on the
//! opposite direction's pair. A "wall" bit marks a fully open side; a "door"
//! bit marks a narrow doorway. A value of zero is an unvisited cell.

use crate::types::Direction;

pub const NORTH_DOOR: u8 = 1 << 0;
pub const NORTH_WALL: u8 = 1 << 1;
pub const EAST_DOOR: u8 = 1 << 2;
pub const EAST_WALL: u8 = 1 << 3;
pub const SOUTH_DOOR: u8 = 1 << 4;
pub const SOUTH_WALL: u8 = 1 << 5;
pub const WEST_DOOR: u8 = 1 << 6;
pub const WEST_WALL: u8 = 1 << 7;

pub const NORTH: u8 = NORTH_DOOR | NORTH_WALL;
pub const EAST: u8 = EAST_DOOR | EAST_WALL;
pub const SOUTH: u8 = SOUTH_DOOR | SOUTH_WALL;
pub const WEST: u8 = WEST_DOOR | WEST_WALL;

pub const DOOR_MASK: u8 = NORTH_DOOR | EAST_DOOR | SOUTH_DOOR | WEST_DOOR;
pub const WALL_MASK: u8 = NORTH_WALL | EAST_WALL | SOUTH_WALL | WEST_WALL;

/// Entry value for the start cell. It is its own opposite, so every door is
/// forced open before off-grid sides are cleared.
pub const NO_ENTRY: u8 = DOOR_MASK;

/// Maps each direction's bits onto the opposite direction.
pub fn opposite(features: u8) -> u8 {
    features.rotate_left(4)
}

/// Replaces `own`'s bits for `direction` with the neighbor's facing bits.
pub fn merge_from_neighbor(own: u8, neighbor: u8, direction: Direction) -> u8 {
    let mask = direction.mask();
    (own & !mask) | (opposite(neighbor) & mask)
}

/// Combines door and wall candidates; a door suppresses the wall bit of its
/// own direction. Walls never suppress doors.
pub fn combine_doors_and_walls(doors: u8, walls: u8) -> u8 {
    let doors = doors & DOOR_MASK;
    let walls = walls & WALL_MASK;
    (walls & !doors.rotate_left(1)) | doors
}

pub fn has_side(features: u8, direction: Direction) -> bool {
    features & direction.mask() != 0
}

/// Directions with a door or wall bit set.
pub fn open_sides(features: u8) -> impl Iterator<Item = Direction> {
    Direction::ALL.into_iter().filter(move |&direction| has_side(features, direction))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotating_twice_is_identity_for_every_byte() {
        for value in 0..=u8::MAX {
            assert_eq!(opposite(opposite(value)), value);
        }
    }

    #[test]
    fn rotation_maps_each_pair_to_opposite_direction() {
        for direction in Direction::ALL {
            assert_eq!(opposite(direction.door()), direction.opposite().door());
            assert_eq!(opposite(direction.wall()), direction.opposite().wall());
        }
        assert_eq!(opposite(NORTH_DOOR), SOUTH_DOOR);
        assert_eq!(opposite(WEST_WALL), EAST_WALL);
        assert_eq!(opposite(DOOR_MASK), DOOR_MASK);
        assert_eq!(opposite(NO_ENTRY), NO_ENTRY);
    }

    #[test]
    fn door_shifted_by_one_lands_on_same_direction_wall() {
        for direction in Direction::ALL {
            assert_eq!(direction.door().rotate_left(1), direction.wall());
        }
    }

    #[test]
    fn merge_copies_only_the_shared_edge() {
        let own = NORTH_DOOR | EAST_WALL | WEST_DOOR;
        let neighbor_to_east = WEST_WALL | NORTH_DOOR;
        let merged = merge_from_neighbor(own, neighbor_to_east, Direction::East);
        assert_eq!(merged, NORTH_DOOR | EAST_WALL | WEST_DOOR);

        let neighbor_with_door = WEST_DOOR;
        let merged = merge_from_neighbor(own, neighbor_with_door, Direction::East);
        assert_eq!(merged, NORTH_DOOR | EAST_DOOR | WEST_DOOR);

        let merged = merge_from_neighbor(own, SOUTH_WALL, Direction::East);
        assert_eq!(merged, NORTH_DOOR | WEST_DOOR);
    }

    #[test]
    fn doors_suppress_walls_but_not_the_reverse() {
        let combined = combine_doors_and_walls(NORTH_DOOR | SOUTH_DOOR, NORTH_WALL | EAST_WALL);
        assert_eq!(combined, NORTH_DOOR | SOUTH_DOOR | EAST_WALL);

        let combined = combine_doors_and_walls(EAST_DOOR, WALL_MASK);
        assert_eq!(combined, EAST_DOOR | NORTH_WALL | SOUTH_WALL | WEST_WALL);
    }

    #[test]
    fn open_sides_lists_directions_in_bit_order() {
        let sides: Vec<Direction> = open_sides(WEST_WALL | NORTH_DOOR | SOUTH_WALL).collect();
        assert_eq!(sides, vec![Direction::North, Direction::South, Direction::West]);
        assert_eq!(open_sides(0).count(), 0);
    }
}
