//! Derives a tile-resolution grid of sprite ids from a room feature grid.
//!
//! Stage one carves a floor plan: every room becomes a `room_size` square of
//! wall with a floor interior, plus floor strips along its door and open
//! sides. Stage two gives each floor tile the mask of its floor neighbors
//! (N=1, E=2, S=4, W=8); wall tiles are always id 0.

use crate::grid::BoundedGrid;
use crate::random::SeededRandom;
use crate::types::Direction;

pub const FLOOR: u8 = 0;
pub const WALL: u8 = 1;
pub const DEFAULT_VARIANT_CHANCE: f64 = 0.25;
pub const SHEET_COLUMNS: u8 = 4;

/// Inner-corner ids that have an alternate sprite at `id - 1`.
const VARIANT_TILES: [u8; 3] = [3, 9, 11];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileFiller {
    room_size: usize,
    variant_chance: f64,
}

impl TileFiller {
    /// # Panics
    ///
    /// Panics if `room_size` is zero.
    pub fn new(room_size: usize) -> Self {
        assert!(room_size > 0, "room size must be positive");
        Self { room_size, variant_chance: DEFAULT_VARIANT_CHANCE }
    }

    /// Probability that an inner-corner tile uses its alternate sprite.
    pub fn with_variant_chance(self, variant_chance: f64) -> Self {
        Self { variant_chance, ..self }
    }

    pub fn room_size(&self) -> usize {
        self.room_size
    }

    /// Runs both stages. Consumes one random draw per tile in row-major order.
    pub fn fill(&self, maze: &BoundedGrid<u8>, rng: &mut SeededRandom) -> BoundedGrid<u8> {
        let plan = self.floor_plan(maze);
        let mut tiles = BoundedGrid::new(plan.width(), plan.height(), 0_u8);
        let mut variants = 0_usize;

        for (x, y, _) in plan.iter() {
            let mut id = tile_id(&plan, x, y);
            let roll = rng.next_f64();
            if roll < self.variant_chance && VARIANT_TILES.contains(&id) {
                id -= 1;
                variants += 1;
            }
            tiles.set(x, y, id);
        }

        tracing::debug!(
            width = tiles.width(),
            height = tiles.height(),
            room_size = self.room_size,
            variants,
            "tiles filled"
        );
        tiles
    }

    /// Stage one: a [`FLOOR`]/[`WALL`] grid at tile resolution.
    pub fn floor_plan(&self, maze: &BoundedGrid<u8>) -> BoundedGrid<u8> {
        let size = self.room_size as i32;
        let door_size = size / 3;
        let mut plan =
            BoundedGrid::new(maze.width() * self.room_size, maze.height() * self.room_size, WALL);

        for (mx, my, features) in maze.iter() {
            if features == 0 {
                continue;
            }
            let tx = mx * size;
            let ty = my * size;
            plan.fill(tx + 1, ty + 1, size - 2, size - 2, FLOOR);

            for direction in Direction::ALL {
                if features & direction.door() != 0 {
                    let strip = edge_strip(direction, tx, ty, size, 1 + door_size, door_size);
                    carve(&mut plan, strip);
                }
                if features & direction.wall() != 0 {
                    let strip = edge_strip(direction, tx, ty, size, 1, size - 2);
                    carve(&mut plan, strip);
                }
            }
        }
        plan
    }
}

/// Sprite sheet `(column, row)` for a tile id.
pub fn sprite_cell(id: u8) -> (u8, u8) {
    (id % SHEET_COLUMNS, id / SHEET_COLUMNS)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Strip {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

/// Strip of `length` tiles along a room edge, `start` tiles in from the corner.
fn edge_strip(direction: Direction, tx: i32, ty: i32, size: i32, start: i32, length: i32) -> Strip {
    match direction {
        Direction::North => Strip { x: tx + start, y: ty, w: length, h: 1 },
        Direction::East => Strip { x: tx + size - 1, y: ty + start, w: 1, h: length },
        Direction::South => Strip { x: tx + start, y: ty + size - 1, w: length, h: 1 },
        Direction::West => Strip { x: tx, y: ty + start, w: 1, h: length },
    }
}

fn carve(plan: &mut BoundedGrid<u8>, strip: Strip) {
    plan.fill(strip.x, strip.y, strip.w, strip.h, FLOOR);
}

fn is_floor(plan: &BoundedGrid<u8>, x: i32, y: i32) -> u8 {
    u8::from(plan.get_or(x, y, WALL) == FLOOR)
}

fn tile_id(plan: &BoundedGrid<u8>, x: i32, y: i32) -> u8 {
    let neighbors = is_floor(plan, x, y - 1)
        | (is_floor(plan, x + 1, y) << 1)
        | (is_floor(plan, x, y + 1) << 2)
        | (is_floor(plan, x - 1, y) << 3);
    is_floor(plan, x, y) * neighbors
}
