//! One playable level: the maze and tile grids generated from a seed.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::config::{ConfigError, LevelConfig};
use crate::grid::BoundedGrid;
use crate::mazegen::{MazeGenerator, stamp_merchant_hall};
use crate::random::SeededRandom;
use crate::tilefill::TileFiller;
use crate::types::Pos;

/// A merchant hall replaces the maze after every this many completed levels.
pub const MERCHANT_INTERVAL: u32 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelKind {
    Maze,
    Merchant,
}

impl LevelKind {
    pub fn for_progress(levels_completed: u32) -> Self {
        if levels_completed > 0 && levels_completed % MERCHANT_INTERVAL == 0 {
            Self::Merchant
        } else {
            Self::Maze
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Base-36 generator state captured before generation. Feeding it back
    /// reproduces this level for the same config and kind.
    pub seed: String,
    pub kind: LevelKind,
    pub config: LevelConfig,
    /// Room the player enters on.
    pub start: Pos,
    pub maze: BoundedGrid<u8>,
    pub tiles: BoundedGrid<u8>,
}

impl Level {
    /// Runs the full pipeline: maze (or merchant hall) first, then tiles, both
    /// drawing from `rng`.
    pub fn generate(
        config: &LevelConfig,
        kind: LevelKind,
        rng: &mut SeededRandom,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if kind == LevelKind::Merchant && (config.width < 3 || config.height < 3) {
            return Err(ConfigError::Invalid {
                field: "width",
                reason: format!(
                    "merchant hall needs at least 3x3 rooms, got {}x{}",
                    config.width, config.height
                ),
            });
        }

        let seed = rng.state_string();
        let start = Pos::new((config.width / 2) as i32, (config.height / 2) as i32);
        let mut maze = BoundedGrid::new(config.width, config.height, 0_u8);
        match kind {
            LevelKind::Maze => {
                MazeGenerator::new(config.iterations).generate(&mut maze, rng, start);
            }
            LevelKind::Merchant => stamp_merchant_hall(&mut maze, start),
        }
        let tiles = TileFiller::new(config.room_size)
            .with_variant_chance(config.tile_variant_chance)
            .fill(&maze, rng);

        tracing::debug!(seed = %seed, ?kind, rooms = count_rooms(&maze), "level generated");
        Ok(Self { seed, kind, config: *config, start, maze, tiles })
    }

    pub fn room_count(&self) -> usize {
        count_rooms(&self.maze)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.seed.len() as u32).to_le_bytes());
        bytes.extend(self.seed.as_bytes());
        bytes.push(match self.kind {
            LevelKind::Maze => 0,
            LevelKind::Merchant => 1,
        });
        bytes.extend(self.config.iterations.to_le_bytes());
        bytes.extend(self.config.tile_variant_chance.to_le_bytes());
        bytes.extend(self.start.y.to_le_bytes());
        bytes.extend(self.start.x.to_le_bytes());
        for grid in [&self.maze, &self.tiles] {
            bytes.extend((grid.width() as u32).to_le_bytes());
            bytes.extend((grid.height() as u32).to_le_bytes());
            bytes.extend(grid.cells());
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn count_rooms(maze: &BoundedGrid<u8>) -> usize {
    maze.cells().iter().filter(|&&room| room != 0).count()
}
