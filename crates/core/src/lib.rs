pub mod config;
pub mod grid;
pub mod level;
pub mod level_file;
pub mod mazegen;
pub mod placement;
pub mod random;
pub mod tilefill;
pub mod types;

pub use config::{ConfigError, LevelConfig};
pub use grid::BoundedGrid;
pub use level::{Level, LevelKind};
pub use level_file::{LevelFile, LevelFileError};
pub use mazegen::{MazeDefect, MazeGenerator, audit, generate_maze};
pub use placement::{SpawnRule, place, scatter};
pub use random::SeededRandom;
pub use tilefill::TileFiller;
pub use types::*;
