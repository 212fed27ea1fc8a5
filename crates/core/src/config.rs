//! Level generation settings, loadable from TOML.
//!
//! Every field has a default, so a config file only lists what it overrides.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tilefill::DEFAULT_VARIANT_CHANCE;

pub const DEFAULT_WIDTH: usize = 9;
pub const DEFAULT_HEIGHT: usize = 7;
pub const DEFAULT_ROOM_SIZE: usize = 5;
pub const DEFAULT_ITERATIONS: u32 = 12;

pub const MAX_MAZE_SIDE: usize = 512;
pub const MIN_ROOM_SIZE: usize = 3;
pub const MAX_ROOM_SIZE: usize = 64;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LevelConfig {
    /// Maze width in rooms.
    pub width: usize,
    /// Maze height in rooms.
    pub height: usize,
    /// Side length of one room in tiles.
    pub room_size: usize,
    /// Expansion budget handed to the maze generator.
    pub iterations: u32,
    pub tile_variant_chance: f64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            room_size: DEFAULT_ROOM_SIZE,
            iterations: DEFAULT_ITERATIONS,
            tile_variant_chance: DEFAULT_VARIANT_CHANCE,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io(io::Error),
    /// The file is not valid TOML or has unknown or mistyped fields.
    Parse { message: String },
    /// A field is outside its accepted range.
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config I/O error: {e}"),
            Self::Parse { message } => write!(f, "invalid config: {message}"),
            Self::Invalid { field, reason } => write!(f, "invalid `{field}`: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl LevelConfig {
    /// Reads and validates a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse { message: e.to_string() })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse { message: e.to_string() })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_side("width", self.width)?;
        check_side("height", self.height)?;
        if !(MIN_ROOM_SIZE..=MAX_ROOM_SIZE).contains(&self.room_size) {
            return Err(ConfigError::Invalid {
                field: "room_size",
                reason: format!(
                    "{} is outside {MIN_ROOM_SIZE}..={MAX_ROOM_SIZE}",
                    self.room_size
                ),
            });
        }
        let chance = self.tile_variant_chance;
        if !chance.is_finite() || !(0.0..=1.0).contains(&chance) {
            return Err(ConfigError::Invalid {
                field: "tile_variant_chance",
                reason: format!("{chance} is not a probability"),
            });
        }
        Ok(())
    }

    /// Tile grid dimensions produced by this config.
    pub fn tile_dimensions(&self) -> (usize, usize) {
        (self.width * self.room_size, self.height * self.room_size)
    }
}

fn check_side(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 || value > MAX_MAZE_SIDE {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("{value} is outside 1..={MAX_MAZE_SIDE}"),
        });
    }
    Ok(())
}
