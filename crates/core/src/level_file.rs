//! JSON export and import of a generated level.
//!
//! The file is the serialized [`Level`] plus a `format_version`. Loading
//! checks that the grids agree with the recorded config and that the maze
//! passes [`audit`], so a hand-edited file cannot smuggle in a broken layout.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::level::Level;
use crate::mazegen::audit;
use crate::random::{SeededRandom, parse_base36};

pub const LEVEL_FILE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LevelFile {
    pub format_version: u32,
    #[serde(flatten)]
    pub level: Level,
}

#[derive(Debug)]
pub enum LevelFileError {
    Io(io::Error),
    /// Malformed JSON, missing fields, or a grid whose cell count does not
    /// match its dimensions.
    Json(serde_json::Error),
    UnsupportedVersion { found: u32 },
    /// Well-formed, but the contents contradict each other.
    Inconsistent { message: String },
}

impl fmt::Display for LevelFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "level file I/O error: {e}"),
            Self::Json(e) => write!(f, "invalid level file: {e}"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported level file version {found}, expected {LEVEL_FILE_VERSION}")
            }
            Self::Inconsistent { message } => write!(f, "inconsistent level file: {message}"),
        }
    }
}

impl Error for LevelFileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

fn inconsistent(message: impl Into<String>) -> LevelFileError {
    LevelFileError::Inconsistent { message: message.into() }
}

impl LevelFile {
    pub fn new(level: Level) -> Self {
        Self { format_version: LEVEL_FILE_VERSION, level }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = self.to_json().map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, LevelFileError> {
        let content = fs::read_to_string(path).map_err(LevelFileError::Io)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, LevelFileError> {
        let file: Self = serde_json::from_str(content).map_err(LevelFileError::Json)?;
        file.validate()?;
        Ok(file)
    }

    pub fn validate(&self) -> Result<(), LevelFileError> {
        if self.format_version != LEVEL_FILE_VERSION {
            return Err(LevelFileError::UnsupportedVersion { found: self.format_version });
        }
        let level = &self.level;
        level.config.validate().map_err(|e| inconsistent(e.to_string()))?;
        if parse_base36(&level.seed).is_none() {
            return Err(inconsistent(format!("seed {:?} is not base-36", level.seed)));
        }

        let maze_size = (level.maze.width(), level.maze.height());
        if maze_size != (level.config.width, level.config.height) {
            return Err(inconsistent(format!(
                "maze is {}x{} but config asks for {}x{}",
                maze_size.0, maze_size.1, level.config.width, level.config.height
            )));
        }
        let tile_size = (level.tiles.width(), level.tiles.height());
        if tile_size != level.config.tile_dimensions() {
            let (width, height) = level.config.tile_dimensions();
            return Err(inconsistent(format!(
                "tiles are {}x{} but the maze needs {width}x{height}",
                tile_size.0, tile_size.1
            )));
        }
        if !level.maze.within(level.start.x, level.start.y) {
            return Err(inconsistent(format!(
                "start ({}, {}) is outside the maze",
                level.start.x, level.start.y
            )));
        }
        if let Some(defect) = audit(&level.maze, level.start).first() {
            return Err(inconsistent(defect.to_string()));
        }
        Ok(())
    }

    /// Generates the level again from its recorded seed, config and kind.
    pub fn regenerate(&self) -> Result<Level, LevelFileError> {
        let level = &self.level;
        let state = parse_base36(&level.seed)
            .ok_or_else(|| inconsistent(format!("seed {:?} is not base-36", level.seed)))?;
        let mut rng = SeededRandom::from_state(state);
        Level::generate(&level.config, level.kind, &mut rng)
            .map_err(|e| inconsistent(e.to_string()))
    }

    /// True when regenerating from the recorded seed yields identical grids.
    pub fn is_reproducible(&self) -> Result<bool, LevelFileError> {
        Ok(self.regenerate()? == self.level)
    }
}
