//! # Level Layout
//!
//! A level is two maze sections stacked vertically, linked by two full
//! height columns down the sides and two short tunnels across the middle:
//!
//! ```text
//! +--------------------------+
//! | |   top section        | |
//! | |                      | |
//! |===                  ===|   <- tunnels at y = H/2
//! | |   bottom section     | |
//! | |                      | |
//! +--------------------------+
//! ```
//!
//! Layout is loaded from TOML at startup, falling back to the defaults for
//! any missing field.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::carver::GridCarver;
use crate::error::{MazeError, MazeResult};
use crate::maze::Maze;
use crate::section::{CorridorSpan, MazeSection};
use crate::seed::MazeSeed;

/// Level generation settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Seed for every random choice.
    pub seed: MazeSeed,
    /// Corridor columns per section.
    pub section_columns: usize,
    /// Corridor rows per section.
    pub section_rows: usize,
    /// Length of each middle tunnel.
    pub tunnel_length: i32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            width: 48,
            height: 64,
            seed: MazeSeed::default(),
            section_columns: 8,
            section_rows: 4,
            tunnel_length: 15,
        }
    }
}

impl LevelConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the text is not a valid level config.
    pub fn from_toml_str(text: &str) -> MazeResult<Self> {
        toml::from_str(text).map_err(|e| MazeError::InvalidConfig(e.to_string()))
    }

    /// Reads a config file.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the file cannot be read or parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> MazeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| MazeError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Serializes the config back to TOML.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if serialization fails.
    pub fn to_toml_string(&self) -> MazeResult<String> {
        toml::to_string(self).map_err(|e| MazeError::InvalidConfig(e.to_string()))
    }
}

/// Every carve a level is built from, in carve order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPlan {
    /// Maze in the lower half, starting at y = 1.
    pub bottom: MazeSection,
    /// Maze in the upper half, above the tunnels.
    pub top: MazeSection,
    /// Side columns joining the halves.
    pub columns: [CorridorSpan; 2],
    /// Middle tunnels leading in from the side columns.
    pub tunnels: [CorridorSpan; 2],
}

impl LevelPlan {
    /// Lays a level out for `config`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the grid is too large for signed coordinates or
    /// the tunnel length cannot be placed. Layouts that do not fit the grid
    /// are caught when carving.
    pub fn from_config(config: &LevelConfig) -> MazeResult<Self> {
        let to_i32 = |value: usize, name: &str| {
            i32::try_from(value)
                .map_err(|_| MazeError::InvalidConfig(format!("{name} {value} is too large")))
        };
        let width = to_i32(config.width, "width")?;
        let height = to_i32(config.height, "height")?;
        let (columns, rows) = (config.section_columns, config.section_rows);
        let half = height / 2;
        let tunnel = config.tunnel_length;
        let right_tunnel_start = (width - 2).checked_sub(tunnel).ok_or_else(|| {
            MazeError::InvalidConfig(format!("tunnel_length {tunnel} is out of range"))
        })?;

        Ok(Self {
            bottom: MazeSection::new(columns, rows, 1, width - 2, 1, half - 4),
            top: MazeSection::new(columns, rows, 1, width - 2, half + 4, half - 5),
            columns: [
                CorridorSpan::new(2, 1, height - 2),
                CorridorSpan::new(width - 3, 1, height - 2),
            ],
            tunnels: [
                CorridorSpan::new(half, 1, tunnel),
                CorridorSpan::new(half, right_tunnel_start, tunnel),
            ],
        })
    }

    /// Carves the plan into a fresh grid.
    ///
    /// # Errors
    ///
    /// Any carve error; the level is then discarded.
    pub fn build(&self, width: usize, height: usize, seed: MazeSeed) -> MazeResult<Maze> {
        let mut carver = GridCarver::new(width, height, seed)?;

        carver.carve_maze_section(&self.bottom)?;
        carver.carve_maze_section(&self.top)?;
        for column in self.columns {
            carver.carve_column(column.center, column.start, column.length)?;
        }
        for tunnel in self.tunnels {
            carver.carve_row(tunnel.center, tunnel.start, tunnel.length)?;
        }

        carver.finish()
    }
}

/// Builds the level described by `config`.
///
/// # Errors
///
/// `InvalidConfig` for unusable settings, or any carve error.
pub fn build_level(config: &LevelConfig) -> MazeResult<Maze> {
    let plan = LevelPlan::from_config(config)?;
    let maze = plan.build(config.width, config.height, config.seed)?;

    info!(
        width = maze.width(),
        height = maze.height(),
        seed = config.seed.value(),
        open_cells = maze.grid().open_cell_count(),
        "level built"
    );
    Ok(maze)
}
