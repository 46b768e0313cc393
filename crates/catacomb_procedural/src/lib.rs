//! # CATACOMB Procedural Generation
//!
//! Deterministic maze generation and wall tiling for reproducible levels.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed always produces the same maze
//! 2. **Fail fast**: Bad carve arguments are errors, never clamped
//! 3. **Immutable output**: A finished [`Maze`] is read-only
//!
//! ## Core Components
//!
//! - `GridCarver`: Owns the occupancy grid and carves it
//! - `TileClassifier`: Picks the wall tile for every solid cell
//! - `LevelPlan`: The two-section level layout with tunnels
//!
//! ## Example
//!
//! ```rust,ignore
//! use catacomb_procedural::{build_level, LevelConfig};
//!
//! let maze = build_level(&LevelConfig::default())?;
//!
//! // Mid tunnel is open, the corner is border
//! assert!(maze.is_walkable(8, 32));
//! assert!(!maze.is_walkable(0, 0));
//!
//! let tiles = maze.tile_map();
//! println!("{} wall sprites", tiles.wall_count());
//! ```

#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod carver;
pub mod error;
pub mod grid;
pub mod layout;
pub mod maze;
pub mod partition;
pub mod section;
pub mod seed;
pub mod tile;

pub use carver::GridCarver;
pub use error::{MazeError, MazeResult};
pub use grid::{Compass, Grid};
pub use layout::{build_level, LevelConfig, LevelPlan};
pub use maze::{Maze, TileMap};
pub use partition::GapWidths;
pub use section::{CorridorSpan, MazeSection};
pub use seed::MazeSeed;
pub use tile::{
    classify, Corner, NeighborState, SolidCorners, TileClassifier, TileSelection, WallTile,
};
