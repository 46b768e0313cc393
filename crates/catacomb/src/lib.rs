//! # CATACOMB
//!
//! Maze levels for a top-down dungeon crawler.
//!
//! ## Architecture
//!
//! ```text
//! LevelConfig ──> LevelPlan ──> GridCarver ──> Maze ──> TileMap ──> preview
//!   (TOML)        (layout)      (carving)    (frozen)   (sprites)   (text)
//! ```
//!
//! ## Modules
//!
//! - `preview`: Text rendering of carved levels

pub mod preview;

// Re-export the core
pub use catacomb_procedural as procedural;

pub use preview::{render_grid, render_tiles, tile_glyph, tile_legend};
