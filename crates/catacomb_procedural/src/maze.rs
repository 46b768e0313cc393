//! # Finished Mazes
//!
//! A [`Maze`] is the read-only result of carving. Its tile map is computed
//! in one sweep so renderers can look sprites up by cell.

use std::collections::BTreeMap;

use crate::grid::Grid;
use crate::tile::{TileClassifier, TileSelection, WallTile};

/// An immutable carved grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
}

impl Maze {
    pub(crate) const fn new(grid: Grid) -> Self {
        Self { grid }
    }

    /// The underlying occupancy grid.
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Width in cells.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.grid.width()
    }

    /// Height in cells.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.grid.height()
    }

    /// Returns true if `(x, y)` is wall. Out of range is wall.
    #[inline]
    #[must_use]
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.grid.is_solid(x, y)
    }

    /// Returns true if a 3x3 body centred on `(x, y)` fits in open floor.
    #[inline]
    #[must_use]
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.grid.is_walkable(x, y)
    }

    /// A classifier reading this maze.
    #[must_use]
    pub const fn classifier(&self) -> TileClassifier<'_> {
        TileClassifier::new(&self.grid)
    }

    /// Tile selection for one cell; `None` for floor.
    #[must_use]
    pub fn classify_tile(&self, x: i32, y: i32) -> Option<TileSelection> {
        self.classifier().classify_tile(x, y)
    }

    /// Classifies every cell.
    #[must_use]
    pub fn tile_map(&self) -> TileMap {
        let classifier = self.classifier();
        let (width, height) = (self.grid.width_i32(), self.grid.height_i32());

        let mut tiles = Vec::with_capacity(self.width() * self.height());
        for x in 0..width {
            for y in 0..height {
                tiles.push(classifier.classify_tile(x, y));
            }
        }

        TileMap {
            width: self.width(),
            height: self.height(),
            tiles,
        }
    }
}

/// Tile selections for every cell of a maze, indexed `[x][y]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    width: usize,
    height: usize,
    tiles: Vec<Option<TileSelection>>,
}

impl TileMap {
    /// Width in cells.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Selection at `(x, y)`; `None` for floor or out of range.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<TileSelection> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles[x * self.height + y]
    }

    /// Number of cells drawing a wall sprite.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.walls().count()
    }

    /// Number of solid cells with no wall sprite.
    #[must_use]
    pub fn interior_count(&self) -> usize {
        self.tiles
            .iter()
            .flatten()
            .filter(|selection| selection.is_interior())
            .count()
    }

    /// How often each wall tile is used.
    #[must_use]
    pub fn histogram(&self) -> BTreeMap<WallTile, usize> {
        let mut counts = BTreeMap::new();
        for tile in self.walls() {
            *counts.entry(tile).or_insert(0) += 1;
        }
        counts
    }

    fn walls(&self) -> impl Iterator<Item = WallTile> + '_ {
        self.tiles.iter().flatten().filter_map(|selection| selection.wall)
    }
}
