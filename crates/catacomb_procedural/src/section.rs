//! # Carve Regions
//!
//! Argument types for the carver, and the bounds checks they must pass
//! before a single cell is touched.

use serde::{Deserialize, Serialize};

use crate::error::{MazeError, MazeResult};

/// Smallest span (in cells) of a maze section side.
pub const MIN_SECTION_SPAN: i32 = 7;

/// A 3-cell thick corridor: a row band `center-1..=center+1` running
/// `length` cells from `start`, or the column analogue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorridorSpan {
    /// Row y (or column x) at the middle of the band.
    pub center: i32,
    /// First cell along the corridor.
    pub start: i32,
    /// Number of cells along the corridor.
    pub length: i32,
}

impl CorridorSpan {
    /// Creates a corridor span.
    #[inline]
    #[must_use]
    pub const fn new(center: i32, start: i32, length: i32) -> Self {
        Self {
            center,
            start,
            length,
        }
    }

    /// Last cell along the corridor (inclusive), saturating at `i32` bounds.
    #[inline]
    #[must_use]
    pub const fn end(self) -> i32 {
        self.start.saturating_add(self.length).saturating_sub(1)
    }

    /// Checks the band lies inside the grid interior.
    ///
    /// `along` is the grid size in the corridor direction and `across` the
    /// size perpendicular to it. Bands may not touch the border.
    pub(crate) fn validate(
        self,
        operation: &'static str,
        along: i32,
        across: i32,
    ) -> MazeResult<()> {
        // Bounds are checked in i64 so extreme arguments cannot wrap.
        let (start, center) = (i64::from(self.start), i64::from(self.center));
        let end = start + i64::from(self.length) - 1;
        let (along, across) = (i64::from(along), i64::from(across));

        if self.length < 1 {
            return Err(MazeError::invalid(
                operation,
                format!("length must be positive, got {}", self.length),
            ));
        }
        if start < 1 || end > along - 2 {
            return Err(MazeError::invalid(
                operation,
                format!(
                    "span {start}..={end} leaves the interior 1..={}",
                    along - 2
                ),
            ));
        }
        if center - 1 < 1 || center + 1 > across - 2 {
            return Err(MazeError::invalid(
                operation,
                format!(
                    "band around {center} leaves the interior 1..={}",
                    across - 2
                ),
            ));
        }
        Ok(())
    }
}

/// One rectangular maze region carved by partitions and gaps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeSection {
    /// Number of corridor columns, perimeter included.
    pub columns: usize,
    /// Number of corridor rows, perimeter included.
    pub rows: usize,
    /// Left edge of the section.
    pub start_x: i32,
    /// Section width in cells.
    pub width: i32,
    /// Bottom edge of the section.
    pub start_y: i32,
    /// Section height in cells.
    pub height: i32,
}

impl MazeSection {
    /// Creates a section description. Nothing is checked until carving.
    #[must_use]
    pub const fn new(
        columns: usize,
        rows: usize,
        start_x: i32,
        width: i32,
        start_y: i32,
        height: i32,
    ) -> Self {
        Self {
            columns,
            rows,
            start_x,
            width,
            start_y,
            height,
        }
    }

    /// Smallest span that fits `corridors` corridors with unit-wide walls.
    #[must_use]
    pub fn min_span(corridors: usize) -> i64 {
        4 * i64::try_from(corridors).unwrap_or(i64::MAX / 8) - 1
    }

    /// Checks the section fits a `grid_width` x `grid_height` grid.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if fewer than two corridors are requested on an
    /// axis, a side is shorter than [`MIN_SECTION_SPAN`] or too short for
    /// its corridors, or the section is not strictly inside the border.
    pub fn validate(&self, grid_width: i32, grid_height: i32) -> MazeResult<()> {
        const OP: &str = "carve_maze_section";

        if self.columns < 2 || self.rows < 2 {
            return Err(MazeError::invalid(
                OP,
                format!(
                    "need at least 2 columns and 2 rows, got {}x{}",
                    self.columns, self.rows
                ),
            ));
        }
        if self.width < MIN_SECTION_SPAN || self.height < MIN_SECTION_SPAN {
            return Err(MazeError::invalid(
                OP,
                format!(
                    "section {}x{} is smaller than {MIN_SECTION_SPAN}x{MIN_SECTION_SPAN}",
                    self.width, self.height
                ),
            ));
        }
        if i64::from(self.width) < Self::min_span(self.columns) {
            return Err(MazeError::invalid(
                OP,
                format!(
                    "width {} cannot hold {} columns (needs {})",
                    self.width,
                    self.columns,
                    Self::min_span(self.columns)
                ),
            ));
        }
        if i64::from(self.height) < Self::min_span(self.rows) {
            return Err(MazeError::invalid(
                OP,
                format!(
                    "height {} cannot hold {} rows (needs {})",
                    self.height,
                    self.rows,
                    Self::min_span(self.rows)
                ),
            ));
        }
        let right = i64::from(self.start_x) + i64::from(self.width);
        let top = i64::from(self.start_y) + i64::from(self.height);
        if self.start_x < 1
            || self.start_y < 1
            || right > i64::from(grid_width) - 1
            || top > i64::from(grid_height) - 1
        {
            return Err(MazeError::invalid(
                OP,
                format!(
                    "section at ({}, {}) sized {}x{} leaves the {}x{} grid interior",
                    self.start_x, self.start_y, self.width, self.height, grid_width, grid_height
                ),
            ));
        }
        Ok(())
    }
}
