//! # Grid Carver
//!
//! Carves corridors out of an initially solid grid.
//!
//! ## Maze Sections
//!
//! A section is carved in five steps:
//!
//! 1. Open the four perimeter corridors
//! 2. Draw uneven wall block widths for rows and columns
//! 3. Open the internal row and column corridors between the blocks
//! 4. Bridge random wall islands together across corridors
//! 5. Fill 3-wide dead-end stubs until a full pass finds none
//!
//! All corridors are 3 cells thick so a 3x3 body can walk them.
//!
//! ## Failure
//!
//! Every argument is checked before the grid is touched. Any failed call
//! poisons the carver: carving and `finish` refuse to continue and the grid
//! reads as solid until [`GridCarver::initialize`] starts over.

use std::ops::Range;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::error::{MazeError, MazeResult};
use crate::grid::{Compass, Grid};
use crate::maze::Maze;
use crate::partition::GapWidths;
use crate::section::{CorridorSpan, MazeSection};
use crate::seed::MazeSeed;

/// Chance of bridging a corridor, and then of each block across it.
const JOIN_PROBABILITY: f64 = 0.5;

/// Closed sides tested for dead ends at every cell, in scan order.
const DEAD_END_SIDES: [Compass; 4] = [Compass::Left, Compass::Right, Compass::Down, Compass::Up];

/// Owns the occupancy grid while it is being carved.
#[derive(Debug)]
pub struct GridCarver<R: Rng = ChaCha8Rng> {
    grid: Grid,
    rng: R,
    poisoned: bool,
}

impl GridCarver<ChaCha8Rng> {
    /// Creates a carver over a solid `width` x `height` grid.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the grid dimensions are unusable.
    pub fn new(width: usize, height: usize, seed: MazeSeed) -> MazeResult<Self> {
        Self::with_rng(width, height, seed.rng())
    }
}

impl<R: Rng> GridCarver<R> {
    /// Creates a carver drawing from a caller-supplied random stream.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the grid dimensions are unusable.
    pub fn with_rng(width: usize, height: usize, rng: R) -> MazeResult<Self> {
        Ok(Self {
            grid: Grid::new(width, height)?,
            rng,
            poisoned: false,
        })
    }

    /// Replaces the grid with a fresh solid one and clears poisoning.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the grid dimensions are unusable; the carver is
    /// then poisoned.
    pub fn initialize(&mut self, width: usize, height: usize) -> MazeResult<()> {
        if width == self.grid.width() && height == self.grid.height() {
            self.grid.fill();
        } else {
            let grid = Grid::new(width, height);
            self.grid = self.guard(grid)?;
        }
        self.poisoned = false;
        Ok(())
    }

    /// Returns true if an earlier call failed.
    #[must_use]
    pub const fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// The grid carved so far.
    ///
    /// # Errors
    ///
    /// `Poisoned` if an earlier call failed.
    pub fn grid(&self) -> MazeResult<&Grid> {
        self.ensure_usable()?;
        Ok(&self.grid)
    }

    /// Returns true if `(x, y)` is wall. A poisoned grid is all wall.
    #[must_use]
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.poisoned || self.grid.is_solid(x, y)
    }

    /// Returns true if a 3x3 body centred on `(x, y)` fits in open floor.
    #[must_use]
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        !self.poisoned && self.grid.is_walkable(x, y)
    }

    /// Opens the 3-row band `y-1..=y+1` for `length` cells from `start_x`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the band would touch the border or leave the
    /// grid; `Poisoned` after an earlier failure.
    pub fn carve_row(&mut self, y: i32, start_x: i32, length: i32) -> MazeResult<()> {
        self.ensure_usable()?;
        let span = CorridorSpan::new(y, start_x, length);
        let checked = span.validate("carve_row", self.grid.width_i32(), self.grid.height_i32());
        self.guard(checked)?;

        self.open_row(span);
        debug!(y, start_x, length, "carved row");
        Ok(())
    }

    /// Opens the 3-column band `x-1..=x+1` for `length` cells from `start_y`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the band would touch the border or leave the
    /// grid; `Poisoned` after an earlier failure.
    pub fn carve_column(&mut self, x: i32, start_y: i32, length: i32) -> MazeResult<()> {
        self.ensure_usable()?;
        let span = CorridorSpan::new(x, start_y, length);
        let checked =
            span.validate("carve_column", self.grid.height_i32(), self.grid.width_i32());
        self.guard(checked)?;

        self.open_column(span);
        debug!(x, start_y, length, "carved column");
        Ok(())
    }

    /// Carves one maze section.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the section does not fit (see
    /// [`MazeSection::validate`]); `DeadEndsDiverged` if dead-end removal
    /// does not settle; `Poisoned` after an earlier failure.
    pub fn carve_maze_section(&mut self, section: &MazeSection) -> MazeResult<()> {
        self.ensure_usable()?;
        let checked = section.validate(self.grid.width_i32(), self.grid.height_i32());
        self.guard(checked)?;

        let MazeSection {
            columns,
            rows,
            start_x,
            width,
            start_y,
            height,
        } = *section;

        // Perimeter
        self.open_row(CorridorSpan::new(start_y + 1, start_x, width));
        self.open_row(CorridorSpan::new(start_y + height - 2, start_x, width));
        self.open_column(CorridorSpan::new(start_x + 1, start_y, height));
        self.open_column(CorridorSpan::new(start_x + width - 2, start_y, height));

        // Partitions
        let row_gaps = GapWidths::distribute(start_y, rows, height, &mut self.rng);
        for i in 0..row_gaps.internal_corridors() {
            self.open_row(CorridorSpan::new(row_gaps.corridor_center(i), start_x, width));
        }
        let column_gaps = GapWidths::distribute(start_x, columns, width, &mut self.rng);
        for i in 0..column_gaps.internal_corridors() {
            self.open_column(CorridorSpan::new(column_gaps.corridor_center(i), start_y, height));
        }

        let bridges = self.join_islands(&row_gaps, &column_gaps);

        let settled = self.eliminate_dead_ends_within(
            start_x + 2..start_x + width - 2,
            start_y + 2..start_y + height - 2,
        );
        let filled = self.guard(settled)?;

        debug!(
            columns,
            rows,
            start_x,
            start_y,
            width,
            height,
            bridges,
            dead_end_cells = filled * 3,
            "carved maze section"
        );
        Ok(())
    }

    /// Runs dead-end elimination over the whole interior until it settles.
    ///
    /// Returns the number of corridor steps filled; zero means the grid had
    /// no dead ends left.
    ///
    /// # Errors
    ///
    /// `DeadEndsDiverged` if it does not settle; `Poisoned` after an earlier
    /// failure.
    pub fn eliminate_dead_ends(&mut self) -> MazeResult<usize> {
        self.ensure_usable()?;
        let (width, height) = (self.grid.width_i32(), self.grid.height_i32());
        let settled = self.eliminate_dead_ends_within(2..width - 2, 2..height - 2);
        self.guard(settled)
    }

    /// Hands the finished grid over as an immutable maze.
    ///
    /// # Errors
    ///
    /// `Poisoned` if any carve failed.
    pub fn finish(self) -> MazeResult<Maze> {
        self.ensure_usable()?;
        Ok(Maze::new(self.grid))
    }

    fn ensure_usable(&self) -> MazeResult<()> {
        if self.poisoned {
            Err(MazeError::Poisoned)
        } else {
            Ok(())
        }
    }

    /// Poisons the carver if `result` is an error.
    fn guard<T>(&mut self, result: MazeResult<T>) -> MazeResult<T> {
        if let Err(err) = &result {
            warn!(%err, "grid carver poisoned");
            self.poisoned = true;
        }
        result
    }

    fn open_row(&mut self, span: CorridorSpan) {
        for x in span.start..=span.end() {
            for y in span.center - 1..=span.center + 1 {
                self.grid.set_open(x, y);
            }
        }
    }

    fn open_column(&mut self, span: CorridorSpan) {
        for y in span.start..=span.end() {
            for x in span.center - 1..=span.center + 1 {
                self.grid.set_open(x, y);
            }
        }
    }

    /// Fills corridor segments between wall blocks, merging the islands on
    /// either side. Returns the number of bridges built.
    fn join_islands(&mut self, rows: &GapWidths, columns: &GapWidths) -> usize {
        let mut bridges = 0;

        // Across row corridors: join islands stacked vertically.
        for i in 0..rows.internal_corridors() {
            let y = rows.corridor_center(i);
            if !self.rng.gen_bool(JOIN_PROBABILITY) {
                continue;
            }
            for j in 0..columns.internal_corridors() {
                if self.rng.gen_bool(JOIN_PROBABILITY) {
                    for x in columns.block(j) {
                        for dy in -1..=1 {
                            self.grid.set_solid(x, y + dy);
                        }
                    }
                    bridges += 1;
                }
            }
        }

        // Across column corridors: join islands side by side.
        for i in 0..columns.internal_corridors() {
            let x = columns.corridor_center(i);
            if !self.rng.gen_bool(JOIN_PROBABILITY) {
                continue;
            }
            for j in 0..rows.internal_corridors() {
                if self.rng.gen_bool(JOIN_PROBABILITY) {
                    for y in rows.block(j) {
                        for dx in -1..=1 {
                            self.grid.set_solid(x + dx, y);
                        }
                    }
                    bridges += 1;
                }
            }
        }

        bridges
    }

    /// Scans `xs` x `ys` for dead ends until one pass fills nothing.
    fn eliminate_dead_ends_within(&mut self, xs: Range<i32>, ys: Range<i32>) -> MazeResult<usize> {
        // Every fill closes three cells, so this is never reached on a
        // finite grid.
        let max_passes = self.grid.width() * self.grid.height() + 1;
        let mut total = 0;

        for pass in 1..=max_passes {
            let mut filled = 0;
            for x in xs.clone() {
                for y in ys.clone() {
                    for closed in DEAD_END_SIDES {
                        filled += self.fill_dead_end(x, y, closed);
                    }
                }
            }
            if filled == 0 {
                debug!(passes = pass, filled = total, "dead ends settled");
                return Ok(total);
            }
            total += filled;
        }

        Err(MazeError::DeadEndsDiverged { passes: max_passes })
    }

    /// Fills the stub at `(x, y)` step by step, walking away from `closed`.
    fn fill_dead_end(&mut self, x: i32, y: i32, closed: Compass) -> usize {
        let (dx, dy) = closed.offset();
        let (mut cx, mut cy) = (x, y);
        let mut steps = 0;

        while self.grid.is_dead_end(cx, cy, closed) {
            self.grid.fill_across(cx, cy, closed);
            cx -= dx;
            cy -= dy;
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carver(width: usize, height: usize) -> GridCarver {
        GridCarver::new(width, height, MazeSeed::new(42)).unwrap()
    }

    #[test]
    fn test_initialize_fills_solid() {
        let mut c = carver(10, 10);
        c.carve_row(5, 1, 8).unwrap();
        assert!(!c.is_solid(4, 5));

        c.initialize(12, 9).unwrap();
        let grid = c.grid().unwrap();
        assert_eq!((grid.width(), grid.height()), (12, 9));
        assert_eq!(grid.open_cell_count(), 0);
    }

    #[test]
    fn test_carve_row_opens_band() {
        let mut c = carver(20, 10);
        c.carve_row(4, 2, 5).unwrap();

        for x in 2..=6 {
            for y in 3..=5 {
                assert!(!c.is_solid(x, y), "({x}, {y}) should be open");
            }
        }
        assert!(c.is_solid(1, 4));
        assert!(c.is_solid(7, 4));
        assert!(c.is_solid(4, 2));
        assert!(c.is_solid(4, 6));
        assert_eq!(c.grid().unwrap().open_cell_count(), 15);
    }

    #[test]
    fn test_carve_column_opens_band() {
        let mut c = carver(10, 20);
        c.carve_column(3, 1, 18).unwrap();

        assert!(!c.is_solid(2, 1));
        assert!(!c.is_solid(4, 18));
        assert!(c.is_solid(3, 0), "border untouched");
        assert!(c.is_solid(3, 19), "border untouched");
        assert!(c.is_walkable(3, 10));
        assert!(!c.is_walkable(3, 1), "touches the border row");
    }

    #[test]
    fn test_out_of_bounds_carve_poisons() {
        let mut c = carver(10, 10);
        c.carve_row(5, 1, 8).unwrap();

        let err = c.carve_row(5, 1, 9).unwrap_err();
        assert!(matches!(err, MazeError::InvalidArgument { operation: "carve_row", .. }));
        assert!(c.is_poisoned());

        // Nothing is readable or carvable until re-initialized.
        assert!(c.is_solid(4, 5));
        assert!(!c.is_walkable(4, 5));
        assert_eq!(c.carve_column(5, 1, 3), Err(MazeError::Poisoned));
        assert_eq!(c.grid().unwrap_err(), MazeError::Poisoned);

        c.initialize(10, 10).unwrap();
        assert!(!c.is_poisoned());
        assert!(c.carve_column(5, 1, 3).is_ok());
    }

    #[test]
    fn test_overflowing_arguments_rejected() {
        let mut c = carver(20, 20);
        let err = c.carve_row(5, 10, i32::MAX).unwrap_err();
        assert!(matches!(err, MazeError::InvalidArgument { operation: "carve_row", .. }));

        c.initialize(20, 20).unwrap();
        let err = c.carve_column(i32::MAX, 1, 3).unwrap_err();
        assert!(matches!(err, MazeError::InvalidArgument { operation: "carve_column", .. }));

        c.initialize(20, 20).unwrap();
        let err = c
            .carve_maze_section(&MazeSection::new(2, 2, i32::MAX - 3, 7, 1, 7))
            .unwrap_err();
        assert!(matches!(
            err,
            MazeError::InvalidArgument {
                operation: "carve_maze_section",
                ..
            }
        ));

        c.initialize(20, 20).unwrap();
        assert!(c.carve_row(5, i32::MIN, 3).is_err());
    }

    #[test]
    fn test_poisoned_carver_cannot_finish() {
        let mut c = carver(30, 30);
        let bad = MazeSection::new(2, 2, 1, 6, 1, 10);
        assert!(c.carve_maze_section(&bad).is_err());
        assert_eq!(c.finish().unwrap_err(), MazeError::Poisoned);
    }

    #[test]
    fn test_section_keeps_border_solid() {
        let mut c = carver(48, 30);
        c.carve_maze_section(&MazeSection::new(8, 4, 1, 46, 1, 28))
            .unwrap();
        let grid = c.grid().unwrap();

        for x in 0..48 {
            assert!(grid.is_solid(x, 0));
            assert!(grid.is_solid(x, 29));
        }
        for y in 0..30 {
            assert!(grid.is_solid(0, y));
            assert!(grid.is_solid(47, y));
        }
    }

    #[test]
    fn test_section_perimeter_is_open() {
        let mut c = carver(48, 30);
        c.carve_maze_section(&MazeSection::new(8, 4, 1, 46, 1, 28))
            .unwrap();

        // Corners of the perimeter ring are junctions, never dead ends.
        for (x, y) in [(2, 2), (45, 2), (2, 27), (45, 27), (20, 2), (2, 14)] {
            assert!(c.is_walkable(x, y), "perimeter at ({x}, {y}) should be open");
        }
    }

    #[test]
    fn test_dead_end_stub_is_filled() {
        let mut c = carver(20, 11);
        // A through corridor with a stub hanging off it.
        c.carve_column(2, 1, 9).unwrap();
        c.carve_row(5, 1, 12).unwrap();

        let filled = c.eliminate_dead_ends().unwrap();
        assert!(filled > 0);

        let grid = c.grid().unwrap();
        assert!(grid.is_solid(12, 5), "stub tip filled");
        assert!(grid.is_solid(4, 5), "stub filled back to the junction");
        assert!(!grid.is_solid(3, 5), "junction kept");
    }

    #[test]
    fn test_clean_grid_is_left_alone() {
        let mut c = carver(12, 12);
        // A closed ring has no dead ends.
        c.carve_row(2, 1, 10).unwrap();
        c.carve_row(9, 1, 10).unwrap();
        c.carve_column(2, 1, 10).unwrap();
        c.carve_column(9, 1, 10).unwrap();
        let before = c.grid().unwrap().clone();

        assert_eq!(c.eliminate_dead_ends().unwrap(), 0);
        assert_eq!(c.grid().unwrap(), &before);
    }
}
