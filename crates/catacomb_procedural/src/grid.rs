//! # Occupancy Grid
//!
//! A 2-D boolean grid indexed `[x][y]`: `true` is solid wall, `false` is
//! carved floor. The y axis points **up**, so `Compass::Up` looks at `y + 1`.
//!
//! Every read goes through [`Grid::is_solid`], which treats any coordinate
//! outside the grid as solid. Border cells classify correctly without
//! special cases and neighbour scans never index out of range.

use std::fmt;

use crate::error::{MazeError, MazeResult};

/// The eight compass directions around a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Compass {
    /// +y
    Up = 0,
    /// +x +y
    UpRight = 1,
    /// +x
    Right = 2,
    /// +x -y
    DownRight = 3,
    /// -y
    Down = 4,
    /// -x -y
    DownLeft = 5,
    /// -x
    Left = 6,
    /// -x +y
    UpLeft = 7,
}

impl Compass {
    /// All eight directions, clockwise from up.
    pub const ALL: [Self; 8] = [
        Self::Up,
        Self::UpRight,
        Self::Right,
        Self::DownRight,
        Self::Down,
        Self::DownLeft,
        Self::Left,
        Self::UpLeft,
    ];

    /// The four cardinal directions, clockwise from up.
    pub const CARDINALS: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Returns the `(dx, dy)` step for this direction.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::UpRight => (1, 1),
            Self::Right => (1, 0),
            Self::DownRight => (1, -1),
            Self::Down => (0, -1),
            Self::DownLeft => (-1, -1),
            Self::Left => (-1, 0),
            Self::UpLeft => (-1, 1),
        }
    }

    /// Returns the direction pointing the other way.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::UpRight => Self::DownLeft,
            Self::Right => Self::Left,
            Self::DownRight => Self::UpLeft,
            Self::Down => Self::Up,
            Self::DownLeft => Self::UpRight,
            Self::Left => Self::Right,
            Self::UpLeft => Self::DownRight,
        }
    }

    /// Returns true for up, right, down and left.
    #[inline]
    #[must_use]
    pub const fn is_cardinal(self) -> bool {
        (self as u8) % 2 == 0
    }

    /// Connection bit of a cardinal direction: up=1, right=2, down=4, left=8.
    ///
    /// Diagonals have no connection bit and return 0.
    #[inline]
    #[must_use]
    pub const fn connection_bit(self) -> u8 {
        match self {
            Self::Up => 1,
            Self::Right => 2,
            Self::Down => 4,
            Self::Left => 8,
            _ => 0,
        }
    }
}

/// Rectangular occupancy grid.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Column-major cells (indexed as [x][y]).
    cells: Vec<bool>,
}

impl Grid {
    /// Creates a grid with every cell solid.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if either dimension is zero or does not fit in `i32`.
    pub fn new(width: usize, height: usize) -> MazeResult<Self> {
        if width == 0 || height == 0 {
            return Err(MazeError::invalid(
                "Grid::new",
                format!("grid must not be empty, got {width}x{height}"),
            ));
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(MazeError::invalid(
                "Grid::new",
                format!("{width}x{height} exceeds the coordinate range"),
            ));
        }

        Ok(Self {
            width,
            height,
            cells: vec![true; width * height],
        })
    }

    /// Builds a grid from ASCII rows, `#` is solid and anything else open.
    ///
    /// The first row is the **top** of the grid (highest y), matching
    /// the `Display` output.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if there are no rows or the rows are ragged.
    pub fn from_rows(rows: &[&str]) -> MazeResult<Self> {
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut grid = Self::new(width, rows.len())?;

        for (row_index, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(MazeError::invalid(
                    "Grid::from_rows",
                    format!("row {row_index} is not {width} cells wide"),
                ));
            }
            let y = rows.len() - 1 - row_index;
            for (x, glyph) in row.chars().enumerate() {
                grid.cells[x * grid.height + y] = glyph == '#';
            }
        }

        Ok(grid)
    }

    /// Grid width in cells.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Width as a signed coordinate bound.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    #[inline]
    pub(crate) const fn width_i32(&self) -> i32 {
        // Checked against i32::MAX in `new`.
        self.width as i32
    }

    /// Height as a signed coordinate bound.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    #[inline]
    pub(crate) const fn height_i32(&self) -> i32 {
        self.height as i32
    }

    /// Returns true if `(x, y)` lies inside the grid.
    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width_i32() && y < self.height_i32()
    }

    /// Returns true if `(x, y)` is on the border or outside the grid.
    #[inline]
    #[must_use]
    pub const fn at_or_beyond_edge(&self, x: i32, y: i32) -> bool {
        x <= 0 || y <= 0 || x >= self.width_i32() - 1 || y >= self.height_i32() - 1
    }

    #[allow(clippy::cast_sign_loss)]
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| x as usize * self.height + y as usize)
    }

    /// Returns true if `(x, y)` is wall. Anything out of range is wall.
    #[inline]
    #[must_use]
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map_or(true, |i| self.cells[i])
    }

    /// Returns true if the neighbour of `(x, y)` in `direction` is wall.
    #[inline]
    #[must_use]
    pub fn neighbor_solid(&self, x: i32, y: i32, direction: Compass) -> bool {
        let (dx, dy) = direction.offset();
        match (x.checked_add(dx), y.checked_add(dy)) {
            (Some(nx), Some(ny)) => self.is_solid(nx, ny),
            _ => true,
        }
    }

    /// Returns true if a 3x3 body centred on `(x, y)` fits in open floor.
    ///
    /// Cells on or beyond the grid edge are never walkable.
    #[must_use]
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        if self.at_or_beyond_edge(x, y) {
            return false;
        }
        (x - 1..=x + 1).all(|i| (y - 1..=y + 1).all(|j| !self.is_solid(i, j)))
    }

    /// Number of open cells.
    #[must_use]
    pub fn open_cell_count(&self) -> usize {
        self.cells.iter().filter(|&&solid| !solid).count()
    }

    /// Sets an in-range cell solid. Returns false if `(x, y)` is out of range.
    #[inline]
    pub(crate) fn set_solid(&mut self, x: i32, y: i32) -> bool {
        self.set(x, y, true)
    }

    /// Opens an in-range cell. Returns false if `(x, y)` is out of range.
    #[inline]
    pub(crate) fn set_open(&mut self, x: i32, y: i32) -> bool {
        self.set(x, y, false)
    }

    fn set(&mut self, x: i32, y: i32, solid: bool) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = solid;
                true
            }
            None => false,
        }
    }

    /// Refills every cell solid.
    pub(crate) fn fill(&mut self) {
        self.cells.fill(true);
    }

    /// Returns true if `(x, y)` sits in a 3-wide corridor stub closed on `closed`.
    ///
    /// Across the corridor at `(x, y)` the five cells read
    /// solid, open, open, open, solid, and all five cells one step towards
    /// `closed` are solid.
    #[must_use]
    pub fn is_dead_end(&self, x: i32, y: i32, closed: Compass) -> bool {
        debug_assert!(closed.is_cardinal());
        // The centre must be open floor, so anything off the grid is not.
        if !self.in_bounds(x, y) {
            return false;
        }
        let (ax, ay) = closed.offset();
        // Perpendicular to the corridor axis.
        let (px, py) = (ay.abs(), ax.abs());

        (-2..=2).all(|d: i32| {
            let (cx, cy) = (x + d * px, y + d * py);
            let across_ok = if d.abs() == 2 {
                self.is_solid(cx, cy)
            } else {
                !self.is_solid(cx, cy)
            };
            across_ok && self.is_solid(cx + ax, cy + ay)
        })
    }

    /// Fills the three open cells across the corridor at `(x, y)`.
    pub(crate) fn fill_across(&mut self, x: i32, y: i32, closed: Compass) {
        let (ax, ay) = closed.offset();
        let (px, py) = (ay.abs(), ax.abs());
        for d in -1..=1 {
            self.set_solid(x + d * px, y + d * py);
        }
    }
}

impl fmt::Display for Grid {
    /// One line per row, top row first; `#` is wall, `.` is floor.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height_i32()).rev() {
            for x in 0..self.width_i32() {
                f.write_str(if self.is_solid(x, y) { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.width, self.height)?;
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_solid() {
        let grid = Grid::new(5, 4).unwrap();
        for x in 0..5 {
            for y in 0..4 {
                assert!(grid.is_solid(x, y), "({x}, {y}) should start solid");
            }
        }
        assert_eq!(grid.open_cell_count(), 0);
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert!(matches!(
            Grid::new(0, 10),
            Err(MazeError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_out_of_range_reads_solid() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_open(0, 0);
        assert!(!grid.is_solid(0, 0));
        assert!(grid.is_solid(-1, 0));
        assert!(grid.is_solid(0, -1));
        assert!(grid.is_solid(3, 0));
        assert!(grid.is_solid(0, 3));
        assert!(!grid.set_open(3, 3), "out of range writes are refused");
    }

    #[test]
    fn test_up_is_positive_y() {
        let grid = Grid::from_rows(&[
            "#..", //
            "...",
            "...",
        ])
        .unwrap();
        assert!(grid.is_solid(0, 2));
        assert!(grid.neighbor_solid(0, 1, Compass::Up));
        assert!(!grid.neighbor_solid(0, 1, Compass::Down));
        assert!(grid.neighbor_solid(1, 1, Compass::UpLeft));
    }

    #[test]
    fn test_display_matches_rows() {
        let rows = ["#####", "#...#", "#####"];
        let grid = Grid::from_rows(&rows).unwrap();
        assert_eq!(grid.to_string(), "#####\n#...#\n#####\n");
    }

    #[test]
    fn test_ragged_rows_rejected() {
        assert!(Grid::from_rows(&["###", "##"]).is_err());
        assert!(Grid::from_rows(&[]).is_err());
    }

    #[test]
    fn test_walkable_needs_open_3x3() {
        let grid = Grid::from_rows(&[
            "######", //
            "#....#",
            "#....#",
            "#....#",
            "######",
        ])
        .unwrap();
        assert!(grid.is_walkable(2, 2));
        assert!(grid.is_walkable(3, 2));
        assert!(!grid.is_walkable(1, 2), "touches the left wall");
        assert!(!grid.is_walkable(0, 0), "border is never walkable");
        assert!(!grid.is_walkable(-4, 9));
    }

    #[test]
    fn test_dead_end_predicate() {
        // Horizontal 3-wide stub closed on the left.
        let grid = Grid::from_rows(&[
            "########", //
            "#.......",
            "#.......",
            "#.......",
            "########",
        ])
        .unwrap();
        assert!(grid.is_dead_end(1, 2, Compass::Left));
        assert!(!grid.is_dead_end(1, 2, Compass::Right));
        assert!(!grid.is_dead_end(1, 1, Compass::Left), "not centred");
        assert!(!grid.is_dead_end(2, 2, Compass::Left), "left column is open");

        // Vertical stub closed at the bottom.
        let grid = Grid::from_rows(&[
            "#...#", //
            "#...#",
            "#...#",
            "#####",
        ])
        .unwrap();
        assert!(grid.is_dead_end(2, 1, Compass::Down));
        assert!(!grid.is_dead_end(2, 1, Compass::Up));
        assert!(!grid.is_dead_end(i32::MAX, i32::MIN, Compass::Left));
    }

    #[test]
    fn test_extreme_coordinates_read_solid() {
        let grid = Grid::new(4, 4).unwrap();
        for direction in Compass::ALL {
            assert!(grid.neighbor_solid(i32::MAX, i32::MAX, direction));
            assert!(grid.neighbor_solid(i32::MIN, i32::MIN, direction));
        }
        assert!(!grid.is_walkable(i32::MAX, i32::MIN));
    }

    #[test]
    fn test_compass_opposites() {
        for direction in Compass::ALL {
            let (dx, dy) = direction.offset();
            let (ox, oy) = direction.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert_eq!(direction.opposite().opposite(), direction);
        }
        let bits: u8 = Compass::CARDINALS.iter().map(|d| d.connection_bit()).sum();
        assert_eq!(bits, 15);
    }
}
