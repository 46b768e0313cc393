//! # Partition Spacing
//!
//! Along one axis a maze section alternates 3-cell corridors and wall blocks:
//!
//! ```text
//! | corridor | block 0 | corridor | block 1 | ... | block n-1 | corridor |
//! ```
//!
//! Every block starts one cell wide, then the spare span is handed out one
//! cell at a time to uniformly chosen blocks. Spacing comes out uneven but
//! every block stays at least one cell thick.

use std::ops::Range;

use rand::Rng;

/// Corridor thickness in cells.
pub const CORRIDOR_WIDTH: i32 = 3;

/// Randomized wall block widths along one section axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GapWidths {
    /// First cell of the section on this axis.
    origin: i32,
    /// Width of each wall block.
    widths: Vec<i32>,
}

impl GapWidths {
    /// Distributes wall widths for `corridors` corridors over `span` cells.
    ///
    /// There are `corridors - 1` blocks; `span - 2 - 4 * corridors` extra
    /// cells (if positive) are added to them one at a time.
    pub fn distribute<R: Rng + ?Sized>(
        origin: i32,
        corridors: usize,
        span: i32,
        rng: &mut R,
    ) -> Self {
        let gaps = corridors.saturating_sub(1);
        let mut widths = vec![1; gaps];

        let corridor_cells = i64::try_from(corridors).map_or(i64::MAX, |c| c.saturating_mul(4));
        let extra = (i64::from(span) - 2).saturating_sub(corridor_cells).max(0);
        if gaps > 0 {
            for _ in 0..extra {
                widths[rng.gen_range(0..gaps)] += 1;
            }
        }

        Self { origin, widths }
    }

    /// Builds a layout from explicit widths.
    #[must_use]
    pub fn from_widths(origin: i32, widths: Vec<i32>) -> Self {
        Self { origin, widths }
    }

    /// Width of every wall block, in order.
    #[must_use]
    pub fn widths(&self) -> &[i32] {
        &self.widths
    }

    /// Number of corridors strictly inside the section on this axis.
    ///
    /// Also the number of blocks that the joining pass may bridge.
    #[must_use]
    pub fn internal_corridors(&self) -> usize {
        self.widths.len().saturating_sub(1)
    }

    /// Cells covered by wall block `index`.
    #[must_use]
    pub fn block(&self, index: usize) -> Range<i32> {
        let before: i32 = self.widths[..index].iter().sum();
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let corridors_before = CORRIDOR_WIDTH * index as i32;
        let start = self.origin + CORRIDOR_WIDTH + before + corridors_before;
        start..start + self.widths[index]
    }

    /// Middle cell of internal corridor `index` (the one after block `index`).
    #[must_use]
    pub fn corridor_center(&self, index: usize) -> i32 {
        self.block(index).end + 1
    }
}
