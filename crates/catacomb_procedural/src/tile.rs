//! # Wall Tile Classification
//!
//! Picks the wall sprite for a solid cell from its eight neighbours.
//!
//! The four cardinal "wall continues" flags alone cannot tell a straight
//! wall from a concave corner or a tee, so classification runs in a fixed
//! order:
//!
//! 1. Mark convex solid corners (both cardinals solid, corner not concave)
//! 2. Four solid corners: pure interior, no wall sprite at all
//! 3. Base tile: single-corner L, horizontal, or the vertical default
//! 4. Override rules, later rules winning: concave corners, end caps, tees
//!
//! Reordering any step changes which sprite is drawn.

use crate::grid::{Compass, Grid};

/// Solid/open state of the eight cells around a wall cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NeighborState {
    /// Bit `Compass as u8` set when that neighbour is solid.
    solid: u8,
}

impl NeighborState {
    /// Reads the neighbourhood of `(x, y)`. Out-of-range neighbours are solid.
    #[must_use]
    pub fn from_grid(grid: &Grid, x: i32, y: i32) -> Self {
        Self::from_fn(|direction| grid.neighbor_solid(x, y, direction))
    }

    /// Builds a state from a per-direction predicate.
    pub fn from_fn(mut solid: impl FnMut(Compass) -> bool) -> Self {
        let mut bits = 0;
        for direction in Compass::ALL {
            if solid(direction) {
                bits |= 1 << direction as u8;
            }
        }
        Self { solid: bits }
    }

    /// Builds a state from raw bits, bit `i` being `Compass::ALL[i]`.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self { solid: bits }
    }

    /// Returns true if the neighbour in `direction` is wall.
    #[inline]
    #[must_use]
    pub const fn solid(self, direction: Compass) -> bool {
        self.solid & (1 << direction as u8) != 0
    }

    /// Cardinal continuation mask: up=1, right=2, down=4, left=8.
    #[must_use]
    pub fn cardinal_mask(self) -> u8 {
        Compass::CARDINALS
            .iter()
            .filter(|&&d| self.solid(d))
            .map(|d| d.connection_bit())
            .sum()
    }

    /// Returns true if `corner` is concave: both its sides continue, its own
    /// diagonal is open, and the opposite diagonal is solid.
    #[must_use]
    pub const fn is_concave(self, corner: Corner) -> bool {
        let (a, b) = corner.sides();
        self.solid(a)
            && self.solid(b)
            && !self.solid(corner.diagonal())
            && self.solid(corner.diagonal().opposite())
    }
}

/// One of the four corners of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Corner {
    /// Up and left.
    UpLeft = 0,
    /// Up and right.
    UpRight = 1,
    /// Down and right.
    DownRight = 2,
    /// Down and left.
    DownLeft = 3,
}

impl Corner {
    /// All corners, in solid-region sprite order.
    pub const ALL: [Self; 4] = [Self::UpLeft, Self::UpRight, Self::DownRight, Self::DownLeft];

    /// The two cardinal directions meeting at this corner.
    #[must_use]
    pub const fn sides(self) -> (Compass, Compass) {
        match self {
            Self::UpLeft => (Compass::Up, Compass::Left),
            Self::UpRight => (Compass::Up, Compass::Right),
            Self::DownRight => (Compass::Down, Compass::Right),
            Self::DownLeft => (Compass::Down, Compass::Left),
        }
    }

    /// The diagonal direction pointing into this corner.
    #[must_use]
    pub const fn diagonal(self) -> Compass {
        match self {
            Self::UpLeft => Compass::UpLeft,
            Self::UpRight => Compass::UpRight,
            Self::DownRight => Compass::DownRight,
            Self::DownLeft => Compass::DownLeft,
        }
    }

    /// Solid-corner flag bit: 16, 32, 64, 128.
    #[must_use]
    pub const fn flag(self) -> u8 {
        16 << self as u8
    }

    /// Connection mask of both sides.
    #[must_use]
    pub const fn side_mask(self) -> u8 {
        let (a, b) = self.sides();
        a.connection_bit() | b.connection_bit()
    }

    /// The L-shaped wall tile joining this corner's two sides.
    #[must_use]
    pub const fn wall_tile(self) -> WallTile {
        match self {
            Self::UpLeft => WallTile::CornerUpLeft,
            Self::UpRight => WallTile::CornerUpRight,
            Self::DownRight => WallTile::CornerDownRight,
            Self::DownLeft => WallTile::CornerDownLeft,
        }
    }
}

/// Set of convex solid corners of a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SolidCorners(u8);

impl SolidCorners {
    /// No corners.
    pub const EMPTY: Self = Self(0);

    /// Adds a corner.
    #[inline]
    pub fn insert(&mut self, corner: Corner) {
        self.0 |= corner.flag();
    }

    /// Returns true if `corner` is in the set.
    #[inline]
    #[must_use]
    pub const fn contains(self, corner: Corner) -> bool {
        self.0 & corner.flag() != 0
    }

    /// Number of corners in the set.
    #[inline]
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns true if no corner is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw flag bits (16 | 32 | 64 | 128).
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Iterates the corners in sprite order.
    pub fn iter(self) -> impl Iterator<Item = Corner> {
        Corner::ALL.into_iter().filter(move |&c| self.contains(c))
    }
}

/// Wall sprite variants.
///
/// The id of each variant is the connection mask of the sides the wall
/// continues to (up=1, right=2, down=4, left=8); a straight vertical wall
/// is the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum WallTile {
    /// Continues up only; the cap faces down.
    EndDown = 1,
    /// Continues right only; the cap faces left.
    EndLeft = 2,
    /// Joins up and right.
    CornerUpRight = 3,
    /// Continues down only; the cap faces up.
    EndUp = 4,
    /// Straight up-down wall.
    #[default]
    Vertical = 5,
    /// Joins down and right.
    CornerDownRight = 6,
    /// Up, right and down; stem points right.
    TeeRight = 7,
    /// Continues left only; the cap faces right.
    EndRight = 8,
    /// Joins up and left.
    CornerUpLeft = 9,
    /// Straight left-right wall.
    Horizontal = 10,
    /// Up, right and left; stem points up.
    TeeUp = 11,
    /// Joins down and left.
    CornerDownLeft = 12,
    /// Up, down and left; stem points left.
    TeeLeft = 13,
    /// Right, down and left; stem points down.
    TeeDown = 14,
}

impl WallTile {
    /// Every variant, in id order.
    pub const ALL: [Self; 14] = [
        Self::EndDown,
        Self::EndLeft,
        Self::CornerUpRight,
        Self::EndUp,
        Self::Vertical,
        Self::CornerDownRight,
        Self::TeeRight,
        Self::EndRight,
        Self::CornerUpLeft,
        Self::Horizontal,
        Self::TeeUp,
        Self::CornerDownLeft,
        Self::TeeLeft,
        Self::TeeDown,
    ];

    /// Numeric tile id handed to the renderer.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Sides this wall continues to (same as its id).
    #[inline]
    #[must_use]
    pub const fn connections(self) -> u8 {
        self as u8
    }

    /// Looks a tile up by id.
    #[must_use]
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|tile| tile.id() == id)
    }
}

/// Everything the renderer needs for one solid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileSelection {
    /// Convex corners that get a solid-region fill.
    pub solid_corners: SolidCorners,
    /// Wall sprite, `None` for fully enclosed interior cells.
    pub wall: Option<WallTile>,
}

impl TileSelection {
    /// Returns true for fully enclosed cells that render no wall sprite.
    #[inline]
    #[must_use]
    pub const fn is_interior(&self) -> bool {
        self.wall.is_none()
    }
}

/// One override: if `matches` holds, the wall becomes `tile`.
struct TileRule {
    tile: WallTile,
    matches: fn(NeighborState) -> bool,
}

const UP: u8 = 1;
const RIGHT: u8 = 2;
const DOWN: u8 = 4;
const LEFT: u8 = 8;

/// Override rules in priority order; a later match replaces an earlier one.
const OVERRIDE_RULES: [TileRule; 12] = [
    // Concave corners
    TileRule {
        tile: WallTile::CornerUpLeft,
        matches: |s| s.is_concave(Corner::UpLeft),
    },
    TileRule {
        tile: WallTile::CornerUpRight,
        matches: |s| s.is_concave(Corner::UpRight),
    },
    TileRule {
        tile: WallTile::CornerDownRight,
        matches: |s| s.is_concave(Corner::DownRight),
    },
    TileRule {
        tile: WallTile::CornerDownLeft,
        matches: |s| s.is_concave(Corner::DownLeft),
    },
    // End caps
    TileRule {
        tile: WallTile::EndUp,
        matches: |s| s.cardinal_mask() == DOWN,
    },
    TileRule {
        tile: WallTile::EndDown,
        matches: |s| s.cardinal_mask() == UP,
    },
    TileRule {
        tile: WallTile::EndLeft,
        matches: |s| s.cardinal_mask() == RIGHT,
    },
    TileRule {
        tile: WallTile::EndRight,
        matches: |s| s.cardinal_mask() == LEFT,
    },
    // Tees: three sides, and an open diagonal beside the bar
    TileRule {
        tile: WallTile::TeeLeft,
        matches: |s| {
            s.cardinal_mask() == UP | DOWN | LEFT
                && (!s.solid(Compass::UpLeft) || !s.solid(Compass::DownLeft))
        },
    },
    TileRule {
        tile: WallTile::TeeRight,
        matches: |s| {
            s.cardinal_mask() == UP | DOWN | RIGHT
                && (!s.solid(Compass::UpRight) || !s.solid(Compass::DownRight))
        },
    },
    TileRule {
        tile: WallTile::TeeUp,
        matches: |s| {
            s.cardinal_mask() == UP | LEFT | RIGHT
                && (!s.solid(Compass::UpLeft) || !s.solid(Compass::UpRight))
        },
    },
    TileRule {
        tile: WallTile::TeeDown,
        matches: |s| {
            s.cardinal_mask() == DOWN | LEFT | RIGHT
                && (!s.solid(Compass::DownLeft) || !s.solid(Compass::DownRight))
        },
    },
];

/// Classifies a solid cell from its neighbourhood.
#[must_use]
pub fn classify(state: NeighborState) -> TileSelection {
    let mask = state.cardinal_mask();

    let mut solid_corners = SolidCorners::EMPTY;
    for corner in Corner::ALL {
        if mask & corner.side_mask() == corner.side_mask() && !state.is_concave(corner) {
            solid_corners.insert(corner);
        }
    }

    if solid_corners.len() == 4 {
        return TileSelection {
            solid_corners,
            wall: None,
        };
    }

    let mut wall = base_wall(mask, solid_corners);
    for rule in &OVERRIDE_RULES {
        if (rule.matches)(state) {
            wall = rule.tile;
        }
    }

    TileSelection {
        solid_corners,
        wall: Some(wall),
    }
}

/// Tile before overrides: a lone solid corner, a horizontal run, or vertical.
fn base_wall(mask: u8, corners: SolidCorners) -> WallTile {
    if corners.len() == 1 {
        return corners
            .iter()
            .next()
            .map_or(WallTile::Vertical, Corner::wall_tile);
    }

    let up_pair = corners.contains(Corner::UpLeft) && corners.contains(Corner::UpRight);
    let down_pair = corners.contains(Corner::DownLeft) && corners.contains(Corner::DownRight);
    if mask == LEFT | RIGHT || up_pair || down_pair {
        WallTile::Horizontal
    } else {
        WallTile::Vertical
    }
}

/// Classifies cells of a finished grid.
#[derive(Clone, Copy, Debug)]
pub struct TileClassifier<'g> {
    grid: &'g Grid,
}

impl<'g> TileClassifier<'g> {
    /// Wraps a grid for classification.
    #[must_use]
    pub const fn new(grid: &'g Grid) -> Self {
        Self { grid }
    }

    /// Neighbourhood of `(x, y)`.
    #[must_use]
    pub fn neighbor_state(&self, x: i32, y: i32) -> NeighborState {
        NeighborState::from_grid(self.grid, x, y)
    }

    /// Tile for `(x, y)`, or `None` if the cell is open floor.
    #[must_use]
    pub fn classify_tile(&self, x: i32, y: i32) -> Option<TileSelection> {
        self.grid
            .is_solid(x, y)
            .then(|| classify(self.neighbor_state(x, y)))
    }
}
