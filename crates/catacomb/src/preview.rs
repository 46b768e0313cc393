//! # Text Preview
//!
//! Draws a maze as text, top row first, one character per cell.

use catacomb_procedural::{Maze, TileSelection, WallTile};
use tracing::debug;

/// Glyph for solid cells that draw no wall sprite.
pub const INTERIOR_GLYPH: char = '█';

/// Glyph for open floor.
pub const FLOOR_GLYPH: char = ' ';

/// Box-drawing glyph for a tile selection; `None` is floor.
#[must_use]
pub const fn tile_glyph(selection: Option<TileSelection>) -> char {
    let Some(selection) = selection else {
        return FLOOR_GLYPH;
    };
    match selection.wall {
        None => INTERIOR_GLYPH,
        Some(wall) => wall_glyph(wall),
    }
}

const fn wall_glyph(wall: WallTile) -> char {
    match wall {
        WallTile::EndDown => '╵',
        WallTile::EndLeft => '╶',
        WallTile::CornerUpRight => '└',
        WallTile::EndUp => '╷',
        WallTile::Vertical => '│',
        WallTile::CornerDownRight => '┌',
        WallTile::TeeRight => '├',
        WallTile::EndRight => '╴',
        WallTile::CornerUpLeft => '┘',
        WallTile::Horizontal => '─',
        WallTile::TeeUp => '┴',
        WallTile::CornerDownLeft => '┐',
        WallTile::TeeLeft => '┤',
        WallTile::TeeDown => '┬',
    }
}

/// Occupancy only: `#` wall, `.` floor.
#[must_use]
pub fn render_grid(maze: &Maze) -> String {
    maze.grid().to_string()
}

/// Wall sprites as box-drawing characters.
#[must_use]
pub fn render_tiles(maze: &Maze) -> String {
    let tiles = maze.tile_map();
    let mut out = String::with_capacity((maze.width() + 1) * maze.height() * 3);

    for y in (0..maze.height()).rev() {
        for x in 0..maze.width() {
            out.push(tile_glyph(tiles.get(x, y)));
        }
        out.push('\n');
    }

    debug!(
        walls = tiles.wall_count(),
        interior = tiles.interior_count(),
        "rendered tile preview"
    );
    out
}

/// One line per wall tile in use: glyph, name, id and count.
#[must_use]
pub fn tile_legend(maze: &Maze) -> String {
    maze.tile_map()
        .histogram()
        .into_iter()
        .map(|(tile, count)| {
            let name = format!("{tile:?}");
            format!("{} {name:<16} id {:>2}  x{count}\n", wall_glyph(tile), tile.id())
        })
        .collect()
}
