//! # Maze Property Tests
//!
//! Invariants every carved section must hold, checked over many seeds.

use std::collections::VecDeque;

use catacomb_procedural::{Grid, GridCarver, MazeSection, MazeSeed};

/// Carves one section filling the whole interior of a fresh grid.
fn carve_section(columns: usize, rows: usize, width: usize, height: usize, seed: u64) -> Grid {
    let mut carver = GridCarver::new(width, height, MazeSeed::new(seed)).unwrap();
    let section = MazeSection::new(
        columns,
        rows,
        1,
        width as i32 - 2,
        1,
        height as i32 - 2,
    );
    carver.carve_maze_section(&section).unwrap();
    carver.grid().unwrap().clone()
}

/// Number of 4-connected open regions.
fn open_regions(grid: &Grid) -> usize {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let mut seen = vec![false; grid.width() * grid.height()];
    let index = |x: i32, y: i32| (x * h + y) as usize;
    let mut regions = 0;

    for x in 0..w {
        for y in 0..h {
            if grid.is_solid(x, y) || seen[index(x, y)] {
                continue;
            }
            regions += 1;
            seen[index(x, y)] = true;
            let mut queue = VecDeque::from([(x, y)]);
            while let Some((cx, cy)) = queue.pop_front() {
                for (dx, dy) in [(0, 1), (1, 0), (0, -1), (-1, 0)] {
                    let (nx, ny) = (cx + dx, cy + dy);
                    if !grid.is_solid(nx, ny) && !seen[index(nx, ny)] {
                        seen[index(nx, ny)] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }
        }
    }
    regions
}

/// Test: The outer ring of cells is never opened.
#[test]
fn test_border_stays_solid() {
    for seed in 0..20 {
        let grid = carve_section(8, 4, 48, 30, seed);
        let (w, h) = (grid.width() as i32, grid.height() as i32);

        for x in 0..w {
            assert!(grid.is_solid(x, 0), "seed {seed}: bottom border open at x={x}");
            assert!(grid.is_solid(x, h - 1), "seed {seed}: top border open at x={x}");
        }
        for y in 0..h {
            assert!(grid.is_solid(0, y), "seed {seed}: left border open at y={y}");
            assert!(grid.is_solid(w - 1, y), "seed {seed}: right border open at y={y}");
        }
    }
}

/// Test: Running elimination again on a finished section changes nothing.
#[test]
fn test_dead_end_elimination_is_idempotent() {
    for seed in 0..20 {
        let mut carver = GridCarver::new(48, 30, MazeSeed::new(seed)).unwrap();
        carver
            .carve_maze_section(&MazeSection::new(8, 4, 1, 46, 1, 28))
            .unwrap();
        let before = carver.grid().unwrap().clone();

        assert_eq!(carver.eliminate_dead_ends().unwrap(), 0, "seed {seed}");
        assert_eq!(carver.grid().unwrap(), &before, "seed {seed}");
    }
}

/// Test: No 3-wide stub survives anywhere in the section.
#[test]
fn test_no_dead_ends_remain() {
    use catacomb_procedural::Compass;

    for seed in 0..20 {
        let grid = carve_section(8, 4, 48, 30, seed);
        for x in 2..46 {
            for y in 2..28 {
                for side in Compass::CARDINALS {
                    assert!(
                        !grid.is_dead_end(x, y, side),
                        "seed {seed}: dead end at ({x}, {y}) closed {side:?}\n{grid}"
                    );
                }
            }
        }
    }
}

/// Test: Every open cell of a wide section is reachable from every other.
#[test]
fn test_wide_section_connected() {
    for seed in 0..40 {
        let grid = carve_section(8, 4, 48, 30, seed);
        assert_eq!(open_regions(&grid), 1, "seed {seed}:\n{grid}");
    }
}

/// Test: Same for a tall section.
#[test]
fn test_tall_section_connected() {
    for seed in 0..40 {
        let grid = carve_section(4, 8, 30, 48, seed);
        assert_eq!(open_regions(&grid), 1, "seed {seed}:\n{grid}");
    }
}

/// Test: Square sections of several sizes stay connected.
#[test]
fn test_square_sections_connected() {
    for (corridors, side) in [(2, 9), (3, 14), (5, 26), (6, 30), (8, 40)] {
        for seed in 0..20 {
            let grid = carve_section(corridors, corridors, side, side, seed);
            assert_eq!(
                open_regions(&grid),
                1,
                "{corridors}x{corridors} seed {seed}:\n{grid}"
            );
        }
    }
}

/// Test: Same seed, same grid.
#[test]
fn test_same_seed_same_grid() {
    for seed in [0, 1, 42, u64::MAX] {
        let a = carve_section(8, 4, 48, 30, seed);
        let b = carve_section(8, 4, 48, 30, seed);
        assert_eq!(a, b, "seed {seed} is not deterministic");
    }
}

/// Test: Different seeds explore different layouts.
#[test]
fn test_seeds_vary_layout() {
    let grids: Vec<Grid> = (0..8).map(|seed| carve_section(8, 4, 48, 30, seed)).collect();
    let distinct = grids
        .iter()
        .enumerate()
        .filter(|(i, g)| grids[..*i].iter().all(|other| other != *g))
        .count();

    println!("{distinct} distinct layouts from 8 seeds");
    assert!(distinct > 1);
}

/// Test: Minimum-size sections still carve a clean ring.
#[test]
fn test_smallest_section() {
    let grid = carve_section(2, 2, 9, 9, 5);

    // Ring of corridors around a single 1x1 pillar.
    assert!(grid.is_solid(4, 4));
    assert!(grid.is_walkable(2, 2));
    assert!(grid.is_walkable(6, 6));
    assert_eq!(open_regions(&grid), 1);
    assert_eq!(grid.open_cell_count(), 7 * 7 - 1);
}
