//! Overlap queries between one shape and a collection
//!
//! Every entity collides as a circle. A query returns the indices of the
//! collection members the probe overlaps, in collection order.
//!
//! Two implementations answer the same query: a brute-force scan and a uniform
//! spatial grid. The resolver uses the grid and, in debug builds, checks it
//! against the scan.

use std::collections::HashMap;

use glam::Vec2;

/// A collision circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Touching counts as overlapping
    #[inline]
    pub fn overlaps(&self, other: &Circle) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) <= reach * reach
    }
}

/// Brute-force query: test the probe against every target
pub fn overlapping(probe: &Circle, targets: &[Circle]) -> Vec<usize> {
    targets
        .iter()
        .enumerate()
        .filter(|(_, t)| probe.overlaps(t))
        .map(|(i, _)| i)
        .collect()
}

type Cell = (i32, i32);

/// Uniform grid over a fixed set of target circles
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<Cell, Vec<usize>>,
}

impl SpatialGrid {
    /// Bucket every target into each cell its bounding box touches
    pub fn build(targets: &[Circle], cell_size: f32) -> Self {
        let mut grid = Self {
            cell_size,
            cells: HashMap::new(),
        };
        for (i, t) in targets.iter().enumerate() {
            let (min, max) = grid.cell_range(t);
            for cx in min.0..=max.0 {
                for cy in min.1..=max.1 {
                    grid.cells.entry((cx, cy)).or_default().push(i);
                }
            }
        }
        grid
    }

    fn cell_of(&self, p: Vec2) -> Cell {
        (
            (p.x / self.cell_size).floor() as i32,
            (p.y / self.cell_size).floor() as i32,
        )
    }

    fn cell_range(&self, c: &Circle) -> (Cell, Cell) {
        let r = Vec2::splat(c.radius);
        (self.cell_of(c.center - r), self.cell_of(c.center + r))
    }

    /// Indices of targets overlapping `probe`, ascending
    pub fn query(&self, probe: &Circle, targets: &[Circle]) -> Vec<usize> {
        let (min, max) = self.cell_range(probe);
        let mut candidates = Vec::new();
        for cx in min.0..=max.0 {
            for cy in min.1..=max.1 {
                if let Some(bucket) = self.cells.get(&(cx, cy)) {
                    candidates.extend_from_slice(bucket);
                }
            }
        }
        candidates.sort_unstable();
        candidates.dedup();
        candidates.retain(|&i| probe.overlaps(&targets[i]));
        candidates
    }
}

/// Grid query, cross-checked against the brute-force scan in debug builds
pub fn checked_overlapping(probe: &Circle, targets: &[Circle], grid: &SpatialGrid) -> Vec<usize> {
    let hits = grid.query(probe, targets);
    if cfg!(debug_assertions) {
        let plain = overlapping(probe, targets);
        if plain != hits {
            log::error!(
                "Overlap query mismatch for {:?}: scan={:?} grid={:?}",
                probe,
                plain,
                hits
            );
        }
        debug_assert_eq!(plain, hits, "grid and scan disagree");
    }
    hits
}
