//! Flood-fill connectivity checks over an obstacle mask.
//!
//! Connectivity is strictly 4-directional: two open tiles that only touch
//! diagonally are not connected. This decides which obstacle layouts are
//! accepted, so the adjacency rule is part of the generated output.

use std::collections::VecDeque;

use crate::coord::Coord;
use crate::grid::{Grid, ObstacleMask};

/// Count open tiles reachable from `origin` through orthogonal steps.
///
/// The origin itself is counted even if the mask marks it obstructed;
/// returns 0 only when `origin` lies outside the mask.
#[must_use]
pub fn reachable_count(mask: &ObstacleMask, origin: Coord) -> usize {
    if !mask.in_bounds(origin) {
        return 0;
    }

    let mut visited: Grid<bool> = Grid::filled(mask.width(), mask.height(), false);
    let mut queue = VecDeque::new();

    if let Some(seen) = visited.get_mut(origin) {
        *seen = true;
    }
    queue.push_back(origin);
    let mut count = 1;

    while let Some(tile) = queue.pop_front() {
        for neighbor in tile.orthogonal_neighbors() {
            let Some(seen) = visited.get_mut(neighbor) else {
                continue;
            };
            if *seen || mask.is_blocked(neighbor) {
                continue;
            }
            *seen = true;
            queue.push_back(neighbor);
            count += 1;
        }
    }

    count
}

/// Whether every open tile is reachable from `center`.
///
/// `obstacle_count` is the number of obstructed tiles in `mask`, including
/// any tentative placement under test.
#[must_use]
pub fn is_fully_accessible(mask: &ObstacleMask, obstacle_count: usize, center: Coord) -> bool {
    let open_tiles = mask.len().saturating_sub(obstacle_count);
    reachable_count(mask, center) == open_tiles
}
