//! Seeded obstacle layout generation.
//!
//! [`MapLayout::generate`] is a pure function of a [`MapConfig`]: it decides
//! which tiles receive obstacles, their heights and colors, and the order of
//! both coordinate queues. Nothing here touches the rendering side.
//!
//! Placement works as generate-and-validate. Candidates come off a shuffled,
//! cyclic queue of every tile; each candidate is marked tentatively and kept
//! only if every open tile can still be reached from the map center.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::config::MapConfig;
use crate::coord::Coord;
use crate::error::{MapError, Result};
use crate::grid::ObstacleMask;
use crate::math::{lerp, Color};
use crate::queue::CoordQueue;
use crate::reachability::is_fully_accessible;
use crate::rng::{shuffled, MapRng};

/// An obstacle that survived the reachability check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedObstacle {
    /// Tile the obstacle occupies.
    pub coord: Coord,
    /// Height drawn from the configured range.
    pub height: f32,
    /// Color blended by row from foreground to background.
    pub color: Color,
}

/// Counters from one placement run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PlacementStats {
    /// Placement attempts made (`floor(width * height * obstacle_percent)`).
    pub attempts: usize,
    /// Attempts committed as obstacles.
    pub placed: usize,
    /// Attempts rejected because the candidate was the center.
    pub rejected_center: usize,
    /// Attempts rejected because they would cut off open tiles.
    pub rejected_unreachable: usize,
    /// Attempts on a tile that already held an obstacle.
    ///
    /// Always zero for a valid config: `obstacle_percent <= 1` keeps
    /// `attempts` at or below the tile count, so the cyclic queue never
    /// repeats a candidate within one generation.
    pub rejected_occupied: usize,
}

/// The complete, deterministic result of generating one map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLayout {
    /// Configuration the layout was generated from.
    pub config: MapConfig,
    /// Final obstacle mask.
    pub mask: ObstacleMask,
    /// Committed obstacles in placement order.
    pub obstacles: Vec<PlacedObstacle>,
    /// Placement counters.
    pub stats: PlacementStats,
    /// All-tiles queue, positioned after the placement draws.
    pub shuffled_coords: CoordQueue,
    /// Open-tiles queue.
    pub shuffled_open_coords: CoordQueue,
}

impl MapLayout {
    /// Generate the layout for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidConfig`] if `config` fails validation.
    pub fn generate(config: &MapConfig) -> Result<Self> {
        config.validate()?;

        let width = config.width();
        let height = config.height();
        let center = config.center();

        // x-major enumeration fixes the shuffle input order
        let all_coords: Vec<Coord> = (0..width)
            .flat_map(|x| (0..height).map(move |y| Coord::new(x, y)))
            .collect();

        let mut shuffled_coords = CoordQueue::new(shuffled(all_coords.clone(), config.seed));
        let mut height_rng = MapRng::new(config.seed);

        let mut mask = ObstacleMask::open(width, height);
        let mut obstacle_count = 0usize;
        let mut open_coords = all_coords;
        let mut obstacles = Vec::new();
        let mut stats = PlacementStats {
            attempts: config.obstacle_attempts(),
            ..Default::default()
        };

        for _ in 0..stats.attempts {
            let Some(candidate) = shuffled_coords.next_cyclic() else {
                break;
            };

            if mask.is_blocked(candidate) {
                stats.rejected_occupied += 1;
                tracing::debug!(x = candidate.x, y = candidate.y, "Candidate already occupied");
                continue;
            }

            mask.set_blocked(candidate, true);
            obstacle_count += 1;

            if candidate == center {
                mask.set_blocked(candidate, false);
                obstacle_count -= 1;
                stats.rejected_center += 1;
                continue;
            }

            if !is_fully_accessible(&mask, obstacle_count, center) {
                mask.set_blocked(candidate, false);
                obstacle_count -= 1;
                stats.rejected_unreachable += 1;
                tracing::debug!(x = candidate.x, y = candidate.y, "Candidate would seal off tiles");
                continue;
            }

            let obstacle_height = lerp(
                config.min_obstacle_height,
                config.max_obstacle_height,
                height_rng.next_unit_f32(),
            );
            let color_percent = candidate.y as f32 / height as f32;
            obstacles.push(PlacedObstacle {
                coord: candidate,
                height: obstacle_height,
                color: config
                    .foreground_color
                    .lerp(config.background_color, color_percent),
            });
            open_coords.retain(|&c| c != candidate);
            stats.placed += 1;
        }

        let shuffled_open_coords = CoordQueue::new(shuffled(open_coords, config.seed));

        Ok(Self {
            config: config.clone(),
            mask,
            obstacles,
            stats,
            shuffled_coords,
            shuffled_open_coords,
        })
    }

    /// Number of committed obstacles.
    #[must_use]
    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Number of open tiles.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.mask.len() - self.obstacles.len()
    }

    /// Whether `coord` holds an obstacle.
    #[must_use]
    pub fn is_obstacle(&self, coord: Coord) -> bool {
        self.mask.get(coord).copied().unwrap_or(false)
    }

    /// Hash of the mask, obstacles, and queue orders.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();

        self.mask.hash(&mut hasher);

        self.obstacles.len().hash(&mut hasher);
        for obstacle in &self.obstacles {
            obstacle.coord.hash(&mut hasher);
            obstacle.height.to_bits().hash(&mut hasher);
            obstacle.color.r.to_bits().hash(&mut hasher);
            obstacle.color.g.to_bits().hash(&mut hasher);
            obstacle.color.b.to_bits().hash(&mut hasher);
            obstacle.color.a.to_bits().hash(&mut hasher);
        }

        self.stats.hash(&mut hasher);
        self.shuffled_coords.hash(&mut hasher);
        self.shuffled_open_coords.hash(&mut hasher);

        hasher.finish()
    }

    /// Serialize the layout to bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| MapError::InvalidState(format!("Failed to serialize layout: {e}")))
    }

    /// Deserialize a layout from bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        let layout: Self = bincode::deserialize(data)
            .map_err(|e| MapError::InvalidState(format!("Failed to deserialize layout: {e}")))?;
        layout.check_consistency()?;
        Ok(layout)
    }

    /// Check that the mask, obstacles, and queues agree with the config.
    fn check_consistency(&self) -> Result<()> {
        let inconsistent = |reason: String| Err(MapError::InvalidState(reason));
        let (width, height) = (self.config.width(), self.config.height());

        if self.mask.width() != width || self.mask.height() != height {
            return inconsistent(format!(
                "mask is {}x{} but config is {width}x{height}",
                self.mask.width(),
                self.mask.height()
            ));
        }
        if self.obstacles.len() != self.mask.blocked_count()
            || self.obstacles.iter().any(|o| !self.mask.is_blocked(o.coord))
        {
            return inconsistent("obstacle list does not match mask".to_string());
        }
        if let Some(coord) = self
            .shuffled_coords
            .iter()
            .chain(self.shuffled_open_coords.iter())
            .find(|&&c| !self.mask.in_bounds(c))
        {
            return inconsistent(format!(
                "queued coordinate ({}, {}) outside {width}x{height} grid",
                coord.x, coord.y
            ));
        }
        if self.shuffled_open_coords.iter().any(|&c| self.mask.is_blocked(c)) {
            return inconsistent("open-tile queue contains an obstacle".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reachability::reachable_count;

    fn scenario() -> MapConfig {
        MapConfig::default()
            .with_size(10, 10)
            .with_obstacle_percent(0.4)
            .with_seed(42)
    }

    #[test]
    fn test_scenario_is_deterministic() {
        let a = MapLayout::generate(&scenario()).unwrap();
        let b = MapLayout::generate(&scenario()).unwrap();
        assert_eq!(a.mask, b.mask);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.shuffled_coords, b.shuffled_coords);
        assert_eq!(a.shuffled_open_coords, b.shuffled_open_coords);
        assert_eq!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn test_scenario_invariants() {
        let layout = MapLayout::generate(&scenario()).unwrap();
        let center = Coord::new(5, 5);

        assert_eq!(layout.stats.attempts, 40);
        assert!(layout.obstacle_count() <= 40);
        assert!(!layout.is_obstacle(center));
        assert_eq!(
            reachable_count(&layout.mask, center),
            100 - layout.obstacle_count()
        );
        assert_eq!(layout.mask.blocked_count(), layout.obstacle_count());
        assert_eq!(
            layout.stats.placed
                + layout.stats.rejected_center
                + layout.stats.rejected_unreachable
                + layout.stats.rejected_occupied,
            layout.stats.attempts
        );
    }

    #[test]
    fn test_zero_percent_leaves_map_open() {
        let layout = MapLayout::generate(&scenario().with_obstacle_percent(0.0)).unwrap();
        assert_eq!(layout.stats.attempts, 0);
        assert_eq!(layout.obstacle_count(), 0);
        assert_eq!(layout.open_count(), 100);
        assert_eq!(layout.shuffled_open_coords.len(), 100);
        assert_eq!(reachable_count(&layout.mask, Coord::new(5, 5)), 100);
    }

    #[test]
    fn test_full_percent_terminates_and_stays_connected() {
        let layout = MapLayout::generate(&scenario().with_obstacle_percent(1.0)).unwrap();
        assert_eq!(layout.stats.attempts, 100);
        assert_eq!(layout.stats.rejected_center, 1);
        assert!(!layout.is_obstacle(Coord::new(5, 5)));
        assert_eq!(
            reachable_count(&layout.mask, Coord::new(5, 5)),
            layout.open_count()
        );
    }

    #[test]
    fn test_open_queue_matches_mask() {
        let layout = MapLayout::generate(&scenario()).unwrap();
        assert_eq!(layout.shuffled_open_coords.len(), layout.open_count());
        for coord in layout.shuffled_open_coords.iter() {
            assert!(!layout.is_obstacle(*coord));
        }
        assert!(layout.shuffled_open_coords.contains(Coord::new(5, 5)));
    }

    #[test]
    fn test_obstacle_heights_and_colors() {
        let config = scenario().with_height_range(1.0, 3.0);
        let layout = MapLayout::generate(&config).unwrap();
        for obstacle in &layout.obstacles {
            assert!((1.0..=3.0).contains(&obstacle.height));
            let expected = config
                .foreground_color
                .lerp(config.background_color, obstacle.coord.y as f32 / 10.0);
            assert_eq!(obstacle.color, expected);
        }
    }

    #[test]
    fn test_fixed_height_range() {
        let layout = MapLayout::generate(&scenario().with_height_range(2.0, 2.0)).unwrap();
        assert!(layout.obstacles.iter().all(|o| o.height == 2.0));
    }

    #[test]
    fn test_single_tile_map() {
        let config = scenario().with_size(1, 1).with_obstacle_percent(1.0);
        let layout = MapLayout::generate(&config).unwrap();
        assert_eq!(layout.stats.attempts, 1);
        assert_eq!(layout.stats.rejected_center, 1);
        assert_eq!(layout.obstacle_count(), 0);
        assert_eq!(layout.shuffled_open_coords.len(), 1);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = MapLayout::generate(&scenario().with_seed(1)).unwrap();
        let b = MapLayout::generate(&scenario().with_seed(2)).unwrap();
        assert_ne!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = MapLayout::generate(&scenario().with_obstacle_percent(2.0)).unwrap_err();
        assert!(matches!(err, MapError::InvalidConfig { .. }));
    }

    #[test]
    fn test_serialization_preserves_layout() {
        let layout = MapLayout::generate(&scenario()).unwrap();
        let bytes = layout.serialize().unwrap();
        let restored = MapLayout::deserialize(&bytes).unwrap();
        assert_eq!(restored.state_hash(), layout.state_hash());
    }

    #[test]
    fn test_scenario_golden_mask() {
        let layout = MapLayout::generate(&scenario()).unwrap();
        let expected: Vec<Coord> = [
            (3, 0), (4, 0), (6, 0), (0, 1), (1, 1), (4, 1), (8, 1), (5, 2),
            (6, 2), (7, 2), (8, 2), (1, 3), (2, 3), (4, 3), (0, 4), (6, 4),
            (8, 4), (0, 5), (2, 5), (3, 5), (4, 5), (6, 5), (7, 5), (8, 5),
            (9, 5), (3, 6), (3, 7), (8, 7), (0, 8), (1, 8), (6, 8), (3, 9),
        ]
        .into_iter()
        .map(Coord::from)
        .collect();
        assert_eq!(layout.mask.blocked_coords(), expected);
        assert_eq!(layout.stats.placed, 32);
        assert_eq!(layout.stats.rejected_unreachable, 8);

        let first_placed: Vec<Coord> = layout.obstacles.iter().take(4).map(|o| o.coord).collect();
        assert_eq!(
            first_placed,
            vec![Coord::new(3, 7), Coord::new(6, 8), Coord::new(6, 4), Coord::new(3, 9)]
        );
    }

    #[test]
    fn test_deserialize_rejects_short_mask() {
        let layout = MapLayout::generate(&scenario()).unwrap();
        // same wire shape as MapLayout, with a mask holding no cells
        let bytes = bincode::serialize(&(
            &layout.config,
            (10i32, 10i32, Vec::<bool>::new()),
            &layout.obstacles,
            &layout.stats,
            &layout.shuffled_coords,
            &layout.shuffled_open_coords,
        ))
        .unwrap();
        assert!(matches!(
            MapLayout::deserialize(&bytes),
            Err(MapError::InvalidState(_))
        ));
    }

    #[test]
    fn test_deserialize_rejects_mask_of_wrong_size() {
        let mut layout = MapLayout::generate(&scenario()).unwrap();
        layout.mask = ObstacleMask::open(3, 3);
        let err = MapLayout::deserialize(&layout.serialize().unwrap()).unwrap_err();
        assert_eq!(
            err,
            MapError::InvalidState("mask is 3x3 but config is 10x10".to_string())
        );
    }

    #[test]
    fn test_deserialize_rejects_out_of_bounds_queue() {
        let mut layout = MapLayout::generate(&scenario()).unwrap();
        layout.shuffled_coords = CoordQueue::new(vec![Coord::new(0, 0), Coord::new(10, 4)]);
        let err = MapLayout::deserialize(&layout.serialize().unwrap()).unwrap_err();
        assert!(matches!(err, MapError::InvalidState(ref reason) if reason.contains("(10, 4)")));
    }

    #[test]
    fn test_deserialize_rejects_blocked_open_tile() {
        let mut layout = MapLayout::generate(&scenario()).unwrap();
        let blocked = layout.obstacles[0].coord;
        layout.shuffled_open_coords = CoordQueue::new(vec![blocked]);
        assert!(MapLayout::deserialize(&layout.serialize().unwrap()).is_err());
    }
}
