//! Test fixtures and helpers.
//!
//! Pre-built configurations and a recording placer for consistent testing.

use arena_core::config::{GeneratorSettings, MapConfig};
use arena_core::coord::Coord;
use arena_core::math::Color;
use arena_core::placer::MapPlacer;
use arena_core::world::{FloorLayout, NavMeshMask, ObstaclePlacement, TilePlacement};

/// The reference scenario: 10x10, 40% obstacles, seed 42.
#[must_use]
pub fn scenario_config() -> MapConfig {
    MapConfig {
        name: "scenario".to_string(),
        size: Coord::new(10, 10),
        obstacle_percent: 0.4,
        seed: 42,
        min_obstacle_height: 1.0,
        max_obstacle_height: 3.0,
        foreground_color: Color::rgb(0.1, 0.1, 0.2),
        background_color: Color::rgb(0.9, 0.9, 1.0),
    }
}

/// The reference scenario without obstacles.
#[must_use]
pub fn open_config() -> MapConfig {
    scenario_config()
        .with_name("open")
        .with_obstacle_percent(0.0)
}

/// A wave progression of growing, denser maps.
#[must_use]
pub fn wave_configs() -> Vec<MapConfig> {
    vec![
        scenario_config().with_name("wave-1").with_size(7, 7).with_obstacle_percent(0.2),
        scenario_config().with_name("wave-2").with_size(10, 8).with_seed(7),
        scenario_config()
            .with_name("wave-3")
            .with_size(15, 11)
            .with_obstacle_percent(0.6)
            .with_seed(1337),
    ]
}

/// Settings with the given maps, unit tiles, and a 5% outline.
#[must_use]
pub fn settings_with(maps: Vec<MapConfig>) -> GeneratorSettings {
    GeneratorSettings {
        tile_size: 1.0,
        outline_percent: 0.05,
        max_map_size: None,
        maps,
    }
}

/// A placer call, as seen by [`RecordingPlacer`].
#[derive(Debug, Clone, PartialEq)]
pub enum PlacerCall {
    /// [`MapPlacer::clear`].
    Clear,
    /// [`MapPlacer::place_tile`].
    Tile(TilePlacement),
    /// [`MapPlacer::place_obstacle`].
    Obstacle(ObstaclePlacement),
    /// [`MapPlacer::place_navmesh_mask`].
    NavMeshMask(NavMeshMask),
    /// [`MapPlacer::set_floor_layout`].
    Floors(FloorLayout),
}

/// A placer that records every call in order. Tile handles are the
/// tile's index in placement order.
#[derive(Debug, Clone, Default)]
pub struct RecordingPlacer {
    /// All calls since construction.
    pub calls: Vec<PlacerCall>,
    next_tile: usize,
}

impl RecordingPlacer {
    /// Calls since the most recent clear.
    #[must_use]
    pub fn current_map_calls(&self) -> &[PlacerCall] {
        let start = self
            .calls
            .iter()
            .rposition(|call| *call == PlacerCall::Clear)
            .map_or(0, |i| i + 1);
        &self.calls[start..]
    }

    /// Obstacles placed since the most recent clear.
    #[must_use]
    pub fn current_obstacles(&self) -> Vec<ObstaclePlacement> {
        self.current_map_calls()
            .iter()
            .filter_map(|call| match call {
                PlacerCall::Obstacle(obstacle) => Some(*obstacle),
                _ => None,
            })
            .collect()
    }

    /// Tiles placed since the most recent clear.
    #[must_use]
    pub fn current_tiles(&self) -> Vec<TilePlacement> {
        self.current_map_calls()
            .iter()
            .filter_map(|call| match call {
                PlacerCall::Tile(tile) => Some(*tile),
                _ => None,
            })
            .collect()
    }
}

impl MapPlacer for RecordingPlacer {
    type Tile = usize;

    fn clear(&mut self) {
        self.next_tile = 0;
        self.calls.push(PlacerCall::Clear);
    }

    fn place_tile(&mut self, placement: &TilePlacement) -> usize {
        self.calls.push(PlacerCall::Tile(*placement));
        self.next_tile += 1;
        self.next_tile - 1
    }

    fn place_obstacle(&mut self, placement: &ObstaclePlacement) {
        self.calls.push(PlacerCall::Obstacle(*placement));
    }

    fn place_navmesh_mask(&mut self, mask: &NavMeshMask) {
        self.calls.push(PlacerCall::NavMeshMask(*mask));
    }

    fn set_floor_layout(&mut self, layout: &FloorLayout) {
        self.calls.push(PlacerCall::Floors(*layout));
    }
}
