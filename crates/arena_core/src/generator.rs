//! Map generation orchestration and the tile queries used by spawning and
//! navigation.
//!
//! [`MapGenerator`] owns the current map. Each call to
//! [`MapGenerator::generate`] validates the selected configuration, builds a
//! fresh [`MapLayout`], replays it into the [`MapPlacer`], and replaces the
//! previous map wholesale. Generation is synchronous and takes `&mut self`, so
//! queries never observe a half-built map.

use crate::config::GeneratorSettings;
use crate::coord::Coord;
use crate::error::{MapError, Result};
use crate::grid::Grid;
use crate::layout::MapLayout;
use crate::math::Vec3;
use crate::placer::{HeadlessPlacer, MapPlacer};
use crate::world::WorldLayout;

/// The map currently owned by a generator.
struct ActiveMap<T> {
    index: usize,
    layout: MapLayout,
    world: WorldLayout,
    tiles: Grid<T>,
}

/// Generates maps from a set of configurations and answers tile queries.
pub struct MapGenerator<P: MapPlacer = HeadlessPlacer> {
    settings: GeneratorSettings,
    placer: P,
    active: Option<ActiveMap<P::Tile>>,
}

impl MapGenerator<HeadlessPlacer> {
    /// Create a generator that draws nothing.
    #[must_use]
    pub fn headless(settings: GeneratorSettings) -> Self {
        Self::new(settings, HeadlessPlacer)
    }
}

impl<P: MapPlacer> MapGenerator<P> {
    /// Create a generator. No map exists until [`Self::generate`] is called.
    #[must_use]
    pub fn new(settings: GeneratorSettings, placer: P) -> Self {
        Self {
            settings,
            placer,
            active: None,
        }
    }

    /// Generator settings.
    #[must_use]
    pub const fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// The placer receiving placement calls.
    #[must_use]
    pub const fn placer(&self) -> &P {
        &self.placer
    }

    /// Layout of the current map, if one has been generated.
    #[must_use]
    pub fn layout(&self) -> Option<&MapLayout> {
        self.active.as_ref().map(|active| &active.layout)
    }

    /// Index of the current map, if one has been generated.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.active.as_ref().map(|active| active.index)
    }

    /// Generate the map at `index`, replacing the current one.
    ///
    /// On error nothing changes: neither the current map nor the placer is
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidMapIndex`] for an unknown index and
    /// [`MapError::InvalidConfig`] when the settings or the selected map fail
    /// validation.
    pub fn generate(&mut self, index: usize) -> Result<&MapLayout> {
        let config = self.settings.validate_for(index)?;

        tracing::info!(
            index,
            name = %config.name,
            width = config.width(),
            height = config.height(),
            seed = config.seed,
            attempts = config.obstacle_attempts(),
            "Generating map"
        );

        let layout = MapLayout::generate(config)?;
        let world = WorldLayout::new(
            layout.config.size,
            self.settings.tile_size,
            self.settings.outline_percent,
        );

        self.placer.clear();

        // Tiles are placed column by column, then stored row-major.
        let mut placed: Vec<(Coord, P::Tile)> = Vec::with_capacity(layout.config.tile_count());
        for x in 0..world.size.x {
            for y in 0..world.size.y {
                let coord = Coord::new(x, y);
                let handle = self.placer.place_tile(&world.tile_placement(coord));
                placed.push((coord, handle));
            }
        }
        placed.sort_by_key(|(coord, _)| (coord.y, coord.x));
        let cells = placed.into_iter().map(|(_, handle)| handle).collect();
        let tiles = Grid::from_cells(world.size.x, world.size.y, cells).ok_or_else(|| {
            MapError::InvalidState("tile grid does not match map size".to_string())
        })?;

        for obstacle in &layout.obstacles {
            self.placer.place_obstacle(&world.obstacle_placement(
                obstacle.coord,
                obstacle.height,
                obstacle.color,
            ));
        }

        if let Some(max_size) = self.settings.max_map_size {
            for mask in world.navmesh_masks(max_size) {
                self.placer.place_navmesh_mask(&mask);
            }
        }
        self.placer
            .set_floor_layout(&world.floor_layout(self.settings.max_map_size));

        tracing::info!(
            index,
            placed = layout.stats.placed,
            rejected_unreachable = layout.stats.rejected_unreachable,
            open_tiles = layout.open_count(),
            "Map generated"
        );

        let active = self.active.insert(ActiveMap {
            index,
            layout,
            world,
            tiles,
        });
        Ok(&active.layout)
    }

    /// Regenerate for a new wave. Wave `n` uses map index `n - 1`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidWaveNumber`] for wave 0, otherwise the
    /// errors of [`Self::generate`].
    pub fn on_new_wave(&mut self, wave_number: u32) -> Result<&MapLayout> {
        let index = wave_number
            .checked_sub(1)
            .ok_or(MapError::InvalidWaveNumber(wave_number))?;
        tracing::debug!(wave_number, index, "New wave, regenerating map");
        self.generate(index as usize)
    }

    fn active(&self) -> Result<&ActiveMap<P::Tile>> {
        self.active.as_ref().ok_or(MapError::NotGenerated)
    }

    fn active_mut(&mut self) -> Result<&mut ActiveMap<P::Tile>> {
        self.active.as_mut().ok_or(MapError::NotGenerated)
    }

    /// Next coordinate from the shuffled all-tiles queue (cyclic).
    ///
    /// Continues the same cycle that obstacle placement drew from.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NotGenerated`] before the first generation.
    pub fn random_coordinate(&mut self) -> Result<Coord> {
        self.active_mut()?
            .layout
            .shuffled_coords
            .next_cyclic()
            .ok_or(MapError::EmptyMap)
    }

    /// Next coordinate from the shuffled open-tiles queue (cyclic).
    ///
    /// # Errors
    ///
    /// Returns [`MapError::EmptyMap`] when no open tiles exist and
    /// [`MapError::NotGenerated`] before the first generation.
    pub fn random_open_coordinate(&mut self) -> Result<Coord> {
        self.active_mut()?
            .layout
            .shuffled_open_coords
            .next_cyclic()
            .ok_or(MapError::EmptyMap)
    }

    /// Tile handle of the next open tile (see [`Self::random_open_coordinate`]).
    ///
    /// # Errors
    ///
    /// As [`Self::random_open_coordinate`].
    pub fn random_open_tile(&mut self) -> Result<&P::Tile> {
        let coord = self.random_open_coordinate()?;
        self.tile_at(coord)
    }

    /// Tile handle at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::OutOfBounds`] outside the grid and
    /// [`MapError::NotGenerated`] before the first generation.
    pub fn tile_at(&self, coord: Coord) -> Result<&P::Tile> {
        self.active()?.tiles.try_get(coord)
    }

    /// Grid coordinate nearest to a world position, clamped onto the map.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NotGenerated`] before the first generation.
    pub fn coord_from_world_position(&self, position: Vec3) -> Result<Coord> {
        Ok(self.active()?.world.position_to_coord(position))
    }

    /// Tile handle nearest to a world position. Positions off the map
    /// resolve to the closest edge tile.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NotGenerated`] before the first generation.
    pub fn tile_from_world_position(&self, position: Vec3) -> Result<&P::Tile> {
        let active = self.active()?;
        active.tiles.try_get(active.world.position_to_coord(position))
    }

    /// World-space center of the tile at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::OutOfBounds`] outside the grid and
    /// [`MapError::NotGenerated`] before the first generation.
    pub fn coord_to_position(&self, coord: Coord) -> Result<Vec3> {
        let active = self.active()?;
        active.tiles.try_get(coord)?;
        Ok(active.world.coord_to_position(coord))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::queue::CoordQueue;
    use crate::world::{FloorLayout, NavMeshMask, ObstaclePlacement, TilePlacement};

    #[derive(Default)]
    struct CountingPlacer {
        clears: usize,
        tiles: usize,
        obstacles: usize,
        masks: usize,
        floors: Option<FloorLayout>,
    }

    impl MapPlacer for CountingPlacer {
        type Tile = Coord;

        fn clear(&mut self) {
            self.clears += 1;
            self.tiles = 0;
            self.obstacles = 0;
            self.masks = 0;
        }

        fn place_tile(&mut self, placement: &TilePlacement) -> Coord {
            self.tiles += 1;
            placement.coord
        }

        fn place_obstacle(&mut self, _placement: &ObstaclePlacement) {
            self.obstacles += 1;
        }

        fn place_navmesh_mask(&mut self, _mask: &NavMeshMask) {
            self.masks += 1;
        }

        fn set_floor_layout(&mut self, layout: &FloorLayout) {
            self.floors = Some(*layout);
        }
    }

    fn settings() -> GeneratorSettings {
        GeneratorSettings {
            tile_size: 1.0,
            outline_percent: 0.1,
            max_map_size: Some(Coord::new(16, 16)),
            maps: vec![
                MapConfig::default().with_name("first").with_seed(42),
                MapConfig::default()
                    .with_name("second")
                    .with_size(14, 9)
                    .with_obstacle_percent(0.25)
                    .with_seed(7),
            ],
        }
    }

    #[test]
    fn test_queries_before_generation() {
        let mut generator = MapGenerator::headless(settings());
        assert_eq!(generator.random_coordinate(), Err(MapError::NotGenerated));
        assert_eq!(generator.random_open_coordinate(), Err(MapError::NotGenerated));
        assert!(matches!(
            generator.tile_at(Coord::new(0, 0)),
            Err(MapError::NotGenerated)
        ));
        assert!(generator.layout().is_none());
    }

    #[test]
    fn test_generate_places_everything() {
        let mut generator = MapGenerator::new(settings(), CountingPlacer::default());
        let obstacles = generator.generate(0).unwrap().obstacle_count();

        let placer = generator.placer();
        assert_eq!(placer.clears, 1);
        assert_eq!(placer.tiles, 100);
        assert_eq!(placer.obstacles, obstacles);
        assert_eq!(placer.masks, 4);
        assert_eq!(
            placer.floors.map(|f| f.navmesh_floor),
            Some(Some([16.0, 16.0]))
        );
    }

    #[test]
    fn test_tile_grid_indexed_by_coord() {
        let mut generator = MapGenerator::new(settings(), CountingPlacer::default());
        generator.generate(1).unwrap();
        for coord in [Coord::new(0, 0), Coord::new(13, 0), Coord::new(3, 8)] {
            assert_eq!(generator.tile_at(coord), Ok(&coord));
        }
    }

    #[test]
    fn test_tile_at_out_of_bounds() {
        let mut generator = MapGenerator::headless(settings());
        generator.generate(0).unwrap();
        assert!(matches!(
            generator.tile_at(Coord::new(10, 3)),
            Err(MapError::OutOfBounds { width: 10, height: 10, .. })
        ));
        assert!(generator.coord_to_position(Coord::new(-1, 0)).is_err());
    }

    #[test]
    fn test_invalid_index_leaves_state_untouched() {
        let mut generator = MapGenerator::new(settings(), CountingPlacer::default());
        generator.generate(0).unwrap();
        let before = generator.layout().map(MapLayout::state_hash);

        assert_eq!(
            generator.generate(5).unwrap_err(),
            MapError::InvalidMapIndex { index: 5, count: 2 }
        );
        assert_eq!(generator.layout().map(MapLayout::state_hash), before);
        assert_eq!(generator.current_index(), Some(0));
        assert_eq!(generator.placer().clears, 1);
    }

    #[test]
    fn test_invalid_config_aborts() {
        let mut bad = settings();
        bad.maps[1].obstacle_percent = 1.5;
        let mut generator = MapGenerator::headless(bad);
        assert!(matches!(
            generator.generate(1),
            Err(MapError::InvalidConfig { .. })
        ));
        assert!(generator.layout().is_none());
    }

    #[test]
    fn test_wave_selects_previous_index() {
        let mut generator = MapGenerator::headless(settings());
        generator.on_new_wave(2).unwrap();
        assert_eq!(generator.current_index(), Some(1));
        assert_eq!(
            generator.on_new_wave(0).unwrap_err(),
            MapError::InvalidWaveNumber(0)
        );
        assert!(matches!(
            generator.on_new_wave(3),
            Err(MapError::InvalidMapIndex { index: 2, .. })
        ));
    }

    #[test]
    fn test_regeneration_replaces_map() {
        let mut generator = MapGenerator::new(settings(), CountingPlacer::default());
        generator.generate(0).unwrap();
        generator.generate(1).unwrap();
        assert_eq!(generator.placer().clears, 2);
        assert_eq!(generator.placer().tiles, 14 * 9);
        assert!(generator.tile_at(Coord::new(13, 8)).is_ok());
    }

    #[test]
    fn test_random_open_tile_never_obstructed() {
        let mut generator = MapGenerator::headless(settings());
        generator.generate(0).unwrap();
        for _ in 0..250 {
            let coord = generator.random_open_coordinate().unwrap();
            let layout = generator.layout().unwrap();
            assert!(!layout.is_obstacle(coord));
        }
    }

    #[test]
    fn test_random_open_tile_on_empty_map() {
        let mut generator = MapGenerator::headless(settings());
        generator.generate(0).unwrap();
        if let Some(active) = generator.active.as_mut() {
            active.layout.shuffled_open_coords = CoordQueue::default();
        }
        assert_eq!(generator.random_open_coordinate(), Err(MapError::EmptyMap));
        assert!(matches!(generator.random_open_tile(), Err(MapError::EmptyMap)));
    }

    #[test]
    fn test_tile_from_far_world_position_clamps() {
        let mut generator = MapGenerator::new(settings(), CountingPlacer::default());
        generator.generate(0).unwrap();
        let tile = generator
            .tile_from_world_position(Vec3::new(-500.0, 0.0, 500.0))
            .unwrap();
        assert_eq!(*tile, Coord::new(0, 9));
    }

    #[test]
    fn test_headless_tile_carries_placement() {
        let mut generator = MapGenerator::headless(settings());
        generator.generate(0).unwrap();
        let tile = generator.tile_at(Coord::new(5, 5)).unwrap();
        assert_eq!(tile.position, Vec3::new(0.5, 0.0, 0.5));
        assert!((tile.scale - 0.9).abs() < f32::EPSILON);
    }
}
