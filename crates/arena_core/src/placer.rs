//! The seam between map generation and whatever draws the map.

use crate::world::{FloorLayout, NavMeshMask, ObstaclePlacement, TilePlacement};

/// Receives placement calls while a map is generated.
///
/// A renderer instantiates tiles and obstacles here; headless callers can use
/// [`HeadlessPlacer`]. Every call for one map arrives inside a single
/// `generate` call, after [`MapPlacer::clear`] and in this order: tiles,
/// obstacles, navmesh masks, floor layout.
pub trait MapPlacer {
    /// Handle returned for each placed tile, kept in the tile grid.
    type Tile;

    /// Drop everything placed for the previous map.
    fn clear(&mut self) {}

    /// Place one tile and return its handle.
    fn place_tile(&mut self, placement: &TilePlacement) -> Self::Tile;

    /// Place one committed obstacle.
    fn place_obstacle(&mut self, placement: &ObstaclePlacement);

    /// Place a navmesh mask around the map edge.
    fn place_navmesh_mask(&mut self, _mask: &NavMeshMask) {}

    /// Resize the floors under the map.
    fn set_floor_layout(&mut self, _layout: &FloorLayout) {}
}

/// A placer that keeps each tile's placement as its handle and draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessPlacer;

impl MapPlacer for HeadlessPlacer {
    type Tile = TilePlacement;

    fn place_tile(&mut self, placement: &TilePlacement) -> Self::Tile {
        *placement
    }

    fn place_obstacle(&mut self, _placement: &ObstaclePlacement) {}
}
