//! Grid <-> world-space conversion and placement geometry.
//!
//! The grid is centered on the world origin in the `x`/`z` plane: tile
//! `(x, y)` sits at `tile_size * (x - width/2 + 0.5, 0, y - height/2 + 0.5)`.

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::math::{Color, Vec3};

/// A tile handed to the rendering side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TilePlacement {
    /// Grid coordinate.
    pub coord: Coord,
    /// World-space center of the tile.
    pub position: Vec3,
    /// Uniform scale, `(1 - outline_percent) * tile_size`.
    pub scale: f32,
}

/// An obstacle handed to the rendering side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePlacement {
    /// Grid coordinate.
    pub coord: Coord,
    /// World-space center of the obstacle (raised by half its height).
    pub position: Vec3,
    /// Footprint and height.
    pub scale: Vec3,
    /// Obstacle height.
    pub height: f32,
    /// Obstacle color.
    pub color: Color,
}

/// Which side of the map a navmesh mask covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaskSide {
    /// -x side.
    Left,
    /// +x side.
    Right,
    /// +z side.
    Top,
    /// -z side.
    Bottom,
}

/// A block that hides navmesh floor outside the current map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavMeshMask {
    /// Side of the map covered.
    pub side: MaskSide,
    /// World-space center.
    pub position: Vec3,
    /// World-space extent.
    pub scale: Vec3,
}

/// Floor extents in world units (`[x, z]`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorLayout {
    /// Visible floor under the current map.
    pub map_floor: [f32; 2],
    /// Navmesh floor sized for the largest map, when a maximum is configured.
    pub navmesh_floor: Option<[f32; 2]>,
}

/// World geometry of one map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldLayout {
    /// Map size in tiles.
    pub size: Coord,
    /// World units per tile.
    pub tile_size: f32,
    /// Tile inset.
    pub outline_percent: f32,
}

impl WorldLayout {
    /// Create a layout for a map of `size` tiles.
    #[must_use]
    pub const fn new(size: Coord, tile_size: f32, outline_percent: f32) -> Self {
        Self {
            size,
            tile_size,
            outline_percent,
        }
    }

    /// World-space center of the tile at `coord`.
    #[must_use]
    pub fn coord_to_position(&self, coord: Coord) -> Vec3 {
        let width = self.size.x as f32;
        let height = self.size.y as f32;
        Vec3::new(
            -width / 2.0 + 0.5 + coord.x as f32,
            0.0,
            -height / 2.0 + 0.5 + coord.y as f32,
        ) * self.tile_size
    }

    /// Nearest tile to a world position, clamped onto the grid.
    ///
    /// Halfway cases round to the even coordinate.
    #[must_use]
    pub fn position_to_coord(&self, position: Vec3) -> Coord {
        let x = self.axis_to_index(position.x, self.size.x);
        let y = self.axis_to_index(position.z, self.size.y);
        Coord::new(x, y)
    }

    fn axis_to_index(&self, world: f32, tiles: i32) -> i32 {
        let raw = (world / self.tile_size + (tiles - 1) as f32 / 2.0).round_ties_even();
        if raw.is_nan() {
            return 0;
        }
        // saturating float -> int cast handles +/- infinity
        (raw as i32).clamp(0, tiles - 1)
    }

    /// Rendered tile edge length.
    #[must_use]
    pub fn tile_scale(&self) -> f32 {
        (1.0 - self.outline_percent) * self.tile_size
    }

    /// Placement for the tile at `coord`.
    #[must_use]
    pub fn tile_placement(&self, coord: Coord) -> TilePlacement {
        TilePlacement {
            coord,
            position: self.coord_to_position(coord),
            scale: self.tile_scale(),
        }
    }

    /// Placement for an obstacle of `height` and `color` at `coord`.
    #[must_use]
    pub fn obstacle_placement(&self, coord: Coord, height: f32, color: Color) -> ObstaclePlacement {
        let footprint = self.tile_scale();
        ObstaclePlacement {
            coord,
            position: self.coord_to_position(coord) + Vec3::UP * (height / 2.0),
            scale: Vec3::new(footprint, height, footprint),
            height,
            color,
        }
    }

    /// Masks filling the gap between this map and `max_size`.
    #[must_use]
    pub fn navmesh_masks(&self, max_size: Coord) -> [NavMeshMask; 4] {
        let (w, h) = (self.size.x as f32, self.size.y as f32);
        let (max_w, max_h) = (max_size.x as f32, max_size.y as f32);
        let t = self.tile_size;

        let side_offset = (w + max_w) / 4.0 * t;
        let side_scale = Vec3::new((max_w - w) / 2.0, 1.0, h) * t;
        let end_offset = (h + max_h) / 4.0 * t;
        let end_scale = Vec3::new(max_w, 1.0, (max_h - h) / 2.0) * t;

        [
            NavMeshMask {
                side: MaskSide::Left,
                position: Vec3::LEFT * side_offset,
                scale: side_scale,
            },
            NavMeshMask {
                side: MaskSide::Right,
                position: Vec3::RIGHT * side_offset,
                scale: side_scale,
            },
            NavMeshMask {
                side: MaskSide::Top,
                position: Vec3::FORWARD * end_offset,
                scale: end_scale,
            },
            NavMeshMask {
                side: MaskSide::Bottom,
                position: Vec3::BACK * end_offset,
                scale: end_scale,
            },
        ]
    }

    /// Floor extents for this map.
    #[must_use]
    pub fn floor_layout(&self, max_size: Option<Coord>) -> FloorLayout {
        let t = self.tile_size;
        FloorLayout {
            map_floor: [self.size.x as f32 * t, self.size.y as f32 * t],
            navmesh_floor: max_size.map(|max| [max.x as f32 * t, max.y as f32 * t]),
        }
    }
}
