//! # Arena Core
//!
//! Deterministic map generation for the arena's wave maps.
//!
//! This crate contains **only** generation logic:
//! - No rendering (placement goes through [`placer::MapPlacer`])
//! - No IO
//! - No unseeded randomness
//!
//! Given the same [`config::MapConfig`], generation produces the same
//! obstacle mask, obstacle heights and colors, and coordinate queue orders.
//!
//! ## Crate Structure
//!
//! - [`coord`] - Grid coordinates
//! - [`rng`] - Seeded streams and the Fisher–Yates shuffle
//! - [`config`] - Map configurations and generator settings
//! - [`reachability`] - Flood-fill connectivity checks
//! - [`layout`] - Pure obstacle layout generation
//! - [`generator`] - Map ownership, placement, and tile queries

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod config;
pub mod coord;
pub mod error;
pub mod generator;
pub mod grid;
pub mod layout;
pub mod math;
pub mod placer;
pub mod queue;
pub mod reachability;
pub mod rng;
pub mod world;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{GeneratorSettings, MapConfig};
    pub use crate::coord::Coord;
    pub use crate::error::{MapError, Result};
    pub use crate::generator::MapGenerator;
    pub use crate::grid::{Grid, ObstacleMask};
    pub use crate::layout::{MapLayout, PlacedObstacle, PlacementStats};
    pub use crate::math::{Color, Vec3};
    pub use crate::placer::{HeadlessPlacer, MapPlacer};
    pub use crate::queue::CoordQueue;
    pub use crate::reachability::{is_fully_accessible, reachable_count};
    pub use crate::rng::{shuffle, shuffled, MapRng};
    pub use crate::world::{
        FloorLayout, MaskSide, NavMeshMask, ObstaclePlacement, TilePlacement, WorldLayout,
    };
}
