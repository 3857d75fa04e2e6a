//! Determinism testing utilities.
//!
//! Provides a harness for verifying that map generation produces identical
//! results given identical configurations.
//!
//! # Testing Strategy
//!
//! A map must be a pure function of its configuration. Sources of
//! non-determinism include:
//!
//! - **Platform RNGs**: every draw goes through [`arena_core::rng::MapRng`]
//!   (ChaCha8 with explicit bounded draws), never a thread or OS generator.
//!
//! - **HashMap iteration order**: Rust's default hasher is randomized.
//!   Generation only iterates vectors and flat grids.
//!
//! - **Query state**: the coordinate queues are cyclic and stateful, so two
//!   generators must also agree on every query after generation.
//!
//! # Test Levels
//!
//! 1. **Unit tests**: shuffle, flood fill, and layout determinism
//! 2. **Property tests**: random configurations must still be reproducible
//! 3. **Integration tests**: generator query sequences are reproducible

use arena_core::config::{GeneratorSettings, MapConfig};
use arena_core::coord::Coord;
use arena_core::generator::MapGenerator;
use arena_core::layout::MapLayout;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
    /// Number of steps taken per run.
    pub steps: u64,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for deterministic generation).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that the runs were deterministic, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Map generation is non-deterministic!\n\
                 Runs: {}\n\
                 Steps: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                self.steps,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run a setup/step sequence multiple times and verify determinism.
///
/// # Arguments
///
/// * `runs` - Number of independent runs
/// * `steps` - Number of steps per run
/// * `setup` - Function to create initial state
/// * `step` - Function to advance the state by one step
/// * `hash` - Function to compute state hash
pub fn verify_determinism<S, Setup, Step, HashFn>(
    runs: usize,
    steps: u64,
    setup: Setup,
    step: Step,
    hash: HashFn,
) -> DeterminismResult
where
    Setup: Fn() -> S,
    Step: Fn(&mut S),
    HashFn: Fn(&S) -> u64,
{
    let mut hashes = Vec::with_capacity(runs);

    for _ in 0..runs {
        let mut state = setup();

        for _ in 0..steps {
            step(&mut state);
        }

        hashes.push(hash(&state));
    }

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    DeterminismResult {
        is_deterministic,
        hashes,
        steps,
    }
}

/// Generate `config` in `runs` fresh generators, draw `queries` coordinates
/// from both queues, and compare the resulting states.
///
/// # Panics
///
/// Panics if `config` cannot be generated.
pub fn verify_generation_determinism(
    config: &MapConfig,
    runs: usize,
    queries: u64,
) -> DeterminismResult {
    verify_determinism(
        runs,
        queries,
        || {
            let mut generator = MapGenerator::headless(GeneratorSettings::single(config.clone()));
            generator.generate(0).expect("fixture config should generate");
            generator
        },
        |generator| {
            generator.random_coordinate().expect("map generated");
            generator
                .random_open_coordinate()
                .expect("generated maps keep the center open");
        },
        |generator| generator.layout().map_or(0, MapLayout::state_hash),
    )
}

/// Draw `draws` coordinates from both queues of two fresh generators and
/// return the index of the first draw where they disagree.
///
/// # Returns
///
/// `None` if the generators agree on every draw (and on the layout),
/// `Some(0)` if the layouts already differ, `Some(n)` if draw `n` (1-based)
/// differs.
///
/// # Panics
///
/// Panics if `config` cannot be generated.
pub fn find_first_divergence(config: &MapConfig, draws: u64) -> Option<u64> {
    let mut a = MapGenerator::headless(GeneratorSettings::single(config.clone()));
    let mut b = MapGenerator::headless(GeneratorSettings::single(config.clone()));
    a.generate(0).expect("fixture config should generate");
    b.generate(0).expect("fixture config should generate");

    if a.layout().map(MapLayout::state_hash) != b.layout().map(MapLayout::state_hash) {
        return Some(0);
    }

    for draw in 1..=draws {
        let pair_a: (Option<Coord>, Option<Coord>) =
            (a.random_coordinate().ok(), a.random_open_coordinate().ok());
        let pair_b: (Option<Coord>, Option<Coord>) =
            (b.random_coordinate().ok(), b.random_open_coordinate().ok());
        if pair_a != pair_b {
            return Some(draw);
        }
    }

    None
}

/// Verify that a serialization round trip preserves the layout exactly.
pub fn verify_serialization_determinism(config: &MapConfig) -> bool {
    let Ok(layout) = MapLayout::generate(config) else {
        return false;
    };
    let Ok(bytes) = layout.serialize() else {
        return false;
    };
    let Ok(restored) = MapLayout::deserialize(&bytes) else {
        return false;
    };
    layout.state_hash() == restored.state_hash()
}

/// Proptest strategies for generation testing.
///
/// Sizes stay small so a flood fill per placement attempt keeps property
/// runs fast.
pub mod strategies {
    use arena_core::config::MapConfig;
    use arena_core::coord::Coord;
    use arena_core::math::Color;
    use proptest::prelude::*;

    /// Map sizes from 1x1 up to 24x24.
    pub fn arb_map_size() -> impl Strategy<Value = Coord> {
        (1i32..=24, 1i32..=24).prop_map(|(x, y)| Coord::new(x, y))
    }

    /// Obstacle percentages across the full valid range.
    pub fn arb_obstacle_percent() -> impl Strategy<Value = f32> {
        prop_oneof![Just(0.0f32), Just(1.0f32), 0.0f32..=1.0f32]
    }

    /// Any seed.
    pub fn arb_seed() -> impl Strategy<Value = u64> {
        any::<u64>()
    }

    /// Colors with components in `[0, 1]`.
    pub fn arb_color() -> impl Strategy<Value = Color> {
        (0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..=1.0)
            .prop_map(|(r, g, b, a)| Color::rgba(r, g, b, a))
    }

    /// A valid map configuration.
    pub fn arb_map_config() -> impl Strategy<Value = MapConfig> {
        (
            arb_map_size(),
            arb_obstacle_percent(),
            arb_seed(),
            0.0f32..5.0,
            0.0f32..5.0,
            arb_color(),
            arb_color(),
        )
            .prop_map(
                |(size, obstacle_percent, seed, h1, h2, foreground_color, background_color)| {
                    MapConfig {
                        name: format!("arb-{seed}"),
                        size,
                        obstacle_percent,
                        seed,
                        min_obstacle_height: h1.min(h2),
                        max_obstacle_height: h1.max(h2),
                        foreground_color,
                        background_color,
                    }
                },
            )
    }

    /// A list of valid map configurations.
    pub fn arb_map_list(max_maps: usize) -> impl Strategy<Value = Vec<MapConfig>> {
        proptest::collection::vec(arb_map_config(), 1..max_maps)
    }
}
