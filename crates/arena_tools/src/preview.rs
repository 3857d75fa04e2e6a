//! Map previews for terminal review.
//!
//! Regenerates a map from a map set and renders it as ASCII art or a JSON
//! summary.

use arena_core::config::GeneratorSettings;
use arena_core::coord::Coord;
use arena_core::generator::MapGenerator;
use arena_core::layout::MapLayout;
use serde::Serialize;

use crate::loader::DataLoadResult;

/// Which map of a set to preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapSelection {
    /// Map by index.
    Index(usize),
    /// Map used by a wave (1-based).
    Wave(u32),
}

impl Default for MapSelection {
    fn default() -> Self {
        Self::Index(0)
    }
}

/// Generate the selected map of `settings`.
///
/// # Errors
///
/// Returns an error if the selection is out of range or the map is invalid.
pub fn generate_preview(
    settings: GeneratorSettings,
    selection: MapSelection,
) -> DataLoadResult<MapLayout> {
    let mut generator = MapGenerator::headless(settings);
    let layout = match selection {
        MapSelection::Index(index) => generator.generate(index)?,
        MapSelection::Wave(wave) => generator.on_new_wave(wave)?,
    };
    Ok(layout.clone())
}

/// Render a layout as ASCII art.
///
/// Rows run from the top (`y = height - 1`) to the bottom so the picture
/// matches the world's `+z` axis pointing up.
pub fn render_ascii(layout: &MapLayout) -> String {
    let config = &layout.config;
    let center = config.center();
    let mut output = String::new();

    output.push_str(&format!(
        "{} ({}x{}, seed {})\n",
        config.name,
        config.width(),
        config.height(),
        config.seed
    ));

    let border = format!("+{}+\n", "-".repeat(config.width() as usize));
    output.push_str(&border);
    for y in (0..config.height()).rev() {
        output.push('|');
        for x in 0..config.width() {
            let coord = Coord::new(x, y);
            let ch = if coord == center {
                'C'
            } else if layout.is_obstacle(coord) {
                '#'
            } else {
                '.'
            };
            output.push(ch);
        }
        output.push_str("|\n");
    }
    output.push_str(&border);

    output.push_str(&format!(
        "Legend: # obstacle  . open  C center | obstacles {}/{} attempts, {} open\n",
        layout.obstacle_count(),
        layout.stats.attempts,
        layout.open_count()
    ));
    output
}

/// JSON-friendly summary of a generated map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSummary {
    /// Map name.
    pub name: String,
    /// Width in tiles.
    pub width: i32,
    /// Height in tiles.
    pub height: i32,
    /// Seed.
    pub seed: u64,
    /// Obstacle placement attempts.
    pub attempts: usize,
    /// Obstacles placed.
    pub placed: usize,
    /// Candidates rejected because they were the center.
    pub rejected_center: usize,
    /// Candidates rejected because they would seal off tiles.
    pub rejected_unreachable: usize,
    /// Candidates rejected because they already held an obstacle. Always
    /// zero for a valid config.
    pub rejected_occupied: usize,
    /// Open tile count.
    pub open_tiles: usize,
    /// Map center.
    pub center: Coord,
    /// Obstacle coordinates in placement order.
    pub obstacles: Vec<Coord>,
    /// Layout fingerprint.
    pub state_hash: u64,
}

impl MapSummary {
    /// Summarize `layout`.
    pub fn from_layout(layout: &MapLayout) -> Self {
        let config = &layout.config;
        Self {
            name: config.name.clone(),
            width: config.width(),
            height: config.height(),
            seed: config.seed,
            attempts: layout.stats.attempts,
            placed: layout.stats.placed,
            rejected_center: layout.stats.rejected_center,
            rejected_unreachable: layout.stats.rejected_unreachable,
            rejected_occupied: layout.stats.rejected_occupied,
            open_tiles: layout.open_count(),
            center: config.center(),
            obstacles: layout.obstacles.iter().map(|o| o.coord).collect(),
            state_hash: layout.state_hash(),
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
