//! Map configurations and generator settings.
//!
//! Both types are plain data meant to be authored in RON:
//!
//! ```ron
//! GeneratorSettings(
//!     tile_size: 1.0,
//!     outline_percent: 0.05,
//!     max_map_size: Some((x: 30, y: 20)),
//!     maps: [
//!         MapConfig(
//!             name: "Courtyard",
//!             size: (x: 10, y: 10),
//!             obstacle_percent: 0.4,
//!             seed: 42,
//!             min_obstacle_height: 1.0,
//!             max_obstacle_height: 3.0,
//!             foreground_color: (r: 0.2, g: 0.3, b: 0.4),
//!             background_color: (r: 0.8, g: 0.8, b: 0.9),
//!         ),
//!     ],
//! )
//! ```

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::error::{MapError, Result};
use crate::math::Color;

/// Parameters for one map variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Display name, used in logs and error messages.
    #[serde(default)]
    pub name: String,
    /// Map size in tiles (`x` = width, `y` = height).
    pub size: Coord,
    /// Fraction of tiles to attempt obstacle placement on (0.0 - 1.0).
    pub obstacle_percent: f32,
    /// Seed for the shuffles and obstacle heights.
    pub seed: u64,
    /// Lowest obstacle height.
    pub min_obstacle_height: f32,
    /// Highest obstacle height.
    pub max_obstacle_height: f32,
    /// Obstacle color at the front row (`y = 0`).
    pub foreground_color: Color,
    /// Obstacle color towards the back row.
    pub background_color: Color,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            name: String::from("default"),
            size: Coord::new(10, 10),
            obstacle_percent: 0.4,
            seed: 42,
            min_obstacle_height: 1.0,
            max_obstacle_height: 3.0,
            foreground_color: Color::rgb(0.15, 0.2, 0.3),
            background_color: Color::rgb(0.75, 0.8, 0.9),
        }
    }
}

impl MapConfig {
    /// Map width in tiles.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.size.x
    }

    /// Map height in tiles.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.size.y
    }

    /// Total number of tiles.
    #[must_use]
    pub const fn tile_count(&self) -> usize {
        (self.size.x as usize) * (self.size.y as usize)
    }

    /// Map center, the flood-fill origin. Never receives an obstacle.
    #[must_use]
    pub const fn center(&self) -> Coord {
        Coord::new(self.size.x / 2, self.size.y / 2)
    }

    /// Number of obstacle placement attempts for this map.
    ///
    /// The product is taken in single precision, the way the obstacle
    /// percentage is stored, before truncating.
    #[must_use]
    pub fn obstacle_attempts(&self) -> usize {
        ((self.tile_count() as f32) * self.obstacle_percent).floor() as usize
    }

    /// Set the map size.
    #[must_use]
    pub const fn with_size(mut self, width: i32, height: i32) -> Self {
        self.size = Coord::new(width, height);
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set obstacle percent.
    #[must_use]
    pub fn with_obstacle_percent(mut self, percent: f32) -> Self {
        self.obstacle_percent = percent;
        self
    }

    /// Set the obstacle height range.
    #[must_use]
    pub fn with_height_range(mut self, min: f32, max: f32) -> Self {
        self.min_obstacle_height = min;
        self.max_obstacle_height = max;
        self
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidConfig`] describing the first violated rule.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| MapError::InvalidConfig {
            name: self.name.clone(),
            reason,
        };

        if self.size.x < 1 || self.size.y < 1 {
            return Err(invalid(format!(
                "size must be at least 1x1, got {}x{}",
                self.size.x, self.size.y
            )));
        }
        if !(0.0..=1.0).contains(&self.obstacle_percent) {
            return Err(invalid(format!(
                "obstacle_percent must be within [0, 1], got {}",
                self.obstacle_percent
            )));
        }
        if !self.min_obstacle_height.is_finite() || !self.max_obstacle_height.is_finite() {
            return Err(invalid("obstacle heights must be finite".to_string()));
        }
        if self.min_obstacle_height > self.max_obstacle_height {
            return Err(invalid(format!(
                "min_obstacle_height {} exceeds max_obstacle_height {}",
                self.min_obstacle_height, self.max_obstacle_height
            )));
        }
        if !self.foreground_color.is_normalized() || !self.background_color.is_normalized() {
            return Err(invalid("color components must be within [0, 1]".to_string()));
        }
        Ok(())
    }
}

/// Generator-wide settings plus the list of map variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// World units per tile.
    pub tile_size: f32,
    /// Cosmetic inset of rendered tiles (0 = touching, 1 = invisible).
    #[serde(default)]
    pub outline_percent: f32,
    /// Largest map in the set; enables navmesh masks around smaller maps.
    #[serde(default)]
    pub max_map_size: Option<Coord>,
    /// Map variants, selected by index.
    pub maps: Vec<MapConfig>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            tile_size: 1.0,
            outline_percent: 0.0,
            max_map_size: None,
            maps: vec![MapConfig::default()],
        }
    }
}

impl GeneratorSettings {
    /// Settings wrapping a single map.
    #[must_use]
    pub fn single(config: MapConfig) -> Self {
        Self {
            maps: vec![config],
            ..Default::default()
        }
    }

    /// Set the tile size.
    #[must_use]
    pub const fn with_tile_size(mut self, tile_size: f32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Set the maximum map size.
    #[must_use]
    pub const fn with_max_map_size(mut self, width: i32, height: i32) -> Self {
        self.max_map_size = Some(Coord::new(width, height));
        self
    }

    /// Look up a map by index.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidMapIndex`] when `index` is out of range.
    pub fn map(&self, index: usize) -> Result<&MapConfig> {
        self.maps.get(index).ok_or(MapError::InvalidMapIndex {
            index,
            count: self.maps.len(),
        })
    }

    /// Parse settings from RON text. `path` only labels errors.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::DataParseError`] when the text is not valid RON
    /// for this type.
    pub fn from_ron_str(path: &str, text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| MapError::DataParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Validate generator settings only, not the individual maps.
    fn validate_generator(&self) -> Result<()> {
        let invalid = |reason: String| MapError::InvalidConfig {
            name: "generator".to_string(),
            reason,
        };

        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(invalid(format!(
                "tile_size must be positive, got {}",
                self.tile_size
            )));
        }
        if !(0.0..=1.0).contains(&self.outline_percent) {
            return Err(invalid(format!(
                "outline_percent must be within [0, 1], got {}",
                self.outline_percent
            )));
        }
        Ok(())
    }

    /// Validate settings and every map, collecting all problems.
    ///
    /// Returns a list of validation errors; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<MapError> {
        let mut errors = Vec::new();

        if let Err(e) = self.validate_generator() {
            errors.push(e);
        }
        if self.maps.is_empty() {
            errors.push(MapError::InvalidConfig {
                name: "generator".to_string(),
                reason: "no maps configured".to_string(),
            });
        }

        for map in &self.maps {
            if let Err(e) = map.validate() {
                errors.push(e);
            }
            if let Some(max) = self.max_map_size {
                if map.size.x > max.x || map.size.y > max.y {
                    errors.push(MapError::InvalidConfig {
                        name: map.name.clone(),
                        reason: format!(
                            "size {}x{} exceeds max_map_size {}x{}",
                            map.size.x, map.size.y, max.x, max.y
                        ),
                    });
                }
            }
        }

        errors
    }

    /// Check the generator settings and the map at `index`.
    pub(crate) fn validate_for(&self, index: usize) -> Result<&MapConfig> {
        let config = self.map(index)?;
        self.validate_generator()?;
        config.validate()?;
        if let Some(max) = self.max_map_size {
            if config.size.x > max.x || config.size.y > max.y {
                return Err(MapError::InvalidConfig {
                    name: config.name.clone(),
                    reason: format!(
                        "size {}x{} exceeds max_map_size {}x{}",
                        config.size.x, config.size.y, max.x, max.y
                    ),
                });
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_uses_floor_division() {
        assert_eq!(MapConfig::default().center(), Coord::new(5, 5));
        let odd = MapConfig::default().with_size(7, 3);
        assert_eq!(odd.center(), Coord::new(3, 1));
        let tiny = MapConfig::default().with_size(1, 1);
        assert_eq!(tiny.center(), Coord::new(0, 0));
    }

    #[test]
    fn test_obstacle_attempts_truncate() {
        let config = MapConfig::default().with_obstacle_percent(0.4);
        assert_eq!(config.obstacle_attempts(), 40);
        let config = MapConfig::default().with_obstacle_percent(0.0);
        assert_eq!(config.obstacle_attempts(), 0);
        let config = MapConfig::default().with_size(3, 3).with_obstacle_percent(0.5);
        assert_eq!(config.obstacle_attempts(), 4);
        let config = MapConfig::default().with_obstacle_percent(1.0);
        assert_eq!(config.obstacle_attempts(), 100);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(MapConfig::default().validate().is_ok());
        assert!(MapConfig::default().with_size(0, 5).validate().is_err());
        assert!(MapConfig::default()
            .with_obstacle_percent(1.5)
            .validate()
            .is_err());
        assert!(MapConfig::default()
            .with_obstacle_percent(f32::NAN)
            .validate()
            .is_err());
        assert!(MapConfig::default()
            .with_height_range(3.0, 1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_map_index_out_of_range() {
        let settings = GeneratorSettings::default();
        assert!(settings.map(0).is_ok());
        assert_eq!(
            settings.map(3).unwrap_err(),
            MapError::InvalidMapIndex { index: 3, count: 1 }
        );
    }

    #[test]
    fn test_settings_validate_collects_errors() {
        let settings = GeneratorSettings {
            tile_size: 0.0,
            outline_percent: 0.0,
            max_map_size: Some(Coord::new(8, 8)),
            maps: vec![MapConfig::default(), MapConfig::default().with_size(0, 0)],
        };
        let errors = settings.validate();
        // tile size, first map too large, second map invalid size
        assert_eq!(errors.len(), 3, "Errors: {:?}", errors);
    }

    #[test]
    fn test_parse_ron_settings() {
        let text = r#"
            GeneratorSettings(
                tile_size: 2.0,
                outline_percent: 0.1,
                max_map_size: Some((x: 20, y: 20)),
                maps: [
                    MapConfig(
                        name: "Courtyard",
                        size: (x: 12, y: 8),
                        obstacle_percent: 0.3,
                        seed: 7,
                        min_obstacle_height: 0.5,
                        max_obstacle_height: 2.0,
                        foreground_color: (r: 0.1, g: 0.2, b: 0.3),
                        background_color: (r: 0.9, g: 0.9, b: 0.9, a: 0.5),
                    ),
                ],
            )
        "#;
        let settings = GeneratorSettings::from_ron_str("inline", text).unwrap();
        assert_eq!(settings.tile_size, 2.0);
        assert_eq!(settings.maps.len(), 1);
        assert_eq!(settings.maps[0].size, Coord::new(12, 8));
        assert_eq!(settings.maps[0].foreground_color.a, 1.0);
        assert_eq!(settings.maps[0].background_color.a, 0.5);
        assert!(settings.validate().is_empty());
    }

    #[test]
    fn test_parse_error_reports_path() {
        let err = GeneratorSettings::from_ron_str("maps.ron", "not ron").unwrap_err();
        assert!(matches!(err, MapError::DataParseError { ref path, .. } if path == "maps.ron"));
    }
}
