//! Map set loading.
//!
//! Loads [`GeneratorSettings`] from RON files. All validation happens at
//! load time so the generator only ever sees well-formed map sets.

use std::path::Path;

use arena_core::config::GeneratorSettings;
use arena_core::error::MapError;
use thiserror::Error;

/// Errors that can occur while loading or using a map set.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// Failed to read file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        /// Path to the file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Map set validation failed.
    #[error("Validation failed for '{path}': {errors:?}")]
    ValidationError {
        /// Path to the file.
        path: String,
        /// List of validation errors.
        errors: Vec<String>,
    },

    /// One or more files in a data directory failed to load.
    #[error("{failed} of {total} map set(s) in '{path}' failed validation")]
    DirectoryInvalid {
        /// Directory that was checked.
        path: String,
        /// Number of failing files.
        failed: usize,
        /// Number of files checked.
        total: usize,
    },

    /// Parsing or generation failed in the core.
    #[error(transparent)]
    Map(#[from] MapError),
}

/// Result type for data loading operations.
pub type DataLoadResult<T> = Result<T, DataLoadError>;

/// Load and validate a map set from a RON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or fails validation.
pub fn load_settings(path: &Path) -> DataLoadResult<GeneratorSettings> {
    let shown = path.display().to_string();

    let text = std::fs::read_to_string(path).map_err(|source| DataLoadError::IoError {
        path: shown.clone(),
        source,
    })?;
    let settings = GeneratorSettings::from_ron_str(&shown, &text)?;

    let errors = settings.validate();
    if !errors.is_empty() {
        tracing::warn!(
            path = %shown,
            count = errors.len(),
            "Map set failed validation"
        );
        return Err(DataLoadError::ValidationError {
            path: shown,
            errors: errors.iter().map(ToString::to_string).collect(),
        });
    }

    tracing::debug!(path = %shown, maps = settings.maps.len(), "Loaded map set");
    Ok(settings)
}
