//! Data validation utilities.

use std::path::{Path, PathBuf};

use crate::loader::{load_settings, DataLoadError, DataLoadResult};

/// Validate all RON map sets in a directory.
///
/// Every file is checked, even after a failure, so one run reports every
/// broken map set. Returns the number of files validated.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or any map set fails
/// to load or validate.
pub fn validate_data_directory(path: &Path) -> DataLoadResult<usize> {
    let files = ron_files(path)?;
    let mut failed = 0;

    for file in &files {
        match load_settings(file) {
            Ok(settings) => {
                tracing::info!(path = %file.display(), maps = settings.maps.len(), "Map set valid");
            }
            Err(e) => {
                tracing::warn!("{e}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(DataLoadError::DirectoryInvalid {
            path: path.display().to_string(),
            failed,
            total: files.len(),
        });
    }
    Ok(files.len())
}

/// `.ron` files directly inside `path`, sorted by name.
fn ron_files(path: &Path) -> DataLoadResult<Vec<PathBuf>> {
    let io_error = |source| DataLoadError::IoError {
        path: path.display().to_string(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(path).map_err(io_error)? {
        let file = entry.map_err(io_error)?.path();
        if file.is_file() && file.extension().is_some_and(|ext| ext == "ron") {
            files.push(file);
        }
    }
    files.sort();
    Ok(files)
}
