//! Database file precondition.

use std::fs::OpenOptions;
use std::path::Path;

use crate::error::ConfigError;

/// Make sure the database file exists, creating parent directories and an
/// empty file if needed. An existing file is left untouched.
pub fn ensure_db_file(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::DbFile {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ConfigError::DbFile {
            path: path.to_path_buf(),
            source: e,
        })?;

    tracing::info!(path = %path.display(), "created database file");
    Ok(())
}
