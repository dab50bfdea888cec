//! Template generation and raw key lookup.

use std::path::Path;

use crate::error::ConfigError;
use crate::schema::FileSchema;

/// Generate a commented TOML template from the file schema's doc comments
/// and defaults.
pub fn generate_template() -> String {
    confique::toml::template::<FileSchema>(confique::toml::FormatOptions::default())
}

/// Write the template to `path`, creating parent directories as needed.
pub fn write_template(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, generate_template()).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), "wrote config template");
    Ok(())
}

/// Follow a dotted key such as `"db.db_file"` through nested tables.
/// `None` if any segment is missing or an intermediate value is not a table.
pub fn table_get<'a>(table: &'a toml::Table, dotted_key: &str) -> Option<&'a toml::Value> {
    let mut segments = dotted_key.split('.');
    let first = table.get(segments.next()?)?;
    segments.try_fold(first, |value, segment| value.as_table()?.get(segment))
}
