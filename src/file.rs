//! Loading the raw config file.
//!
//! This is the only place the config file is read. The result is an
//! unvalidated [`toml::Table`]; turning it into typed settings is the job of
//! [`Settings::from_table`](crate::Settings::from_table).

use std::path::{Path, PathBuf};

use toml::Table;

use crate::error::ConfigError;

/// File name of the default config, relative to the application root.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "config.toml";

/// The default config location: `config.toml` at the application root.
pub fn default_config_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_FILE_NAME)
}

/// Read `path` and parse it as TOML.
///
/// Returns the file text alongside the parsed table so strict mode can
/// locate unknown keys by line.
pub fn load_config_file(path: &Path) -> Result<(String, Table), ConfigError> {
    tracing::debug!(path = %path.display(), "reading config file");

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let table = parse_config(&content, path)?;
    Ok((content, table))
}

/// Read `path` and parse it as TOML, discarding the source text.
pub fn read_config(path: &Path) -> Result<Table, ConfigError> {
    load_config_file(path).map(|(_, table)| table)
}

/// Parse TOML text. `path` is only used for error reporting.
pub fn parse_config(content: &str, path: &Path) -> Result<Table, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}
