use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::builder::ConfigBuilder;
use crate::error::ConfigError;
use crate::ops;
use crate::settings::{Expiration, Settings};
use crate::types::{ExpirationBehavior, ExpirationUnit, OnCollide};

/// A loaded, validated configuration.
///
/// Holds the file it came from, the raw table, and the typed [`Settings`].
/// Immutable once built; construct a new one to pick up file changes.
#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    raw: Table,
    settings: Settings,
}

impl Config {
    /// Load and validate the config at `path`, or at
    /// [`default_config_path`](crate::default_config_path) when `None`.
    pub fn new(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Self::builder();
        if let Some(path) = path {
            builder = builder.path(path);
        }
        builder.load()
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub(crate) fn from_parts(path: PathBuf, raw: Table, settings: Settings) -> Self {
        Self {
            path,
            raw,
            settings,
        }
    }

    /// The file this configuration was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The raw parsed mapping, before validation.
    pub fn values(&self) -> &Table {
        &self.raw
    }

    /// Look up a raw value by dotted key, e.g. `"db.db_file"`.
    pub fn get(&self, dotted_key: &str) -> Option<&Value> {
        ops::table_get(&self.raw, dotted_key)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn db_file_path(&self) -> &Path {
        &self.settings.db.file_path
    }

    pub fn on_collide(&self) -> OnCollide {
        self.settings.db.on_collide
    }

    pub fn frecency(&self) -> bool {
        self.settings.navitrack.frecency
    }

    pub fn expiration(&self) -> Option<&Expiration> {
        self.settings.expiration.as_ref()
    }

    pub fn expiration_time(&self) -> Option<u64> {
        self.expiration().map(Expiration::time)
    }

    pub fn expiration_unit(&self) -> Option<ExpirationUnit> {
        self.expiration().map(Expiration::unit)
    }

    pub fn expiration_behavior(&self) -> Option<ExpirationBehavior> {
        self.expiration().map(Expiration::behavior)
    }

    pub fn expiration_time_in_milliseconds(&self) -> Option<u64> {
        self.expiration().map(Expiration::time_in_milliseconds)
    }
}
