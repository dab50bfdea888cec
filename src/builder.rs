use std::path::PathBuf;

use crate::config::Config;
use crate::db;
use crate::error::ConfigError;
use crate::file;
use crate::settings::Settings;
use crate::strict;

/// Builder for loading a [`Config`] with non-default options.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    path: Option<PathBuf>,
    strict: bool,
}

impl ConfigBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Load from `path` instead of the default location.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Enable or disable strict mode (default: `false`).
    /// In strict mode, keys unknown to the file layout produce errors.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    fn effective_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(file::default_config_path)
    }

    /// Read, validate and return the configuration.
    ///
    /// 1. Read and parse the file
    /// 2. Validate every field and apply defaults
    /// 3. Reject unknown keys (if strict)
    /// 4. Create the database file if missing
    pub fn load(self) -> Result<Config, ConfigError> {
        let path = self.effective_path();
        let (content, raw) = file::load_config_file(&path)?;

        let settings = Settings::validate(&raw, &path)?;
        if self.strict {
            strict::validate_unknown_keys(&content, &path)?;
        }
        db::ensure_db_file(&settings.db.file_path)?;

        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(Config::from_parts(path, raw, settings))
    }
}
