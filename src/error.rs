use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of a [`ConfigError`], for callers that want to
/// branch on the failure category without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source file is missing, unreadable, or not valid TOML.
    Parse,
    /// A required section or key is absent.
    NotFound,
    /// A present value has the wrong type, is outside its accepted set, or
    /// is out of range.
    Validation,
    /// An environment-level failure unrelated to the file's content.
    Configuration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Parse => "parse",
            ErrorKind::NotFound => "not found",
            ErrorKind::Validation => "validation",
            ErrorKind::Configuration => "configuration",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Missing required section [{section}] in {path}")]
    MissingSection { section: String, path: PathBuf },

    #[error("Missing required key '{key}' in section [{section}] of {path}")]
    MissingKey {
        section: String,
        key: String,
        path: PathBuf,
    },

    #[error("Invalid type for '{field}': expected {expected}, got {value}")]
    InvalidType {
        field: String,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid value for '{field}': {value} (accepted: {})", .accepted.join(", "))]
    InvalidChoice {
        field: String,
        value: String,
        accepted: &'static [&'static str],
    },

    #[error("Invalid value for '{field}' in {path}: {reason}")]
    InvalidValue {
        field: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Value out of range for '{field}': {value} ({reason})")]
    OutOfRange {
        field: String,
        value: i64,
        reason: &'static str,
    },

    #[error("Unknown key '{key}' in {path} (line {line})")]
    UnknownKey {
        key: String,
        path: PathBuf,
        line: usize,
    },

    #[error("Unknown keys in config file")]
    UnknownKeys(Vec<ConfigError>),

    #[error("Cannot create database file {path}: {source}")]
    DbFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::Read { .. } | ConfigError::Parse { .. } => ErrorKind::Parse,
            ConfigError::MissingSection { .. } | ConfigError::MissingKey { .. } => {
                ErrorKind::NotFound
            }
            ConfigError::InvalidType { .. }
            | ConfigError::InvalidChoice { .. }
            | ConfigError::InvalidValue { .. }
            | ConfigError::OutOfRange { .. }
            | ConfigError::UnknownKey { .. }
            | ConfigError::UnknownKeys(_) => ErrorKind::Validation,
            ConfigError::DbFile { .. } | ConfigError::Io { .. } => ErrorKind::Configuration,
        }
    }

    /// The field this error is about, when there is one.
    ///
    /// Value errors and unknown keys give the dotted key (`db.on_collide`).
    /// NotFound errors give the bare missing name (`db`, `db_file`); the
    /// section of a missing key is the `section` of [`ConfigError::MissingKey`].
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidType { field, .. }
            | ConfigError::InvalidChoice { field, .. }
            | ConfigError::InvalidValue { field, .. }
            | ConfigError::OutOfRange { field, .. } => Some(field.as_str()),
            ConfigError::MissingSection { section, .. } => Some(section.as_str()),
            ConfigError::MissingKey { key, .. } | ConfigError::UnknownKey { key, .. } => {
                Some(key.as_str())
            }
            _ => None,
        }
    }
}
