//! Typed access to the raw config table.
//!
//! Each helper looks up one key and checks its type, returning `Ok(None)`
//! when the key is absent so callers decide between "required" and
//! "default". Errors name the dotted field and show the offending value.

use std::path::Path;

use toml::{Table, Value};

use crate::error::ConfigError;
use crate::types::Choice;

fn dotted(section: &str, key: &str) -> String {
    format!("{section}.{key}")
}

/// Render a value for an error message, e.g. `"yes" (string)`.
fn describe(value: &Value) -> String {
    match value {
        Value::Table(_) => "a table".to_string(),
        other => format!("{other} ({})", other.type_str()),
    }
}

fn invalid_type(field: String, value: &Value, expected: &'static str) -> ConfigError {
    ConfigError::InvalidType {
        field,
        value: describe(value),
        expected,
    }
}

/// Look up an optional top-level section.
pub fn section<'a>(raw: &'a Table, name: &str) -> Result<Option<&'a Table>, ConfigError> {
    match raw.get(name) {
        None => Ok(None),
        Some(Value::Table(table)) => Ok(Some(table)),
        Some(other) => Err(invalid_type(name.to_string(), other, "a table")),
    }
}

/// Look up a section that must be present. `source` is the config file, named
/// in the error so an operator knows which file to fix.
pub fn required_section<'a>(
    raw: &'a Table,
    name: &str,
    source: &Path,
) -> Result<&'a Table, ConfigError> {
    section(raw, name)?.ok_or_else(|| ConfigError::MissingSection {
        section: name.to_string(),
        path: source.to_path_buf(),
    })
}

pub fn string<'a>(
    table: &'a Table,
    section: &str,
    key: &str,
) -> Result<Option<&'a str>, ConfigError> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(invalid_type(dotted(section, key), other, "a string")),
    }
}

pub fn boolean(table: &Table, section: &str, key: &str) -> Result<Option<bool>, ConfigError> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::Boolean(b)) => Ok(Some(*b)),
        Some(other) => Err(invalid_type(dotted(section, key), other, "a boolean")),
    }
}

pub fn integer(table: &Table, section: &str, key: &str) -> Result<Option<i64>, ConfigError> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::Integer(i)) => Ok(Some(*i)),
        Some(other) => Err(invalid_type(dotted(section, key), other, "an integer")),
    }
}

/// Look up a string key and map it to a `C` variant through its serde
/// derive. Unmatched tokens are reported with `C::ACCEPTED`.
pub fn choice<C: Choice>(
    table: &Table,
    section: &str,
    key: &str,
) -> Result<Option<C>, ConfigError> {
    let Some(token) = string(table, section, key)? else {
        return Ok(None);
    };
    C::deserialize(Value::String(token.to_string()))
        .map(Some)
        .map_err(|_| ConfigError::InvalidChoice {
            field: dotted(section, key),
            value: format!("{token:?}"),
            accepted: C::ACCEPTED,
        })
}

pub fn non_negative(section: &str, key: &str, value: i64) -> Result<u64, ConfigError> {
    u64::try_from(value).map_err(|_| ConfigError::OutOfRange {
        field: dotted(section, key),
        value,
        reason: "must be non-negative",
    })
}
