//! The closed value sets accepted by the config file.
//!
//! Tokens are mapped to variants by the serde derives alone; both parsing
//! and `Display` go through them. [`Choice::ACCEPTED`] only lists the tokens
//! for validation errors, and the tests keep it in step with serde.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A setting whose value must be one of a fixed list of string tokens.
pub trait Choice: DeserializeOwned + Serialize + Copy {
    /// Every accepted token, as written in the config file.
    const ACCEPTED: &'static [&'static str];
}

/// Write the token serde maps `value` to.
fn write_token<T: Serialize>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match toml::Value::try_from(value) {
        Ok(toml::Value::String(token)) => f.write_str(&token),
        _ => Err(fmt::Error),
    }
}

/// What to do when an entry with the same key already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnCollide {
    /// Replace the existing entry.
    #[default]
    Overwrite,
    /// Keep the existing entry and store the new one under another name.
    Rename,
    /// Refuse the new entry.
    Error,
}

impl Choice for OnCollide {
    const ACCEPTED: &'static [&'static str] = &["overwrite", "rename", "error"];
}

/// Unit of `expiration.time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExpirationUnit {
    #[serde(rename = "ms")]
    Milliseconds,
    #[serde(rename = "s")]
    Seconds,
    #[default]
    #[serde(rename = "m")]
    Minutes,
    #[serde(rename = "h")]
    Hours,
    #[serde(rename = "d")]
    Days,
}

impl ExpirationUnit {
    /// Number of milliseconds in one of this unit.
    pub const fn multiplier(self) -> u64 {
        match self {
            ExpirationUnit::Milliseconds => 1,
            ExpirationUnit::Seconds => 1_000,
            ExpirationUnit::Minutes => 60_000,
            ExpirationUnit::Hours => 3_600_000,
            ExpirationUnit::Days => 86_400_000,
        }
    }

    /// Convert `time` in this unit to milliseconds, or `None` on overflow.
    pub fn to_millis(self, time: u64) -> Option<u64> {
        time.checked_mul(self.multiplier())
    }
}

impl Choice for ExpirationUnit {
    const ACCEPTED: &'static [&'static str] = &["ms", "s", "m", "h", "d"];
}

/// What happens to an entry once it expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpirationBehavior {
    /// Hide the entry but keep it stored.
    #[default]
    Shadow,
    /// Remove the entry.
    Delete,
    /// Move the entry to a backup store.
    Backup,
}

impl Choice for ExpirationBehavior {
    const ACCEPTED: &'static [&'static str] = &["shadow", "delete", "backup"];
}

impl fmt::Display for OnCollide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_token(self, f)
    }
}

impl fmt::Display for ExpirationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_token(self, f)
    }
}

impl fmt::Display for ExpirationBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_token(self, f)
    }
}
