//! Strict mode: reject keys that are not part of the file layout.
//!
//! The file is fed through the [`FileSchema`] confique layer while
//! `serde_ignored` watches; anything the layer skips is a key navitrack does
//! not know. Line numbers come from a section-aware scan of the source text.

use std::path::Path;

use confique::Config;

use crate::error::ConfigError;
use crate::schema::FileSchema;

/// Check that TOML `content` has no keys outside [`FileSchema`].
///
/// Runs after [`Settings::validate`](crate::Settings::validate), so the keys
/// it reads are already type checked. What can still fail here are keys the
/// validator skips, such as `unit` in an `[expiration]` without `time`.
pub fn validate_unknown_keys(content: &str, path: &Path) -> Result<(), ConfigError> {
    let mut unknown: Vec<String> = Vec::new();

    let layer: Result<<FileSchema as Config>::Layer, toml::de::Error> =
        serde_ignored::deserialize(toml::Deserializer::new(content), |ignored| {
            unknown.push(ignored.to_string());
        });
    if let Err(e) = layer {
        return Err(layout_mismatch(content, path, &e));
    }

    if unknown.is_empty() {
        return Ok(());
    }
    tracing::debug!(count = unknown.len(), path = %path.display(), "unknown config keys");

    Err(ConfigError::UnknownKeys(
        unknown
            .into_iter()
            .map(|key| ConfigError::UnknownKey {
                line: find_key_line(content, &key),
                key,
                path: path.to_path_buf(),
            })
            .collect(),
    ))
}

/// The file is valid TOML but a value doesn't fit the layout.
fn layout_mismatch(content: &str, path: &Path, err: &toml::de::Error) -> ConfigError {
    let field = err
        .span()
        .and_then(|span| key_at(content, span.start))
        .unwrap_or_else(|| "<file>".to_string());
    ConfigError::InvalidValue {
        field,
        path: path.to_path_buf(),
        reason: err.message().to_string(),
    }
}

/// Parse a `[section]` header, ignoring any trailing comment.
/// `[[array]]` headers and non-header lines give `None`.
fn section_header(line: &str) -> Option<Vec<String>> {
    let rest = line.strip_prefix('[')?;
    if rest.starts_with('[') {
        return None;
    }
    let (inner, _) = rest.split_once(']')?;
    Some(inner.split('.').map(|s| s.trim().to_string()).collect())
}

fn same_path(expected: &[&str], actual: &[String]) -> bool {
    expected.len() == actual.len() && expected.iter().zip(actual).all(|(a, b)| a == b)
}

fn assigns(line: &str, key: &str) -> bool {
    line.strip_prefix(key)
        .is_some_and(|rest| rest.trim_start().starts_with('='))
}

/// 1-indexed line where `dotted_key` is assigned, or where its section header
/// sits when the whole section is unknown. 0 if it can't be found.
fn find_key_line(content: &str, dotted_key: &str) -> usize {
    let segments: Vec<&str> = dotted_key.split('.').collect();
    let Some((leaf, parent)) = segments.split_last() else {
        return 0;
    };

    let mut section: Vec<String> = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if let Some(header) = section_header(trimmed) {
            if same_path(&segments, &header) {
                return index + 1;
            }
            section = header;
        } else if same_path(parent, &section) && assigns(trimmed, leaf) {
            return index + 1;
        }
    }
    0
}

/// Dotted key of the assignment (or header) covering byte `offset`.
fn key_at(content: &str, offset: usize) -> Option<String> {
    let mut section: Vec<String> = Vec::new();
    let mut start = 0;
    for line in content.split_inclusive('\n') {
        let trimmed = line.trim();
        let header = section_header(trimmed);
        if offset < start + line.len() {
            if let Some(header) = header {
                return Some(header.join("."));
            }
            let (key, _) = trimmed.split_once('=')?;
            section.push(key.trim().to_string());
            return Some(section.join("."));
        }
        if let Some(header) = header {
            section = header;
        }
        start += line.len();
    }
    None
}
