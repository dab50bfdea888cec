//! The validated, typed view of a config file.
//!
//! [`Settings`] is produced in a single pass over the raw table. Downstream
//! code reads these fields and never goes back to the raw mapping.

use std::path::{Path, PathBuf};

use toml::Table;

use crate::db;
use crate::error::ConfigError;
use crate::types::{ExpirationBehavior, ExpirationUnit, OnCollide};
use crate::validate;

pub(crate) const DB: &str = "db";
pub(crate) const NAVITRACK: &str = "navitrack";
pub(crate) const EXPIRATION: &str = "expiration";

/// The `[db]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbSettings {
    /// Location of the database file. Guaranteed to exist once loaded.
    pub file_path: PathBuf,
    pub on_collide: OnCollide,
}

/// The `[navitrack]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavitrackSettings {
    pub frecency: bool,
}

impl Default for NavitrackSettings {
    fn default() -> Self {
        Self { frecency: true }
    }
}

/// The `[expiration]` policy. Only exists when `expiration.time` is set, so
/// the time, unit, behavior and millisecond value are always present together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiration {
    time: u64,
    unit: ExpirationUnit,
    behavior: ExpirationBehavior,
    time_in_milliseconds: u64,
}

impl Expiration {
    /// Returns `None` if `time` in `unit` does not fit in a `u64` of milliseconds.
    pub fn new(time: u64, unit: ExpirationUnit, behavior: ExpirationBehavior) -> Option<Self> {
        let time_in_milliseconds = unit.to_millis(time)?;
        Some(Self {
            time,
            unit,
            behavior,
            time_in_milliseconds,
        })
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn unit(&self) -> ExpirationUnit {
        self.unit
    }

    pub fn behavior(&self) -> ExpirationBehavior {
        self.behavior
    }

    pub fn time_in_milliseconds(&self) -> u64 {
        self.time_in_milliseconds
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db: DbSettings,
    pub navitrack: NavitrackSettings,
    pub expiration: Option<Expiration>,
}

impl Settings {
    /// Validate `raw` and create the database file if it is missing.
    ///
    /// `source` is the file `raw` was read from; it only appears in error
    /// messages.
    pub fn from_table(raw: &Table, source: &Path) -> Result<Self, ConfigError> {
        let settings = Self::validate(raw, source)?;
        db::ensure_db_file(&settings.db.file_path)?;
        Ok(settings)
    }

    /// Validate `raw` without touching the filesystem.
    pub fn validate(raw: &Table, source: &Path) -> Result<Self, ConfigError> {
        let db_section = validate::required_section(raw, DB, source)?;
        let navitrack_section = validate::section(raw, NAVITRACK)?;
        let expiration_section = validate::section(raw, EXPIRATION)?;

        let db = parse_db(db_section, source)?;
        let navitrack = match navitrack_section {
            Some(table) => parse_navitrack(table)?,
            None => {
                tracing::debug!("no [navitrack] section, using defaults");
                NavitrackSettings::default()
            }
        };
        let expiration = match expiration_section {
            Some(table) => parse_expiration(table)?,
            None => None,
        };

        Ok(Self {
            db,
            navitrack,
            expiration,
        })
    }
}

fn parse_db(table: &Table, source: &Path) -> Result<DbSettings, ConfigError> {
    let file = validate::string(table, DB, "db_file")?.ok_or_else(|| ConfigError::MissingKey {
        section: DB.to_string(),
        key: "db_file".to_string(),
        path: source.to_path_buf(),
    })?;
    if file.is_empty() {
        return Err(ConfigError::InvalidType {
            field: format!("{DB}.db_file"),
            value: "\"\" (string)".to_string(),
            expected: "a non-empty path",
        });
    }

    let on_collide = validate::choice(table, DB, "on_collide")?.unwrap_or_default();

    Ok(DbSettings {
        file_path: PathBuf::from(file),
        on_collide,
    })
}

fn parse_navitrack(table: &Table) -> Result<NavitrackSettings, ConfigError> {
    let frecency = validate::boolean(table, NAVITRACK, "frecency")?.unwrap_or(true);
    Ok(NavitrackSettings { frecency })
}

/// All or nothing: without `time`, unit and behavior are ignored rather than
/// defaulted.
fn parse_expiration(table: &Table) -> Result<Option<Expiration>, ConfigError> {
    let Some(raw_time) = validate::integer(table, EXPIRATION, "time")? else {
        if table.contains_key("unit") || table.contains_key("behavior") {
            tracing::warn!("[expiration] has no 'time'; 'unit' and 'behavior' are ignored");
        }
        return Ok(None);
    };
    let time = validate::non_negative(EXPIRATION, "time", raw_time)?;
    let unit = validate::choice(table, EXPIRATION, "unit")?.unwrap_or_default();
    let behavior = validate::choice(table, EXPIRATION, "behavior")?.unwrap_or_default();

    Expiration::new(time, unit, behavior)
        .map(Some)
        .ok_or_else(|| ConfigError::OutOfRange {
            field: format!("{EXPIRATION}.time"),
            value: raw_time,
            reason: "too large once converted to milliseconds",
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fixtures::test::{db_line, table};
    use tempfile::TempDir;

    fn source() -> PathBuf {
        PathBuf::from("/test/config.toml")
    }

    fn validate_str(content: &str) -> Result<Settings, ConfigError> {
        Settings::validate(&table(content), &source())
    }

    #[test]
    fn minimal_config_applies_defaults() {
        let settings = validate_str("[db]\ndb_file = \"nav.db\"\n").unwrap();
        assert_eq!(settings.db.file_path, PathBuf::from("nav.db"));
        assert_eq!(settings.db.on_collide, OnCollide::Overwrite);
        assert!(settings.navitrack.frecency);
        assert_eq!(settings.expiration, None);
    }

    #[test]
    fn missing_db_section() {
        let err = validate_str("[navitrack]\nfrecency = false\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        match err {
            ConfigError::MissingSection { section, path } => {
                assert_eq!(section, "db");
                assert_eq!(path, source());
            }
            other => panic!("Expected MissingSection, got: {other:?}"),
        }
    }

    #[test]
    fn missing_db_file() {
        let err = validate_str("[db]\non_collide = \"rename\"\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.field(), Some("db_file"));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn empty_db_file_rejected() {
        let err = validate_str("[db]\ndb_file = \"\"\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn non_string_db_file_rejected() {
        let err = validate_str("[db]\ndb_file = 42\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.field(), Some("db.db_file"));
    }

    #[test]
    fn on_collide_values() {
        for (token, expected) in [
            ("overwrite", OnCollide::Overwrite),
            ("rename", OnCollide::Rename),
            ("error", OnCollide::Error),
        ] {
            let content = format!("[db]\ndb_file = \"nav.db\"\non_collide = \"{token}\"\n");
            assert_eq!(validate_str(&content).unwrap().db.on_collide, expected);
        }
    }

    #[test]
    fn on_collide_outside_set() {
        let err = validate_str("[db]\ndb_file = \"nav.db\"\non_collide = \"skip\"\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(err, ConfigError::InvalidChoice { .. }));
        assert!(err.to_string().contains("overwrite, rename, error"));
    }

    #[test]
    fn frecency_false() {
        let settings =
            validate_str("[db]\ndb_file = \"nav.db\"\n[navitrack]\nfrecency = false\n").unwrap();
        assert!(!settings.navitrack.frecency);
    }

    #[test]
    fn frecency_empty_section_defaults_true() {
        let settings = validate_str("[db]\ndb_file = \"nav.db\"\n[navitrack]\n").unwrap();
        assert!(settings.navitrack.frecency);
    }

    #[test]
    fn frecency_non_boolean() {
        let err =
            validate_str("[db]\ndb_file = \"nav.db\"\n[navitrack]\nfrecency = \"yes\"\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.field(), Some("navitrack.frecency"));
    }

    #[test]
    fn expiration_hours_to_millis() {
        let settings = validate_str(
            "[db]\ndb_file = \"nav.db\"\n[expiration]\ntime = 5\nunit = \"h\"\n",
        )
        .unwrap();
        let exp = settings.expiration.unwrap();
        assert_eq!(exp.time(), 5);
        assert_eq!(exp.unit(), ExpirationUnit::Hours);
        assert_eq!(exp.behavior(), ExpirationBehavior::Shadow);
        assert_eq!(exp.time_in_milliseconds(), 18_000_000);
    }

    #[test]
    fn expiration_defaults_unit_and_behavior() {
        let settings =
            validate_str("[db]\ndb_file = \"nav.db\"\n[expiration]\ntime = 2\n").unwrap();
        let exp = settings.expiration.unwrap();
        assert_eq!(exp.unit(), ExpirationUnit::Minutes);
        assert_eq!(exp.behavior(), ExpirationBehavior::Shadow);
        assert_eq!(exp.time_in_milliseconds(), 120_000);
    }

    #[test]
    fn expiration_zero_is_valid() {
        let settings =
            validate_str("[db]\ndb_file = \"nav.db\"\n[expiration]\ntime = 0\nunit = \"d\"\n")
                .unwrap();
        assert_eq!(settings.expiration.unwrap().time_in_milliseconds(), 0);
    }

    #[test]
    fn negative_time_rejected_before_other_fields() {
        // unit is also invalid, but the range check on time comes first
        let err = validate_str(
            "[db]\ndb_file = \"nav.db\"\n[expiration]\ntime = -1\nunit = \"weeks\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { value: -1, .. }));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn overflowing_time_rejected() {
        let content = format!(
            "[db]\ndb_file = \"nav.db\"\n[expiration]\ntime = {}\nunit = \"d\"\n",
            i64::MAX
        );
        let err = validate_str(&content).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));
    }

    #[test]
    fn invalid_unit_and_behavior() {
        let err = validate_str("[db]\ndb_file = \"nav.db\"\n[expiration]\ntime = 1\nunit = \"w\"\n")
            .unwrap_err();
        assert_eq!(err.field(), Some("expiration.unit"));

        let err = validate_str(
            "[db]\ndb_file = \"nav.db\"\n[expiration]\ntime = 1\nbehavior = \"archive\"\n",
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("expiration.behavior"));
    }

    #[test]
    fn expiration_without_time_is_fully_unset() {
        let settings = validate_str(
            "[db]\ndb_file = \"nav.db\"\n[expiration]\nunit = \"h\"\nbehavior = \"delete\"\n",
        )
        .unwrap();
        assert_eq!(settings.expiration, None);
    }

    #[test]
    fn validate_is_idempotent() {
        let content = "[db]\ndb_file = \"nav.db\"\n[expiration]\ntime = 3\nunit = \"s\"\n";
        assert_eq!(validate_str(content).unwrap(), validate_str(content).unwrap());
    }

    #[test]
    fn from_table_creates_db_file() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("data").join("nav.db");
        let raw = table(&db_line(&db_path));

        let settings = Settings::from_table(&raw, &source()).unwrap();
        assert_eq!(settings.db.file_path, db_path);
        assert!(db_path.is_file());
    }

    #[test]
    fn validate_does_not_create_db_file() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("nav.db");
        let raw = table(&db_line(&db_path));

        Settings::validate(&raw, &source()).unwrap();
        assert!(!db_path.exists());
    }

    #[test]
    fn invalid_config_does_not_create_db_file() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("nav.db");
        let content = format!("{}on_collide = \"nope\"\n", db_line(&db_path));

        assert!(Settings::from_table(&table(&content), &source()).is_err());
        assert!(!db_path.exists());
    }
}
