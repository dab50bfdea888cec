//! Validated, typed configuration for navitrack.
//!
//! The config file is TOML with three sections:
//!
//! ```toml
//! [db]
//! db_file = "/var/lib/navitrack/nav.db"   # required
//! on_collide = "overwrite"                # overwrite | rename | error
//!
//! [navitrack]
//! frecency = true
//!
//! [expiration]
//! time = 30                               # non-negative; omit to disable
//! unit = "d"                              # ms | s | m | h | d
//! behavior = "shadow"                     # shadow | delete | backup
//! ```
//!
//! Load it once at startup and pass the result to whatever needs it:
//!
//! ```ignore
//! let config = navitrack_config::Config::new(None)?;
//! if let Some(ms) = config.expiration_time_in_milliseconds() {
//!     // ...
//! }
//! ```
//!
//! # Pipeline
//!
//! Loading is two strictly layered steps:
//!
//! 1. **Read**: the file is parsed into a raw [`toml::Table`]. Missing,
//!    unreadable or malformed files fail here.
//! 2. **Validate**: [`Settings::validate`] walks the table once, checking the
//!    required `[db]` section and `db_file` key, the type of every known key,
//!    and membership of enum-like values in their accepted sets. Absent
//!    optional keys take their defaults and the expiration time is converted
//!    to milliseconds.
//!
//! Finally the database file is created, with its parent directories, if it
//! does not exist yet. That is the only write loading ever performs.
//!
//! # Expiration is all or nothing
//!
//! Without `expiration.time`, expiration is disabled: unit, behavior and the
//! millisecond value are all `None`, even if `unit` or `behavior` are set.
//! With `time` set, missing `unit` defaults to `m` and missing `behavior`
//! to `shadow`.
//!
//! # Strict mode
//!
//! By default keys the crate doesn't know are ignored. With
//! [`ConfigBuilder::strict`], each unknown key is reported with the file path
//! and line number:
//!
//! ```text
//! Unknown key 'db.db_fiel' in /etc/navitrack/config.toml (line 3)
//! ```
//!
//! # Errors
//!
//! Every fallible operation returns [`ConfigError`]. Use
//! [`ConfigError::kind`] to branch on the failure category:
//!
//! | [`ErrorKind`] | Meaning |
//! |---|---|
//! | `Parse` | file missing, unreadable or not TOML |
//! | `NotFound` | `[db]` or `db.db_file` absent |
//! | `Validation` | wrong type, value outside its set, negative time, unknown key |
//! | `Configuration` | the database file cannot be created |
//!
//! # Template
//!
//! [`generate_template`] renders a commented config file listing every key
//! with its default.

pub mod error;
pub mod types;

mod builder;
mod config;
mod db;
mod file;
mod ops;
mod schema;
mod settings;
mod strict;
mod validate;

#[cfg(test)]
mod fixtures;

pub use builder::ConfigBuilder;
pub use config::Config;
pub use db::ensure_db_file;
pub use error::{ConfigError, ErrorKind};
pub use file::{DEFAULT_CONFIG_FILE_NAME, default_config_path, read_config};
pub use ops::{generate_template, write_template};
pub use schema::FileSchema;
pub use settings::{DbSettings, Expiration, NavitrackSettings, Settings};
pub use types::{Choice, ExpirationBehavior, ExpirationUnit, OnCollide};
