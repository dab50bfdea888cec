//! Declarative layout of the config file.
//!
//! These structs mirror the TOML sections one to one. They are not used to
//! load settings (see [`Settings`](crate::Settings) for that); they drive the
//! generated template and the strict-mode unknown-key check.

use std::path::PathBuf;

use confique::Config;

use crate::types::{ExpirationBehavior, ExpirationUnit, OnCollide};

/// navitrack configuration.
#[derive(Config, Debug)]
pub struct FileSchema {
    /// Database settings.
    #[config(nested)]
    pub db: DbSection,

    /// Feature flags.
    #[config(nested)]
    pub navitrack: NavitrackSection,

    /// Expiration policy. Leave `time` unset to disable expiration; `unit`
    /// and `behavior` only apply when `time` is set.
    #[config(nested)]
    pub expiration: ExpirationSection,
}

#[derive(Config, Debug)]
pub struct DbSection {
    /// Path to the database file. Created, along with its parent
    /// directories, if it does not exist.
    pub db_file: PathBuf,

    /// What to do when an entry already exists: overwrite, rename or error.
    #[config(default = "overwrite")]
    pub on_collide: OnCollide,
}

#[derive(Config, Debug)]
pub struct NavitrackSection {
    /// Rank entries by frequency and recency.
    #[config(default = true)]
    pub frecency: bool,
}

#[derive(Config, Debug)]
pub struct ExpirationSection {
    /// Age after which an entry expires, in `unit`. Must be non-negative.
    pub time: Option<u64>,

    /// Unit of `time`: ms, s, m, h or d.
    #[config(default = "m")]
    pub unit: ExpirationUnit,

    /// What happens to an expired entry: shadow, delete or backup.
    #[config(default = "shadow")]
    pub behavior: ExpirationBehavior,
}
