//! Runtime configuration for the `notekeep` binary.
//!
//! # Responsibility
//! - Resolve the SQLite store path and optional file logging settings.
//!
//! # Invariants
//! - Precedence is `--db` flag, then `NOTEKEEP_DB_PATH`, then the temp dir.
//! - Blank environment values count as unset.

use notekeep_core::{default_log_level, LogLevel};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "NOTEKEEP_DB_PATH";
pub const LOG_DIR_ENV: &str = "NOTEKEEP_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "NOTEKEEP_LOG_LEVEL";
const DEFAULT_DB_FILE_NAME: &str = "notekeep.sqlite3";

/// File logging target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LogLevel,
    pub dir: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub log: Option<LogSettings>,
}

impl CliConfig {
    /// Resolves configuration from the flag and process environment.
    pub fn resolve(db_flag: Option<PathBuf>) -> Self {
        Self::from_sources(db_flag, |name| std::env::var(name).ok())
    }

    /// Resolves configuration from an arbitrary variable lookup.
    pub fn from_sources(db_flag: Option<PathBuf>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = db_flag
            .or_else(|| non_blank(lookup(DB_PATH_ENV)).map(PathBuf::from))
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

        let log = non_blank(lookup(LOG_DIR_ENV)).map(|dir| LogSettings {
            level: non_blank(lookup(LOG_LEVEL_ENV))
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_else(default_log_level),
            dir,
        });

        Self { db_path, log }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}
