//! Runtime configuration for table sessions.
//!
//! # Responsibility
//! - Resolve database path, storage key and logging settings.
//! - Apply environment overrides on top of built-in defaults.
//!
//! # Invariants
//! - Blank environment values are ignored, never applied.
//! - Resolution never fails; invalid log levels surface at `init_logging`.

use crate::logging::default_log_level;
use crate::repo::row_repo::DEFAULT_STORAGE_KEY;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "ROWDECK_DB_PATH";
pub const STORAGE_KEY_ENV: &str = "ROWDECK_STORAGE_KEY";
pub const LOG_LEVEL_ENV: &str = "ROWDECK_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "ROWDECK_LOG_DIR";

const DB_FILE_NAME: &str = "rowdeck.sqlite3";
const LOG_DIR_NAME: &str = "rowdeck-logs";

/// Settings shared by the FFI and CLI entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// SQLite file holding the key-value store.
    pub db_path: PathBuf,
    /// Key the row collection is stored under.
    pub storage_key: String,
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
}

impl Default for TableConfig {
    fn default() -> Self {
        let temp = std::env::temp_dir();
        Self {
            db_path: temp.join(DB_FILE_NAME),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: temp.join(LOG_DIR_NAME),
        }
    }
}

impl TableConfig {
    /// Defaults overridden by `ROWDECK_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns per variable name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(key) = read(STORAGE_KEY_ENV) {
            config.storage_key = key;
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = level;
        }
        if let Some(dir) = read(LOG_DIR_ENV) {
            config.log_dir = PathBuf::from(dir);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::{TableConfig, DB_PATH_ENV, LOG_LEVEL_ENV, STORAGE_KEY_ENV};
    use crate::repo::row_repo::DEFAULT_STORAGE_KEY;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn defaults_use_the_classic_storage_key() {
        let config = TableConfig::from_lookup(|_| None);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert!(config.db_path.ends_with("rowdeck.sqlite3"));
        assert!(config.log_dir.is_absolute());
    }

    #[test]
    fn lookup_overrides_and_ignores_blank_values() {
        let vars = HashMap::from([
            (DB_PATH_ENV, " /data/rows.sqlite3 "),
            (STORAGE_KEY_ENV, "   "),
            (LOG_LEVEL_ENV, "warn"),
        ]);
        let config = TableConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(config.db_path, PathBuf::from("/data/rows.sqlite3"));
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.log_level, "warn");
    }
}
