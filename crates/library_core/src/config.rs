//! Environment-supplied runtime configuration.
//!
//! # Responsibility
//! - Resolve database and logging settings from environment variables.
//! - Keep parsing testable through an injectable key lookup.
//!
//! # Invariants
//! - Nothing here touches the filesystem; paths are only parsed.
//! - Blank values are treated the same as unset ones.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const DB_PATH_VAR: &str = "LIBRARY_DB_PATH";
pub const DB_BUSY_TIMEOUT_VAR: &str = "LIBRARY_DB_BUSY_TIMEOUT_MS";
pub const LOG_LEVEL_VAR: &str = "LIBRARY_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "LIBRARY_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "library.sqlite3";
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value, reason } => {
                write!(f, "invalid value `{value}` for {key}: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Storage connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// SQLite database file.
    pub path: PathBuf,
    /// How long one connection waits on a locked database.
    pub busy_timeout: Duration,
}

impl DbConfig {
    /// Creates a config for `path` with the default busy timeout.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Reads `LIBRARY_DB_PATH` and `LIBRARY_DB_BUSY_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DbConfig::from_env`] with a caller-provided lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let path = non_blank(lookup(DB_PATH_VAR))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME));

        let busy_timeout = match non_blank(lookup(DB_BUSY_TIMEOUT_VAR)) {
            None => DEFAULT_BUSY_TIMEOUT,
            Some(raw) => raw
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidValue {
                    key: DB_BUSY_TIMEOUT_VAR,
                    value: raw.clone(),
                    reason: "expected milliseconds as a non-negative integer",
                })?,
        };

        Ok(Self { path, busy_timeout })
    }
}

/// Logging settings consumed by [`crate::logging::init_logging`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// One of `trace|debug|info|warn|error`.
    pub level: String,
    /// Rolling log file directory. `None` logs to stderr.
    pub log_dir: Option<PathBuf>,
}

impl LogConfig {
    /// Reads `LIBRARY_LOG_LEVEL` and `LIBRARY_LOG_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LogConfig::from_env`] with a caller-provided lookup.
    ///
    /// # Errors
    /// - Returns an error when the level is unknown or the log directory is
    ///   not absolute.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let level = match non_blank(lookup(LOG_LEVEL_VAR)) {
            None => crate::logging::default_log_level(),
            Some(raw) => crate::logging::normalize_level(&raw).map_err(|_| {
                ConfigError::InvalidValue {
                    key: LOG_LEVEL_VAR,
                    value: raw.clone(),
                    reason: "expected one of trace|debug|info|warn|error",
                }
            })?,
        }
        .to_string();

        let log_dir = match non_blank(lookup(LOG_DIR_VAR)) {
            None => None,
            Some(raw) => {
                let path = PathBuf::from(&raw);
                if !path.is_absolute() {
                    return Err(ConfigError::InvalidValue {
                        key: LOG_DIR_VAR,
                        value: raw,
                        reason: "log directory must be an absolute path",
                    });
                }
                Some(path)
            }
        };

        Ok(Self { level, log_dir })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{
        ConfigError, DbConfig, LogConfig, DB_BUSY_TIMEOUT_VAR, DB_PATH_VAR, LOG_DIR_VAR,
        LOG_LEVEL_VAR,
    };
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn db_config_defaults_when_unset() {
        let config = DbConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.path, PathBuf::from("library.sqlite3"));
        assert_eq!(config.busy_timeout, Duration::from_secs(5));
    }

    #[test]
    fn db_config_reads_path_and_timeout() {
        let config = DbConfig::from_lookup(lookup(&[
            (DB_PATH_VAR, " /var/lib/library/db.sqlite3 "),
            (DB_BUSY_TIMEOUT_VAR, "250"),
        ]))
        .unwrap();
        assert_eq!(config.path, PathBuf::from("/var/lib/library/db.sqlite3"));
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
    }

    #[test]
    fn db_config_rejects_non_numeric_timeout() {
        let err = DbConfig::from_lookup(lookup(&[(DB_BUSY_TIMEOUT_VAR, "soon")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: DB_BUSY_TIMEOUT_VAR,
                ..
            }
        ));
    }

    #[test]
    fn log_config_blank_dir_means_stderr_and_relative_dir_is_rejected() {
        let config = LogConfig::from_lookup(lookup(&[(LOG_DIR_VAR, "  ")])).unwrap();
        assert_eq!(config.log_dir, None);
        assert!(!config.level.is_empty());

        let err = LogConfig::from_lookup(lookup(&[(LOG_DIR_VAR, "logs/dev")])).unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn log_config_normalizes_level_and_rejects_unknown() {
        let config = LogConfig::from_lookup(lookup(&[(LOG_LEVEL_VAR, " Warning ")])).unwrap();
        assert_eq!(config.level, "warn");

        let err = LogConfig::from_lookup(lookup(&[(LOG_LEVEL_VAR, "verbose")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: LOG_LEVEL_VAR,
                value: "verbose".to_string(),
                reason: "expected one of trace|debug|info|warn|error",
            }
        );
    }
}
