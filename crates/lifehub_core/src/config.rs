//! Runtime configuration for the core and CLI.
//!
//! Values come from the environment with per-user defaults:
//! - `LIFEHUB_DATA_DIR` (default `<data_local_dir>/lifehub`)
//! - `LIFEHUB_LOG_LEVEL` (default [`default_log_level`])

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "LIFEHUB_DATA_DIR";
pub const LOG_LEVEL_ENV: &str = "LIFEHUB_LOG_LEVEL";

const DB_FILE_NAME: &str = "lifehub.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NoDataDir,
    RelativeDataDir(PathBuf),
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDataDir => write!(
                f,
                "no per-user data directory on this platform; set {DATA_DIR_ENV}"
            ),
            Self::RelativeDataDir(dir) => write!(
                f,
                "{DATA_DIR_ENV} must be an absolute path, got `{}`",
                dir.display()
            ),
            Self::InvalidLogLevel(level) => write!(
                f,
                "{LOG_LEVEL_ENV}=`{level}` is not one of trace|debug|info|warn|error"
            ),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
}

fn default_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("lifehub"))
}

impl CoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            log_level: default_log_level().to_string(),
        }
    }

    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_dir = match read(DATA_DIR_ENV) {
            Some(raw) => {
                let dir = PathBuf::from(raw.trim());
                if !dir.is_absolute() {
                    return Err(ConfigError::RelativeDataDir(dir));
                }
                dir
            }
            None => default_data_dir().ok_or(ConfigError::NoDataDir)?,
        };

        let log_level = match read(LOG_LEVEL_ENV) {
            Some(raw) => normalize_level(&raw)
                .map_err(|_| ConfigError::InvalidLogLevel(raw))?
                .to_string(),
            None => default_log_level().to_string(),
        };

        Ok(Self {
            data_dir,
            log_level,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, DATA_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn explicit_values_are_used() {
        let config = CoreConfig::from_lookup(lookup(&[
            (DATA_DIR_ENV, "/tmp/lifehub-test"),
            (LOG_LEVEL_ENV, "WARNING"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/lifehub-test"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(
            config.db_path(),
            PathBuf::from("/tmp/lifehub-test/lifehub.sqlite3")
        );
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/lifehub-test/logs"));
    }

    #[test]
    fn relative_data_dir_is_rejected() {
        let err = CoreConfig::from_lookup(lookup(&[(DATA_DIR_ENV, "data")])).unwrap_err();
        assert_eq!(err, ConfigError::RelativeDataDir(PathBuf::from("data")));
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let err = CoreConfig::from_lookup(lookup(&[
            (DATA_DIR_ENV, "/tmp/lifehub-test"),
            (LOG_LEVEL_ENV, "chatty"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidLogLevel("chatty".to_string()));
    }

    #[test]
    fn blank_level_falls_back_to_build_default() {
        let config = CoreConfig::from_lookup(lookup(&[
            (DATA_DIR_ENV, "/tmp/lifehub-test"),
            (LOG_LEVEL_ENV, "  "),
        ]))
        .unwrap();
        assert_eq!(config.log_level, crate::logging::default_log_level());
    }
}
