//! Runtime configuration from environment variables.
//!
//! | Variable              | Default        |
//! |-----------------------|----------------|
//! | `AIRSENSE_DB_PATH`    | `airsense.db`  |
//! | `AIRSENSE_PAGE`       | `home`         |
//! | `AIRSENSE_LOG_MODE`   | `auto`         |
//! | `AIRSENSE_LOG_FILE`   | `airsense.log` |
//! | `AIRSENSE_SANITIZE_MAX_BYTES` | `16384` |

use std::path::PathBuf;

use crate::adapters::sanitize::DEFAULT_SANITIZE_MAX_BYTES;
use crate::domain::Page;
use crate::AirsenseError;

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise
    Auto,
    File,
    Stdout,
}

impl std::str::FromStr for LogMode {
    type Err = AirsenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" | "" => Ok(Self::Auto),
            "file" => Ok(Self::File),
            "stdout" => Ok(Self::Stdout),
            other => Err(AirsenseError::Config(format!(
                "AIRSENSE_LOG_MODE must be auto, file or stdout (got {other:?})"
            ))),
        }
    }
}

/// Startup configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub start_page: Page,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    /// Per-line input cap for the log sanitizer
    pub sanitize_max_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("airsense.db"),
            start_page: Page::Home,
            log_mode: LogMode::Auto,
            log_file: PathBuf::from("airsense.log"),
            sanitize_max_bytes: DEFAULT_SANITIZE_MAX_BYTES,
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns error if a variable is set to an unrecognized value.
    pub fn from_env() -> crate::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns error if a variable is set to an unrecognized value.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("AIRSENSE_DB_PATH") {
            config.db_path = PathBuf::from(path);
        }
        if let Some(page) = lookup("AIRSENSE_PAGE") {
            config.start_page = page.parse().map_err(AirsenseError::Config)?;
        }
        if let Some(mode) = lookup("AIRSENSE_LOG_MODE") {
            config.log_mode = mode.parse()?;
        }
        if let Some(file) = lookup("AIRSENSE_LOG_FILE") {
            config.log_file = PathBuf::from(file);
        }
        if let Some(raw) = lookup("AIRSENSE_SANITIZE_MAX_BYTES") {
            config.sanitize_max_bytes = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&v| v > 0)
                .ok_or_else(|| {
                    AirsenseError::Config(format!(
                        "AIRSENSE_SANITIZE_MAX_BYTES must be a positive integer (got {raw:?})"
                    ))
                })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None).expect("Should build");
        assert_eq!(config.db_path, PathBuf::from("airsense.db"));
        assert_eq!(config.start_page, Page::Home);
        assert_eq!(config.log_mode, LogMode::Auto);
        assert_eq!(config.sanitize_max_bytes, 16 * 1024);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("AIRSENSE_DB_PATH", "/tmp/a.db"),
            ("AIRSENSE_PAGE", "asthma"),
            ("AIRSENSE_LOG_MODE", "stdout"),
            ("AIRSENSE_SANITIZE_MAX_BYTES", "4096"),
        ]))
        .expect("Should build");

        assert_eq!(config.db_path, PathBuf::from("/tmp/a.db"));
        assert_eq!(config.start_page, Page::Asthma);
        assert_eq!(config.log_mode, LogMode::Stdout);
        assert_eq!(config.sanitize_max_bytes, 4096);
    }

    #[test]
    fn test_bad_values_are_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("AIRSENSE_PAGE", "settings")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("AIRSENSE_LOG_MODE", "syslog")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("AIRSENSE_SANITIZE_MAX_BYTES", "0")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("AIRSENSE_SANITIZE_MAX_BYTES", "lots")])).is_err());
    }
}
