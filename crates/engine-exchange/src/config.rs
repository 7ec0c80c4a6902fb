//! Configuration for the exchange simulation.
//!
//! Layered, later wins:
//! 1. defaults
//! 2. optional TOML file
//! 3. environment variables
//! 4. command-line flags (applied by `main`)
//!
//! Environment variables:
//!
//! - `EXCHANGE_POLL_INTERVAL_MS` (default: "500")
//! - `EXCHANGE_MODE`             (default: "sequential")
//! - `EXCHANGE_SNAPSHOT_DIR`     (default: ".")
//! - `EXCHANGE_SEED`             (default: "true")

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::exchange::ExecutionMode;
use crate::retry::DEFAULT_POLL_INTERVAL;

/// Exchange configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Retry loop polling period in milliseconds.
    pub poll_interval_ms: u64,

    /// Run retry loops one after another or all at once.
    pub mode: ExecutionMode,

    /// Directory the final book snapshot is written into.
    pub snapshot_dir: PathBuf,

    /// Pre-load the book with the sample entries.
    pub seed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            mode: ExecutionMode::Sequential,
            snapshot_dir: PathBuf::from("."),
            seed: true,
        }
    }
}

impl Config {
    /// Defaults, overlaid with `path` (if any), then with the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Config::from_toml_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Parse TOML; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Override fields from `EXCHANGE_*` variables that are set.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Some(ms) = read_env("EXCHANGE_POLL_INTERVAL_MS")? {
            self.poll_interval_ms = ms;
        }
        if let Some(mode) = read_env("EXCHANGE_MODE")? {
            self.mode = mode;
        }
        if let Ok(dir) = env::var("EXCHANGE_SNAPSHOT_DIR") {
            self.snapshot_dir = PathBuf::from(dir);
        }
        if let Some(seed) = read_env("EXCHANGE_SEED")? {
            self.seed = seed;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.poll_interval_ms > 0, "poll_interval_ms must be greater than zero");
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn read_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(val) => {
            let parsed = val
                .trim()
                .parse::<T>()
                .with_context(|| format!("invalid value {:?} for {}", val, key))?;
            Ok(Some(parsed))
        }
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml_str("mode = \"concurrent\"\npoll_interval_ms = 50\n").unwrap();
        assert_eq!(config.mode, ExecutionMode::Concurrent);
        assert_eq!(config.poll_interval(), Duration::from_millis(50));
        assert_eq!(config.snapshot_dir, PathBuf::from("."));
        assert!(config.seed);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_toml_str("pole_interval_ms = 5").is_err());
    }

    #[test]
    fn zero_poll_interval_is_invalid() {
        let config = Config {
            poll_interval_ms: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }

    // The only test that touches the process environment.
    #[test]
    fn environment_overrides_file_values() {
        env::set_var("EXCHANGE_POLL_INTERVAL_MS", "125");
        env::set_var("EXCHANGE_MODE", "Concurrent");
        env::set_var("EXCHANGE_SEED", "false");

        let mut config = Config::from_toml_str("poll_interval_ms = 900").unwrap();
        let applied = config.apply_env();

        env::remove_var("EXCHANGE_POLL_INTERVAL_MS");
        env::remove_var("EXCHANGE_MODE");
        env::remove_var("EXCHANGE_SEED");

        applied.unwrap();
        assert_eq!(config.poll_interval_ms, 125);
        assert_eq!(config.mode, ExecutionMode::Concurrent);
        assert!(!config.seed);
    }
}
