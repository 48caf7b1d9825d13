//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `MODPATHS_*` environment variables that
//! override configuration file values.

use std::env;
use std::str::FromStr;

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Overrides the temporary-file root directory.
pub const ENV_TEMP_DIR: &str = "MODPATHS_TEMP_DIR";
/// Overrides whether temporary folders are deleted on dispose.
pub const ENV_DELETE_TEMP: &str = "MODPATHS_DELETE_TEMP";
/// Overrides the number of move attempts.
pub const ENV_MOVE_ATTEMPTS: &str = "MODPATHS_MOVE_ATTEMPTS";
/// Overrides the delay between move attempts in milliseconds.
pub const ENV_MOVE_DELAY_MS: &str = "MODPATHS_MOVE_DELAY_MS";
/// Overrides the number of recursive delete attempts.
pub const ENV_DELETE_ATTEMPTS: &str = "MODPATHS_DELETE_ATTEMPTS";
/// Overrides the delay between delete attempts in milliseconds.
pub const ENV_DELETE_DELAY_MS: &str = "MODPATHS_DELETE_DELAY_MS";

/// Every variable read by [`EnvironmentConfig::apply_overrides`].
pub const ALL_VARIABLES: [&str; 6] = [
    ENV_TEMP_DIR,
    ENV_DELETE_TEMP,
    ENV_MOVE_ATTEMPTS,
    ENV_MOVE_DELAY_MS,
    ENV_DELETE_ATTEMPTS,
    ENV_DELETE_DELAY_MS,
];

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use modpaths::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error naming the variable if a value cannot be
    /// parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(dir) = env::var(ENV_TEMP_DIR) {
            config.temp_root = Some(dir);
        }

        if let Ok(val) = env::var(ENV_DELETE_TEMP) {
            config.delete_temp_on_drop = Some(Self::parse_bool(ENV_DELETE_TEMP, &val)?);
        }

        Self::apply_retry_overrides(config)
    }

    fn apply_retry_overrides(config: &mut Config) -> Result<()> {
        let mut retry = config.retry.unwrap_or_default();
        let mut modified = false;

        if let Ok(val) = env::var(ENV_MOVE_ATTEMPTS) {
            retry.move_attempts = Some(Self::parse_number(ENV_MOVE_ATTEMPTS, &val)?);
            modified = true;
        }

        if let Ok(val) = env::var(ENV_MOVE_DELAY_MS) {
            retry.move_delay_ms = Some(Self::parse_number(ENV_MOVE_DELAY_MS, &val)?);
            modified = true;
        }

        if let Ok(val) = env::var(ENV_DELETE_ATTEMPTS) {
            retry.delete_attempts = Some(Self::parse_number(ENV_DELETE_ATTEMPTS, &val)?);
            modified = true;
        }

        if let Ok(val) = env::var(ENV_DELETE_DELAY_MS) {
            retry.delete_delay_ms = Some(Self::parse_number(ENV_DELETE_DELAY_MS, &val)?);
            modified = true;
        }

        if modified {
            config.retry = Some(retry);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    fn parse_number<T: FromStr>(field: &str, s: &str) -> Result<T> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("Must be a non-negative integer, got '{s}'"),
        })
    }
}
