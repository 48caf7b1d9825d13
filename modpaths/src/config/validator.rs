//! Configuration validation.
//!
//! This module checks that merged configuration values are usable before
//! they reach the filesystem layer.

use std::collections::HashSet;

use crate::config::schema::{Config, OverlayMapping, RetryConfig};
use crate::error::{Error, Result};

/// Upper bound on any retry delay, in milliseconds.
pub const MAX_RETRY_DELAY_MS: u64 = 60_000;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use modpaths::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error naming the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref root) = config.temp_root {
            if root.trim().is_empty() {
                return Err(Error::Validation {
                    field: "temp_root".into(),
                    message: "Temporary directory cannot be empty".into(),
                });
            }
            if root.contains('\0') {
                return Err(Error::Validation {
                    field: "temp_root".into(),
                    message: "Temporary directory cannot contain null bytes".into(),
                });
            }
        }

        if let Some(ref retry) = config.retry {
            Self::validate_retry(retry)?;
        }

        if let Some(ref overlay) = config.overlay {
            Self::validate_overlay(overlay)?;
        }

        Ok(())
    }

    fn validate_retry(retry: &RetryConfig) -> Result<()> {
        for (field, attempts) in [
            ("retry.move_attempts", retry.move_attempts),
            ("retry.delete_attempts", retry.delete_attempts),
        ] {
            if attempts == Some(0) {
                return Err(Error::Validation {
                    field: field.into(),
                    message: "Attempts must be at least 1".into(),
                });
            }
        }

        for (field, delay) in [
            ("retry.move_delay_ms", retry.move_delay_ms),
            ("retry.delete_delay_ms", retry.delete_delay_ms),
        ] {
            if delay.is_some_and(|ms| ms > MAX_RETRY_DELAY_MS) {
                return Err(Error::Validation {
                    field: field.into(),
                    message: format!("Delay cannot exceed {MAX_RETRY_DELAY_MS} ms"),
                });
            }
        }

        Ok(())
    }

    fn validate_overlay(overlay: &[OverlayMapping]) -> Result<()> {
        let mut seen = HashSet::new();
        for (index, mapping) in overlay.iter().enumerate() {
            let field = format!("overlay[{index}]");
            if mapping.from.trim().is_empty() || mapping.to.trim().is_empty() {
                return Err(Error::Validation {
                    field,
                    message: "Overlay paths cannot be empty".into(),
                });
            }
            if mapping.from == mapping.to {
                return Err(Error::Validation {
                    field,
                    message: format!("'{}' is mapped to itself", mapping.from),
                });
            }
            if !seen.insert(mapping.from.as_str()) {
                return Err(Error::Validation {
                    field,
                    message: format!("'{}' is mapped more than once", mapping.from),
                });
            }
        }
        Ok(())
    }
}
