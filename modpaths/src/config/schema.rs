//! Configuration schema definitions.
//!
//! This module defines the configuration structure for modpaths: where
//! temporary files go, how long racing filesystem operations are retried, and
//! which paths an overlay filesystem should redirect.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::filesystem::{FileSystemRef, RetryPolicy};
use crate::path::AbsolutePath;

/// Complete configuration structure.
///
/// Every field is optional so that configuration files and environment
/// variables can each supply a subset.
///
/// # Examples
///
/// ```
/// use modpaths::config::{Config, RetryConfig};
///
/// let config = Config {
///     temp_root: Some("/var/tmp/mods".to_string()),
///     retry: Some(RetryConfig {
///         move_attempts: Some(3),
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.retry_policy().move_retries, 2);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory temporary-file managers create their base folders in.
    pub temp_root: Option<String>,

    /// Whether temporary-file managers delete their folders when disposed.
    pub delete_temp_on_drop: Option<bool>,

    /// Retry settings for moves and recursive deletes.
    pub retry: Option<RetryConfig>,

    /// Path redirections for an overlay filesystem.
    pub overlay: Option<Vec<OverlayMapping>>,
}

impl Config {
    /// The retry policy described by this configuration.
    ///
    /// Unset values fall back to [`RetryPolicy::default`].
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        let defaults = RetryPolicy::default();
        let Some(retry) = &self.retry else {
            return defaults;
        };

        RetryPolicy {
            move_retries: retry
                .move_attempts
                .map_or(defaults.move_retries, |attempts| attempts.saturating_sub(1)),
            move_delay: retry
                .move_delay_ms
                .map_or(defaults.move_delay, Duration::from_millis),
            delete_attempts: retry.delete_attempts.unwrap_or(defaults.delete_attempts),
            delete_delay: retry
                .delete_delay_ms
                .map_or(defaults.delete_delay, Duration::from_millis),
        }
    }

    /// The overlay table described by this configuration, with paths parsed
    /// on `fs`.
    #[must_use]
    pub fn overlay_mappings(&self, fs: &FileSystemRef) -> HashMap<AbsolutePath, AbsolutePath> {
        self.overlay
            .iter()
            .flatten()
            .map(|mapping| {
                (
                    AbsolutePath::from_full_path(&mapping.from, fs.clone()),
                    AbsolutePath::from_full_path(&mapping.to, fs.clone()),
                )
            })
            .collect()
    }
}

/// Retry configuration.
///
/// Attempts count the first try, so `move_attempts: 1` disables retries.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
    /// Total attempts for a move.
    pub move_attempts: Option<u32>,

    /// Milliseconds between move attempts.
    pub move_delay_ms: Option<u64>,

    /// Total attempts for a recursive directory delete.
    pub delete_attempts: Option<u32>,

    /// Milliseconds between delete attempts.
    pub delete_delay_ms: Option<u64>,
}

/// A single overlay redirection.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OverlayMapping {
    /// The full path callers use.
    pub from: String,

    /// The full path physical operations are performed on.
    pub to: String,
}
