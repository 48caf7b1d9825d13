//! Configuration merging and precedence handling.
//!
//! This module implements hierarchical merging of configuration sources,
//! with special handling for the accumulated `overlay` table.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, RetryConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use modpaths::config::{Config, ConfigMerger};
///
/// let low = Config { temp_root: Some("/low".to_string()), ..Default::default() };
/// let high = Config { temp_root: Some("/high".to_string()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.temp_root, Some("/high".to_string()));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Retry settings: field-by-field merge
    /// - Overlay mappings: accumulated, a source entry replaces any target
    ///   entry with the same `from`
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.temp_root.is_some() {
            target.temp_root.clone_from(&source.temp_root);
        }

        if source.delete_temp_on_drop.is_some() {
            target.delete_temp_on_drop = source.delete_temp_on_drop;
        }

        if let Some(source_retry) = source.retry {
            target.retry = Some(match target.retry {
                Some(target_retry) => Self::merge_retry(&target_retry, &source_retry),
                None => source_retry,
            });
        }

        if let Some(ref source_overlay) = source.overlay {
            let target_overlay = target.overlay.get_or_insert_with(Vec::new);
            for mapping in source_overlay {
                target_overlay.retain(|existing| existing.from != mapping.from);
                target_overlay.push(mapping.clone());
            }
        }
    }

    /// Merge retry configuration.
    ///
    /// Source values take precedence over target values.
    fn merge_retry(target: &RetryConfig, source: &RetryConfig) -> RetryConfig {
        RetryConfig {
            move_attempts: source.move_attempts.or(target.move_attempts),
            move_delay_ms: source.move_delay_ms.or(target.move_delay_ms),
            delete_attempts: source.delete_attempts.or(target.delete_attempts),
            delete_delay_ms: source.delete_delay_ms.or(target.delete_delay_ms),
        }
    }
}
