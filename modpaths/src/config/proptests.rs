//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{Config, OverlayMapping, RetryConfig};
use super::validator::ConfigValidator;
use proptest::prelude::*;

fn retry_strategy() -> impl Strategy<Value = RetryConfig> {
    (
        prop::option::of(1u32..20),
        prop::option::of(0u64..5000),
        prop::option::of(1u32..20),
        prop::option::of(0u64..5000),
    )
        .prop_map(
            |(move_attempts, move_delay_ms, delete_attempts, delete_delay_ms)| RetryConfig {
                move_attempts,
                move_delay_ms,
                delete_attempts,
                delete_delay_ms,
            },
        )
}

fn overlay_strategy() -> impl Strategy<Value = Vec<OverlayMapping>> {
    prop::collection::btree_map("/[a-z]{1,8}", "/[A-Z]{1,8}", 0..5).prop_map(|map| {
        map.into_iter()
            .map(|(from, to)| OverlayMapping { from, to })
            .collect()
    })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of("/[a-z]{1,20}"),
        prop::option::of(any::<bool>()),
        prop::option::of(retry_strategy()),
        prop::option::of(overlay_strategy()),
    )
        .prop_map(|(temp_root, delete_temp_on_drop, retry, overlay)| Config {
            temp_root,
            delete_temp_on_drop,
            retry,
            overlay,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Higher-precedence values win, lower ones survive where the higher is unset
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(merged.temp_root.clone(), high.temp_root.clone().or(low.temp_root.clone()));
        prop_assert_eq!(merged.delete_temp_on_drop, high.delete_temp_on_drop.or(low.delete_temp_on_drop));

        let low_retry = low.retry.unwrap_or_default();
        let high_retry = high.retry.unwrap_or_default();
        let merged_retry = merged.retry.unwrap_or_default();
        prop_assert_eq!(merged_retry.move_attempts, high_retry.move_attempts.or(low_retry.move_attempts));
        prop_assert_eq!(merged_retry.delete_delay_ms, high_retry.delete_delay_ms.or(low_retry.delete_delay_ms));
    }

    // Merging an empty config changes nothing
    #[test]
    fn config_merge_empty_is_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    // Merging is idempotent
    #[test]
    fn config_merge_idempotent(low in config_strategy(), high in config_strategy()) {
        let mut once = low;
        ConfigMerger::merge_into(&mut once, &high);
        let mut twice = once.clone();
        ConfigMerger::merge_into(&mut twice, &high);
        prop_assert_eq!(once, twice);
    }

    // Merged overlays never map a path twice, so generated configs stay valid
    #[test]
    fn config_merge_keeps_overlay_valid(low in config_strategy(), high in config_strategy()) {
        let mut merged = low;
        ConfigMerger::merge_into(&mut merged, &high);
        prop_assert!(ConfigValidator::validate(&merged).is_ok());

        if let Some(high_overlay) = &high.overlay {
            let merged_overlay = merged.overlay.as_ref().unwrap();
            for mapping in high_overlay {
                prop_assert!(merged_overlay.contains(mapping));
            }
        }
    }
}
