//! Property-based tests for rust_logger_factory using proptest

use proptest::prelude::*;
use rust_logger_factory::prelude::*;
use serde_json::{json, Map, Value};
use std::sync::Arc;

fn level_strategy() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LogLevel::ALL.to_vec())
}

/// Distinct channel names, in random declaration order
fn channel_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z]{1,8}", 1..6)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

fn config_with_channels(channels: &[String], handlers: &[&str]) -> Value {
    let loggers: Map<String, Value> = channels
        .iter()
        .map(|c| (c.clone(), json!(handlers)))
        .collect();
    json!({
        "handlers": { "mem": { "class": "memory" } },
        "loggers": loggers
    })
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in level_strategy()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Level names parse regardless of case
    #[test]
    fn test_log_level_case_insensitive(level in level_strategy(), use_lower in any::<bool>()) {
        let name = if use_lower {
            level.to_str().to_lowercase()
        } else {
            level.to_str().to_string()
        };
        prop_assert_eq!(name.parse::<LogLevel>().unwrap(), level);
    }

    /// Test that LogLevel ordering is consistent
    #[test]
    fn test_log_level_ordering(level1 in level_strategy(), level2 in level_strategy()) {
        prop_assert_eq!(level1 <= level2, (level1 as u8) <= (level2 as u8));
    }
}

// ============================================================================
// Channel Resolution Tests
// ============================================================================

proptest! {
    /// Without an explicit default, the first declared channel is the default
    #[test]
    fn test_default_is_first_declared(channels in channel_names()) {
        let factory = LoggerFactory::build(&config_with_channels(&channels, &["mem"]));
        prop_assert_eq!(factory.get_default(), channels[0].as_str());
    }

    /// Undeclared channel names resolve to the default logger
    #[test]
    fn test_unknown_channel_resolves_to_default(
        channels in channel_names(),
        requested in "[A-Z0-9]{1,8}",
    ) {
        let mut factory = LoggerFactory::build(&config_with_channels(&channels, &["mem"]));
        let default = factory.get(None).unwrap();
        let resolved = factory.get(Some(&requested)).unwrap();
        prop_assert!(Arc::ptr_eq(&default, &resolved));
    }

    /// Every declared channel is cached after its first access
    #[test]
    fn test_declared_channels_are_cached(channels in channel_names()) {
        let mut factory = LoggerFactory::build(&config_with_channels(&channels, &["mem"]));
        for channel in &channels {
            let first = factory.get(Some(channel)).unwrap();
            let second = factory.get(Some(channel)).unwrap();
            prop_assert!(Arc::ptr_eq(&first, &second));
            prop_assert_eq!(first.channel(), channel.as_str());
        }
    }
}

// ============================================================================
// Pipeline Tests
// ============================================================================

proptest! {
    /// Only names with a handler definition produce handlers, in order
    #[test]
    fn test_unknown_handler_names_are_skipped(
        names in prop::collection::vec(prop::sample::select(vec!["mem", "quiet", "ghost", "phantom"]), 1..10)
    ) {
        let factory = LoggerFactory::build(&json!({
            "handlers": {
                "mem": { "class": "memory" },
                "quiet": { "class": "null" }
            },
            "loggers": { "app": [] }
        }));

        let logger = factory.make("app", names.as_slice()).unwrap();
        let expected: Vec<String> = names
            .iter()
            .filter_map(|n| match *n {
                "mem" => Some("memory".to_string()),
                "quiet" => Some("null".to_string()),
                _ => None,
            })
            .collect();
        prop_assert_eq!(logger.handler_names(), expected);
    }

    /// Handler levels from configuration filter records
    #[test]
    fn test_handler_level_filters(threshold in level_strategy(), level in level_strategy()) {
        let appender = MemoryAppender::new(10);
        let records = appender.handle();
        let mut handler = Handler::new(appender).with_level(threshold);

        let written = handler.handle(&LogEntry::new("app", level, "probe")).unwrap();
        prop_assert_eq!(written, level >= threshold);
        prop_assert_eq!(records.len(), usize::from(written));
    }

    /// Messages never produce more than one line
    #[test]
    fn test_message_sanitization(message in ".*") {
        let entry = LogEntry::new("app", LogLevel::Info, message);
        prop_assert!(!entry.message.contains('\n'));
        prop_assert!(!entry.message.contains('\r'));
    }
}
