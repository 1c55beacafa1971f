//! Integration tests for the logger factory
//!
//! These tests verify:
//! - Cached builds and override precedence
//! - Default channel resolution and fallback
//! - Silent skipping of unknown references (and strict mode)
//! - Instantiation errors surfacing from `get`
//! - End-to-end pipelines writing to files

use parking_lot::Mutex;
use rust_logger_factory::appenders::{MemoryAppender, MemoryRecords};
use rust_logger_factory::prelude::*;
use rust_logger_factory::DEFAULT_CHANNEL;
use serde_json::{json, Value};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn sample_config() -> Value {
    json!({
        "formatters": {
            "structured": { "class": "json" }
        },
        "processors": {
            "pid": { "class": "process_id" },
            "service": { "class": "static_fields", "params": { "fields": { "service": "billing" } } }
        },
        "handlers": {
            "a": { "class": "memory", "processors": ["pid"] },
            "b": { "class": "null", "params": { "level": "error" } },
            "json_mem": { "class": "memory", "processors": ["service"], "formatter": "structured" }
        },
        "loggers": {
            "c1": ["a"],
            "c2": ["a", "b"],
            "partial": ["a", "ghost"],
            "silent": [],
            "structured": ["json_mem"]
        }
    })
}

fn factory() -> LoggerFactory {
    LoggerFactory::build(&sample_config())
}

/// Registry whose `capture` handler exposes every appender it builds
fn capturing_registry() -> (ComponentRegistry, Arc<Mutex<Vec<MemoryRecords>>>) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&captured);

    let mut registry = ComponentRegistry::new();
    registry.handlers_mut().register(
        "capture",
        vec![Param::optional("level", json!("trace"))],
        move |args| {
            let appender = MemoryAppender::new(100);
            sink.lock().push(appender.handle());
            Ok(Handler::new(appender).with_level(args.parse("level")?))
        },
    );
    (registry, captured)
}

#[test]
fn test_cached_build_returns_same_instance() {
    let mut factory = factory();
    let first = factory.get(Some("c2")).unwrap();
    let second = factory.get(Some("c2")).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.handler_names(), vec!["memory", "null"]);
}

#[test]
fn test_override_takes_precedence() {
    let mut factory = factory();
    let built = factory.get(Some("c2")).unwrap();

    let custom = Arc::new(Logger::new("custom"));
    factory.add_override("c2", Arc::clone(&custom));

    let resolved = factory.get(Some("c2")).unwrap();
    assert!(Arc::ptr_eq(&resolved, &custom));
    assert!(!Arc::ptr_eq(&resolved, &built));
    assert!(factory.has_override("c2"));
}

#[test]
fn test_unknown_channel_falls_back_to_default() {
    let mut factory = factory();
    let default_name = factory.get_default().to_string();
    let default = factory.get(Some(&default_name)).unwrap();

    let unknown = factory.get(Some("nonexistent")).unwrap();
    let empty = factory.get(Some("")).unwrap();
    let none = factory.get(None).unwrap();

    assert!(Arc::ptr_eq(&unknown, &default));
    assert!(Arc::ptr_eq(&empty, &default));
    assert!(Arc::ptr_eq(&none, &default));
}

#[test]
fn test_empty_handler_list_is_single_noop_sink() {
    let mut factory = factory();
    let logger = factory.get(Some("silent")).unwrap();

    assert_eq!(logger.handler_count(), 1);
    assert_eq!(logger.handler_names(), vec!["null"]);
    for level in LogLevel::ALL {
        logger.log(level, "discarded");
    }
    assert!(logger.flush().is_ok());
    assert_eq!(logger.metrics().dropped_count(), 0);
}

#[test]
fn test_unknown_handler_reference_is_skipped() {
    let mut factory = factory();
    let partial = factory.get(Some("partial")).unwrap();
    let only_a = factory.get(Some("c1")).unwrap();

    assert_eq!(partial.handler_names(), only_a.handler_names());
    assert_eq!(partial.handler_count(), 1);
}

#[test]
fn test_parameter_merge_by_name() {
    #[derive(Debug, PartialEq)]
    struct Sample {
        level: String,
        path: String,
    }

    impl Buildable for Sample {
        fn parameters() -> Vec<Param> {
            vec![
                Param::optional("level", json!("info")),
                Param::optional("path", json!("/tmp")),
            ]
        }

        fn build(args: &Arguments) -> Result<Self> {
            Ok(Sample {
                level: args.string("level")?,
                path: args.string("path")?,
            })
        }
    }

    let mut registry = rust_logger_factory::factory::Registry::new("sample");
    registry.register("X", Sample::parameters(), Sample::build);

    let built = registry
        .instantiate("p", &Definition::new("X").with_param("level", json!("debug")))
        .unwrap();
    assert_eq!(
        built,
        Sample {
            level: "debug".to_string(),
            path: "/tmp".to_string(),
        }
    );
}

#[test]
fn test_reset_clears_built_but_keeps_overrides() {
    let mut factory = factory();
    let a_before = factory.get(Some("c1")).unwrap();
    let b_override = Arc::new(Logger::new("c2-override"));
    factory.add_override("c2", Arc::clone(&b_override));

    factory.reset();
    assert!(!factory.is_built("c1"));

    let a_after = factory.get(Some("c1")).unwrap();
    assert!(!Arc::ptr_eq(&a_before, &a_after));
    assert!(Arc::ptr_eq(&factory.get(Some("c2")).unwrap(), &b_override));
}

#[test]
fn test_default_is_first_declared_channel() {
    let factory = LoggerFactory::build(&json!({
        "loggers": { "c1": [], "c2": [] }
    }));
    assert_eq!(factory.get_default(), "c1");

    // Declaration order, not alphabetical order
    let factory = LoggerFactory::build(&json!({
        "loggers": { "zeta": [], "alpha": [] }
    }));
    assert_eq!(factory.get_default(), "zeta");

    let parsed: Value = serde_json::from_str(r#"{ "loggers": { "zeta": [], "alpha": [] } }"#).unwrap();
    assert_eq!(LoggerFactory::build(&parsed).get_default(), "zeta");
}

#[test]
fn test_set_default() {
    let mut factory = factory();
    assert!(matches!(
        factory.set_default("missing"),
        Err(LoggerError::UnknownChannel { ref channel }) if channel == "missing"
    ));
    assert_eq!(factory.get_default(), "c1");

    factory.set_default("silent").unwrap();
    assert_eq!(factory.get_default(), "silent");

    let fallback = factory.get(Some("nonexistent")).unwrap();
    assert_eq!(fallback.channel(), "silent");
}

#[test]
fn test_get_materializes_default_channel() {
    let mut factory = factory();
    factory.get(Some("silent")).unwrap();
    assert!(factory.is_built("c1"));
    assert!(factory.is_built("silent"));
    assert!(!factory.is_built("c2"));
}

#[test]
fn test_exists_ignores_override_only_channels() {
    let mut factory = factory();
    factory.add_override("ephemeral", Logger::new("ephemeral"));

    assert!(factory.exists("c1"));
    assert!(!factory.exists("ephemeral"));
    assert!(factory.has_override("ephemeral"));

    // Undeclared, so `get` resolves to the default instead
    let resolved = factory.get(Some("ephemeral")).unwrap();
    assert_eq!(resolved.channel(), "c1");
}

#[test]
fn test_indexed_adapters() {
    let mut factory = factory();
    let custom = Arc::new(Logger::new("indexed"));

    factory.set("c2", Arc::clone(&custom));
    assert!(Arc::ptr_eq(&factory.get(Some("c2")).unwrap(), &custom));
    assert!(factory.contains("c2"));
    assert!(!factory.contains("ghost"));

    assert!(!factory.remove("c2"));
    assert!(!factory.remove("ghost"));
    assert!(factory.has_override("c2"));
    assert!(factory.contains("c2"));
}

#[test]
fn test_instantiation_errors_propagate_from_get() {
    let mut factory = LoggerFactory::build(&json!({
        "handlers": {
            "no_class": { "params": { "level": "info" } },
            "bad_class": { "class": "syslog" },
            "no_path": { "class": "file", "params": { "level": "info" } }
        },
        "loggers": {
            "ok": [],
            "missing": ["no_class"],
            "unknown": ["bad_class"],
            "broken": ["no_path"]
        }
    }));

    assert!(matches!(
        factory.get(Some("missing")),
        Err(LoggerError::MissingImplementationIdentifier { .. })
    ));
    assert!(matches!(
        factory.get(Some("unknown")),
        Err(LoggerError::ImplementationNotFound { .. })
    ));
    let err = factory.get(Some("broken")).unwrap_err();
    assert!(matches!(err, LoggerError::ConstructionFailure { .. }));
    assert!(err.to_string().contains("path"));

    // Failed builds are not cached
    assert!(!factory.is_built("broken"));
    assert!(factory.get(Some("ok")).is_ok());
}

#[test]
fn test_failing_default_blocks_every_get() {
    let mut factory = LoggerFactory::build(&json!({
        "handlers": { "bad": { "class": "syslog" } },
        "loggers": { "main": ["bad"], "other": [] }
    }));
    assert!(factory.get(Some("other")).is_err());

    factory.set_default("other").unwrap();
    assert!(factory.get(Some("other")).is_ok());
}

#[test]
fn test_strict_mode() {
    let config = sample_config();
    assert_eq!(
        FactoryConfig::from_value(&config).unresolved_references().len(),
        1
    );

    let mut factory = LoggerFactory::build(&config).with_strict(true);
    assert!(factory.get(Some("c1")).is_ok());

    let err = factory.get(Some("partial")).unwrap_err();
    assert!(matches!(err, LoggerError::UnresolvedReference { .. }));
    assert_eq!(
        err.to_string(),
        "channel 'partial' references undefined handler 'ghost'"
    );
}

#[test]
fn test_processors_and_formatter_shape_output() {
    let (registry, captured) = capturing_registry();
    let mut factory = LoggerFactory::build(&json!({
        "formatters": { "structured": { "class": "json" } },
        "processors": {
            "service": { "class": "static_fields", "params": { "fields": { "service": "billing" } } },
            "pid": { "class": "process_id" }
        },
        "handlers": {
            "cap": {
                "class": "capture",
                "params": { "level": "info" },
                "processors": ["service", "pid"],
                "formatter": "structured"
            }
        },
        "loggers": { "billing": ["cap"] }
    }))
    .with_registry(registry);

    let logger = factory.get(Some("billing")).unwrap();
    logger.debug("below handler level");
    logger.info("invoice sent");

    let records = captured.lock()[0].clone();
    assert_eq!(records.len(), 1);

    let line: Value = serde_json::from_str(&records.lines()[0]).unwrap();
    assert_eq!(line["channel"], "billing");
    assert_eq!(line["message"], "invoice sent");
    assert_eq!(line["extra"]["service"], "billing");
    assert_eq!(line["extra"]["process_id"], json!(std::process::id()));
}

#[test]
fn test_make_builds_fresh_instances() {
    let (registry, captured) = capturing_registry();
    let factory = LoggerFactory::build(&json!({
        "handlers": { "cap": { "class": "capture" } },
        "loggers": { "app": ["cap"] }
    }))
    .with_registry(registry);

    let first = factory.make("app", &["cap"]).unwrap();
    let second = factory.make("app", &["cap"]).unwrap();
    first.info("one");
    second.info("two");

    let captured = captured.lock();
    assert_eq!(captured.len(), 2);
    assert_eq!(captured[0].lines().len(), 1);
    assert_eq!(captured[1].lines().len(), 1);
}

#[test]
fn test_empty_configuration() {
    let mut factory = LoggerFactory::build(&json!({}));
    assert_eq!(factory.get_default(), DEFAULT_CHANNEL);

    let logger = factory.get(Some("anything")).unwrap();
    assert_eq!(logger.channel(), DEFAULT_CHANNEL);
    assert_eq!(logger.handler_names(), vec!["null"]);
}

#[test]
fn test_file_pipeline_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("logs").join("app.log");

    let mut factory = LoggerFactory::build(&json!({
        "formatters": { "kv": { "class": "logfmt" } },
        "handlers": {
            "app_file": {
                "class": "file",
                "params": { "path": log_file.to_str().unwrap(), "level": "info" },
                "formatter": "kv"
            }
        },
        "loggers": { "app": ["app_file"] }
    }));

    let logger = factory.get(None).unwrap();
    logger.debug("not written");
    logger.info("User login\nERROR fake entry");
    logger.warn("disk almost full");
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("level=INFO"));
    assert!(lines[0].contains("channel=app"));
    assert!(lines[0].contains("\\n"));
    assert!(lines[1].contains("disk almost full"));
}

#[test]
fn test_uid_changes_when_factory_is_reset() {
    let (registry, captured) = capturing_registry();
    let mut factory = LoggerFactory::build(&json!({
        "formatters": { "structured": { "class": "json" } },
        "processors": { "uid": { "class": "uid", "params": { "length": 32 } } },
        "handlers": {
            "cap": { "class": "capture", "processors": ["uid"], "formatter": "structured" }
        },
        "loggers": { "requests": ["cap"] }
    }))
    .with_registry(registry);

    let logger = factory.get(None).unwrap();
    logger.info("first");
    logger.info("second");

    factory.reset();
    factory.get(None).unwrap().info("third");

    let captured = captured.lock();
    assert_eq!(captured.len(), 2);
    let uid = |records: &MemoryRecords, i: usize| -> Value {
        let line: Value = serde_json::from_str(&records.lines()[i]).unwrap();
        line["extra"]["uid"].clone()
    };
    assert_eq!(uid(&captured[0], 0), uid(&captured[0], 1));
    assert_ne!(uid(&captured[0], 0), uid(&captured[1], 0));
}
