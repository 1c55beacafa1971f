//! Basic factory usage example
//!
//! Declares formatters, processors and handlers inline, then resolves
//! loggers per channel, overrides one channel and resets the cache.
//!
//! Run with: cargo run --example basic_usage

use rust_logger_factory::prelude::*;
use rust_logger_factory::{info, warn};
use serde_json::json;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Logger Factory - Basic Usage Example ===\n");

    let mut factory = LoggerFactory::build(&json!({
        "formatters": {
            "structured": { "class": "json" }
        },
        "processors": {
            "pid": { "class": "process_id" },
            "service": { "class": "static_fields", "params": { "fields": { "service": "demo" } } }
        },
        "handlers": {
            "stdout": { "class": "console", "params": { "level": "debug", "colors": true } },
            "stdout_json": {
                "class": "console",
                "params": { "level": "warn", "stream": "stdout" },
                "processors": ["pid", "service"],
                "formatter": "structured"
            }
        },
        "loggers": {
            "app": ["stdout"],
            "payments": ["stdout", "stdout_json"],
            "noise": []
        }
    }));

    println!("1. Default channel: {}", factory.get_default());
    let app = factory.get(None)?;
    app.trace("Trace message (below handler level, hidden)");
    app.debug("Debug message");
    info!(app, "Application started on port {}", 8080);

    println!("\n2. A channel with two handlers (text, plus JSON for warnings):");
    let payments = factory.get(Some("payments"))?;
    payments.info("Charge accepted");
    warn!(payments, "Retrying charge {} of {}", 2, 3);

    println!("\n3. A channel with no handlers discards everything:");
    factory.get(Some("noise"))?.error("You will not see this");

    println!("\n4. Unknown channels fall back to the default:");
    factory.get(Some("unknown"))?.info("Logged through 'app'");

    println!("\n5. Overriding a channel with a hand-built logger:");
    let custom = Logger::builder("payments")
        .min_level(LogLevel::Error)
        .handler(Handler::new(ConsoleAppender::with_colors(false)))
        .build();
    factory.add_override("payments", custom);
    let payments = factory.get(Some("payments"))?;
    payments.warn("Filtered by the override's minimum level");
    payments.error("Served by the override");

    println!("\n6. Reset drops cached loggers but keeps overrides:");
    let before = factory.get(None)?;
    factory.reset();
    let after = factory.get(None)?;
    println!("   app rebuilt: {}", !Arc::ptr_eq(&before, &after));
    println!(
        "   payments still overridden: {}",
        Arc::ptr_eq(&payments, &factory.get(Some("payments"))?)
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
