//! Loading the factory from a TOML file
//!
//! Reads `demos/logging.toml`, checks it for unresolved references and
//! writes to the rotating and plain file handlers it declares.
//!
//! Run with: cargo run --example config_file

use rust_logger_factory::prelude::*;
use std::path::Path;

fn main() -> Result<()> {
    println!("=== Rust Logger Factory - Config File Example ===\n");

    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut factory = LoggerFactory::build_from_file_in(root, "demos/logging.toml")?;

    println!("1. Declared channels:");
    for channel in factory.config().channels() {
        println!("   - {}", channel);
    }

    println!("\n2. Pre-flight check:");
    let unresolved = factory.config().unresolved_references();
    if unresolved.is_empty() {
        println!("   all references resolve");
    }
    for reference in &unresolved {
        println!("   warning: {}", reference);
    }

    println!("\n3. Logging through the configured pipelines:");
    let app = factory.get(Some("app"))?;
    app.debug("Only in app.log (console handler is at INFO)");
    app.info("Service configured from file");

    let audit = factory.get(Some("audit"))?;
    audit.info_with_context(
        "User signed in",
        LogContext::new().with_field("user_id", 42).with_field("method", "sso"),
    );

    app.flush()?;
    audit.flush()?;
    println!("\n   Log files written under target/demo-logs/");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
