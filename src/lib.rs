//! # Rust Logger Factory
//!
//! Declarative assembly of per-channel logging pipelines.
//!
//! A configuration names reusable formatter, processor and handler
//! definitions and lists, for every channel, the handlers its logger
//! writes to. [`LoggerFactory`] builds each channel's [`Logger`] on first
//! use, caches it, and lets callers substitute a pre-built logger for any
//! channel.
//!
//! ## Features
//!
//! - **Declarative**: JSON or TOML configuration, or typed builders
//! - **Lazy and cached**: one shared logger per channel until reset
//! - **Extensible**: register your own appenders, processors and formatters
//! - **Lenient by default**: unknown references are skipped; opt into strict mode
//!
//! ```
//! use rust_logger_factory::prelude::*;
//! use serde_json::json;
//!
//! let mut factory = LoggerFactory::build(&json!({
//!     "formatters": { "structured": { "class": "json" } },
//!     "handlers": {
//!         "stdout": { "class": "console", "params": { "level": "info" }, "formatter": "structured" }
//!     },
//!     "loggers": { "app": ["stdout"] }
//! }));
//!
//! let logger = factory.get(None)?;
//! logger.info("service started");
//! # Ok::<(), LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod factory;
pub mod formatters;
pub mod macros;
pub mod processors;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, MemoryAppender, NullAppender};
    pub use crate::core::{
        Appender, FieldValue, Formatter, Handler, LogContext, LogEntry, LogLevel, Logger,
        LoggerBuilder, LoggerError, LoggerMetrics, Processor, Result, TimestampFormat,
    };
    pub use crate::factory::{
        Arguments, Buildable, ComponentRegistry, Definition, FactoryConfig, HandlerDefinition,
        LoggerFactory, Param, SharedLoggerFactory,
    };
}

pub use appenders::{ConsoleAppender, FileAppender, MemoryAppender, NullAppender};
pub use core::{
    Appender, FieldValue, Formatter, Handler, LogContext, LogEntry, LogLevel, Logger,
    LoggerBuilder, LoggerError, LoggerMetrics, Processor, Result, TimestampFormat,
};
pub use factory::{
    load_config, Arguments, Buildable, ComponentRegistry, Definition, FactoryConfig,
    HandlerDefinition, LoggerFactory, Param, SharedLoggerFactory, DEFAULT_CHANNEL,
};
