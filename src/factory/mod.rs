//! Declarative logger construction
//!
//! A [`LoggerFactory`] is built from a configuration with four sections:
//!
//! - `formatters`, `processors`: name to `{class, params}` definition
//! - `handlers`: name to definition, plus `processors` (list of names) and
//!   an optional `formatter` name
//! - `loggers`: channel name to an ordered list of handler names
//!
//! ```toml
//! [formatters.structured]
//! class = "json"
//!
//! [handlers.app_file]
//! class = "file"
//! params = { path = "logs/app.log", level = "info" }
//! processors = ["pid"]
//! formatter = "structured"
//!
//! [processors.pid]
//! class = "process_id"
//!
//! [loggers]
//! app = ["app_file"]
//! ```

mod components;
mod config;
mod loader;
mod logger_factory;
mod pipeline;
mod registry;
mod shared;

pub use components::{ComponentRegistry, LEVEL_PARAM};
pub use config::{Definition, FactoryConfig, HandlerDefinition, UnresolvedReference};
pub use loader::{load_config, resolve_path};
pub use logger_factory::{LoggerFactory, DEFAULT_CHANNEL};
pub use pipeline::Pipeline;
pub use registry::{Arguments, Buildable, Param, Registry};
pub use shared::SharedLoggerFactory;
