//! Formatter implementations
//!
//! - `line`: human-readable text (default for every handler)
//! - `json`: one JSON object per record
//! - `logfmt`: key=value pairs for log aggregation tools

pub mod json;
pub mod line;
pub mod logfmt;

pub use json::JsonFormatter;
pub use line::LineFormatter;
pub use logfmt::LogfmtFormatter;

// Re-export trait for convenience
pub use crate::core::Formatter;
