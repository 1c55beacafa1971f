//! Formatter trait for record serialization

use super::{error::Result, log_entry::LogEntry};

/// Renders a processed record into the text an appender writes
pub trait Formatter: Send + Sync {
    fn format(&self, entry: &LogEntry) -> Result<String>;
    fn name(&self) -> &str;
}
