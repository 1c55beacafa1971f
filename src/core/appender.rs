//! Appender trait for log output destinations

use super::{error::Result, formatter::Formatter, log_entry::LogEntry};
use crate::formatters::LineFormatter;

/// The sink half of a [`Handler`](super::Handler)
///
/// An appender receives every record its handler accepts, already run
/// through the handler's processors and rendered by its formatter.
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry, formatted: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;

    /// Formatter a handler uses until one is set explicitly
    fn default_formatter(&self) -> Box<dyn Formatter> {
        Box::new(LineFormatter::new())
    }
}
