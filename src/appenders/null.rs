//! No-op sink

use crate::core::{Appender, LogEntry, Result};
use crate::factory::{Arguments, Buildable, Param};

/// Discards every record it receives
///
/// Channels declared without handlers get a single handler backed by this
/// appender.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAppender;

impl Appender for NullAppender {
    fn append(&mut self, _entry: &LogEntry, _formatted: &str) -> Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

impl Buildable for NullAppender {
    fn parameters() -> Vec<Param> {
        Vec::new()
    }

    fn build(_args: &Arguments) -> Result<Self> {
        Ok(NullAppender)
    }
}
