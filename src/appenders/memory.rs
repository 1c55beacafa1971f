//! Bounded in-memory appender
//!
//! Keeps the most recent records in memory. Useful for tests and for
//! exposing recent log lines through a diagnostics endpoint.

use crate::core::{Appender, LogEntry, Result};
use crate::factory::{Arguments, Buildable, Param};
use parking_lot::Mutex;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Arc;

type Buffer = Arc<Mutex<VecDeque<(LogEntry, String)>>>;

pub struct MemoryAppender {
    capacity: usize,
    buffer: Buffer,
}

/// Read handle onto a [`MemoryAppender`]'s buffer
///
/// The handle stays valid after the appender has been moved into a
/// handler, so tests can keep one while the logger owns the appender.
#[derive(Clone)]
pub struct MemoryRecords {
    buffer: Buffer,
}

impl MemoryAppender {
    /// Create an appender keeping at most `capacity` records (oldest evicted first)
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            buffer: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn handle(&self) -> MemoryRecords {
        MemoryRecords {
            buffer: Arc::clone(&self.buffer),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl MemoryRecords {
    /// Processed records, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.buffer.lock().iter().map(|(e, _)| e.clone()).collect()
    }

    /// Formatted lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.buffer.lock().iter().map(|(_, l)| l.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, entry: &LogEntry, formatted: &str) -> Result<()> {
        let mut buffer = self.buffer.lock();
        if buffer.len() == self.capacity {
            buffer.pop_front();
        }
        buffer.push_back((entry.clone(), formatted.to_string()));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

impl Buildable for MemoryAppender {
    fn parameters() -> Vec<Param> {
        vec![Param::optional("capacity", json!(1000))]
    }

    fn build(args: &Arguments) -> Result<Self> {
        let capacity = args.unsigned("capacity")?;
        Ok(Self::new(usize::try_from(capacity).unwrap_or(usize::MAX)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    #[test]
    fn test_evicts_oldest() {
        let mut appender = MemoryAppender::new(2);
        let records = appender.handle();

        for i in 0..3 {
            let entry = LogEntry::new("app", LogLevel::Info, format!("m{}", i));
            appender.append(&entry, &entry.message).unwrap();
        }

        assert_eq!(records.lines(), vec!["m1", "m2"]);
        records.clear();
        assert!(records.is_empty());
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        assert_eq!(MemoryAppender::new(0).capacity(), 1);
    }
}
