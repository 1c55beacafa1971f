//! Adds the current process id

use crate::core::{LogEntry, Processor, Result};
use crate::factory::{Arguments, Buildable, Param};

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessIdProcessor;

impl ProcessIdProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Processor for ProcessIdProcessor {
    fn process(&self, entry: &mut LogEntry) {
        entry.add_extra("process_id", std::process::id());
    }

    fn name(&self) -> &str {
        "process_id"
    }
}

impl Buildable for ProcessIdProcessor {
    fn parameters() -> Vec<Param> {
        Vec::new()
    }

    fn build(_args: &Arguments) -> Result<Self> {
        Ok(Self)
    }
}
