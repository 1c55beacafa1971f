//! Handler: an appender plus its processor chain, formatter and level

use super::{
    appender::Appender, error::Result, formatter::Formatter, log_entry::LogEntry,
    log_level::LogLevel, processor::Processor,
};
use crate::appenders::NullAppender;

/// A fully configured sink
///
/// Records below `level` are ignored. Accepted records are copied, run
/// through the processors in push order, rendered by the formatter and
/// passed to the appender.
///
/// # Example
///
/// ```
/// use rust_logger_factory::appenders::MemoryAppender;
/// use rust_logger_factory::formatters::JsonFormatter;
/// use rust_logger_factory::processors::ProcessIdProcessor;
/// use rust_logger_factory::{Handler, LogLevel};
///
/// let mut handler = Handler::new(MemoryAppender::new(100)).with_level(LogLevel::Warn);
/// handler.push_processor(Box::new(ProcessIdProcessor::new()));
/// handler.set_formatter(Box::new(JsonFormatter::new()));
///
/// assert_eq!(handler.processor_names(), vec!["process_id"]);
/// assert_eq!(handler.formatter_name(), "json");
/// ```
pub struct Handler {
    level: LogLevel,
    appender: Box<dyn Appender>,
    processors: Vec<Box<dyn Processor>>,
    formatter: Box<dyn Formatter>,
}

impl Handler {
    pub fn new<A: Appender + 'static>(appender: A) -> Self {
        Self::from_boxed(Box::new(appender))
    }

    pub fn from_boxed(appender: Box<dyn Appender>) -> Self {
        let formatter = appender.default_formatter();
        Self {
            level: LogLevel::Trace,
            appender,
            processors: Vec::new(),
            formatter,
        }
    }

    /// The no-op sink: accepts everything, writes nothing
    pub fn null() -> Self {
        Self::new(NullAppender)
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn push_processor(&mut self, processor: Box<dyn Processor>) -> &mut Self {
        self.processors.push(processor);
        self
    }

    pub fn set_formatter(&mut self, formatter: Box<dyn Formatter>) -> &mut Self {
        self.formatter = formatter;
        self
    }

    pub fn is_handling(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    /// Process, format and write one record
    ///
    /// Returns `Ok(false)` when the record is below this handler's level.
    pub fn handle(&mut self, entry: &LogEntry) -> Result<bool> {
        if !self.is_handling(entry.level) {
            return Ok(false);
        }

        let mut record = entry.clone();
        for processor in &self.processors {
            processor.process(&mut record);
        }

        let formatted = self.formatter.format(&record)?;
        self.appender.append(&record, &formatted)?;
        Ok(true)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.appender.flush()
    }

    /// Name of the underlying appender
    pub fn name(&self) -> &str {
        self.appender.name()
    }

    pub fn processor_names(&self) -> Vec<&str> {
        self.processors.iter().map(|p| p.name()).collect()
    }

    pub fn formatter_name(&self) -> &str {
        self.formatter.name()
    }
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handler")
            .field("appender", &self.name())
            .field("level", &self.level)
            .field("processors", &self.processor_names())
            .field("formatter", &self.formatter_name())
            .finish()
    }
}
