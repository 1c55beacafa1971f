//! Channel-bound logger

use super::{
    error::Result, handler::Handler, log_context::LogContext, log_entry::LogEntry,
    log_level::LogLevel, metrics::LoggerMetrics,
};
use parking_lot::RwLock;

/// A named logger dispatching records to an ordered list of handlers
///
/// Every handler sees every record at or above the logger's minimum level;
/// each handler then applies its own level. Loggers built by the factory
/// are shared as `Arc<Logger>`, so all logging methods take `&self`.
pub struct Logger {
    channel: String,
    min_level: RwLock<LogLevel>,
    handlers: RwLock<Vec<Handler>>,
    /// Metrics for observability (dropped count, total logged, etc.)
    metrics: LoggerMetrics,
}

impl Logger {
    #[must_use]
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            min_level: RwLock::new(LogLevel::Trace),
            handlers: RwLock::new(Vec::new()),
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Append a handler; dispatch order is push order
    pub fn push_handler(&mut self, handler: Handler) -> &mut Self {
        self.handlers.get_mut().push(handler);
        self
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Appender names of the handlers, in dispatch order
    pub fn handler_names(&self) -> Vec<String> {
        self.handlers
            .read()
            .iter()
            .map(|h| h.name().to_string())
            .collect()
    }

    /// Inspect the handlers without exposing the lock
    pub fn with_handlers<R>(&self, f: impl FnOnce(&[Handler]) -> R) -> R {
        f(&self.handlers.read())
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if level < self.min_level() {
            return;
        }

        self.log_entry(LogEntry::new(self.channel.as_str(), level, message));
    }

    /// Log with structured context fields
    pub fn log_with_context(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: LogContext,
    ) {
        if level < self.min_level() {
            return;
        }

        let entry = LogEntry::new(self.channel.as_str(), level, message).with_context(context);
        self.log_entry(entry);
    }

    /// Dispatch a prepared entry to every handler
    pub fn log_entry(&self, entry: LogEntry) {
        let mut handlers = self.handlers.write();
        Self::dispatch(&self.channel, &mut handlers, &entry, &self.metrics);
    }

    /// Per-handler panic isolation: one failing handler must not keep the
    /// record from the others.
    fn dispatch(
        channel: &str,
        handlers: &mut [Handler],
        entry: &LogEntry,
        metrics: &LoggerMetrics,
    ) {
        let mut has_error = false;
        let mut handled = false;

        for (idx, handler) in handlers.iter_mut().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                handler.handle(entry)
            }));

            match result {
                Ok(Ok(accepted)) => handled |= accepted,
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Channel '{}' handler #{} ({}) failed: {}",
                        channel,
                        idx,
                        handler.name(),
                        e
                    );
                    has_error = true;
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Channel '{}' handler #{} panicked: {}. \
                         Other handlers continue to function.",
                        channel, idx, panic_msg
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            metrics.record_dropped();
        } else if handled {
            metrics.record_logged();
        } else {
            metrics.record_unhandled();
        }
    }

    /// Get the number of records at least one handler failed to write
    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        let mut handlers = self.handlers.write();
        for handler in handlers.iter_mut() {
            handler.flush()?;
        }
        Ok(())
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    /// Helper for structured info logging
    pub fn info_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Info, message, context);
    }

    /// Helper for structured error logging
    pub fn error_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Error, message, context);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("channel", &self.channel)
            .field("min_level", &self.min_level())
            .field("handlers", &self.handler_names())
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!(
                "[LOGGER ERROR] Failed to flush channel '{}' during shutdown: {}",
                self.channel, e
            );
        }
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use rust_logger_factory::prelude::*;
///
/// let logger = Logger::builder("audit")
///     .min_level(LogLevel::Info)
///     .handler(Handler::new(ConsoleAppender::new()))
///     .build();
///
/// assert_eq!(logger.channel(), "audit");
/// assert_eq!(logger.handler_count(), 1);
/// ```
pub struct LoggerBuilder {
    channel: String,
    min_level: LogLevel,
    handlers: Vec<Handler>,
}

impl LoggerBuilder {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            min_level: LogLevel::Trace,
            handlers: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn handler(mut self, handler: Handler) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn build(self) -> Logger {
        let mut logger = Logger::new(self.channel);
        logger.set_min_level(self.min_level);
        for handler in self.handlers {
            logger.push_handler(handler);
        }
        logger
    }
}

impl Logger {
    #[must_use]
    pub fn builder(channel: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(channel)
    }
}
