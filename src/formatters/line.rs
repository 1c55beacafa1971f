//! Human-readable text formatter

use crate::core::{Formatter, LogEntry, Result, TimestampFormat};
use crate::factory::{Arguments, Buildable, Param};
use serde_json::json;

/// Formats records as `[timestamp] [LEVEL] channel - message fields`
///
/// Context fields follow the message, then processor `extra` fields.
#[derive(Debug, Clone)]
pub struct LineFormatter {
    timestamp_format: TimestampFormat,
    include_context: bool,
    include_extra: bool,
}

impl LineFormatter {
    pub fn new() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
            include_context: true,
            include_extra: true,
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_context(mut self, include: bool) -> Self {
        self.include_context = include;
        self
    }

    #[must_use]
    pub fn with_extra(mut self, include: bool) -> Self {
        self.include_extra = include;
        self
    }
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for LineFormatter {
    fn format(&self, entry: &LogEntry) -> Result<String> {
        let mut output = format!(
            "[{}] [{:5}] {} - {}",
            self.timestamp_format.format(&entry.timestamp),
            entry.level.to_str(),
            entry.channel,
            entry.message
        );

        if self.include_context && !entry.context.is_empty() {
            output.push(' ');
            output.push_str(&entry.context.format_fields());
        }
        if self.include_extra && !entry.extra.is_empty() {
            output.push(' ');
            output.push_str(&entry.extra.format_fields());
        }

        Ok(output)
    }

    fn name(&self) -> &str {
        "line"
    }
}

impl Buildable for LineFormatter {
    fn parameters() -> Vec<Param> {
        vec![
            Param::optional("timestamp_format", json!("iso8601")),
            Param::optional("include_context", json!(true)),
            Param::optional("include_extra", json!(true)),
        ]
    }

    fn build(args: &Arguments) -> Result<Self> {
        Ok(Self::new()
            .with_timestamp_format(args.parse("timestamp_format")?)
            .with_context(args.boolean("include_context")?)
            .with_extra(args.boolean("include_extra")?))
    }
}
