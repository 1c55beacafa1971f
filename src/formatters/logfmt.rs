//! Logfmt formatter (key=value pairs)

use crate::core::{FieldValue, Formatter, LogContext, LogEntry, Result, TimestampFormat};
use crate::factory::{Arguments, Buildable, Param};
use serde_json::json;

#[derive(Debug, Clone, Default)]
pub struct LogfmtFormatter {
    timestamp_format: TimestampFormat,
}

impl LogfmtFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn push_fields(parts: &mut Vec<String>, fields: &LogContext) {
        for (key, value) in fields.fields() {
            let formatted_value = match value {
                FieldValue::String(s) => quote_value(s),
                FieldValue::Int(i) => i.to_string(),
                FieldValue::Float(f) => f.to_string(),
                FieldValue::Bool(b) => b.to_string(),
                FieldValue::Null => "null".to_string(),
            };
            parts.push(format!("{}={}", escape_key(key), formatted_value));
        }
    }
}

impl Formatter for LogfmtFormatter {
    fn format(&self, entry: &LogEntry) -> Result<String> {
        let mut parts = vec![
            format!(
                "timestamp={}",
                escape_value(&self.timestamp_format.format(&entry.timestamp))
            ),
            format!("level={}", entry.level.to_str()),
            format!("channel={}", escape_value(&entry.channel)),
            // Message is always quoted
            format!("message={}", quote_value(&entry.message)),
        ];

        if let Some(ref file) = entry.file {
            parts.push(format!("file={}", escape_value(file)));
        }
        if let Some(line) = entry.line {
            parts.push(format!("line={}", line));
        }
        if let Some(ref module_path) = entry.module_path {
            parts.push(format!("module_path={}", escape_value(module_path)));
        }

        Self::push_fields(&mut parts, &entry.context);
        Self::push_fields(&mut parts, &entry.extra);

        Ok(parts.join(" "))
    }

    fn name(&self) -> &str {
        "logfmt"
    }
}

impl Buildable for LogfmtFormatter {
    fn parameters() -> Vec<Param> {
        vec![Param::optional("timestamp_format", json!("iso8601"))]
    }

    fn build(args: &Arguments) -> Result<Self> {
        Ok(Self::new().with_timestamp_format(args.parse("timestamp_format")?))
    }
}

/// Keep only characters that are safe in a logfmt key
fn escape_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Quote a value only if it contains spaces, quotes or `=`
fn escape_value(value: &str) -> String {
    if value.contains(' ') || value.contains('"') || value.contains('=') {
        quote_value(value)
    } else {
        value.to_string()
    }
}

fn quote_value(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
