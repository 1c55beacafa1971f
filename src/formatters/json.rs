//! JSON formatter for structured logging
//!
//! Produces one JSON object per record (JSONL when written line by line),
//! compatible with log aggregation tools like ELK or Loki.

use crate::core::{Formatter, LogEntry, Result, TimestampFormat};
use crate::factory::{Arguments, Buildable, Param};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone)]
pub struct JsonFormatter {
    timestamp_format: TimestampFormat,
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
            pretty: false,
        }
    }

    /// Create a JSON formatter with pretty printing
    pub fn new_pretty() -> Self {
        Self {
            pretty: true,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn to_value(&self, entry: &LogEntry) -> Value {
        let mut obj = Map::new();

        obj.insert(
            "timestamp".to_string(),
            self.timestamp_format.format_json(&entry.timestamp),
        );
        obj.insert("channel".to_string(), Value::String(entry.channel.clone()));
        obj.insert(
            "level".to_string(),
            Value::String(entry.level.to_str().to_string()),
        );
        obj.insert("message".to_string(), Value::String(entry.message.clone()));

        if let Some(ref file) = entry.file {
            obj.insert("file".to_string(), Value::String(file.clone()));
        }
        if let Some(line) = entry.line {
            obj.insert("line".to_string(), Value::Number(line.into()));
        }
        if let Some(ref module_path) = entry.module_path {
            obj.insert("module_path".to_string(), Value::String(module_path.clone()));
        }

        if !entry.context.is_empty() {
            obj.insert(
                "context".to_string(),
                Value::Object(entry.context.to_json_map()),
            );
        }
        if !entry.extra.is_empty() {
            obj.insert("extra".to_string(), Value::Object(entry.extra.to_json_map()));
        }

        Value::Object(obj)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, entry: &LogEntry) -> Result<String> {
        let value = self.to_value(entry);
        let json = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(json)
    }

    fn name(&self) -> &str {
        "json"
    }
}

impl Buildable for JsonFormatter {
    fn parameters() -> Vec<Param> {
        vec![
            Param::optional("timestamp_format", json!("iso8601")),
            Param::optional("pretty", json!(false)),
        ]
    }

    fn build(args: &Arguments) -> Result<Self> {
        let formatter = if args.boolean("pretty")? {
            Self::new_pretty()
        } else {
            Self::new()
        };
        Ok(formatter.with_timestamp_format(args.parse("timestamp_format")?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogContext, LogLevel};

    #[test]
    fn test_json_format() {
        let entry = LogEntry::new("app", LogLevel::Error, "Error occurred");
        let result = JsonFormatter::new().format(&entry).unwrap();

        let parsed: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["level"], "ERROR");
        assert_eq!(parsed["channel"], "app");
        assert_eq!(parsed["message"], "Error occurred");
        assert!(parsed["timestamp"].is_string());
        assert!(parsed.get("context").is_none());
    }

    #[test]
    fn test_json_format_with_fields() {
        let mut entry = LogEntry::new("app", LogLevel::Info, "Request completed").with_context(
            LogContext::new()
                .with_field("request_id", "abc-123")
                .with_field("latency_ms", 42),
        );
        entry.add_extra("uid", "f00ba4");

        let result = JsonFormatter::new().format(&entry).unwrap();
        let parsed: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["context"]["request_id"], "abc-123");
        assert_eq!(parsed["context"]["latency_ms"], 42);
        assert_eq!(parsed["extra"]["uid"], "f00ba4");
    }

    #[test]
    fn test_numeric_timestamp() {
        let entry = LogEntry::new("app", LogLevel::Info, "tick");
        let result = JsonFormatter::new()
            .with_timestamp_format(TimestampFormat::UnixMillis)
            .format(&entry)
            .unwrap();
        let parsed: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["timestamp"], entry.timestamp.timestamp_millis());
    }

    #[test]
    fn test_pretty_output_is_multiline() {
        let entry = LogEntry::new("app", LogLevel::Info, "tick");
        let result = JsonFormatter::new_pretty().format(&entry).unwrap();
        assert!(result.lines().count() > 1);
    }
}
