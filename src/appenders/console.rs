//! Console appender implementation

use crate::core::{Appender, LogEntry, LogLevel, Result};
use crate::factory::{Arguments, Buildable, Param};
#[cfg(feature = "console")]
use colored::Colorize;
use serde_json::json;
use std::str::FromStr;

/// Which standard stream a console appender writes to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsoleStream {
    /// Error and Fatal to stderr, everything else to stdout
    #[default]
    Auto,
    Stdout,
    Stderr,
}

impl FromStr for ConsoleStream {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ConsoleStream::Auto),
            "stdout" => Ok(ConsoleStream::Stdout),
            "stderr" => Ok(ConsoleStream::Stderr),
            _ => Err(format!("Invalid console stream: '{}'", s)),
        }
    }
}

pub struct ConsoleAppender {
    use_colors: bool,
    stream: ConsoleStream,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            stream: ConsoleStream::Auto,
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Colors only apply when the `console` feature is enabled
    pub fn uses_colors(&self) -> bool {
        self.use_colors
    }

    #[must_use]
    pub fn with_stream(mut self, stream: ConsoleStream) -> Self {
        self.stream = stream;
        self
    }

    fn to_stderr(&self, level: LogLevel) -> bool {
        match self.stream {
            ConsoleStream::Auto => matches!(level, LogLevel::Error | LogLevel::Fatal),
            ConsoleStream::Stdout => false,
            ConsoleStream::Stderr => true,
        }
    }

    #[cfg(feature = "console")]
    fn paint(&self, entry: &LogEntry, formatted: &str) -> String {
        if self.use_colors {
            formatted.color(entry.level.color_code()).to_string()
        } else {
            formatted.to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint(&self, _entry: &LogEntry, formatted: &str) -> String {
        formatted.to_string()
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry, formatted: &str) -> Result<()> {
        let output = self.paint(entry, formatted);
        if self.to_stderr(entry.level) {
            eprintln!("{}", output);
        } else {
            println!("{}", output);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

impl Buildable for ConsoleAppender {
    fn parameters() -> Vec<Param> {
        vec![
            Param::optional("colors", json!(true)),
            Param::optional("stream", json!("auto")),
        ]
    }

    fn build(args: &Arguments) -> Result<Self> {
        let stream: ConsoleStream = args.parse("stream")?;
        Ok(Self::with_colors(args.boolean("colors")?).with_stream(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_routing() {
        let appender = ConsoleAppender::new();
        assert!(appender.to_stderr(LogLevel::Error));
        assert!(!appender.to_stderr(LogLevel::Warn));

        let appender = ConsoleAppender::new().with_stream(ConsoleStream::Stderr);
        assert!(appender.to_stderr(LogLevel::Debug));
    }

    #[test]
    fn test_parse_stream() {
        assert_eq!("STDERR".parse(), Ok(ConsoleStream::Stderr));
        assert!("pipe".parse::<ConsoleStream>().is_err());
    }

    #[test]
    fn test_append_does_not_fail() {
        let mut appender = ConsoleAppender::with_colors(false);
        let entry = LogEntry::new("app", LogLevel::Info, "console test");
        assert!(appender.append(&entry, "console test").is_ok());
        assert!(appender.flush().is_ok());
    }
}
