//! Network appender for remote logging
//!
//! Sends formatted records, one per line, to a remote server over TCP.

use crate::core::{Appender, LogEntry, LoggerError, Result};
use crate::factory::{Arguments, Buildable, Param};
use serde_json::json;
use std::io::Write;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Network appender that sends logs to a remote TCP server
///
/// # Example
///
/// ```no_run
/// use rust_logger_factory::appenders::NetworkAppender;
/// use rust_logger_factory::prelude::*;
///
/// let appender = NetworkAppender::new("127.0.0.1:8080")
///     .expect("Failed to connect to log server");
///
/// let mut logger = Logger::new("remote");
/// logger.push_handler(Handler::new(appender));
/// logger.info("This log will be sent to 127.0.0.1:8080");
/// ```
pub struct NetworkAppender {
    stream: Option<TcpStream>,
    address: String,
    reconnect_on_error: bool,
    timeout: Duration,
}

impl NetworkAppender {
    /// Connect to `addr` immediately
    ///
    /// # Errors
    ///
    /// Returns error if connection fails
    pub fn new(addr: impl ToSocketAddrs + ToString) -> Result<Self> {
        let mut appender = Self::lazy(addr.to_string());
        appender.connect()?;
        Ok(appender)
    }

    /// Create an appender that connects on the first record
    pub fn lazy(addr: impl Into<String>) -> Self {
        Self {
            stream: None,
            address: addr.into(),
            reconnect_on_error: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Enable or disable automatic reconnection on errors
    ///
    /// Default: enabled
    #[must_use]
    pub fn with_reconnect(mut self, enable: bool) -> Self {
        self.reconnect_on_error = enable;
        self
    }

    /// Read and write timeout applied to every new connection
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    fn connect(&mut self) -> Result<()> {
        let stream = TcpStream::connect(&self.address).map_err(|e| {
            LoggerError::io_operation(
                "connect to log server",
                format!("Failed to connect to '{}'", self.address),
                e,
            )
        })?;

        // Prevent hanging on a stalled peer
        stream.set_write_timeout(Some(self.timeout))?;
        stream.set_read_timeout(Some(self.timeout))?;
        stream.set_nodelay(true)?;

        self.stream = Some(stream);
        Ok(())
    }

    fn send(&mut self, payload: &[u8]) -> std::io::Result<()> {
        match self.stream {
            Some(ref mut stream) => stream.write_all(payload),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "network stream not connected",
            )),
        }
    }
}

impl Appender for NetworkAppender {
    fn append(&mut self, _entry: &LogEntry, formatted: &str) -> Result<()> {
        let mut payload = String::with_capacity(formatted.len() + 1);
        payload.push_str(formatted);
        payload.push('\n');

        if self.stream.is_none() {
            self.connect()?;
        }

        match self.send(payload.as_bytes()) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.stream = None;

                if !self.reconnect_on_error {
                    return Err(e.into());
                }

                match self.connect() {
                    Ok(()) => {
                        self.send(payload.as_bytes())?;
                        Ok(())
                    }
                    Err(reconnect_err) => Err(LoggerError::writer(format!(
                        "Failed to send log and reconnect: {} (reconnect: {})",
                        e, reconnect_err
                    ))),
                }
            }
        }
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut stream) = self.stream {
            stream.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "network"
    }
}

impl Drop for NetworkAppender {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl Buildable for NetworkAppender {
    fn parameters() -> Vec<Param> {
        vec![
            Param::required("address"),
            Param::optional("reconnect", json!(true)),
            Param::optional("lazy", json!(true)),
            Param::optional("timeout_ms", json!(5000)),
        ]
    }

    fn build(args: &Arguments) -> Result<Self> {
        let address = args.string("address")?;
        let mut appender = Self::lazy(address.as_str())
            .with_reconnect(args.boolean("reconnect")?)
            .with_timeout(Duration::from_millis(args.unsigned("timeout_ms")?));

        if !args.boolean("lazy")? {
            appender
                .connect()
                .map_err(|e| args.failure(e.to_string()))?;
        }
        Ok(appender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use std::io::{BufRead, BufReader};
    use std::net::TcpListener;

    /// Bind then drop a listener so the port is known to be closed
    fn closed_port() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);
        addr
    }

    #[test]
    fn test_eager_connect_fails_without_server() {
        assert!(NetworkAppender::new(closed_port()).is_err());
    }

    #[test]
    fn test_lazy_append_without_server() {
        let mut appender = NetworkAppender::lazy(closed_port()).with_reconnect(false);
        assert!(!appender.is_connected());

        let entry = LogEntry::new("app", LogLevel::Info, "test");
        assert!(appender.append(&entry, "test").is_err());
    }

    #[test]
    fn test_sends_one_line_per_record() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let mut appender = NetworkAppender::lazy(addr);
        let entry = LogEntry::new("app", LogLevel::Warn, "over the wire");
        appender.append(&entry, "over the wire").unwrap();
        appender.flush().unwrap();

        let (socket, _) = listener.accept().unwrap();
        let mut line = String::new();
        BufReader::new(socket).read_line(&mut line).unwrap();
        assert_eq!(line, "over the wire\n");
    }
}
