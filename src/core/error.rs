//! Error types for the logger factory

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Channel is not declared in the `loggers` section
    #[error("Call to undefined logger channel '{channel}'")]
    UnknownChannel { channel: String },

    /// Definition has no (or an empty) implementation identifier
    #[error("Missing the 'class' parameter for {kind} '{name}'")]
    MissingImplementationIdentifier { kind: String, name: String },

    /// Implementation identifier is not registered
    #[error("Class '{implementation}' not found for {kind} '{name}'")]
    ImplementationNotFound {
        kind: String,
        name: String,
        implementation: String,
    },

    /// Building the component from its merged arguments failed
    #[error("Failed to construct '{implementation}': {message}")]
    ConstructionFailure {
        implementation: String,
        message: String,
    },

    /// A definition references a name that does not exist (strict mode only)
    #[error("{owner} references undefined {kind} '{name}'")]
    UnresolvedReference {
        owner: String,
        kind: String,
        name: String,
    },

    /// Configuration file could not be read or parsed
    #[error("Failed to load configuration from '{path}': {message}")]
    ConfigLoad { path: String, message: String },

    /// Configuration file extension has no loader
    #[error("Unsupported configuration format for '{path}'")]
    UnsupportedConfigFormat { path: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    FileRotationError { path: String, message: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),

    /// Formatter error with format type
    #[error("Formatter error ({format_type}): {message}")]
    FormatterError {
        format_type: String,
        message: String,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an unknown channel error
    pub fn unknown_channel(channel: impl Into<String>) -> Self {
        LoggerError::UnknownChannel {
            channel: channel.into(),
        }
    }

    /// Create a missing implementation identifier error
    pub fn missing_implementation(kind: impl Into<String>, name: impl Into<String>) -> Self {
        LoggerError::MissingImplementationIdentifier {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create an implementation-not-found error
    pub fn implementation_not_found(
        kind: impl Into<String>,
        name: impl Into<String>,
        implementation: impl Into<String>,
    ) -> Self {
        LoggerError::ImplementationNotFound {
            kind: kind.into(),
            name: name.into(),
            implementation: implementation.into(),
        }
    }

    /// Create a construction failure error
    pub fn construction(implementation: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::ConstructionFailure {
            implementation: implementation.into(),
            message: message.into(),
        }
    }

    /// Create an unresolved reference error
    pub fn unresolved(
        owner: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        LoggerError::UnresolvedReference {
            owner: owner.into(),
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create a configuration load error
    pub fn config_load(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::ConfigLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported configuration format error
    pub fn unsupported_format(path: impl Into<String>) -> Self {
        LoggerError::UnsupportedConfigFormat { path: path.into() }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotationError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a formatter error
    pub fn formatter(format_type: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FormatterError {
            format_type: format_type.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// True for the errors raised by the object instantiator
    pub fn is_instantiation_error(&self) -> bool {
        matches!(
            self,
            LoggerError::MissingImplementationIdentifier { .. }
                | LoggerError::ImplementationNotFound { .. }
                | LoggerError::ConstructionFailure { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::unknown_channel("audit");
        assert!(matches!(err, LoggerError::UnknownChannel { .. }));

        let err = LoggerError::implementation_not_found("handler", "main", "syslog");
        assert!(matches!(err, LoggerError::ImplementationNotFound { .. }));
        assert!(err.is_instantiation_error());

        let err = LoggerError::config_load("/etc/app/logging.toml", "missing file");
        assert!(matches!(err, LoggerError::ConfigLoad { .. }));
        assert!(!err.is_instantiation_error());
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::unknown_channel("audit");
        assert_eq!(err.to_string(), "Call to undefined logger channel 'audit'");

        let err = LoggerError::missing_implementation("formatter", "pretty");
        assert_eq!(
            err.to_string(),
            "Missing the 'class' parameter for formatter 'pretty'"
        );

        let err = LoggerError::construction("file", "required parameter 'path' is missing");
        assert_eq!(
            err.to_string(),
            "Failed to construct 'file': required parameter 'path' is missing"
        );

        let err = LoggerError::unresolved("channel 'app'", "handler", "ghost");
        assert_eq!(
            err.to_string(),
            "channel 'app' references undefined handler 'ghost'"
        );
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("writing log file", "cannot write to file", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("writing log file"));
        assert!(err.to_string().contains("cannot write to file"));
    }
}
