//! Appender implementations
//!
//! Every appender here is registered with the factory under the id given
//! in parentheses: `null`, `console`, `file`, `rotating_file`, `network`
//! and `memory`.

pub mod console;
pub mod file;
pub mod memory;
pub mod network;
pub mod null;
pub mod rotating_file;

pub use console::{ConsoleAppender, ConsoleStream};
pub use file::FileAppender;
pub use memory::{MemoryAppender, MemoryRecords};
pub use network::NetworkAppender;
pub use null::NullAppender;
pub use rotating_file::{RotatingFileAppender, RotationPolicy};

// Re-export trait for convenience
pub use crate::core::Appender;
