//! Processor implementations
//!
//! Each processor adds fields to a record's `extra` map before the
//! handler's formatter runs.

pub mod process_id;
pub mod static_fields;
pub mod thread;
pub mod uid;

pub use process_id::ProcessIdProcessor;
pub use static_fields::StaticFieldsProcessor;
pub use thread::ThreadProcessor;
pub use uid::UidProcessor;

// Re-export trait for convenience
pub use crate::core::Processor;
