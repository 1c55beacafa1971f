//! Processor trait for record enrichment

use super::log_entry::LogEntry;

/// Transforms or enriches a record before it is formatted
///
/// Processors usually add fields to [`LogEntry::extra`]. They run in the
/// order they were pushed onto the handler, on the handler's own copy of
/// the record, so one handler's processors never leak into another's.
pub trait Processor: Send + Sync {
    fn process(&self, entry: &mut LogEntry);
    fn name(&self) -> &str;
}
