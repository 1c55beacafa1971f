//! Adds the id and name of the logging thread

use crate::core::{LogEntry, Processor, Result};
use crate::factory::{Arguments, Buildable, Param};
use std::cell::RefCell;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn current_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

/// Get cached thread name, computing and caching it on first access
fn current_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// Adds `thread_id` and, for named threads, `thread_name`
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadProcessor;

impl ThreadProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Processor for ThreadProcessor {
    fn process(&self, entry: &mut LogEntry) {
        entry.add_extra("thread_id", current_thread_id());
        if let Some(name) = current_thread_name() {
            entry.add_extra("thread_name", name);
        }
    }

    fn name(&self) -> &str {
        "thread"
    }
}

impl Buildable for ThreadProcessor {
    fn parameters() -> Vec<Param> {
        Vec::new()
    }

    fn build(_args: &Arguments) -> Result<Self> {
        Ok(Self)
    }
}
