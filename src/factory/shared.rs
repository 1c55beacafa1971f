//! Thread-safe handle to a [`LoggerFactory`]

use super::logger_factory::LoggerFactory;
use crate::core::{Logger, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable, lock-guarded factory handle
///
/// Every operation takes the same lock, so concurrent first accesses to a
/// channel build its logger once and all callers receive that instance.
#[derive(Clone)]
pub struct SharedLoggerFactory {
    inner: Arc<Mutex<LoggerFactory>>,
}

impl SharedLoggerFactory {
    pub fn new(factory: LoggerFactory) -> Self {
        Self {
            inner: Arc::new(Mutex::new(factory)),
        }
    }

    pub fn get(&self, channel: Option<&str>) -> Result<Arc<Logger>> {
        self.inner.lock().get(channel)
    }

    pub fn get_default(&self) -> String {
        self.inner.lock().get_default().to_string()
    }

    pub fn set_default(&self, channel: &str) -> Result<()> {
        self.inner.lock().set_default(channel).map(|_| ())
    }

    pub fn exists(&self, channel: &str) -> bool {
        self.inner.lock().exists(channel)
    }

    pub fn add_override(&self, channel: impl Into<String>, logger: impl Into<Arc<Logger>>) {
        self.inner.lock().add_override(channel, logger);
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    /// Run `f` with exclusive access to the factory
    pub fn with_factory<R>(&self, f: impl FnOnce(&mut LoggerFactory) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl From<LoggerFactory> for SharedLoggerFactory {
    fn from(factory: LoggerFactory) -> Self {
        Self::new(factory)
    }
}

impl std::fmt::Debug for SharedLoggerFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedLoggerFactory")
            .field(&*self.inner.lock())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::thread;

    #[test]
    fn test_concurrent_first_access_builds_once() {
        let shared = SharedLoggerFactory::new(LoggerFactory::build(&json!({
            "handlers": { "memory": { "class": "memory" } },
            "loggers": { "app": ["memory"], "jobs": ["memory"] }
        })));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || shared.get(Some("jobs")).unwrap())
            })
            .collect();

        let loggers: Vec<Arc<Logger>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(loggers.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(shared.get_default(), "app");
    }

    #[test]
    fn test_with_factory() {
        let shared = SharedLoggerFactory::from(LoggerFactory::default());
        let strict = shared.with_factory(|factory| factory.is_strict());
        assert!(!strict);
    }
}
