//! Adds a random identifier shared by every record of one processor instance

use crate::core::{LogEntry, LoggerError, Processor, Result};
use crate::factory::{Arguments, Buildable, Param};
use rand::Rng;
use serde_json::json;

const MAX_LENGTH: usize = 32;

/// Correlates records by a hex id generated when the processor is built
///
/// Since the factory caches loggers, every record from one channel carries
/// the same id until the factory is reset and the channel is rebuilt.
/// [`UidProcessor::reset`] only applies to a processor you own directly.
#[derive(Debug, Clone)]
pub struct UidProcessor {
    uid: String,
}

impl UidProcessor {
    /// # Errors
    ///
    /// Fails if `length` is 0 or greater than 32
    pub fn new(length: usize) -> Result<Self> {
        if length == 0 || length > MAX_LENGTH {
            return Err(LoggerError::construction(
                "uid",
                format!("length must be between 1 and {}, got {}", MAX_LENGTH, length),
            ));
        }
        Ok(Self {
            uid: Self::generate(length),
        })
    }

    fn generate(length: usize) -> String {
        let mut rng = rand::thread_rng();
        (0..length)
            .map(|_| std::char::from_digit(rng.gen_range(0..16), 16).unwrap_or('0'))
            .collect()
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Generate a fresh id of the same length
    pub fn reset(&mut self) {
        self.uid = Self::generate(self.uid.len());
    }
}

impl Processor for UidProcessor {
    fn process(&self, entry: &mut LogEntry) {
        entry.add_extra("uid", self.uid.as_str());
    }

    fn name(&self) -> &str {
        "uid"
    }
}

impl Buildable for UidProcessor {
    fn parameters() -> Vec<Param> {
        vec![Param::optional("length", json!(7))]
    }

    fn build(args: &Arguments) -> Result<Self> {
        let length = args.unsigned("length")?;
        Self::new(usize::try_from(length).unwrap_or(usize::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    #[test]
    fn test_uid_shape() {
        let processor = UidProcessor::new(12).unwrap();
        assert_eq!(processor.uid().len(), 12);
        assert!(processor.uid().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_uid_is_stable_until_reset() {
        let mut processor = UidProcessor::new(32).unwrap();
        let mut first = LogEntry::new("app", LogLevel::Info, "a");
        let mut second = LogEntry::new("app", LogLevel::Info, "b");
        processor.process(&mut first);
        processor.process(&mut second);
        assert_eq!(first.extra.get("uid"), second.extra.get("uid"));

        let before = processor.uid().to_string();
        processor.reset();
        assert_eq!(processor.uid().len(), 32);
        // 32 hex digits colliding is not a realistic outcome
        assert_ne!(processor.uid(), before);
    }

    #[test]
    fn test_invalid_length() {
        assert!(UidProcessor::new(0).is_err());
        assert!(UidProcessor::new(33).is_err());
    }
}
