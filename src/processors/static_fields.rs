//! Adds a fixed set of fields to every record

use crate::core::{FieldValue, LogContext, LogEntry, Processor, Result};
use crate::factory::{Arguments, Buildable, Param};
use serde_json::json;

/// Stamps every record with the same key-value pairs
///
/// Typical use is deployment metadata such as `service`, `region` or
/// `version`. Later processors overwrite fields set by earlier ones.
#[derive(Debug, Clone, Default)]
pub struct StaticFieldsProcessor {
    fields: LogContext,
}

impl StaticFieldsProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.add_field(key, value);
        self
    }

    pub fn fields(&self) -> &LogContext {
        &self.fields
    }
}

impl Processor for StaticFieldsProcessor {
    fn process(&self, entry: &mut LogEntry) {
        for (key, value) in self.fields.fields() {
            entry.add_extra(key.clone(), value.clone());
        }
    }

    fn name(&self) -> &str {
        "static_fields"
    }
}

impl Buildable for StaticFieldsProcessor {
    fn parameters() -> Vec<Param> {
        vec![Param::optional("fields", json!({}))]
    }

    fn build(args: &Arguments) -> Result<Self> {
        let fields = args
            .object("fields")?
            .iter()
            .fold(Self::new(), |processor, (key, value)| {
                processor.with_field(key.clone(), FieldValue::from_json_value(value))
            });
        Ok(fields)
    }
}
