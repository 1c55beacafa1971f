//! Configuration store
//!
//! Holds the four definition tables the factory works from. Loading is
//! lenient: missing or mis-shaped sections become empty, malformed
//! entries are dropped with a warning, and references between tables are
//! not checked until a pipeline is built.

use crate::core::LoggerError;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

/// `{class, params}` descriptor for a formatter, processor or handler
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Definition {
    pub class: Option<String>,
    pub params: Map<String, Value>,
}

impl Definition {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            params: Map::new(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: Value) -> Self {
        self.params.insert(name.into(), value);
        self
    }
}

/// Handler descriptor: a [`Definition`] plus processor and formatter references
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandlerDefinition {
    pub definition: Definition,
    pub processors: Vec<String>,
    pub formatter: Option<String>,
}

impl HandlerDefinition {
    pub fn new(class: impl Into<String>) -> Self {
        Self::from(Definition::new(class))
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: Value) -> Self {
        self.definition.params.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn with_processor(mut self, name: impl Into<String>) -> Self {
        self.processors.push(name.into());
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, name: impl Into<String>) -> Self {
        self.formatter = Some(name.into());
        self
    }
}

impl From<Definition> for HandlerDefinition {
    fn from(definition: Definition) -> Self {
        Self {
            definition,
            processors: Vec::new(),
            formatter: None,
        }
    }
}

/// Shape accepted for one entry of `formatters`, `processors` or `handlers`
#[derive(Deserialize)]
struct RawDefinition {
    #[serde(default, alias = "implementation")]
    class: Option<String>,
    #[serde(default)]
    params: Map<String, Value>,
    #[serde(default)]
    processors: Vec<String>,
    #[serde(default)]
    formatter: Option<String>,
}

impl RawDefinition {
    fn parse(section: &str, name: &str, value: &Value) -> Option<Self> {
        match RawDefinition::deserialize(value) {
            Ok(raw) => Some(raw),
            Err(e) => {
                tracing::warn!(section, name, error = %e, "dropping malformed definition");
                None
            }
        }
    }
}

/// A top-level section, if present and a mapping
fn section<'a>(value: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    match value.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map),
        Some(_) => {
            tracing::warn!(section = key, "ignoring section that is not a mapping");
            None
        }
    }
}

/// A reference from one definition to a name that is not defined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    /// Referring definition, e.g. `channel 'app'`
    pub owner: String,
    /// `handler`, `processor` or `formatter`
    pub kind: &'static str,
    pub name: String,
}

impl UnresolvedReference {
    pub(crate) fn new(owner: String, kind: &'static str, name: &str) -> Self {
        Self {
            owner,
            kind,
            name: name.to_string(),
        }
    }
}

impl fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} references undefined {} '{}'", self.owner, self.kind, self.name)
    }
}

impl From<UnresolvedReference> for LoggerError {
    fn from(reference: UnresolvedReference) -> Self {
        LoggerError::unresolved(reference.owner, reference.kind, reference.name)
    }
}

pub(crate) fn channel_owner(channel: &str) -> String {
    format!("channel '{}'", channel)
}

pub(crate) fn handler_owner(handler: &str) -> String {
    format!("handler '{}'", handler)
}

/// Formatter, processor and handler definitions plus channel declarations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactoryConfig {
    formatters: IndexMap<String, Definition>,
    processors: IndexMap<String, Definition>,
    handlers: IndexMap<String, HandlerDefinition>,
    loggers: IndexMap<String, Vec<String>>,
}

impl FactoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the `formatters`, `processors`, `handlers` and `loggers` sections
    ///
    /// Never fails; see the module docs for how bad input is absorbed.
    pub fn from_value(value: &Value) -> Self {
        let mut config = Self::new();

        for (key, table) in [
            ("formatters", &mut config.formatters),
            ("processors", &mut config.processors),
        ] {
            for (name, entry) in section(value, key).into_iter().flatten() {
                if let Some(raw) = RawDefinition::parse(key, name, entry) {
                    table.insert(
                        name.clone(),
                        Definition {
                            class: raw.class,
                            params: raw.params,
                        },
                    );
                }
            }
        }

        for (name, entry) in section(value, "handlers").into_iter().flatten() {
            if let Some(raw) = RawDefinition::parse("handlers", name, entry) {
                config.handlers.insert(
                    name.clone(),
                    HandlerDefinition {
                        definition: Definition {
                            class: raw.class,
                            params: raw.params,
                        },
                        processors: raw.processors,
                        formatter: raw.formatter,
                    },
                );
            }
        }

        for (channel, entry) in section(value, "loggers").into_iter().flatten() {
            let handlers = match entry {
                Value::Array(items) => items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.clone()),
                        other => {
                            tracing::warn!(channel = %channel, item = %other, "ignoring non-string handler reference");
                            None
                        }
                    })
                    .collect(),
                _ => Vec::new(),
            };
            config.loggers.insert(channel.clone(), handlers);
        }

        config
    }

    #[must_use]
    pub fn with_formatter(mut self, name: impl Into<String>, definition: Definition) -> Self {
        self.formatters.insert(name.into(), definition);
        self
    }

    #[must_use]
    pub fn with_processor(mut self, name: impl Into<String>, definition: Definition) -> Self {
        self.processors.insert(name.into(), definition);
        self
    }

    #[must_use]
    pub fn with_handler(mut self, name: impl Into<String>, definition: impl Into<HandlerDefinition>) -> Self {
        self.handlers.insert(name.into(), definition.into());
        self
    }

    /// Declare a channel; redeclaring keeps its original position
    #[must_use]
    pub fn with_channel<I, S>(mut self, name: impl Into<String>, handlers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.loggers
            .insert(name.into(), handlers.into_iter().map(Into::into).collect());
        self
    }

    pub fn formatter(&self, name: &str) -> Option<&Definition> {
        self.formatters.get(name)
    }

    pub fn processor(&self, name: &str) -> Option<&Definition> {
        self.processors.get(name)
    }

    pub fn handler(&self, name: &str) -> Option<&HandlerDefinition> {
        self.handlers.get(name)
    }

    /// Handler names declared for `channel`
    pub fn channel(&self, channel: &str) -> Option<&[String]> {
        self.loggers.get(channel).map(Vec::as_slice)
    }

    pub fn contains_channel(&self, channel: &str) -> bool {
        self.loggers.contains_key(channel)
    }

    /// Channel names in declaration order
    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.loggers.keys().map(String::as_str)
    }

    pub fn first_channel(&self) -> Option<&str> {
        self.loggers.keys().next().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
            && self.processors.is_empty()
            && self.handlers.is_empty()
            && self.loggers.is_empty()
    }

    /// Every reference that would be skipped when building pipelines
    ///
    /// Covers channel to handler, handler to processor and handler to
    /// formatter references, in declaration order.
    pub fn unresolved_references(&self) -> Vec<UnresolvedReference> {
        let mut unresolved = Vec::new();

        for (channel, handlers) in &self.loggers {
            for name in handlers.iter().filter(|n| !self.handlers.contains_key(*n)) {
                unresolved.push(UnresolvedReference::new(channel_owner(channel), "handler", name));
            }
        }

        for (handler, definition) in &self.handlers {
            for name in definition
                .processors
                .iter()
                .filter(|n| !self.processors.contains_key(*n))
            {
                unresolved.push(UnresolvedReference::new(handler_owner(handler), "processor", name));
            }
            if let Some(name) = definition
                .formatter
                .as_deref()
                .filter(|n| !self.formatters.contains_key(*n))
            {
                unresolved.push(UnresolvedReference::new(handler_owner(handler), "formatter", name));
            }
        }

        unresolved
    }
}

impl From<&Value> for FactoryConfig {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}
