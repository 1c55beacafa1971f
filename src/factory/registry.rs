//! Object instantiator
//!
//! Components are built from `{class, params}` definitions. Every
//! constructible type declares an ordered parameter schema next to its
//! constructor; supplied parameters are overlaid onto the schema defaults
//! by name and the merged set is handed to the constructor.

use super::config::Definition;
use crate::core::{LoggerError, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// One entry of a parameter schema
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    name: &'static str,
    default: Option<Value>,
}

impl Param {
    /// A parameter without a default; it must be supplied
    pub fn required(name: &'static str) -> Self {
        Self {
            name,
            default: None,
        }
    }

    pub fn optional(name: &'static str, default: Value) -> Self {
        Self {
            name,
            default: Some(default),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Merged argument set handed to [`Buildable::build`]
///
/// Required parameters that were not supplied hold `null`; the typed
/// accessors turn that into a [`LoggerError::ConstructionFailure`].
#[derive(Debug, Clone, PartialEq)]
pub struct Arguments {
    implementation: String,
    values: IndexMap<String, Value>,
}

impl Arguments {
    pub fn new(implementation: impl Into<String>, values: IndexMap<String, Value>) -> Self {
        Self {
            implementation: implementation.into(),
            values,
        }
    }

    /// Identifier of the implementation being built
    pub fn implementation(&self) -> &str {
        &self.implementation
    }

    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    /// Raw value, `None` when absent or null
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    fn present(&self, name: &str) -> Result<&Value> {
        self.value(name)
            .ok_or_else(|| self.failure(format!("required parameter '{}' is missing", name)))
    }

    fn mismatch(&self, name: &str, expected: &str, found: &Value) -> LoggerError {
        self.failure(format!(
            "parameter '{}' must be {}, got {}",
            name, expected, found
        ))
    }

    pub fn string(&self, name: &str) -> Result<String> {
        match self.present(name)? {
            Value::String(s) => Ok(s.clone()),
            other => Err(self.mismatch(name, "a string", other)),
        }
    }

    pub fn opt_string(&self, name: &str) -> Result<Option<String>> {
        match self.value(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.mismatch(name, "a string", other)),
        }
    }

    pub fn boolean(&self, name: &str) -> Result<bool> {
        let value = self.present(name)?;
        value
            .as_bool()
            .ok_or_else(|| self.mismatch(name, "a boolean", value))
    }

    pub fn unsigned(&self, name: &str) -> Result<u64> {
        let value = self.present(name)?;
        value
            .as_u64()
            .ok_or_else(|| self.mismatch(name, "a non-negative integer", value))
    }

    /// Parse a string parameter with [`FromStr`]
    pub fn parse<T>(&self, name: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let raw = self.string(name)?;
        raw.parse()
            .map_err(|e| self.failure(format!("invalid value for '{}': {}", name, e)))
    }

    pub fn object(&self, name: &str) -> Result<&Map<String, Value>> {
        let value = self.present(name)?;
        value
            .as_object()
            .ok_or_else(|| self.mismatch(name, "an object", value))
    }

    /// Wrap an implementation's own error as a construction failure
    pub fn failure(&self, message: impl Into<String>) -> LoggerError {
        LoggerError::construction(self.implementation.as_str(), message)
    }
}

/// A type constructible from named parameters
pub trait Buildable: Sized {
    /// Ordered parameter schema with defaults
    fn parameters() -> Vec<Param>;

    fn build(args: &Arguments) -> Result<Self>;
}

type Constructor<T> = Box<dyn Fn(&Arguments) -> Result<T> + Send + Sync>;

struct Implementation<T> {
    parameters: Vec<Param>,
    construct: Constructor<T>,
}

/// Implementation id to schema and constructor, for one component kind
pub struct Registry<T> {
    kind: &'static str,
    implementations: HashMap<String, Implementation<T>>,
}

impl<T> Registry<T> {
    /// `kind` names the category in error messages ("handler", "formatter", ...)
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            implementations: HashMap::new(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Register (or replace) an implementation
    pub fn register<F>(&mut self, id: impl Into<String>, parameters: Vec<Param>, construct: F) -> &mut Self
    where
        F: Fn(&Arguments) -> Result<T> + Send + Sync + 'static,
    {
        self.implementations.insert(
            id.into(),
            Implementation {
                parameters,
                construct: Box::new(construct),
            },
        );
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        self.implementations.contains_key(id)
    }

    /// Registered ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.implementations.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn parameters(&self, id: &str) -> Option<&[Param]> {
        self.implementations
            .get(id)
            .map(|imp| imp.parameters.as_slice())
    }

    /// Build a fresh instance for the definition registered under `name`
    ///
    /// # Errors
    ///
    /// - `MissingImplementationIdentifier` if the definition has no class
    /// - `ImplementationNotFound` if the class is not registered
    /// - `ConstructionFailure` for an undeclared parameter or a failing constructor
    pub fn instantiate(&self, name: &str, definition: &Definition) -> Result<T> {
        let id = definition
            .class
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| LoggerError::missing_implementation(self.kind, name))?;

        let implementation = self
            .implementations
            .get(id)
            .ok_or_else(|| LoggerError::implementation_not_found(self.kind, name, id))?;

        let mut values: IndexMap<String, Value> = implementation
            .parameters
            .iter()
            .map(|p| (p.name.to_string(), p.default.clone().unwrap_or(Value::Null)))
            .collect();

        for (key, value) in &definition.params {
            match values.get_mut(key) {
                Some(slot) => *slot = value.clone(),
                None => {
                    return Err(LoggerError::construction(
                        id,
                        format!("unknown parameter '{}'", key),
                    ))
                }
            }
        }

        (implementation.construct)(&Arguments::new(id, values))
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("kind", &self.kind)
            .field("implementations", &self.ids())
            .finish()
    }
}
