//! Logger factory: channel resolution, lazy builds and overrides

use super::components::ComponentRegistry;
use super::config::FactoryConfig;
use super::loader::load_config;
use super::pipeline::Pipeline;
use crate::core::{Logger, LoggerError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Default channel name when none is set and none is declared
pub const DEFAULT_CHANNEL: &str = "default";

/// Builds and caches one [`Logger`] per declared channel
///
/// Loggers are assembled on first access from the configured handler
/// definitions and shared as `Arc<Logger>`; repeated [`get`](Self::get)
/// calls return the same instance until [`reset`](Self::reset). An
/// override registered with [`add_override`](Self::add_override) takes
/// precedence over the built logger and survives `reset`.
///
/// # Example
///
/// ```
/// use rust_logger_factory::LoggerFactory;
/// use serde_json::json;
///
/// let mut factory = LoggerFactory::build(&json!({
///     "handlers": {
///         "memory": { "class": "memory", "params": { "level": "info" } }
///     },
///     "loggers": {
///         "app": ["memory"],
///         "audit": []
///     }
/// }));
///
/// assert_eq!(factory.get_default(), "app");
/// let logger = factory.get(Some("app")).unwrap();
/// logger.info("ready");
///
/// // Undeclared channels fall back to the default
/// let fallback = factory.get(Some("unknown")).unwrap();
/// assert!(std::sync::Arc::ptr_eq(&logger, &fallback));
/// ```
pub struct LoggerFactory {
    config: FactoryConfig,
    registry: ComponentRegistry,
    default: Option<String>,
    built: HashMap<String, Arc<Logger>>,
    overrides: HashMap<String, Arc<Logger>>,
    strict: bool,
}

impl LoggerFactory {
    pub fn new(config: FactoryConfig) -> Self {
        Self {
            config,
            registry: ComponentRegistry::new(),
            default: None,
            built: HashMap::new(),
            overrides: HashMap::new(),
            strict: false,
        }
    }

    /// Create a factory from a nested configuration structure
    ///
    /// Sections that are missing or have the wrong shape load as empty.
    pub fn build(config: &Value) -> Self {
        Self::new(FactoryConfig::from_value(config))
    }

    /// Create a factory from a `.json` or `.toml` file
    pub fn build_from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::build(&load_config(path, None)?))
    }

    /// Like [`build_from_file`](Self::build_from_file), resolving a relative
    /// `path` against `root`
    pub fn build_from_file_in(root: impl AsRef<Path>, path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::build(&load_config(path, Some(root.as_ref()))?))
    }

    /// Replace the component registry (to add custom implementations)
    #[must_use]
    pub fn with_registry(mut self, registry: ComponentRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Fail on unknown handler, processor or formatter names instead of skipping them
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.registry
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// # Errors
    ///
    /// `UnknownChannel` if `channel` is not declared
    pub fn set_default(&mut self, channel: &str) -> Result<&mut Self> {
        if !self.exists(channel) {
            return Err(LoggerError::unknown_channel(channel));
        }
        self.default = Some(channel.to_string());
        Ok(self)
    }

    /// The explicit default, else the first declared channel, else [`DEFAULT_CHANNEL`]
    pub fn get_default(&self) -> &str {
        self.default
            .as_deref()
            .or_else(|| self.config.first_channel())
            .unwrap_or(DEFAULT_CHANNEL)
    }

    /// Whether `channel` is declared in the configuration
    ///
    /// Channels that only have an override are not reported.
    pub fn exists(&self, channel: &str) -> bool {
        self.config.contains_channel(channel)
    }

    /// Logger for `channel`, building and caching it on first access
    ///
    /// `None`, an empty name or an undeclared channel resolve to the
    /// default channel. The default channel's logger is always built as
    /// part of this call.
    ///
    /// # Errors
    ///
    /// Any instantiation error raised while building the default or the
    /// requested channel.
    pub fn get(&mut self, channel: Option<&str>) -> Result<Arc<Logger>> {
        let default = self.get_default().to_string();
        let channel = match channel {
            Some(name) if !name.is_empty() && self.exists(name) => name.to_string(),
            _ => default.clone(),
        };

        let default_logger = self.cached_or_build(&default)?;

        if let Some(logger) = self.overrides.get(&channel) {
            return Ok(Arc::clone(logger));
        }

        if channel == default {
            return Ok(default_logger);
        }
        self.cached_or_build(&channel)
    }

    fn cached_or_build(&mut self, channel: &str) -> Result<Arc<Logger>> {
        if let Some(logger) = self.built.get(channel) {
            return Ok(Arc::clone(logger));
        }

        let handlers = self.config.channel(channel).unwrap_or_default();
        let logger = Arc::new(self.pipeline().make(channel, handlers)?);
        tracing::debug!(channel, "cached logger");
        self.built.insert(channel.to_string(), Arc::clone(&logger));
        Ok(logger)
    }

    fn pipeline(&self) -> Pipeline<'_> {
        Pipeline::new(&self.config, &self.registry).strict(self.strict)
    }

    /// Build an uncached logger for `channel` from the given handler names
    ///
    /// An empty list yields a logger with a single no-op handler.
    pub fn make<S: AsRef<str>>(&self, channel: &str, handler_names: &[S]) -> Result<Logger> {
        self.pipeline().make(channel, handler_names)
    }

    /// Serve `logger` for `channel` from now on, bypassing the builder
    ///
    /// [`get`](Self::get) only reaches declared channels and the default,
    /// so an override for any other name is stored but never returned.
    pub fn add_override(&mut self, channel: impl Into<String>, logger: impl Into<Arc<Logger>>) -> &mut Self {
        let channel = channel.into();
        if !self.exists(&channel) && channel != self.get_default() {
            tracing::warn!(channel = %channel, "override registered for an undeclared channel");
        }
        self.overrides.insert(channel, logger.into());
        self
    }

    pub fn has_override(&self, channel: &str) -> bool {
        self.overrides.contains_key(channel)
    }

    /// Whether a logger for `channel` is currently cached
    pub fn is_built(&self, channel: &str) -> bool {
        self.built.contains_key(channel)
    }

    /// Drop every cached logger; overrides are kept
    pub fn reset(&mut self) -> &mut Self {
        tracing::debug!(cached = self.built.len(), "resetting logger cache");
        self.built.clear();
        self
    }

    /// Indexed set; same as [`add_override`](Self::add_override)
    pub fn set(&mut self, channel: impl Into<String>, logger: impl Into<Arc<Logger>>) -> &mut Self {
        self.add_override(channel, logger)
    }

    /// Indexed membership; same as [`exists`](Self::exists)
    pub fn contains(&self, channel: &str) -> bool {
        self.exists(channel)
    }

    /// Indexed removal is not supported; always returns `false` and changes nothing
    pub fn remove(&mut self, _channel: &str) -> bool {
        false
    }
}

impl Default for LoggerFactory {
    fn default() -> Self {
        Self::new(FactoryConfig::new())
    }
}

impl From<FactoryConfig> for LoggerFactory {
    fn from(config: FactoryConfig) -> Self {
        Self::new(config)
    }
}

impl std::fmt::Debug for LoggerFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut built: Vec<&String> = self.built.keys().collect();
        built.sort();
        let mut overrides: Vec<&String> = self.overrides.keys().collect();
        overrides.sort();

        f.debug_struct("LoggerFactory")
            .field("default", &self.get_default())
            .field("channels", &self.config.channels().collect::<Vec<_>>())
            .field("built", &built)
            .field("overrides", &overrides)
            .field("strict", &self.strict)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn factory() -> LoggerFactory {
        LoggerFactory::build(&json!({
            "handlers": {
                "memory": { "class": "memory" },
                "quiet": { "class": "null" }
            },
            "loggers": {
                "app": ["memory"],
                "audit": ["quiet", "memory"],
                "silent": []
            }
        }))
    }

    #[test]
    fn test_get_builds_default_first() {
        let mut factory = factory();
        factory.get(Some("audit")).unwrap();
        assert!(factory.is_built("app"));
        assert!(factory.is_built("audit"));
        assert!(!factory.is_built("silent"));
    }

    #[test]
    fn test_empty_store_uses_fallback_default() {
        let mut factory = LoggerFactory::default();
        assert_eq!(factory.get_default(), DEFAULT_CHANNEL);
        assert!(!factory.exists(DEFAULT_CHANNEL));

        let logger = factory.get(None).unwrap();
        assert_eq!(logger.channel(), DEFAULT_CHANNEL);
        assert_eq!(logger.handler_names(), vec!["null"]);

        assert!(matches!(
            factory.set_default("app"),
            Err(LoggerError::UnknownChannel { .. })
        ));
    }

    #[test]
    fn test_override_for_fallback_default_is_reachable() {
        let mut factory = LoggerFactory::default();
        let custom = Arc::new(Logger::new("custom"));
        factory.add_override(DEFAULT_CHANNEL, Arc::clone(&custom));
        assert!(Arc::ptr_eq(&factory.get(None).unwrap(), &custom));
    }

    #[test]
    fn test_make_does_not_cache() {
        let factory = factory();
        let logger = factory.make("adhoc", &["quiet", "memory"]).unwrap();
        assert_eq!(logger.handler_names(), vec!["null", "memory"]);
        assert!(!factory.is_built("adhoc"));
    }

    #[test]
    fn test_debug_output_lists_state() {
        let mut factory = factory();
        factory.get(None).unwrap();
        let debug = format!("{:?}", factory);
        assert!(debug.contains("default: \"app\""));
        assert!(debug.contains("built: [\"app\"]"));
    }
}
