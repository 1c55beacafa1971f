//! Built-in component catalogue

use super::registry::{Buildable, Param, Registry};
use crate::appenders::{
    ConsoleAppender, FileAppender, MemoryAppender, NetworkAppender, NullAppender,
    RotatingFileAppender,
};
use crate::core::{Appender, Formatter, Handler, LogLevel, Processor};
use crate::formatters::{JsonFormatter, LineFormatter, LogfmtFormatter};
use crate::processors::{ProcessIdProcessor, StaticFieldsProcessor, ThreadProcessor, UidProcessor};
use serde_json::json;

/// Parameter every handler accepts; sets the handler's minimum level
pub const LEVEL_PARAM: &str = "level";

/// One [`Registry`] per component category
///
/// [`ComponentRegistry::new`] preloads the crate's own implementations:
///
/// | kind      | ids |
/// |-----------|-----|
/// | handler   | `null`, `console`, `file`, `rotating_file`, `network`, `memory` |
/// | formatter | `line`, `json`, `logfmt` |
/// | processor | `static_fields`, `process_id`, `thread`, `uid` |
pub struct ComponentRegistry {
    formatters: Registry<Box<dyn Formatter>>,
    processors: Registry<Box<dyn Processor>>,
    handlers: Registry<Handler>,
}

impl ComponentRegistry {
    /// A registry with the built-in implementations
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry
            .register_handler::<NullAppender>("null")
            .register_handler::<ConsoleAppender>("console")
            .register_handler::<FileAppender>("file")
            .register_handler::<RotatingFileAppender>("rotating_file")
            .register_handler::<NetworkAppender>("network")
            .register_handler::<MemoryAppender>("memory")
            .register_formatter::<LineFormatter>("line")
            .register_formatter::<JsonFormatter>("json")
            .register_formatter::<LogfmtFormatter>("logfmt")
            .register_processor::<StaticFieldsProcessor>("static_fields")
            .register_processor::<ProcessIdProcessor>("process_id")
            .register_processor::<ThreadProcessor>("thread")
            .register_processor::<UidProcessor>("uid");
        registry
    }

    /// A registry with nothing registered
    pub fn empty() -> Self {
        Self {
            formatters: Registry::new("formatter"),
            processors: Registry::new("processor"),
            handlers: Registry::new("handler"),
        }
    }

    /// Register an appender as a handler implementation
    ///
    /// The schema gains a leading `level` parameter (default `"debug"`)
    /// unless the appender already declares one.
    pub fn register_handler<A>(&mut self, id: impl Into<String>) -> &mut Self
    where
        A: Appender + Buildable + 'static,
    {
        let mut parameters = A::parameters();
        if !parameters.iter().any(|p| p.name() == LEVEL_PARAM) {
            parameters.insert(0, Param::optional(LEVEL_PARAM, json!("debug")));
        }

        self.handlers.register(id, parameters, |args| {
            let level: LogLevel = args.parse(LEVEL_PARAM)?;
            Ok(Handler::new(A::build(args)?).with_level(level))
        });
        self
    }

    pub fn register_formatter<F>(&mut self, id: impl Into<String>) -> &mut Self
    where
        F: Formatter + Buildable + 'static,
    {
        self.formatters.register(id, F::parameters(), |args| {
            Ok(Box::new(F::build(args)?) as Box<dyn Formatter>)
        });
        self
    }

    pub fn register_processor<P>(&mut self, id: impl Into<String>) -> &mut Self
    where
        P: Processor + Buildable + 'static,
    {
        self.processors.register(id, P::parameters(), |args| {
            Ok(Box::new(P::build(args)?) as Box<dyn Processor>)
        });
        self
    }

    pub fn formatters(&self) -> &Registry<Box<dyn Formatter>> {
        &self.formatters
    }

    pub fn processors(&self) -> &Registry<Box<dyn Processor>> {
        &self.processors
    }

    pub fn handlers(&self) -> &Registry<Handler> {
        &self.handlers
    }

    /// Direct access for closure-based registrations
    pub fn handlers_mut(&mut self) -> &mut Registry<Handler> {
        &mut self.handlers
    }

    pub fn formatters_mut(&mut self) -> &mut Registry<Box<dyn Formatter>> {
        &mut self.formatters
    }

    pub fn processors_mut(&mut self) -> &mut Registry<Box<dyn Processor>> {
        &mut self.processors
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("formatters", &self.formatters)
            .field("processors", &self.processors)
            .field("handlers", &self.handlers)
            .finish()
    }
}
