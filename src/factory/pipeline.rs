//! Pipeline builder: turns a channel's handler list into a logger

use super::components::ComponentRegistry;
use super::config::{
    channel_owner, handler_owner, FactoryConfig, HandlerDefinition, UnresolvedReference,
};
use crate::core::{Handler, Logger, Result};

/// Assembles loggers from a [`FactoryConfig`] using a [`ComponentRegistry`]
///
/// Borrowed views only; the factory creates one per build.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    config: &'a FactoryConfig,
    registry: &'a ComponentRegistry,
    strict: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a FactoryConfig, registry: &'a ComponentRegistry) -> Self {
        Self {
            config,
            registry,
            strict: false,
        }
    }

    /// Fail on unknown references instead of skipping them
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Build a logger for `channel` with the named handlers, in order
    ///
    /// An empty list yields a logger with a single no-op handler. Unknown
    /// handler, processor and formatter names are skipped unless strict.
    ///
    /// # Errors
    ///
    /// Instantiation errors from any component abort the whole build; in
    /// strict mode an unknown name fails with `UnresolvedReference`.
    pub fn make<S: AsRef<str>>(&self, channel: &str, handler_names: &[S]) -> Result<Logger> {
        let mut logger = Logger::new(channel);

        if handler_names.is_empty() {
            logger.push_handler(Handler::null());
            return Ok(logger);
        }

        for name in handler_names.iter().map(AsRef::as_ref) {
            match self.config.handler(name) {
                Some(definition) => {
                    logger.push_handler(self.handler(name, definition)?);
                }
                None => self.skip(UnresolvedReference::new(channel_owner(channel), "handler", name))?,
            }
        }

        tracing::debug!(
            channel,
            handlers = logger.handler_count(),
            "assembled logger pipeline"
        );
        Ok(logger)
    }

    fn handler(&self, name: &str, definition: &HandlerDefinition) -> Result<Handler> {
        let mut handler = self
            .registry
            .handlers()
            .instantiate(name, &definition.definition)?;

        for processor in &definition.processors {
            match self.config.processor(processor) {
                Some(processor_def) => {
                    handler.push_processor(
                        self.registry
                            .processors()
                            .instantiate(processor, processor_def)?,
                    );
                }
                None => self.skip(UnresolvedReference::new(handler_owner(name), "processor", processor))?,
            }
        }

        if let Some(formatter) = definition.formatter.as_deref() {
            match self.config.formatter(formatter) {
                Some(formatter_def) => {
                    handler.set_formatter(
                        self.registry
                            .formatters()
                            .instantiate(formatter, formatter_def)?,
                    );
                }
                None => self.skip(UnresolvedReference::new(handler_owner(name), "formatter", formatter))?,
            }
        }

        Ok(handler)
    }

    fn skip(&self, reference: UnresolvedReference) -> Result<()> {
        if self.strict {
            return Err(reference.into());
        }
        tracing::warn!(
            owner = %reference.owner,
            kind = reference.kind,
            name = %reference.name,
            "skipping unresolved reference"
        );
        Ok(())
    }
}
