//! Lookup of converter implementations by kind.

use super::{CommandConverter, Converter, ConverterKind};
use crate::config::Config;
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Converter implementations, at most one per [`ConverterKind`].
#[derive(Default)]
pub struct ConverterRegistry {
    converters: BTreeMap<ConverterKind, Box<dyn Converter>>,
}

impl ConverterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry of command-backed converters, one per configured command.
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::new();
        for kind in ConverterKind::ALL {
            let command = config.converter_command(kind);
            registry.register(Box::new(CommandConverter::new(kind, command)));
        }
        registry
    }

    /// Add a converter, replacing any earlier one of the same kind.
    pub fn register(&mut self, converter: Box<dyn Converter>) {
        self.converters.insert(converter.kind(), converter);
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, converter: Box<dyn Converter>) -> Self {
        self.register(converter);
        self
    }

    /// Look up the converter for `kind`.
    pub fn get(&self, kind: ConverterKind) -> Result<&dyn Converter> {
        self.converters
            .get(&kind)
            .map(|c| &**c)
            .ok_or(Error::ConverterNotRegistered { name: kind.name() })
    }

    /// Number of registered converters.
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl std::fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.converters.keys()).finish()
    }
}
