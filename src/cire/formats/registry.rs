//! Format registry for document serialization
//!
//! This module provides a pluggable registry system for document output formats.
//! Each format implements the `Formatter` trait and can be registered with `FormatRegistry`.

use crate::cire::ast::Document;
use crate::cire::config::CireConfig;
use std::collections::HashMap;
use thiserror::Error;

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Trait for document formatters
///
/// Implementors provide a way to serialize a Document to a string representation.
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "markdown", "mdx")
    fn name(&self) -> &str;

    /// Serialize a document to this format
    fn serialize(&self, doc: &Document) -> Result<String, FormatError>;

    /// Extension for output files, without the leading dot
    fn file_extension(&self) -> &str;

    /// Whether comments are lifted out of the code as prose blocks. Formats that
    /// return false get a document assembled without any comments.
    fn interleaves_prose(&self) -> bool {
        true
    }

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }
}

/// Registry of document formatters
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter
    ///
    /// If a formatter with the same name already exists, it will be replaced.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    /// Get a formatter by name
    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    /// Like [`get`](Self::get), but a missing format is an error
    pub fn require(&self, name: &str) -> Result<&dyn Formatter, FormatError> {
        self.get(name)
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Serialize a document using the specified format
    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        self.require(format)?.serialize(doc)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Create a registry with default formatters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(super::HtmlFormatter::default());
        registry.register(super::MdxFormatter::default());
        registry.register(super::JsonFormatter);

        registry
    }

    /// Create a registry whose formatters use the wrappers and options in `config`
    pub fn from_config(config: &CireConfig) -> Self {
        let mut registry = Self::new();
        let show_doc_hovers = config.render.show_doc_hovers;

        registry.register(super::HtmlFormatter {
            code_wrapper_start: config.formats.markdown.code_wrapper_start.clone(),
            code_wrapper_end: config.formats.markdown.code_wrapper_end.clone(),
            show_doc_hovers,
        });
        registry.register(super::MdxFormatter {
            code_wrapper_start: config.formats.mdx.code_wrapper_start.clone(),
            code_wrapper_end: config.formats.mdx.code_wrapper_end.clone(),
            show_doc_hovers,
        });
        registry.register(super::JsonFormatter);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
