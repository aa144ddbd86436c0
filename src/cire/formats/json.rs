//! JSON dump of the assembled document

use super::registry::{FormatError, Formatter};
use crate::cire::ast::Document;

/// Serializes the document structure as-is, for debugging and external renderers
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn file_extension(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Document structure as JSON"
    }
}
