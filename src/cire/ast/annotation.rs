//! Annotations and the spans they are attached to
//!
//! A [`Token`] is what an analyzer produces: a span plus what it knows about that span.
//! Tokens from different analyzers overlap freely. A [`Segment`] has the same shape but
//! comes out of the partitioner, so segments never overlap each other.

use super::range::Span;
use serde::{Deserialize, Serialize};

/// What is known about a span of code
///
/// All fields are optional in serialized form; an analyzer fills in only what it knows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotation {
    /// Symbol identifier used for anchors and links (empty when unknown)
    pub symbol: String,
    pub is_definition: bool,
    pub is_reference: bool,
    /// Syntax highlighting class (empty when unknown)
    pub highlight_class: String,
    /// Pre-rendered documentation shown on hover
    pub doc_text: Vec<String>,
}

impl Annotation {
    pub fn is_empty(&self) -> bool {
        self.symbol.is_empty()
            && !self.is_definition
            && !self.is_reference
            && self.highlight_class.is_empty()
            && self.doc_text.is_empty()
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    pub fn with_highlight(mut self, class: impl Into<String>) -> Self {
        self.highlight_class = class.into();
        self
    }

    pub fn definition(mut self) -> Self {
        self.is_definition = true;
        self
    }

    pub fn reference(mut self) -> Self {
        self.is_reference = true;
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc_text.push(doc.into());
        self
    }
}

/// A span plus its annotation, as produced by an analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub span: Span,
    #[serde(flatten)]
    pub annotation: Annotation,
}

impl Token {
    pub fn new(span: Span, annotation: Annotation) -> Self {
        Self { span, annotation }
    }
}

/// A comment region whose content has already been turned into prose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub span: Span,
    pub content: String,
}

impl Comment {
    pub fn new(span: Span, content: impl Into<String>) -> Self {
        Self {
            span,
            content: content.into(),
        }
    }
}

/// A non-overlapping piece of the partition, carrying the merged annotation of every
/// token that covers it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub span: Span,
    pub annotation: Annotation,
}

impl Segment {
    pub fn new(span: Span, annotation: Annotation) -> Self {
        Self { span, annotation }
    }
}

impl From<Token> for Segment {
    fn from(token: Token) -> Self {
        Self::new(token.span, token.annotation)
    }
}
