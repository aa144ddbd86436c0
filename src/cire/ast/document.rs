//! Assembled document: an ordered sequence of code and prose blocks
//!
//! The document carries literal source text verbatim plus enough structure for a
//! renderer to decide how to decorate and escape it. No escaping happens here.

use super::annotation::Segment;
use serde::Serialize;

/// The assembled output for one source file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Concatenated text of every run in every code block, in order
    pub fn literal_text(&self) -> String {
        self.code_blocks()
            .flat_map(|block| block.runs.iter())
            .map(Run::text)
            .collect()
    }

    pub fn code_blocks(&self) -> impl Iterator<Item = &CodeBlock> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Code(code) => Some(code),
            Block::Prose(_) => None,
        })
    }

    pub fn prose_blocks(&self) -> impl Iterator<Item = &ProseBlock> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Prose(prose) => Some(prose),
            Block::Code(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Block {
    Code(CodeBlock),
    Prose(ProseBlock),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CodeBlock {
    pub runs: Vec<Run>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProseBlock {
    pub content: String,
}

/// A piece of a code block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Run {
    /// Source text with no annotation
    Text(String),
    Annotated(AnnotatedRun),
}

impl Run {
    pub fn text(&self) -> &str {
        match self {
            Run::Text(text) => text,
            Run::Annotated(run) => &run.text,
        }
    }
}

/// Source text covered by a segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedRun {
    pub text: String,
    pub segment: Segment,
}

/// How an annotated run is decorated; the first matching rule wins:
/// definition, then reference, then highlight class, then nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup<'a> {
    Definition { symbol: &'a str, class: &'a str },
    Reference { symbol: &'a str, class: &'a str },
    Classed { class: &'a str },
    Plain,
}

impl AnnotatedRun {
    pub fn new(text: impl Into<String>, segment: Segment) -> Self {
        Self {
            text: text.into(),
            segment,
        }
    }

    pub fn markup(&self) -> Markup<'_> {
        let annotation = &self.segment.annotation;
        let symbol = annotation.symbol.as_str();
        let class = annotation.highlight_class.as_str();

        if annotation.is_definition {
            Markup::Definition { symbol, class }
        } else if annotation.is_reference {
            Markup::Reference { symbol, class }
        } else if !class.is_empty() {
            Markup::Classed { class }
        } else {
            Markup::Plain
        }
    }

    /// Documentation to show on hover, if the segment carries any
    pub fn hover(&self) -> Option<String> {
        let docs = &self.segment.annotation.doc_text;
        if docs.is_empty() {
            None
        } else {
            Some(docs.join("\n"))
        }
    }
}
