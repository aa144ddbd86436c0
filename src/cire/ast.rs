//! Data model shared by every stage of the pipeline
//!
//! - [`range`]: `Position` and `Span`, the coordinate system all producers agree on
//! - [`annotation`]: what analyzers say about a span (`Annotation`, `Token`, `Comment`)
//!   and what the partitioner emits (`Segment`)
//! - [`document`]: the assembled output (`Document`, `Block`, `Run`)
//!
//! Everything here is built once per run from immutable input and never mutated after.

pub mod annotation;
pub mod document;
pub mod range;

pub use annotation::{Annotation, Comment, Segment, Token};
pub use document::{AnnotatedRun, Block, CodeBlock, Document, Markup, ProseBlock, Run};
pub use range::{Position, Span};
