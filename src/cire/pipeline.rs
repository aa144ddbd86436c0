//! End-to-end conversion of a source file and its annotations into a rendered document
//!
//! The stages run in a fixed order: tokens and comments are sorted, comments that do
//! not open their line are dropped (when configured), tokens are partitioned, the
//! document is assembled and finally serialized by the requested format. Formats that
//! do not interleave prose get a document assembled without comments.

use crate::cire::assembling::{assemble, assemble_listing};
use crate::cire::ast::{Comment, Document};
use crate::cire::config::CireConfig;
use crate::cire::formats::{FormatError, FormatRegistry};
use crate::cire::loader::{AnnotationSet, LoadError};
use crate::cire::partition::{partition, sort_comments, sort_tokens, PartitionError};
use crate::cire::prose::{is_standalone, CommentStyle};
use crate::cire::text::SourceText;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Partitioning failed: {0}")]
    Partition(#[from] PartitionError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configured conversion pipeline
pub struct Pipeline {
    config: CireConfig,
    registry: FormatRegistry,
}

impl Pipeline {
    /// Pipeline whose formatters are built from `config`
    pub fn new(config: CireConfig) -> Self {
        let registry = FormatRegistry::from_config(&config);
        Self { config, registry }
    }

    pub fn with_registry(config: CireConfig, registry: FormatRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &CireConfig {
        &self.config
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Comment syntax used to clean raw comments, from `prose.language`
    pub fn comment_style(&self) -> Option<CommentStyle> {
        CommentStyle::for_language(&self.config.prose.language)
    }

    /// Sort, partition and assemble without rendering
    ///
    /// With `interleave_prose` off, comments are ignored and stay part of the code, and
    /// the document is one verbatim listing of the whole source.
    pub fn build_document(
        &self,
        source: &SourceText,
        annotations: AnnotationSet,
        interleave_prose: bool,
    ) -> Result<Document, PipelineError> {
        let AnnotationSet {
            mut tokens,
            comments,
        } = annotations;

        let mut comments: Vec<Comment> = if interleave_prose {
            comments
                .into_iter()
                .filter(|comment| {
                    !self.config.prose.standalone_only || is_standalone(source, &comment.span)
                })
                .collect()
        } else {
            Vec::new()
        };

        sort_tokens(&mut tokens);
        sort_comments(&mut comments);

        let segments = partition(&tokens)?;
        debug!(
            tokens = tokens.len(),
            segments = segments.len(),
            comments = comments.len(),
            "partitioned tokens"
        );

        if interleave_prose {
            Ok(assemble(&segments, &comments, source))
        } else {
            Ok(assemble_listing(&segments, source))
        }
    }

    /// Convert `source` with its annotations into the named format
    pub fn run(
        &self,
        source: &str,
        annotations: AnnotationSet,
        format: &str,
    ) -> Result<String, PipelineError> {
        let formatter = self.registry.require(format)?;
        let source = SourceText::new(source);
        let document = self.build_document(&source, annotations, formatter.interleaves_prose())?;
        debug!(format, blocks = document.blocks.len(), "rendering document");
        Ok(formatter.serialize(&document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cire::ast::{Annotation, Block, Span, Token};
    use crate::cire::config::{load_defaults, Loader};

    const SOURCE: &str = "let x = 1; // trailing\n// Standalone note\nlet y = x;";

    fn annotations() -> AnnotationSet {
        AnnotationSet::new(
            vec![
                Token::new(
                    Span::from_coords(2, 4, 2, 5),
                    Annotation::default().with_highlight("variable"),
                ),
                Token::new(
                    Span::from_coords(0, 0, 0, 3),
                    Annotation::default().with_highlight("keyword"),
                ),
            ],
            vec![
                Comment::new(Span::from_coords(1, 0, 1, 18), "Standalone note"),
                Comment::new(Span::from_coords(0, 11, 0, 22), "trailing"),
            ],
        )
    }

    #[test]
    fn test_standalone_comments_only() {
        let pipeline = Pipeline::new(load_defaults().unwrap());
        let source = SourceText::new(SOURCE);
        let doc = pipeline
            .build_document(&source, annotations(), true)
            .unwrap();

        assert_eq!(doc.blocks.len(), 3);
        assert_eq!(doc.prose_blocks().count(), 1);
        match &doc.blocks[0] {
            Block::Code(code) => {
                let text: String = code.runs.iter().map(|run| run.text()).collect();
                assert_eq!(text, "let x = 1; // trailing");
            }
            other => panic!("expected code block, got {other:?}"),
        }
    }

    #[test]
    fn test_all_comments_when_not_standalone_only() {
        let config = Loader::new()
            .set_override("prose.standalone_only", false)
            .unwrap()
            .build()
            .unwrap();
        let pipeline = Pipeline::new(config);
        let source = SourceText::new(SOURCE);
        let doc = pipeline
            .build_document(&source, annotations(), true)
            .unwrap();

        assert_eq!(doc.prose_blocks().count(), 2);
    }

    #[test]
    fn test_comments_ignored_without_interleaving() {
        let pipeline = Pipeline::new(load_defaults().unwrap());
        let source = SourceText::new(SOURCE);
        let doc = pipeline
            .build_document(&source, annotations(), false)
            .unwrap();

        assert_eq!(doc.prose_blocks().count(), 0);
        assert_eq!(doc.literal_text(), SOURCE);
    }

    #[test]
    fn test_run_markdown() {
        let pipeline = Pipeline::new(load_defaults().unwrap());
        let output = pipeline
            .run("fn main() {}", AnnotationSet::default(), "markdown")
            .unwrap();
        assert_eq!(output, "<pre><code class='cire'>fn main() {}\n</code></pre>");
    }

    #[test]
    fn test_run_markdown_keeps_leading_indentation() {
        let pipeline = Pipeline::new(load_defaults().unwrap());
        let output = pipeline
            .run("\n    indented();", AnnotationSet::default(), "markdown")
            .unwrap();
        assert_eq!(output, "<pre><code class='cire'>\n    indented();\n</code></pre>");
    }

    #[test]
    fn test_run_unknown_format() {
        let pipeline = Pipeline::new(load_defaults().unwrap());
        let err = pipeline
            .run("x", AnnotationSet::default(), "pdf")
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Format(FormatError::FormatNotFound(ref name)) if name == "pdf"
        ));
        assert_eq!(err.to_string(), "Format 'pdf' not found");
    }

    #[test]
    fn test_comment_style_from_config() {
        let config = Loader::new()
            .set_override("prose.language", "Python")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            Pipeline::new(config).comment_style(),
            Some(CommentStyle::Hash)
        );
    }
}
