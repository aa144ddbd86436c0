//! Reading annotation files produced by external analyzers
//!
//! An annotation file is a JSON (`.json`) or YAML (`.yaml`, `.yml`) document:
//!
//! ```text
//! tokens:
//!   - span: { start: { line: 0, column: 0 }, end: { line: 0, column: 7 } }
//!     highlight_class: keyword
//! comments:
//!   - span: { start: { line: 2, column: 0 }, end: { line: 2, column: 12 } }
//!     content: "// Entry point"
//!     raw: true
//! ```
//!
//! Both lists are optional. Comments marked `raw` still carry their comment markers and
//! are cleaned with [`clean_comment`] on load.
//!
//! Several files are read concurrently, but their contents are concatenated in the
//! order the paths were given, so the token order (and with it every tie-break in the
//! partitioner) does not depend on which read finishes first.

use crate::cire::ast::{Comment, Span, Token};
use crate::cire::prose::{clean_comment, CommentStyle};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Unsupported annotation file type: {} (expected .json, .yaml or .yml)", .0.display())]
    UnsupportedExtension(PathBuf),

    #[error("Loader task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Tokens and comments gathered from one or more annotation files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSet {
    pub tokens: Vec<Token>,
    pub comments: Vec<Comment>,
}

impl AnnotationSet {
    pub fn new(tokens: Vec<Token>, comments: Vec<Comment>) -> Self {
        Self { tokens, comments }
    }

    /// Append everything in `other` after what is already here
    pub fn extend(&mut self, other: AnnotationSet) {
        self.tokens.extend(other.tokens);
        self.comments.extend(other.comments);
    }
}

#[derive(Debug, Deserialize)]
struct AnnotationFile {
    #[serde(default)]
    tokens: Vec<Token>,
    #[serde(default)]
    comments: Vec<CommentRecord>,
}

/// A comment as stored on disk
#[derive(Debug, Clone, Deserialize)]
pub struct CommentRecord {
    pub span: Span,
    pub content: String,
    /// Content still carries comment markers
    #[serde(default)]
    pub raw: bool,
}

impl CommentRecord {
    pub fn into_comment(self, style: Option<CommentStyle>) -> Comment {
        let content = if self.raw {
            clean_comment(&self.content, style)
        } else {
            self.content
        };
        Comment::new(self.span, content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Json,
    Yaml,
}

fn file_kind(path: &Path) -> Result<FileKind, LoadError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => Ok(FileKind::Json),
        Some("yaml") | Some("yml") => Ok(FileKind::Yaml),
        _ => Err(LoadError::UnsupportedExtension(path.to_path_buf())),
    }
}

/// Parse the contents of an annotation file; `path` selects the syntax by extension
pub fn parse_annotations(
    path: &Path,
    contents: &str,
    style: Option<CommentStyle>,
) -> Result<AnnotationSet, LoadError> {
    let file: AnnotationFile = match file_kind(path)? {
        FileKind::Json => serde_json::from_str(contents).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?,
        FileKind::Yaml => serde_yaml::from_str(contents).map_err(|source| LoadError::Yaml {
            path: path.to_path_buf(),
            source,
        })?,
    };

    let comments = file
        .comments
        .into_iter()
        .map(|record| record.into_comment(style))
        .collect();

    Ok(AnnotationSet::new(file.tokens, comments))
}

/// Read and parse one annotation file
pub async fn load_annotation_file(
    path: impl AsRef<Path>,
    style: Option<CommentStyle>,
) -> Result<AnnotationSet, LoadError> {
    let path = path.as_ref();
    file_kind(path)?;

    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let set = parse_annotations(path, &contents, style)?;
    debug!(
        path = %path.display(),
        tokens = set.tokens.len(),
        comments = set.comments.len(),
        "loaded annotation file"
    );
    Ok(set)
}

/// Read every file concurrently and concatenate the results in `paths` order
///
/// Whichever read fails first, in completion order, aborts all reads still in flight;
/// a partial set is never returned.
pub async fn load_annotation_files(
    paths: &[PathBuf],
    style: Option<CommentStyle>,
) -> Result<AnnotationSet, LoadError> {
    let mut tasks = JoinSet::new();
    for (index, path) in paths.iter().cloned().enumerate() {
        tasks.spawn(async move { (index, load_annotation_file(path, style).await) });
    }

    let mut loaded: Vec<Option<AnnotationSet>> = (0..paths.len()).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined?;
        match result {
            Ok(set) => loaded[index] = Some(set),
            Err(err) => {
                tasks.abort_all();
                return Err(err);
            }
        }
    }

    let mut merged = AnnotationSet::default();
    for set in loaded.into_iter().flatten() {
        merged.extend(set);
    }
    Ok(merged)
}
