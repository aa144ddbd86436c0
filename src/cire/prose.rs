//! Turning raw comment text into prose
//!
//! Comment producers hand over comment regions either already cleaned or as raw source
//! text. For the raw case, [`clean_comment`] strips comment markers the way a reader
//! would: line markers and the single space after them, javadoc-style star gutters,
//! and the common indentation of plain block comments.
//!
//! [`is_standalone`] decides whether a comment is prose at all: only comments that open
//! their line are. A comment trailing code on the same line stays part of the code.

use crate::cire::ast::Span;
use crate::cire::text::SourceText;
use once_cell::sync::Lazy;
use regex::Regex;

static STAR_GUTTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\* ?").unwrap());

/// Comment syntax family of a language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `// line` and `/* block */`
    CFamily,
    /// `# line`
    Hash,
    /// `-- line` and `{- block -}`
    Haskell,
}

impl CommentStyle {
    pub fn for_language(language: &str) -> Option<Self> {
        match language.to_lowercase().as_str() {
            "go" | "golang" | "java" | "js" | "javascript" | "ts" | "typescript" | "rust" | "c"
            | "cpp" | "c++" | "csharp" | "c#" | "cs" | "php" | "dart" => Some(Self::CFamily),
            "python" | "py" | "ruby" => Some(Self::Hash),
            "haskell" => Some(Self::Haskell),
            _ => None,
        }
    }
}

/// Strip comment syntax from `raw`, leaving the prose inside
///
/// Without a known style the text is only trimmed.
pub fn clean_comment(raw: &str, style: Option<CommentStyle>) -> String {
    match style {
        Some(CommentStyle::CFamily) => {
            if raw.starts_with("//") {
                return clean_line(raw, "//");
            }
            if let Some(inner) = raw.strip_prefix("/*").and_then(|s| s.strip_suffix("*/")) {
                return clean_c_block(inner);
            }
        }
        Some(CommentStyle::Hash) => {
            if raw.starts_with('#') {
                return clean_line(raw, "#");
            }
        }
        Some(CommentStyle::Haskell) => {
            if raw.starts_with("--") {
                return clean_line(raw, "--");
            }
            if raw.starts_with("{- ") && raw.ends_with(" -}") {
                if let Some(inner) = raw.strip_prefix("{-").and_then(|s| s.strip_suffix("-}")) {
                    if !inner.contains('\n') {
                        return inner.trim().to_string();
                    }
                    return clean_raw_block(inner);
                }
            }
        }
        None => {}
    }
    raw.trim().to_string()
}

/// Whether the comment at `span` is the first thing on its line
pub fn is_standalone(source: &SourceText, span: &Span) -> bool {
    source.line(span.start.line).is_some_and(|line| {
        line.chars()
            .take(span.start.column)
            .all(char::is_whitespace)
    })
}

fn clean_line(text: &str, marker: &str) -> String {
    let text = text.strip_prefix(marker).unwrap_or(text);
    let text = text.strip_prefix(' ').unwrap_or(text);
    text.trim_end().to_string()
}

fn clean_c_block(inner: &str) -> String {
    let lines: Vec<&str> = inner.split('\n').collect();
    let non_blank: Vec<&&str> = lines.iter().filter(|l| !l.trim().is_empty()).collect();
    let starred =
        !non_blank.is_empty() && non_blank.iter().all(|l| l.trim_start().starts_with('*'));

    if !starred {
        return clean_raw_block(inner);
    }

    let mut cleaned: Vec<String> = lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                STAR_GUTTER.replace(line, "").trim_end().to_string()
            }
        })
        .collect();

    // drop the lines holding the opening `/**` and closing `*/`
    if cleaned.first().is_some_and(String::is_empty) {
        cleaned.remove(0);
    }
    if cleaned.last().is_some_and(String::is_empty) {
        cleaned.pop();
    }
    cleaned.join("\n")
}

fn clean_raw_block(inner: &str) -> String {
    let lines: Vec<&str> = inner.split('\n').collect();
    let mut start = 0;
    let mut end = lines.len();
    if lines.first().is_some_and(|l| l.trim().is_empty()) {
        start = 1;
    }
    if end > start && lines[end - 1].trim().is_empty() {
        end -= 1;
    }

    let trimmed: Vec<&str> = lines[start..end].iter().map(|l| l.trim_end()).collect();
    dedent(&trimmed).join("\n")
}

/// Remove the indentation shared by every non-blank line
fn dedent(lines: &[&str]) -> Vec<String> {
    let common = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            let skip: usize = line
                .chars()
                .take(common)
                .take_while(|c| c.is_whitespace())
                .map(char::len_utf8)
                .sum();
            line[skip..].to_string()
        })
        .collect()
}
