//! Source buffer and text extraction
//!
//! [`SourceText`] holds the analyzed file as a sequence of lines and hands out the literal
//! text covered by a [`Span`]. Columns are code points, so every slice goes through
//! `char_indices()` rather than byte offsets.
//!
//! Extraction never fails: out-of-range lines and columns are clamped, and inverted or
//! zero-length spans yield an empty string.

use crate::cire::ast::{Position, Span};

/// The immutable line buffer every producer and consumer agrees on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    lines: Vec<String>,
}

impl SourceText {
    /// Split `source` on `'\n'`. A trailing newline produces a final empty line.
    pub fn new(source: &str) -> Self {
        Self {
            lines: source.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Length of a line in code points (0 for lines past the end)
    pub fn line_len(&self, index: usize) -> usize {
        self.line(index).map_or(0, |line| line.chars().count())
    }

    /// Position just past the last character of the buffer
    pub fn end_position(&self) -> Position {
        match self.lines.len() {
            0 => Position::default(),
            n => Position::new(n - 1, self.line_len(n - 1)),
        }
    }

    /// The literal text covered by `span`, with lines joined by `'\n'`
    pub fn extract(&self, span: &Span) -> String {
        if span.end <= span.start || self.lines.is_empty() {
            return String::new();
        }

        let start_line = span.start.line;
        if start_line >= self.lines.len() {
            return String::new();
        }
        let end_line = span.end.line.min(self.lines.len() - 1);
        let first = &self.lines[start_line];

        if start_line == end_line {
            // clamped end line: take the rest of it
            let end_column = if span.end.line > end_line {
                usize::MAX
            } else {
                span.end.column
            };
            return char_slice(first, span.start.column, end_column).to_string();
        }

        let mut result = String::new();
        result.push_str(char_slice(first, span.start.column, usize::MAX));
        result.push('\n');
        for line in &self.lines[start_line + 1..end_line] {
            result.push_str(line);
            result.push('\n');
        }
        let end_column = if span.end.line > end_line {
            usize::MAX
        } else {
            span.end.column
        };
        result.push_str(char_slice(&self.lines[end_line], 0, end_column));
        result
    }
}

/// Slice `line` by code point indices, clamping both ends to the line
fn char_slice(line: &str, from: usize, to: usize) -> &str {
    if to <= from {
        return "";
    }
    let byte_at = |index: usize| {
        line.char_indices()
            .nth(index)
            .map_or(line.len(), |(offset, _)| offset)
    };
    let start = byte_at(from);
    let end = if to == usize::MAX { line.len() } else { byte_at(to) };
    &line[start..end.max(start)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> SourceText {
        SourceText::from_lines(["line0", "line1", "line2"])
    }

    #[rstest]
    #[case::single_line(Span::from_coords(0, 0, 0, 4), "line")]
    #[case::single_line_full(Span::from_coords(1, 0, 1, 5), "line1")]
    #[case::multi_line(Span::from_coords(0, 4, 1, 4), "0\nline")]
    #[case::multi_line_full(Span::from_coords(0, 0, 2, 5), "line0\nline1\nline2")]
    #[case::three_lines_partial(Span::from_coords(0, 3, 2, 2), "e0\nline1\nli")]
    #[case::line_break_only(Span::from_coords(0, 5, 1, 0), "\n")]
    #[case::zero_length(Span::from_coords(1, 2, 1, 2), "")]
    #[case::inverted(Span::from_coords(1, 3, 1, 1), "")]
    #[case::inverted_lines(Span::from_coords(2, 0, 1, 3), "")]
    #[case::start_line_out_of_range(Span::from_coords(3, 0, 4, 1), "")]
    #[case::end_column_clamped(Span::from_coords(0, 2, 0, 99), "ne0")]
    #[case::start_column_clamped(Span::from_coords(0, 9, 0, 12), "")]
    #[case::end_line_clamped(Span::from_coords(1, 4, 7, 0), "1\nline2")]
    fn test_extract(#[case] span: Span, #[case] expected: &str) {
        assert_eq!(sample().extract(&span), expected);
    }

    #[test]
    fn test_extract_counts_code_points() {
        let text = SourceText::new("let ñandú = \"🦀\";");
        assert_eq!(text.extract(&Span::from_coords(0, 4, 0, 9)), "ñandú");
        assert_eq!(text.extract(&Span::from_coords(0, 13, 0, 14)), "🦀");
    }

    #[test]
    fn test_end_position() {
        assert_eq!(sample().end_position(), Position::new(2, 5));
        assert_eq!(SourceText::new("a\nbé").end_position(), Position::new(1, 2));
        assert_eq!(SourceText::new("a\n").end_position(), Position::new(1, 0));
        assert_eq!(
            SourceText::from_lines(Vec::<String>::new()).end_position(),
            Position::new(0, 0)
        );
    }

    #[test]
    fn test_whole_buffer_round_trips() {
        let source = "fn main() {\n\tprintln!(\"hi\");\n}\n";
        let text = SourceText::new(source);
        let everything = Span::new(Position::default(), text.end_position());
        assert_eq!(text.extract(&everything), source);
    }
}
