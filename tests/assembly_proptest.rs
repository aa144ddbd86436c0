//! Property-based tests for document assembly

use cire::cire::assembling::assemble;
use cire::cire::ast::{Annotation, Block, Comment, Position, Run, Span, Token};
use cire::cire::partition::{partition, sort_comments, sort_tokens};
use cire::cire::text::SourceText;
use proptest::prelude::*;

fn lines_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z ]{0,10}", 1..6)
}

/// Position of the `offset`-th character, counting each line break as one character
fn position_at(lines: &[String], mut offset: usize) -> Position {
    for (index, line) in lines.iter().enumerate() {
        let len = line.chars().count();
        if offset <= len {
            return Position::new(index, offset);
        }
        offset -= len + 1;
    }
    let last = lines.len() - 1;
    Position::new(last, lines[last].chars().count())
}

fn tokens_over(lines: &[String], raw: &[(usize, usize, bool)]) -> Vec<Token> {
    let total = lines.iter().map(|l| l.chars().count() + 1).sum::<usize>();
    let mut tokens: Vec<Token> = raw
        .iter()
        .map(|&(a, b, definition)| {
            let (a, b) = (a % total, b % total);
            let span = Span::new(position_at(lines, a.min(b)), position_at(lines, a.max(b)));
            let annotation = if definition {
                Annotation::default().with_symbol("s").definition()
            } else {
                Annotation::default().with_highlight("kw")
            };
            Token::new(span, annotation)
        })
        .collect();
    sort_tokens(&mut tokens);
    tokens
}

fn whole_line_comments(lines: &[String], comment_lines: &[bool]) -> Vec<Comment> {
    let mut comments: Vec<Comment> = lines
        .iter()
        .enumerate()
        .filter(|(index, _)| comment_lines[*index])
        .map(|(index, line)| {
            Comment::new(
                Span::from_coords(index, 0, index, line.chars().count()),
                format!("comment {index}"),
            )
        })
        .collect();
    sort_comments(&mut comments);
    comments
}

fn in_line_tokens(lines: &[String], raw: &[(usize, usize, usize)]) -> Vec<Token> {
    let mut tokens: Vec<Token> = raw
        .iter()
        .map(|&(line, a, b)| {
            let line = line % lines.len();
            let len = lines[line].chars().count();
            let (a, b) = (a % (len + 1), b % (len + 1));
            Token::new(
                Span::from_coords(line, a.min(b), line, a.max(b)),
                Annotation::default().with_highlight("kw"),
            )
        })
        .collect();
    sort_tokens(&mut tokens);
    tokens
}

fn without_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

proptest! {
    #[test]
    fn literal_text_reproduces_source_without_comments(
        lines in lines_strategy(),
        raw in prop::collection::vec((0..80usize, 0..80usize, any::<bool>()), 0..8),
    ) {
        let source_text = lines.join("\n");
        let source = SourceText::new(&source_text);
        let segments = partition(&tokens_over(&lines, &raw)).unwrap();

        let doc = assemble(&segments, &[], &source);
        let literal = doc.literal_text();

        // Only leading whitespace at the very start of the document may be trimmed
        prop_assert!(source_text.ends_with(&literal), "{:?} vs {:?}", literal, source_text);
        let trimmed = &source_text[..source_text.len() - literal.len()];
        prop_assert!(trimmed.trim().is_empty(), "trimmed non-whitespace {:?}", trimmed);
        prop_assert!(doc.prose_blocks().next().is_none());
    }

    #[test]
    fn literal_text_keeps_every_code_line_around_comments(
        lines in lines_strategy(),
        comment_lines in prop::collection::vec(any::<bool>(), 6),
        raw in prop::collection::vec((0..6usize, 0..11usize, 0..11usize), 0..10),
    ) {
        let source = SourceText::new(&lines.join("\n"));
        let comments = whole_line_comments(&lines, &comment_lines);
        let segments = partition(&in_line_tokens(&lines, &raw)).unwrap();

        let doc = assemble(&segments, &comments, &source);

        let code_lines: Vec<&str> = lines
            .iter()
            .enumerate()
            .filter(|(index, _)| !comment_lines[*index])
            .map(|(_, line)| line.as_str())
            .collect();
        prop_assert_eq!(
            without_whitespace(&doc.literal_text()),
            without_whitespace(&code_lines.join("\n"))
        );

        // Each code block is a run of consecutive code lines, cut only at its edges
        for block in &doc.blocks {
            if let Block::Code(code) = block {
                let text: String = code.runs.iter().map(Run::text).collect();
                prop_assert!(
                    code_lines.join("\n").contains(text.trim()),
                    "block {:?} is not contiguous code",
                    text
                );
            }
        }
    }

    #[test]
    fn tokens_inside_comments_never_render(
        lines in lines_strategy(),
        comment_lines in prop::collection::vec(any::<bool>(), 6),
        raw in prop::collection::vec((0..6usize, 0..11usize, 0..11usize), 0..10),
    ) {
        let source = SourceText::new(&lines.join("\n"));
        let is_comment = |line: usize| comment_lines[line];
        let comments = whole_line_comments(&lines, &comment_lines);
        let segments = partition(&in_line_tokens(&lines, &raw)).unwrap();

        let doc = assemble(&segments, &comments, &source);

        let prose: Vec<&str> = doc.prose_blocks().map(|p| p.content.as_str()).collect();
        let expected: Vec<&str> = comments.iter().map(|c| c.content.as_str()).collect();
        prop_assert_eq!(prose, expected);

        for block in &doc.blocks {
            if let Block::Code(code) = block {
                prop_assert!(!code.runs.is_empty());
                for run in &code.runs {
                    if let Run::Annotated(run) = run {
                        let line = run.segment.span.start.line;
                        prop_assert!(!is_comment(line), "run {:?} rendered on comment line {}", run.text, line);
                    }
                }
            }
        }
    }
}
