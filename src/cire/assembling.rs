//! Document assembly
//!
//! Interleaves three sources into one ordered block sequence:
//!
//! - segments from the partitioner, rendered as annotated runs
//! - comments, rendered as prose blocks that split the code into separate blocks
//! - the raw text between them, rendered as literal runs
//!
//! The assembler is a state machine with a single cursor and one read index per input.
//! Each step first emits the gap between the cursor and the nearest upcoming event (the
//! next segment, the next comment, or the end of the buffer), then handles the event at
//! the cursor. A comment wins over a segment starting at the same position, and every
//! segment that ends inside a comment is dropped, so code covered by a comment never
//! shows up as code.
//!
//! Whitespace is trimmed only at prose transitions: leading whitespace of the first run
//! of a code block, trailing whitespace of a gap that runs into a comment.

use crate::cire::ast::{
    AnnotatedRun, Block, CodeBlock, Comment, Document, Position, ProseBlock, Run, Segment, Span,
};
use crate::cire::text::SourceText;
use tracing::{debug, warn};

/// Assemble sorted segments and sorted comments into a document
pub fn assemble(segments: &[Segment], comments: &[Comment], source: &SourceText) -> Document {
    Assembler::new(segments, comments, source, true).run()
}

/// Assemble segments alone into a single verbatim listing
///
/// With no prose transitions nothing is trimmed: the literal text of the document is
/// the whole source buffer.
pub fn assemble_listing(segments: &[Segment], source: &SourceText) -> Document {
    Assembler::new(segments, &[], source, false).run()
}

struct Assembler<'a> {
    segments: &'a [Segment],
    comments: &'a [Comment],
    source: &'a SourceText,
    end: Position,
    cursor: Position,
    segment_index: usize,
    comment_index: usize,
    blocks: Vec<Block>,
    open_block: Option<CodeBlock>,
    /// Trim whitespace where code meets prose or the start of the document
    trim_edges: bool,
}

impl<'a> Assembler<'a> {
    fn new(
        segments: &'a [Segment],
        comments: &'a [Comment],
        source: &'a SourceText,
        trim_edges: bool,
    ) -> Self {
        Self {
            segments,
            comments,
            source,
            end: source.end_position(),
            cursor: Position::default(),
            segment_index: 0,
            comment_index: 0,
            blocks: Vec::new(),
            open_block: None,
            trim_edges,
        }
    }

    fn run(mut self) -> Document {
        loop {
            self.discard_covered_segments();
            if self.cursor >= self.end && self.inputs_exhausted() {
                break;
            }

            let next_segment = self.next_segment_start();
            let next_comment = self.next_comment_start();
            let gap_end = [next_segment, next_comment]
                .into_iter()
                .flatten()
                .fold(self.end, Position::min);

            if self.cursor < gap_end {
                self.push_gap(gap_end, next_comment == Some(gap_end));
                self.cursor = gap_end;
            }

            if next_comment == Some(self.cursor) {
                self.emit_comment();
            } else if next_segment == Some(self.cursor) {
                self.emit_segment();
            } else if self.cursor >= self.end {
                if !self.inputs_exhausted() {
                    warn!(
                        segments = self.segments.len() - self.segment_index,
                        comments = self.comments.len() - self.comment_index,
                        end = %self.end,
                        "annotations extend past the end of the source, ignoring them"
                    );
                }
                break;
            } else {
                self.force_advance();
            }
        }

        self.close_code_block();
        debug!(blocks = self.blocks.len(), "assembled document");
        Document::new(self.blocks)
    }

    fn inputs_exhausted(&self) -> bool {
        self.segment_index >= self.segments.len() && self.comment_index >= self.comments.len()
    }

    /// Skip segments that end at or before the cursor; they were swallowed by a comment
    fn discard_covered_segments(&mut self) {
        while let Some(segment) = self.segments.get(self.segment_index) {
            if segment.span.end > self.cursor {
                break;
            }
            debug!(span = %segment.span, "segment covered by a comment, skipping");
            self.segment_index += 1;
        }
    }

    /// Start of the next segment, clipped to the cursor when a comment ended inside it
    fn next_segment_start(&self) -> Option<Position> {
        self.segments
            .get(self.segment_index)
            .map(|segment| segment.span.start.max(self.cursor))
    }

    fn next_comment_start(&self) -> Option<Position> {
        self.comments
            .get(self.comment_index)
            .map(|comment| comment.span.start)
    }

    fn push_gap(&mut self, gap_end: Position, before_comment: bool) {
        let text = self.source.extract(&Span::new(self.cursor, gap_end));
        let mut text = text.as_str();
        if self.trim_edges && self.open_block.is_none() {
            text = text.trim_start();
        }
        if before_comment {
            text = text.trim_end();
        }
        if !text.is_empty() {
            let text = text.to_string();
            self.code_block().runs.push(Run::Text(text));
        }
    }

    fn emit_comment(&mut self) {
        let comments = self.comments;
        let comment = &comments[self.comment_index];
        self.close_code_block();
        self.blocks.push(Block::Prose(ProseBlock {
            content: comment.content.clone(),
        }));
        self.cursor = self.cursor.max(comment.span.end);
        self.comment_index += 1;
    }

    fn emit_segment(&mut self) {
        let segments = self.segments;
        let segment = &segments[self.segment_index];
        let span = Span::new(self.cursor, segment.span.end);
        let text = self.source.extract(&span);
        if text.is_empty() {
            debug!(span = %span, "segment covers no source text");
        } else {
            let run = AnnotatedRun::new(text, Segment::new(span, segment.annotation.clone()));
            self.code_block().runs.push(Run::Annotated(run));
        }
        self.cursor = segment.span.end;
        self.segment_index += 1;
    }

    /// Last-resort progress when nothing starts at the cursor
    fn force_advance(&mut self) {
        let comments = self.comments;
        if let Some(comment) = comments.get(self.comment_index) {
            if comment.span.start < self.cursor {
                warn!(
                    comment = %comment.span,
                    cursor = %self.cursor,
                    "comment overlaps code that was already emitted, dropping it"
                );
                self.comment_index += 1;
                return;
            }
        }

        warn!(cursor = %self.cursor, "no event at cursor, forcing it forward");
        let mut next = Position::new(self.cursor.line, self.cursor.column + 1);
        if next.column > self.source.line_len(next.line) {
            next = Position::new(next.line + 1, 0);
        }
        if next.line >= self.source.line_count() {
            next = self.end;
        }
        self.cursor = next;
    }

    fn code_block(&mut self) -> &mut CodeBlock {
        self.open_block.get_or_insert_with(CodeBlock::default)
    }

    fn close_code_block(&mut self) {
        if let Some(block) = self.open_block.take() {
            self.blocks.push(Block::Code(block));
        }
    }
}
