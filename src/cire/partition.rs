//! Sweep-line partitioning of overlapping tokens
//!
//! Analyzers report tokens whose spans overlap arbitrarily: a highlighter may mark a
//! whole function signature while an index marks the identifier inside it. Rendering
//! needs the opposite: a flat, sorted list of spans that never overlap. [`partition`]
//! produces exactly that.
//!
//! ## Algorithm
//!
//! A cursor sweeps from the first token's start. The next event is whichever comes
//! first: the start of the next token not yet seen, or the earliest end among the
//! tokens currently covering the cursor (the active set). Between two events the
//! active set is constant, so one segment with the merged annotation of the active set
//! is emitted for that range. At each event, tokens starting there are appended to the
//! active set, then tokens ending there are removed.
//!
//! Activation runs before deactivation, so a zero-length token is added and removed at
//! the same event and never contributes to any segment. Gaps with no active token emit
//! nothing.
//!
//! ## Merge rule
//!
//! The active set keeps activation order and removals keep survivors in place. Merging
//! walks it in that order: the last non-empty symbol and highlight class win, the
//! definition and reference flags are OR-ed, and doc texts are concatenated.

use crate::cire::ast::{Annotation, Comment, Position, Segment, Span, Token};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionError {
    /// No active tokens and none left to activate, yet the sweep has not finished
    #[error("sweep stalled at {position}: no active or pending tokens")]
    StalledSweep { position: Position },
}

/// Sort tokens by start, then by end. Ties keep their input order.
pub fn sort_tokens(tokens: &mut [Token]) {
    tokens.sort_by(|a, b| a.span.cmp(&b.span));
}

/// Sort comments by start position
pub fn sort_comments(comments: &mut [Comment]) {
    comments.sort_by(|a, b| a.span.start.cmp(&b.span.start));
}

/// Split overlapping tokens into sorted, non-overlapping segments
///
/// `tokens` must already be sorted with [`sort_tokens`]. The union of the returned
/// segment spans equals the union of the input token spans.
pub fn partition(tokens: &[Token]) -> Result<Vec<Segment>, PartitionError> {
    let tokens: Vec<&Token> = tokens
        .iter()
        .filter(|token| {
            let inverted = token.span.is_inverted();
            if inverted {
                debug!(span = %token.span, "dropping inverted token");
            }
            !inverted
        })
        .collect();

    let Some(first) = tokens.first() else {
        return Ok(Vec::new());
    };

    let mut segments = Vec::new();
    let mut active: Vec<&Token> = Vec::new();
    let mut cur_pos = first.span.start;
    let mut index = 0;

    while index < tokens.len() || !active.is_empty() {
        let next_event = next_event(&tokens[index..], &active).ok_or(
            PartitionError::StalledSweep {
                position: cur_pos,
            },
        )?;

        if cur_pos < next_event && !active.is_empty() {
            segments.push(Segment::new(Span::new(cur_pos, next_event), merge(&active)));
        }

        while index < tokens.len() && tokens[index].span.start == next_event {
            active.push(tokens[index]);
            index += 1;
        }
        active.retain(|token| token.span.end != next_event);

        cur_pos = next_event;
    }

    Ok(segments)
}

/// The earlier of the next pending start and the earliest active end
fn next_event(pending: &[&Token], active: &[&Token]) -> Option<Position> {
    let next_start = pending.first().map(|token| token.span.start);
    let next_end = active.iter().map(|token| token.span.end).min();

    match (next_start, next_end) {
        (Some(start), Some(end)) => Some(start.min(end)),
        (start, end) => start.or(end),
    }
}

/// Merge the annotations of the active set, walking it in activation order
pub fn merge(active: &[&Token]) -> Annotation {
    let mut merged = Annotation::default();

    for token in active {
        let annotation = &token.annotation;
        if !annotation.symbol.is_empty() {
            merged.symbol.clone_from(&annotation.symbol);
        }
        if !annotation.highlight_class.is_empty() {
            merged
                .highlight_class
                .clone_from(&annotation.highlight_class);
        }
        merged.is_definition |= annotation.is_definition;
        merged.is_reference |= annotation.is_reference;
        merged.doc_text.extend(annotation.doc_text.iter().cloned());
    }

    merged
}
