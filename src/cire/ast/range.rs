//! Position and span types for source locations
//!
//! ## Types
//!
//! - [`Position`] - A line:column position in the source buffer
//! - [`Span`] - A start/end pair of positions
//!
//! ## Key Design
//!
//! - **Zero-based**: lines and columns both start at 0
//! - **Code points**: columns count `char`s from the start of the line, not bytes
//! - **Total order**: positions compare by (line, column); spans by (start, end), which is
//!   exactly the order tokens are sorted in before partitioning
//! - **No validation**: an inverted span (end before start) is representable; consumers
//!   degrade gracefully instead of rejecting it

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a position in source code (line and column)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A range in the source buffer, from `start` (inclusive) to `end` (exclusive)
///
/// Field order matters: the derived `Ord` sorts by start, then by end, so among spans
/// sharing a start the one ending sooner comes first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Shorthand for `Span::new(Position::new(..), Position::new(..))`
    pub fn from_coords(
        start_line: usize,
        start_column: usize,
        end_line: usize,
        end_column: usize,
    ) -> Self {
        Self::new(
            Position::new(start_line, start_column),
            Position::new(end_line, end_column),
        )
    }

    /// Zero-length span (start == end)
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// End lies before start
    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }

    /// Whether `pos` falls inside the half-open range `[start, end)`
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Whether the half-open ranges share at least one position
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
