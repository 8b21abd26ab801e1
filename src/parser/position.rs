//! Source positions for tokens and AST nodes
//!
//! Offsets count characters from the start of the input, beginning at 0.
//! `start` is inclusive and `finish` is exclusive. Lines are 1-based.

use std::fmt;

/// An immutable span of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourcePosition {
    pub start: usize,
    pub finish: usize,
    pub line_start: usize,
    pub line_finish: usize,
}

impl SourcePosition {
    pub fn new(start: usize, finish: usize, line_start: usize, line_finish: usize) -> Self {
        Self {
            start,
            finish,
            line_start,
            line_finish,
        }
    }

    /// Position of a token that sits on a single line.
    pub fn on_line(line: usize, start: usize, finish: usize) -> Self {
        Self::new(start, finish, line, line)
    }

    /// Span from the first token of a phrase to the last token it consumed.
    ///
    /// When `last` ends before `first` begins, nothing was consumed and the
    /// result is an empty span at `first`.
    pub fn span(first: SourcePosition, last: SourcePosition) -> SourcePosition {
        if last.finish < first.start {
            return SourcePosition::new(first.start, first.start, first.line_start, first.line_start);
        }
        SourcePosition::new(first.start, last.finish, first.line_start, last.line_finish)
    }

    pub fn len(&self) -> usize {
        self.finish - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.finish
    }

    pub fn is_multiline(&self) -> bool {
        self.line_finish > self.line_start
    }

    pub fn contains(&self, other: &SourcePosition) -> bool {
        self.start <= other.start && other.finish <= self.finish
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_multiline() {
            write!(
                f,
                "lines {}-{} ({}, {})",
                self.line_start, self.line_finish, self.start, self.finish
            )
        } else {
            write!(f, "line {} ({}, {})", self.line_start, self.start, self.finish)
        }
    }
}
