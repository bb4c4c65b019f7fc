//! Byte ranges and locations in the original source buffer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open byte range `[start, end)` into the untouched original text.
///
/// Ordering is by `start`, then `end`, which is the order edits are applied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} is past end {end}");
        Self { start, end }
    }

    /// Span of `len` bytes beginning at `offset`.
    pub fn at(offset: usize, len: usize) -> Self {
        Self::new(offset, offset + len)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether two spans claim any common text.
    ///
    /// Identical spans always overlap, including two insertions at the same
    /// offset. An insertion touching the boundary of a range does not.
    pub fn overlaps(&self, other: &Span) -> bool {
        if self == other {
            return true;
        }
        if self.is_empty() || other.is_empty() {
            let (point, range) = if self.is_empty() {
                (self.start, other)
            } else {
                (other.start, self)
            };
            return range.start < point && point < range.end;
        }
        self.start < other.end && other.start < self.end
    }

    /// Whether `other` lies entirely inside this span, boundaries included.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Slice of `source` covered by this span, if it lies on char boundaries.
    pub fn text<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Location of a construct as reported by a front end.
///
/// When the construct was produced by expanding a macro argument, the text
/// that must be edited is where the argument was spelled, not where the macro
/// body put it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLoc {
    pub offset: usize,
    pub macro_arg_spelling: Option<usize>,
}

impl SourceLoc {
    /// A location written directly in the file.
    pub fn new(offset: usize) -> Self {
        Self {
            offset,
            macro_arg_spelling: None,
        }
    }

    /// A location inside a macro argument expansion, spelled at `spelling`.
    pub fn in_macro_arg(offset: usize, spelling: usize) -> Self {
        Self {
            offset,
            macro_arg_spelling: Some(spelling),
        }
    }

    /// Offset where the text literally appears.
    pub fn effective(&self) -> usize {
        self.macro_arg_spelling.unwrap_or(self.offset)
    }

    /// Span of `len` bytes at the effective offset.
    pub fn span(&self, len: usize) -> Span {
        Span::at(self.effective(), len)
    }
}

impl From<usize> for SourceLoc {
    fn from(offset: usize) -> Self {
        Self::new(offset)
    }
}
