use serde::Serialize;

/// A byte range `[start, end)` into the normalized answer text.
///
/// Segments record the span they were cut from, so slicing the normalized
/// text with any segment span reproduces the exact source of that segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Returns the slice of `s` covered by this span.
    ///
    /// Returns `None` if the span is out of bounds or does not fall on
    /// char boundaries.
    pub fn slice(self, s: &str) -> Option<&str> {
        s.get(self.start..self.end)
    }
}
