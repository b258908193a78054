/// A cursor for byte-by-byte scanning with position tracking.
///
/// Every delimiter the scanner looks for is ASCII, so any position where a
/// delimiter match starts or ends is also a char boundary of `s`.
#[derive(Clone)]
pub struct Cursor<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s`.
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns the current byte position.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    /// Peeks `offset` bytes ahead of the current position.
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.s.as_bytes().get(self.i + offset).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.rest().starts_with(pat)
    }

    /// The unscanned remainder of the input as bytes.
    pub fn rest(&self) -> &'a [u8] {
        self.s.as_bytes().get(self.i..).unwrap_or_default()
    }

    /// Finds the first occurrence of `pat` at or after `from` bytes past the
    /// current position. Returns the offset relative to the current position.
    pub fn find_from(&self, from: usize, pat: &[u8]) -> Option<usize> {
        let hay = self.rest().get(from..)?;
        if pat.is_empty() || hay.len() < pat.len() {
            return None;
        }
        hay.windows(pat.len())
            .position(|w| w == pat)
            .map(|p| p + from)
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }
}

/// True for the bytes that end a line in answer text.
pub fn is_line_break(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}
