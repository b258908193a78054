use super::{
    cursor::{Cursor, is_line_break},
    kinds::{
        BracketBlock, DollarBlock, DollarInline, NamedExpression, Notation, ParenInline,
    },
    span::Span,
};

/// A delimited slice found by [`scan`], before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub notation: Notation,
    /// Full span including delimiters.
    pub span: Span,
}

/// Scans `s` left to right for delimited math, returning non-overlapping
/// candidates in order.
///
/// At each position the notations are tried in [`Notation`] order and the
/// first match wins; the scan then resumes after it. Closing delimiters are
/// matched lazily, so `$a$ and $b$` yields two candidates rather than one.
/// Bytes not covered by a candidate are prose.
pub fn scan(s: &str, named_commands: &[String]) -> Vec<Candidate> {
    let mut scanner = Scanner {
        named_commands,
        no_bracket_close: false,
        no_fence_close: false,
        paren_fail_before: 0,
    };
    let mut cur = Cursor::new(s);
    let mut out = vec![];

    while !cur.eof() {
        if let Some(candidate) = scanner.try_candidate(&mut cur) {
            out.push(candidate);
            continue;
        }
        cur.bump();
    }

    out
}

struct Scanner<'o> {
    named_commands: &'o [String],
    // Once a search for a multi-line closer fails from some position it
    // fails from every later one too, so later openers skip the search.
    no_bracket_close: bool,
    no_fence_close: bool,
    // A `\(` search that ran into a line break at this offset without
    // closing also fails for every opener before it.
    paren_fail_before: usize,
}

impl Scanner<'_> {
    fn try_candidate(&mut self, cur: &mut Cursor<'_>) -> Option<Candidate> {
        if let Some(c) = self.try_bracket_block(cur) {
            return Some(c);
        }
        if let Some(c) = self.try_dollar_block(cur) {
            return Some(c);
        }
        if let Some(c) = self.try_paren_inline(cur) {
            return Some(c);
        }
        if let Some(c) = try_dollar_inline(cur) {
            return Some(c);
        }
        try_named(cur, self.named_commands)
    }

    /// `\[ ... \]`, shortest closing match, line breaks allowed.
    fn try_bracket_block(&mut self, cur: &mut Cursor<'_>) -> Option<Candidate> {
        if self.no_bracket_close || !cur.starts_with(BracketBlock::OPEN) {
            return None;
        }
        let Some(close) = cur.find_from(BracketBlock::OPEN.len(), BracketBlock::CLOSE) else {
            self.no_bracket_close = true;
            return None;
        };
        Some(take(cur, Notation::BracketBlock, close + BracketBlock::CLOSE.len()))
    }

    /// `$$ ... $$`, shortest closing match, line breaks allowed.
    fn try_dollar_block(&mut self, cur: &mut Cursor<'_>) -> Option<Candidate> {
        if self.no_fence_close || !cur.starts_with(DollarBlock::FENCE) {
            return None;
        }
        let Some(close) = cur.find_from(DollarBlock::FENCE.len(), DollarBlock::FENCE) else {
            self.no_fence_close = true;
            return None;
        };
        Some(take(cur, Notation::DollarBlock, close + DollarBlock::FENCE.len()))
    }

    /// `\( ... \)`, shortest closing match on the same line.
    fn try_paren_inline(&mut self, cur: &mut Cursor<'_>) -> Option<Candidate> {
        if cur.pos() < self.paren_fail_before || !cur.starts_with(ParenInline::OPEN) {
            return None;
        }
        let rest = cur.rest();
        let mut j = ParenInline::OPEN.len();
        while j < rest.len() && !is_line_break(rest[j]) {
            if rest[j..].starts_with(ParenInline::CLOSE) {
                return Some(take(cur, Notation::ParenInline, j + ParenInline::CLOSE.len()));
            }
            j += 1;
        }
        self.paren_fail_before = cur.pos() + j;
        None
    }
}

/// Consumes `len` bytes from the cursor as a candidate of `notation`.
fn take(cur: &mut Cursor<'_>, notation: Notation, len: usize) -> Candidate {
    let start = cur.pos();
    cur.bump_n(len);
    Candidate {
        notation,
        span: Span::new(start, cur.pos()),
    }
}

/// `$ ... $` on one line whose first inner byte is not another `$`.
fn try_dollar_inline(cur: &mut Cursor<'_>) -> Option<Candidate> {
    if cur.peek() != Some(DollarInline::DOLLAR) {
        return None;
    }
    match cur.peek_at(1) {
        None | Some(DollarInline::DOLLAR) => return None,
        Some(b) if is_line_break(b) => return None,
        Some(_) => {}
    }
    let rest = cur.rest();
    let mut j = 2;
    while j < rest.len() {
        match rest[j] {
            DollarInline::DOLLAR => return Some(take(cur, Notation::DollarInline, j + 1)),
            b if is_line_break(b) => return None,
            _ => j += 1,
        }
    }
    None
}

/// `( \command{...} )` where `command` is on the configured list.
///
/// The argument must be brace-balanced (`\{` and `\}` do not count) and the
/// whole expression must sit on one line.
fn try_named(cur: &mut Cursor<'_>, commands: &[String]) -> Option<Candidate> {
    if cur.peek() != Some(NamedExpression::OPEN) {
        return None;
    }
    let rest = cur.rest();
    let mut j = 1;
    while j < rest.len() && NamedExpression::is_padding(rest[j]) {
        j += 1;
    }
    if rest.get(j) != Some(&NamedExpression::ESCAPE) {
        return None;
    }
    j += 1;

    let name_start = j;
    while j < rest.len() && rest[j].is_ascii_alphabetic() {
        j += 1;
    }
    let name = &rest[name_start..j];
    if name.is_empty() || !commands.iter().any(|c| c.as_bytes() == name) {
        return None;
    }

    if rest.get(j) != Some(&NamedExpression::ARG_OPEN) {
        return None;
    }
    j += 1;
    let mut depth = 1usize;
    while depth > 0 {
        let b = *rest.get(j)?;
        if is_line_break(b) {
            return None;
        }
        match b {
            NamedExpression::ESCAPE => {
                // Escaped byte, but never swallow a line break
                if rest.get(j + 1).is_some_and(|&n| !is_line_break(n)) {
                    j += 1;
                }
            }
            NamedExpression::ARG_OPEN => depth += 1,
            NamedExpression::ARG_CLOSE => depth -= 1,
            _ => {}
        }
        j += 1;
    }

    while j < rest.len() && NamedExpression::is_padding(rest[j]) {
        j += 1;
    }
    if rest.get(j) != Some(&NamedExpression::CLOSE) {
        return None;
    }
    Some(take(cur, Notation::Named, j + 1))
}
