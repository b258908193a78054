//! # Notation Kinds
//!
//! Types that own the delimiters of each math notation found in answer text.
//!
//! ## Types
//!
//! - **`BracketBlock`**: `OPEN = b"\\["`, `CLOSE = b"\\]"`
//! - **`DollarBlock`**: `FENCE = b"$$"`
//! - **`ParenInline`**: `OPEN = b"\\("`, `CLOSE = b"\\)"`
//! - **`DollarInline`**: `DOLLAR = b'$'`
//! - **`NamedExpression`**: `( \command{...} )` with a configurable command list
//!
//! The scanner calls these constants; it never hardcodes `\[` or `$`.

pub mod block;
pub mod inline;
pub mod named;

pub use block::{BracketBlock, DollarBlock};
pub use inline::{DollarInline, ParenInline};
pub use named::NamedExpression;

use super::types::SegmentKind;

/// Which notation a scanned candidate was written in.
///
/// Variants are declared in scan precedence order: at any position the
/// scanner tries them top to bottom and keeps the first that matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    BracketBlock,
    DollarBlock,
    ParenInline,
    DollarInline,
    Named,
}

impl Notation {
    /// The segment kind a non-degenerate match of this notation produces.
    pub fn kind(self) -> SegmentKind {
        match self {
            Notation::BracketBlock | Notation::DollarBlock => SegmentKind::BlockMath,
            Notation::ParenInline | Notation::DollarInline | Notation::Named => {
                SegmentKind::InlineMath
            }
        }
    }

    /// Byte widths of the (opening, closing) delimiters stripped on extraction.
    pub fn delimiter_widths(self) -> (usize, usize) {
        match self {
            Notation::BracketBlock => (BracketBlock::OPEN.len(), BracketBlock::CLOSE.len()),
            Notation::DollarBlock => (DollarBlock::FENCE.len(), DollarBlock::FENCE.len()),
            Notation::ParenInline => (ParenInline::OPEN.len(), ParenInline::CLOSE.len()),
            Notation::DollarInline => (1, 1),
            Notation::Named => (1, 1),
        }
    }
}
