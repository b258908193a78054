use serde::Serialize;

use super::span::Span;
use crate::typeset::MathMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SegmentKind {
    /// Prose handed to the markdown pipeline untouched.
    PlainText,
    /// An expression rendered within a line of text.
    InlineMath,
    /// An expression rendered on its own centered line.
    BlockMath,
}

impl SegmentKind {
    /// The typesetting mode for math kinds, `None` for plain text.
    pub fn math_mode(self) -> Option<MathMode> {
        match self {
            SegmentKind::PlainText => None,
            SegmentKind::InlineMath => Some(MathMode::Inline),
            SegmentKind::BlockMath => Some(MathMode::Block),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SegmentKind::PlainText => "PlainText",
            SegmentKind::InlineMath => "InlineMath",
            SegmentKind::BlockMath => "BlockMath",
        }
    }
}

/// One classified, ordered unit of an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub kind: SegmentKind,
    /// For math kinds the expression with delimiters stripped and trimmed,
    /// for text the literal slice.
    pub content: String,
    /// The untouched delimited slice, present only for math kinds.
    pub original_match: Option<String>,
    /// Where this segment was cut from in the normalized text.
    pub span: Span,
}

impl Segment {
    pub fn text(span: Span, content: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::PlainText,
            content: content.into(),
            original_match: None,
            span,
        }
    }

    /// Builds a math segment. `kind` must not be [`SegmentKind::PlainText`].
    pub fn math(
        kind: SegmentKind,
        span: Span,
        content: impl Into<String>,
        original_match: impl Into<String>,
    ) -> Self {
        debug_assert!(kind != SegmentKind::PlainText);
        Self {
            kind,
            content: content.into(),
            original_match: Some(original_match.into()),
            span,
        }
    }

    pub fn is_math(&self) -> bool {
        self.kind != SegmentKind::PlainText
    }

    /// The text a reader should see if this segment cannot be typeset.
    pub fn literal(&self) -> &str {
        self.original_match.as_deref().unwrap_or(&self.content)
    }
}
