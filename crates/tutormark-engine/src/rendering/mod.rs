//! # Rendering
//!
//! Turns segments into render nodes one at a time.
//!
//! Plain text passes through for the markdown pipeline. Math goes to a
//! [`Typesetter`]; when that fails the failure is reported to a
//! [`DiagnosticSink`] and the segment becomes a [`FailureMarker`] holding the
//! original delimited text, so a bad expression never blanks the rest of an
//! answer.
//!
//! Rendering keeps no state between segments.

pub mod html;
pub mod scheme;
pub mod sink;

use serde::Serialize;

pub use scheme::{ColorScheme, Palette, ParseColorSchemeError};
pub use sink::{DiagnosticSink, LogSink, NullSink};

use crate::{
    segmenting::{Segment, gap_before},
    typeset::{MathMode, Typeset, Typesetter},
};

/// Title shown on failure markers unless overridden.
pub const DEFAULT_FAILURE_LABEL: &str = "Could not render this expression";

/// The rendered form of one segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RenderNode {
    /// Prose for the markdown pipeline, unmodified.
    Markdown(String),
    /// A typeset expression. Inline output must not wrap; block output is
    /// centered on its own line.
    Math { mode: MathMode, output: Typeset },
    /// An expression that could not be typeset, shown as its source.
    Failed(FailureMarker),
}

/// A visibly flagged stand-in for an expression that failed to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureMarker {
    pub mode: MathMode,
    /// The delimited source exactly as it appeared in the answer.
    pub original: String,
    pub palette: Palette,
    /// Localized explanation, e.g. a tooltip.
    pub label: String,
}

pub struct SegmentRenderer<'a> {
    typesetter: &'a dyn Typesetter,
    sink: &'a dyn DiagnosticSink,
    scheme: ColorScheme,
    failure_label: String,
}

impl<'a> SegmentRenderer<'a> {
    pub fn new(
        typesetter: &'a dyn Typesetter,
        sink: &'a dyn DiagnosticSink,
        scheme: ColorScheme,
    ) -> Self {
        Self {
            typesetter,
            sink,
            scheme,
            failure_label: DEFAULT_FAILURE_LABEL.to_string(),
        }
    }

    /// Replaces the title shown on failure markers.
    pub fn with_failure_label(mut self, label: impl Into<String>) -> Self {
        self.failure_label = label.into();
        self
    }

    /// Renders one segment. Returns `None` for blank content.
    pub fn render(&self, segment: &Segment) -> Option<RenderNode> {
        if segment.content.trim().is_empty() {
            return None;
        }
        let Some(mode) = segment.kind.math_mode() else {
            return Some(RenderNode::Markdown(segment.content.clone()));
        };

        match self.typesetter.typeset(&segment.content, mode) {
            Ok(output) => Some(RenderNode::Math { mode, output }),
            Err(err) => {
                self.sink.report(&err.to_string(), &segment.content);
                Some(RenderNode::Failed(FailureMarker {
                    mode,
                    original: segment.literal().to_string(),
                    palette: self.scheme.palette(),
                    label: self.failure_label.clone(),
                }))
            }
        }
    }

    /// Renders segments in order, skipping blank ones.
    pub fn render_all(&self, segments: &[Segment]) -> Vec<RenderNode> {
        segments.iter().filter_map(|s| self.render(s)).collect()
    }

    /// Renders a whole answer for display. The whitespace that segmenting
    /// dropped between two segments comes back as a `Markdown` node, so
    /// `$a$ $b$` still reads with a space and paragraph breaks survive.
    ///
    /// `normalized` is the text the segment spans index into.
    pub fn render_answer(&self, normalized: &str, segments: &[Segment]) -> Vec<RenderNode> {
        let mut out = Vec::with_capacity(segments.len() * 2);
        for (i, segment) in segments.iter().enumerate() {
            let gap = gap_before(normalized, segments, i);
            if !gap.is_empty() {
                out.push(RenderNode::Markdown(gap.to_string()));
            }
            out.extend(self.render(segment));
        }
        out
    }
}
