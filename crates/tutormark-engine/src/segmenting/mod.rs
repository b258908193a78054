//! # Segmenting
//!
//! Splits raw answer text into an ordered list of [`Segment`]s: plain text,
//! inline math and block math.
//!
//! ## Pipeline
//!
//! 1. **`normalize`**: rewrite the full-width yen escape substitute to `\`
//! 2. **`scanner`**: one left-to-right pass finding delimited math candidates
//! 3. classification: strip delimiters, trim, demote empty expressions to text
//! 4. filtering: drop whitespace-only segments
//!
//! ## Notation Precedence
//!
//! `\[..\]`, then `$$..$$`, then `\(..\)`, then `$..$`, then `(\cmd{..})`.
//! Block forms come first because `$` is a prefix of `$$`: `$$x$$` is one
//! block, never two inline fragments around stray dollars.
//!
//! Segmenting never fails. In the worst case the whole answer is a single
//! `PlainText` segment.

pub mod cursor;
pub mod kinds;
pub mod normalize;
pub mod scanner;
pub mod snapshot;
pub mod span;
pub mod types;

pub use normalize::normalize;
pub use span::Span;
pub use types::{Segment, SegmentKind};

use kinds::NamedExpression;
use scanner::Candidate;

/// Options controlling which notations the segmenter recognises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmenterOptions {
    /// Commands accepted in the parenthesised named form, without the
    /// backslash (`"ce"` matches `(\ce{...})`).
    pub named_commands: Vec<String>,
}

impl Default for SegmenterOptions {
    fn default() -> Self {
        Self {
            named_commands: NamedExpression::DEFAULT_COMMANDS
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    options: SegmenterOptions,
}

impl Segmenter {
    pub fn new(options: SegmenterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SegmenterOptions {
        &self.options
    }

    /// Normalizes `raw` and segments it.
    ///
    /// Segment spans index into `normalize(raw)`, not into `raw`.
    pub fn segment(&self, raw: &str) -> Vec<Segment> {
        self.segment_normalized(&normalize(raw))
    }

    /// Segments text that has already been through [`normalize`].
    pub fn segment_normalized(&self, s: &str) -> Vec<Segment> {
        let candidates = scanner::scan(s, &self.options.named_commands);
        let mut out = Vec::with_capacity(candidates.len() * 2 + 1);
        let mut text_start = 0;

        for candidate in candidates {
            push_text(&mut out, s, Span::new(text_start, candidate.span.start));
            out.push(classify(s, candidate));
            text_start = candidate.span.end;
        }
        push_text(&mut out, s, Span::new(text_start, s.len()));

        out.retain(|seg| !seg.content.trim().is_empty());
        log::debug!(
            "segmented {} bytes into {} segments",
            s.len(),
            out.len()
        );
        out
    }
}

/// Segments `raw` with the default options.
pub fn segment(raw: &str) -> Vec<Segment> {
    Segmenter::default().segment(raw)
}

/// The text between `segments[i - 1]` and `segments[i]`, which is whitespace
/// dropped by filtering. Empty for the first segment.
pub fn gap_before<'s>(normalized: &'s str, segments: &[Segment], i: usize) -> &'s str {
    let Some(prev) = i.checked_sub(1).and_then(|p| segments.get(p)) else {
        return "";
    };
    let Some(next) = segments.get(i) else {
        return "";
    };
    normalized
        .get(prev.span.end..next.span.start)
        .unwrap_or_default()
}

fn push_text(out: &mut Vec<Segment>, s: &str, span: Span) {
    if span.is_empty() {
        return;
    }
    if let Some(text) = span.slice(s) {
        out.push(Segment::text(span, text));
    }
}

/// Turns a scanned candidate into a segment.
///
/// An expression that is empty once delimiters are stripped and whitespace
/// is trimmed becomes plain text holding the whole slice.
fn classify(s: &str, candidate: Candidate) -> Segment {
    let span = candidate.span;
    // Candidate spans always start and end on ASCII delimiters
    let original = span.slice(s).unwrap_or_default();
    let (open, close) = candidate.notation.delimiter_widths();
    let inner = original
        .get(open..original.len().saturating_sub(close))
        .unwrap_or_default()
        .trim();

    if inner.is_empty() {
        Segment::text(span, original)
    } else {
        Segment::math(candidate.notation.kind(), span, inner, original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn kinds_and_content(raw: &str) -> Vec<(SegmentKind, String)> {
        segment(raw)
            .into_iter()
            .map(|s| (s.kind, s.content))
            .collect()
    }

    fn text(s: &str) -> (SegmentKind, String) {
        (SegmentKind::PlainText, s.to_string())
    }

    fn inline(s: &str) -> (SegmentKind, String) {
        (SegmentKind::InlineMath, s.to_string())
    }

    fn block(s: &str) -> (SegmentKind, String) {
        (SegmentKind::BlockMath, s.to_string())
    }

    #[test]
    fn plain_answer_is_one_text_segment() {
        assert_eq!(
            kinds_and_content("The answer is 42."),
            vec![text("The answer is 42.")]
        );
    }

    #[test]
    fn empty_and_blank_input_produce_nothing() {
        assert!(segment("").is_empty());
        assert!(segment("  \n\t ").is_empty());
    }

    #[test]
    fn double_dollar_is_one_block() {
        let segs = segment("$$x^2$$");
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].kind, SegmentKind::BlockMath);
        assert_eq!(segs[0].content, "x^2");
        assert_eq!(segs[0].original_match.as_deref(), Some("$$x^2$$"));
    }

    #[test]
    fn adjacent_inline_expressions() {
        assert_eq!(
            kinds_and_content("$a$ and $b$"),
            vec![inline("a"), text(" and "), inline("b")]
        );
    }

    #[rstest]
    #[case("$a\nb$")]
    #[case("$a\r\nb$")]
    #[case("\\(a\nb\\)")]
    fn line_breaks_never_inline(#[case] raw: &str) {
        let segs = segment(raw);
        assert!(segs.iter().all(|s| s.kind != SegmentKind::InlineMath));
        assert_eq!(segs, vec![Segment::text(Span::new(0, raw.len()), raw)]);
    }

    #[test]
    fn line_break_inside_block_form_is_block() {
        assert_eq!(kinds_and_content("$$a\nb$$"), vec![block("a\nb")]);
    }

    #[test]
    fn substitute_escape_bracket_is_block() {
        assert_eq!(
            kinds_and_content("￥[x+1￥]"),
            vec![block("x+1")]
        );
        let segs = segment("see ￥(y￥)");
        assert_eq!(segs[1].kind, SegmentKind::InlineMath);
        assert_eq!(segs[1].original_match.as_deref(), Some("\\(y\\)"));
    }

    #[rstest]
    #[case("$$")]
    #[case("$  $")]
    #[case("$$$$")]
    #[case("$$ \n $$")]
    #[case("\\[ \\]")]
    #[case("\\(\\)")]
    fn empty_expressions_degrade_to_text(#[case] raw: &str) {
        let segs = segment(raw);
        assert_eq!(segs.len(), 1, "{raw:?} -> {segs:?}");
        assert_eq!(segs[0].kind, SegmentKind::PlainText);
        assert_eq!(segs[0].content, raw);
        assert_eq!(segs[0].original_match, None);
    }

    #[test]
    fn delimiters_are_stripped_and_trimmed() {
        assert_eq!(
            kinds_and_content("\\[ \\int_0^1 x\\,dx \\]"),
            vec![block("\\int_0^1 x\\,dx")]
        );
        assert_eq!(
            kinds_and_content("\\(  \\alpha \\)"),
            vec![inline("\\alpha")]
        );
    }

    #[test]
    fn named_form_keeps_inner_command() {
        let segs = segment("Water is (\\ce{H2O}).");
        assert_eq!(
            segs.iter().map(|s| (s.kind, s.content.as_str())).collect::<Vec<_>>(),
            vec![
                (SegmentKind::PlainText, "Water is "),
                (SegmentKind::InlineMath, "\\ce{H2O}"),
                (SegmentKind::PlainText, "."),
            ]
        );
        assert_eq!(segs[1].original_match.as_deref(), Some("(\\ce{H2O})"));
    }

    #[test]
    fn unlisted_named_command_stays_text() {
        assert_eq!(
            kinds_and_content("(\\mathrm{kg})"),
            vec![text("(\\mathrm{kg})")]
        );
    }

    #[test]
    fn configured_named_command_is_recognised() {
        let segmenter = Segmenter::new(SegmenterOptions {
            named_commands: vec!["mathrm".to_string()],
        });
        let segs = segmenter.segment("(\\mathrm{kg}) vs (\\ce{H2O})");
        assert_eq!(segs[0].kind, SegmentKind::InlineMath);
        assert_eq!(segs[0].content, "\\mathrm{kg}");
        assert_eq!(segs[1].kind, SegmentKind::PlainText);
        assert_eq!(segs[1].content, " vs (\\ce{H2O})");
    }

    #[test]
    fn whitespace_gaps_are_dropped() {
        let segs = segment("$a$ \n $b$");
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].span, Span::new(0, 3));
        assert_eq!(segs[1].span, Span::new(6, 9));
    }

    #[test]
    fn mixed_answer() {
        let raw = "Use \\(E=mc^2\\). Then\n\\[\n\\frac{a}{b}\n\\]\nso $x$ is ￥(y￥).";
        assert_eq!(
            kinds_and_content(raw),
            vec![
                text("Use "),
                inline("E=mc^2"),
                text(". Then\n"),
                block("\\frac{a}{b}"),
                text("\nso "),
                inline("x"),
                text(" is "),
                inline("y"),
                text("."),
            ]
        );
    }

    #[test]
    fn spans_index_normalized_text() {
        let raw = "￥[a￥] b";
        let normalized = normalize(raw);
        for seg in segment(raw) {
            let slice = seg.span.slice(&normalized).unwrap();
            assert_eq!(slice, seg.literal());
        }
    }

    #[test]
    fn non_ascii_prose_around_math() {
        assert_eq!(
            kinds_and_content("答えは $x=2$ です"),
            vec![text("答えは "), inline("x=2"), text(" です")]
        );
    }

    #[test]
    fn gap_before_recovers_dropped_whitespace() {
        let raw = "$a$ $b$\n\n$c$";
        let segs = segment(raw);
        assert_eq!(segs.len(), 3);
        let gaps: Vec<&str> = (0..=segs.len()).map(|i| gap_before(raw, &segs, i)).collect();
        assert_eq!(gaps, vec!["", " ", "\n\n", ""]);
    }
}
