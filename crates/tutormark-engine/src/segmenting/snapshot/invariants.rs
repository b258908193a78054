use crate::segmenting::{Segment, SegmentKind, Span};

/// Validates segmenter output against the normalized text it came from.
///
/// Asserts that:
/// - All spans are within bounds and on char boundaries
/// - Spans are ordered and never overlap
/// - Every non-whitespace byte of `normalized` lies in exactly one span
/// - Text segments hold their slice verbatim; math segments hold their
///   slice as `original_match` and a non-empty trimmed `content`
/// - Inline math never contains a line break
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(normalized: &str, segments: &[Segment]) {
    let n = normalized.len();
    let mut prev: Option<Span> = None;

    for seg in segments {
        let sp = seg.span;
        assert!(
            sp.start < sp.end && sp.end <= n,
            "segment span out of bounds: {sp:?} (text len: {n})"
        );
        let Some(slice) = sp.slice(normalized) else {
            panic!("segment span not on char boundaries: {sp:?}");
        };
        if let Some(p) = prev {
            assert!(
                p.end <= sp.start,
                "segments out of order or overlapping: {p:?} then {sp:?}"
            );
            let gap = &normalized[p.end..sp.start];
            assert!(
                gap.trim().is_empty(),
                "non-whitespace text dropped between {p:?} and {sp:?}: {gap:?}"
            );
        } else {
            let lead = &normalized[..sp.start];
            assert!(
                lead.trim().is_empty(),
                "non-whitespace text dropped before {sp:?}: {lead:?}"
            );
        }
        prev = Some(sp);

        match seg.kind {
            SegmentKind::PlainText => {
                assert_eq!(seg.content, slice, "text segment differs from its span");
                assert!(
                    seg.original_match.is_none(),
                    "text segment carries an original match: {seg:?}"
                );
                assert!(!seg.content.trim().is_empty(), "blank text segment: {seg:?}");
            }
            SegmentKind::InlineMath | SegmentKind::BlockMath => {
                assert_eq!(
                    seg.original_match.as_deref(),
                    Some(slice),
                    "math segment original differs from its span"
                );
                assert!(!seg.content.is_empty(), "empty math content: {seg:?}");
                assert_eq!(seg.content, seg.content.trim(), "untrimmed math: {seg:?}");
                assert!(
                    slice.contains(seg.content.as_str()),
                    "math content not taken from its slice: {seg:?}"
                );
            }
        }
        if seg.kind == SegmentKind::InlineMath {
            assert!(
                !slice.contains(['\n', '\r']),
                "inline math spans a line break: {seg:?}"
            );
        }
    }

    let tail = prev.map_or(normalized, |p| &normalized[p.end..]);
    assert!(
        tail.trim().is_empty(),
        "non-whitespace text dropped at end: {tail:?}"
    );
}
