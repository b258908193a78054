use crate::segmenting::Segment;

/// Renders segments one per line as `Kind start..end "content"`.
///
/// Content is shown with `{:?}` escaping so line breaks stay visible.
pub fn listing(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| {
            format!(
                "{} {}..{} {:?}",
                s.kind.as_str(),
                s.span.start,
                s.span.end,
                s.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Truncates `s` to at most `max` bytes with a "..." suffix, never splitting
/// a character.
pub fn preview(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &s[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenting::segment;

    #[test]
    fn listing_of_mixed_answer() {
        insta::assert_snapshot!(listing(&segment("Area $A=\\pi r^2$ in\n$$\nA\n$$")), @r#"
        PlainText 0..5 "Area "
        InlineMath 5..16 "A=\\pi r^2"
        PlainText 16..20 " in\n"
        BlockMath 20..27 "A"
        "#);
    }

    #[test]
    fn preview_short_text_unchanged() {
        assert_eq!(preview("hello", 10), "hello");
        assert_eq!(preview("hello", 5), "hello");
    }

    #[test]
    fn preview_truncates_long_text() {
        assert_eq!(preview("hello world", 5), "hello...");
    }

    #[test]
    fn preview_respects_char_boundaries() {
        // each kana is three bytes
        assert_eq!(preview("あいう", 4), "あ...");
    }
}
