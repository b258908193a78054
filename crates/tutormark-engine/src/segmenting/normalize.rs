use std::borrow::Cow;

/// FULLWIDTH YEN SIGN, typed in place of a backslash on Japanese keyboard
/// layouts.
pub const ESCAPE_SUBSTITUTE: char = '\u{FFE5}';

/// The canonical escape character every math delimiter is built from.
pub const ESCAPE: char = '\\';

/// Rewrites every [`ESCAPE_SUBSTITUTE`] to a literal backslash.
///
/// Borrows the input when there is nothing to replace. The output never
/// contains the substitute, so applying this twice is the same as once.
pub fn normalize(raw: &str) -> Cow<'_, str> {
    if raw.contains(ESCAPE_SUBSTITUTE) {
        Cow::Owned(raw.replace(ESCAPE_SUBSTITUTE, "\\"))
    } else {
        Cow::Borrowed(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("no escapes here", "no escapes here")]
    #[case("￥[x^2￥]", "\\[x^2\\]")]
    #[case("￥(a￥)", "\\(a\\)")]
    #[case("(￥ce{H2O})", "(\\ce{H2O})")]
    #[case("mixed \\[a\\] and ￥[b￥]", "mixed \\[a\\] and \\[b\\]")]
    #[case("", "")]
    fn replaces_every_substitute(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize(raw), expected);
    }

    #[test]
    fn borrows_when_untouched() {
        assert!(matches!(normalize("plain $x$"), Cow::Borrowed(_)));
        assert!(matches!(normalize("￥"), Cow::Owned(_)));
    }

    #[test]
    fn idempotent() {
        let once = normalize("￥[￥frac{1}{2}￥] ￥￥");
        let twice = normalize(&once);
        assert_eq!(once, twice);
        assert_eq!(once, "\\[\\frac{1}{2}\\] \\\\");
    }

    #[test]
    fn half_width_yen_is_left_alone() {
        assert_eq!(normalize("¥500"), "¥500");
    }
}
