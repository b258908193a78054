//! Unicode superscript and subscript forms.

pub fn superscript_char(c: char) -> Option<char> {
    Some(match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '+' => '⁺',
        '-' | '−' => '⁻',
        '=' => '⁼',
        '(' => '⁽',
        ')' => '⁾',
        'a' => 'ᵃ',
        'b' => 'ᵇ',
        'c' => 'ᶜ',
        'd' => 'ᵈ',
        'e' => 'ᵉ',
        'f' => 'ᶠ',
        'g' => 'ᵍ',
        'h' => 'ʰ',
        'i' => 'ⁱ',
        'j' => 'ʲ',
        'k' => 'ᵏ',
        'l' => 'ˡ',
        'm' => 'ᵐ',
        'n' => 'ⁿ',
        'o' => 'ᵒ',
        'p' => 'ᵖ',
        'r' => 'ʳ',
        's' => 'ˢ',
        't' => 'ᵗ',
        'u' => 'ᵘ',
        'v' => 'ᵛ',
        'w' => 'ʷ',
        'x' => 'ˣ',
        'y' => 'ʸ',
        'z' => 'ᶻ',
        'T' => 'ᵀ',
        '′' => '′',
        '*' => '*',
        _ => return None,
    })
}

pub fn subscript_char(c: char) -> Option<char> {
    Some(match c {
        '0' => '₀',
        '1' => '₁',
        '2' => '₂',
        '3' => '₃',
        '4' => '₄',
        '5' => '₅',
        '6' => '₆',
        '7' => '₇',
        '8' => '₈',
        '9' => '₉',
        '+' => '₊',
        '-' | '−' => '₋',
        '=' => '₌',
        '(' => '₍',
        ')' => '₎',
        'a' => 'ₐ',
        'e' => 'ₑ',
        'h' => 'ₕ',
        'i' => 'ᵢ',
        'j' => 'ⱼ',
        'k' => 'ₖ',
        'l' => 'ₗ',
        'm' => 'ₘ',
        'n' => 'ₙ',
        'o' => 'ₒ',
        'p' => 'ₚ',
        'r' => 'ᵣ',
        's' => 'ₛ',
        't' => 'ₜ',
        'u' => 'ᵤ',
        'v' => 'ᵥ',
        'x' => 'ₓ',
        _ => return None,
    })
}

/// Maps every char of `s` through `f`, or gives up if any has no form.
fn map_all(s: &str, f: fn(char) -> Option<char>) -> Option<String> {
    s.chars().map(f).collect()
}

/// `s` as Unicode superscript, or `^s` / `^(s)` when some char has no
/// superscript form.
pub fn superscript(s: &str) -> String {
    map_all(s, superscript_char).unwrap_or_else(|| fallback('^', s))
}

/// `s` as Unicode subscript, or `_s` / `_(s)` when some char has no
/// subscript form.
pub fn subscript(s: &str) -> String {
    map_all(s, subscript_char).unwrap_or_else(|| fallback('_', s))
}

fn fallback(marker: char, s: &str) -> String {
    if s.chars().count() == 1 {
        format!("{marker}{s}")
    } else {
        format!("{marker}({s})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_and_signs() {
        assert_eq!(superscript("-1"), "⁻¹");
        assert_eq!(superscript("2+"), "²⁺");
        assert_eq!(subscript("10"), "₁₀");
    }

    #[test]
    fn letters_where_unicode_has_them() {
        assert_eq!(superscript("n+1"), "ⁿ⁺¹");
        assert_eq!(subscript("i"), "ᵢ");
    }

    #[test]
    fn falls_back_to_marker() {
        assert_eq!(superscript("q"), "^q");
        assert_eq!(superscript("∞"), "^∞");
        assert_eq!(subscript("by"), "_(by)");
        assert_eq!(subscript("max"), "ₘₐₓ");
        assert_eq!(subscript("b"), "_b");
    }

    #[test]
    fn empty_maps_to_empty() {
        assert_eq!(superscript(""), "");
    }
}
