//! `\ce{...}` chemistry formulas.
//!
//! Counts after an element or closing bracket are subscripted (`H2O` → `H₂O`),
//! charges are superscripted (`SO4^2-`, `Na+`), leading coefficients stay on
//! the baseline, and reaction arrows become arrow glyphs. An arrow may carry
//! a condition in brackets: `->[\Delta]`.

use super::{TypesetError, script, symbols};

const ARROWS: &[(&str, &str)] = &[
    ("<=>", "⇌"),
    ("<->", "↔"),
    ("->", "→"),
    ("<-", "←"),
];

/// Formats the argument of a `\ce` command.
pub fn format(src: &str) -> Result<String, TypesetError> {
    let mut out = String::new();
    // True right after something a count or charge can attach to
    let mut after_formula = false;
    let mut rest = src;

    while let Some(c) = rest.chars().next() {
        let offset = src.len() - rest.len();

        if let Some((pat, glyph)) = ARROWS.iter().find(|(pat, _)| rest.starts_with(pat)) {
            rest = &rest[pat.len()..];
            out.push_str(glyph);
            if let Some(label) = rest.strip_prefix('[') {
                let Some(end) = label.find(']') else {
                    return Err(TypesetError::MissingArgument {
                        command: "ce".into(),
                    });
                };
                out.push('(');
                out.push_str(&format(&label[..end])?);
                out.push(')');
                rest = &label[end + 1..];
            }
            after_formula = false;
            continue;
        }

        match c {
            '^' | '_' => {
                let (body, tail) = script_body(&rest[1..]);
                if body.is_empty() {
                    return Err(TypesetError::DanglingScript { script: c, offset });
                }
                out.push_str(&if c == '^' {
                    script::superscript(body)
                } else {
                    script::subscript(body)
                });
                rest = tail;
                after_formula = true;
                continue;
            }
            '0'..='9' if after_formula => {
                let digits = rest
                    .find(|d: char| !d.is_ascii_digit())
                    .unwrap_or(rest.len());
                out.push_str(&script::subscript(&rest[..digits]));
                rest = &rest[digits..];
                continue;
            }
            '+' | '-' if after_formula && ends_charge(&rest[1..]) => {
                out.push_str(&script::superscript(&c.to_string()));
            }
            '\\' => {
                let name_len = rest[1..]
                    .find(|n: char| !n.is_ascii_alphabetic())
                    .unwrap_or(rest.len() - 1);
                let name = &rest[1..1 + name_len];
                let Some(sym) = symbols::symbol(name) else {
                    return Err(TypesetError::UnknownCommand(name.into()));
                };
                out.push_str(sym);
                rest = &rest[1 + name_len..];
                after_formula = false;
                continue;
            }
            '{' | '}' => {}
            c => {
                out.push(c);
                after_formula = c.is_alphabetic() || c == ')' || c == ']';
            }
        }
        rest = &rest[c.len_utf8()..];
    }

    Ok(out)
}

/// Splits the body of a `^`/`_` script off the front of `s`: a braced group,
/// or a run of digits with an optional trailing sign, or a lone sign.
fn script_body(s: &str) -> (&str, &str) {
    if let Some(inner) = s.strip_prefix('{') {
        return match inner.find('}') {
            Some(end) => (&inner[..end], &inner[end + 1..]),
            None => (inner, ""),
        };
    }
    let digits = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut end = digits;
    if s[end..].starts_with(['+', '-']) {
        end += 1;
    }
    (&s[..end], &s[end..])
}

/// A sign is a charge when nothing but a separator follows it.
fn ends_charge(after: &str) -> bool {
    after
        .chars()
        .next()
        .is_none_or(|c| c.is_whitespace() || matches!(c, ')' | ']' | '}'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("H2O", "H₂O")]
    #[case("CO2", "CO₂")]
    #[case("2H2 + O2 -> 2H2O", "2H₂ + O₂ → 2H₂O")]
    #[case("N2 + 3H2 <=> 2NH3", "N₂ + 3H₂ ⇌ 2NH₃")]
    #[case("SO4^2-", "SO₄²⁻")]
    #[case("Fe^{3+}", "Fe³⁺")]
    #[case("Na+ + Cl- -> NaCl", "Na⁺ + Cl⁻ → NaCl")]
    #[case("(NH4)2SO4", "(NH₄)₂SO₄")]
    #[case("[Cu(NH3)4]^{2+}", "[Cu(NH₃)₄]²⁺")]
    #[case("CaCO3 ->[\\Delta] CaO + CO2", "CaCO₃ →(Δ) CaO + CO₂")]
    #[case("NaCl(aq)", "NaCl(aq)")]
    #[case("C6H12O6", "C₆H₁₂O₆")]
    fn formats_formulas(#[case] src: &str, #[case] expected: &str) {
        assert_eq!(format(src).unwrap(), expected);
    }

    #[test]
    fn dangling_charge_is_an_error() {
        assert_eq!(
            format("Fe^"),
            Err(TypesetError::DanglingScript {
                script: '^',
                offset: 2
            })
        );
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert_eq!(
            format("A ->[\\heat] B"),
            Err(TypesetError::UnknownCommand("heat".into()))
        );
    }

    #[test]
    fn unclosed_arrow_label_is_an_error() {
        assert!(format("A ->[x B").is_err());
    }
}
