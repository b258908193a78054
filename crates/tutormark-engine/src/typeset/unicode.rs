use super::{MathMode, Typeset, TypesetError, Typesetter, chem, script, symbols};

/// How deeply groups, arguments, environments and delimiters may nest before
/// an expression is rejected. Each level costs several stack frames.
pub const MAX_NESTING: usize = 64;

/// Typesets a LaTeX subset as plain Unicode text.
///
/// Covers what tutoring answers use day to day: Greek letters, operators and
/// relations, `\frac`, `\sqrt`, scripts, accents, `\text`, `\left`/`\right`,
/// the aligned/cases/matrix environments, and `\ce` chemistry. Anything
/// outside that subset is reported as a [`TypesetError`] so the caller can
/// show the source instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTypesetter;

impl Typesetter for UnicodeTypesetter {
    fn typeset(&self, expr: &str, mode: MathMode) -> Result<Typeset, TypesetError> {
        let mut parser = Parser {
            src: expr,
            pos: 0,
            mode,
            depth: 0,
        };
        let body = parser.sequence(Until::Eof)?;
        Ok(Typeset { text: tidy(&body) })
    }
}

/// What ends the sequence being parsed.
#[derive(Clone, Copy)]
enum Until<'e> {
    Eof,
    /// A `}` closing the group opened at this byte offset.
    Brace(usize),
    /// `\end{name}`.
    End(&'e str),
}

/// One parsed unit of input.
enum Piece {
    Text(String),
    /// An `\end{name}`, handed back to the enclosing `\begin`.
    End(String),
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    mode: MathMode,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn sequence(&mut self, until: Until<'_>) -> Result<String, TypesetError> {
        let mut out = String::new();
        loop {
            match self.peek() {
                None => {
                    return match until {
                        Until::Eof => Ok(out),
                        Until::Brace(offset) => Err(TypesetError::UnbalancedBraces { offset }),
                        Until::End(name) => Err(TypesetError::UnclosedEnvironment(name.into())),
                    };
                }
                Some('}') => {
                    if let Until::Brace(_) = until {
                        self.bump();
                        return Ok(out);
                    }
                    return Err(TypesetError::UnexpectedClosingBrace { offset: self.pos });
                }
                Some(_) => match self.item()? {
                    Piece::Text(text) => out.push_str(&text),
                    Piece::End(found) => {
                        return match until {
                            Until::End(expected) if expected == found => Ok(out),
                            Until::End(expected) => Err(TypesetError::MismatchedEnvironment {
                                expected: expected.into(),
                                found,
                            }),
                            _ => Err(TypesetError::UnexpectedEnd(found)),
                        };
                    }
                },
            }
        }
    }

    /// Runs `parse` one nesting level down.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, TypesetError>,
    ) -> Result<T, TypesetError> {
        if self.depth >= MAX_NESTING {
            return Err(TypesetError::NestingTooDeep { offset: self.pos });
        }
        self.depth += 1;
        let out = parse(self);
        self.depth -= 1;
        out
    }

    // Every recursive path (groups, arguments, scripts, `\begin`) passes
    // through here or through `delimiter`.
    fn item(&mut self) -> Result<Piece, TypesetError> {
        self.nested(Self::read_item)
    }

    fn read_item(&mut self) -> Result<Piece, TypesetError> {
        let offset = self.pos;
        let Some(c) = self.bump() else {
            return Ok(Piece::Text(String::new()));
        };
        let text = match c {
            '{' => self.sequence(Until::Brace(offset))?,
            '\\' => return self.command(),
            '^' | '_' => {
                let operand = self.script_operand(c, offset)?;
                if c == '^' {
                    script::superscript(&operand)
                } else {
                    script::subscript(&operand)
                }
            }
            '&' | '~' => " ".to_string(),
            '\'' => "′".to_string(),
            '-' => "−".to_string(),
            c if c.is_whitespace() => " ".to_string(),
            c => c.to_string(),
        };
        Ok(Piece::Text(text))
    }

    /// A single-token operand: a group, a command, or one character.
    fn operand(&mut self) -> Result<Option<String>, TypesetError> {
        self.skip_ws();
        match self.peek() {
            None | Some('}') | Some('^') | Some('_') => Ok(None),
            Some(_) => match self.item()? {
                Piece::Text(text) => Ok(Some(text)),
                Piece::End(name) => Err(TypesetError::UnexpectedEnd(name)),
            },
        }
    }

    fn script_operand(&mut self, script: char, offset: usize) -> Result<String, TypesetError> {
        self.operand()?
            .ok_or(TypesetError::DanglingScript { script, offset })
    }

    fn argument(&mut self, command: &str) -> Result<String, TypesetError> {
        self.operand()?.ok_or_else(|| TypesetError::MissingArgument {
            command: command.into(),
        })
    }

    /// The verbatim contents of a `{...}` argument, braces balanced.
    fn raw_argument(&mut self, command: &str) -> Result<&'a str, TypesetError> {
        self.skip_ws();
        let open = self.pos;
        if self.peek() != Some('{') {
            return Err(TypesetError::MissingArgument {
                command: command.into(),
            });
        }
        self.bump();
        let start = self.pos;
        let mut depth = 1usize;
        loop {
            match self.bump() {
                None => return Err(TypesetError::UnbalancedBraces { offset: open }),
                Some('\\') => {
                    self.bump();
                }
                Some('{') => depth += 1,
                Some('}') => {
                    depth -= 1;
                    if depth == 0 {
                        let src = self.src;
                        return Ok(&src[start..self.pos - 1]);
                    }
                }
                Some(_) => {}
            }
        }
    }

    fn command(&mut self) -> Result<Piece, TypesetError> {
        let name_start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.bump();
        }
        if self.pos == name_start {
            return self.control_symbol().map(Piece::Text);
        }
        let src = self.src;
        let name = &src[name_start..self.pos];

        let text = match name {
            "frac" | "dfrac" | "tfrac" | "cfrac" => {
                let num = self.argument(name)?;
                let den = self.argument(name)?;
                format!("{}/{}", wrap(&num), wrap(&den))
            }
            "sqrt" => {
                self.skip_ws();
                let index = if self.peek() == Some('[') {
                    self.bump();
                    let start = self.pos;
                    while self.peek().is_some_and(|c| c != ']') {
                        self.bump();
                    }
                    let index = self.src[start..self.pos].trim().to_string();
                    if self.bump().is_none() {
                        return Err(TypesetError::MissingArgument {
                            command: "sqrt".into(),
                        });
                    }
                    script::superscript(&index)
                } else {
                    String::new()
                };
                let radicand = self.argument("sqrt")?;
                format!("{index}√{}", wrap(&radicand))
            }
            "binom" => {
                let n = self.argument(name)?;
                let k = self.argument(name)?;
                format!("C({n}, {k})")
            }
            "ce" => {
                let raw = self.raw_argument(name)?;
                if raw.trim().is_empty() {
                    return Err(TypesetError::MissingArgument {
                        command: "ce".into(),
                    });
                }
                chem::format(raw)?
            }
            "pmod" => format!(" (mod {})", self.argument(name)?),
            "not" => {
                let negated = self.argument(name)?;
                match negated.as_str() {
                    "=" => "≠".to_string(),
                    "∈" => "∉".to_string(),
                    _ => format!("{negated}\u{0338}"),
                }
            }
            "color" => {
                self.raw_argument(name)?;
                String::new()
            }
            "textcolor" => {
                self.raw_argument(name)?;
                self.argument(name)?
            }
            "left" | "right" => self.delimiter()?,
            "begin" => {
                let env = self.raw_argument(name)?.to_string();
                let Some((open, close)) = symbols::environment(&env) else {
                    return Err(TypesetError::UnknownEnvironment(env));
                };
                let body = self.sequence(Until::End(&env))?;
                format!("{open}{body}{close}")
            }
            "end" => {
                let env = self.raw_argument(name)?.to_string();
                return Ok(Piece::End(env));
            }
            n if symbols::is_text_command(n) => self.raw_argument(n)?.to_string(),
            n if symbols::is_font_command(n) => self.argument(n)?,
            n if symbols::is_ignored(n) => String::new(),
            n if symbols::is_operator_name(n) => format!("{n} "),
            n => {
                if let Some(mark) = symbols::accent(n) {
                    let base = self.argument(n)?;
                    base.chars().flat_map(|c| [c, mark]).collect()
                } else if let Some(sym) = symbols::symbol(n) {
                    sym.to_string()
                } else {
                    return Err(TypesetError::UnknownCommand(n.into()));
                }
            }
        };
        Ok(Piece::Text(text))
    }

    /// A backslash followed by a single non-letter.
    fn control_symbol(&mut self) -> Result<String, TypesetError> {
        let Some(c) = self.bump() else {
            return Err(TypesetError::UnknownCommand(String::new()));
        };
        Ok(match c {
            '\\' => match self.mode {
                MathMode::Inline => return Err(TypesetError::LineBreakInInline),
                MathMode::Block => "\n".to_string(),
            },
            ',' | ';' | ':' | '>' | ' ' => " ".to_string(),
            '!' => String::new(),
            '{' | '}' | '$' | '%' | '&' | '#' | '_' => c.to_string(),
            '|' => "‖".to_string(),
            c => return Err(TypesetError::UnknownCommand(c.to_string())),
        })
    }

    /// The delimiter after `\left` or `\right`; `.` is an invisible one.
    fn delimiter(&mut self) -> Result<String, TypesetError> {
        self.nested(Self::read_delimiter)
    }

    fn read_delimiter(&mut self) -> Result<String, TypesetError> {
        self.skip_ws();
        match self.bump() {
            None => Err(TypesetError::MissingArgument {
                command: "left".into(),
            }),
            Some('.') => Ok(String::new()),
            Some('\\') => match self.command()? {
                Piece::Text(text) => Ok(text),
                Piece::End(name) => Err(TypesetError::UnexpectedEnd(name)),
            },
            Some(c) => Ok(c.to_string()),
        }
    }
}

/// Parenthesises `s` unless it reads as a single token.
fn wrap(s: &str) -> String {
    let s = s.trim();
    let atomic = s.chars().count() <= 1
        || s.chars().all(|c| c.is_alphanumeric() || c == '.' || c == '′');
    if atomic {
        s.to_string()
    } else {
        format!("({s})")
    }
}

/// Collapses whitespace runs within each line and drops blank lines.
fn tidy(s: &str) -> String {
    s.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn inline(expr: &str) -> Result<String, TypesetError> {
        UnicodeTypesetter
            .typeset(expr, MathMode::Inline)
            .map(|t| t.text)
    }

    fn block(expr: &str) -> Result<String, TypesetError> {
        UnicodeTypesetter
            .typeset(expr, MathMode::Block)
            .map(|t| t.text)
    }

    #[rstest]
    #[case("x^2", "x²")]
    #[case("x^{n+1}", "xⁿ⁺¹")]
    #[case("a_1 + a_{10}", "a₁ + a₁₀")]
    #[case("e^{-x}", "e⁻ˣ")]
    #[case("x^23", "x²3")]
    #[case("\\alpha + \\beta = \\gamma", "α + β = γ")]
    #[case("a \\times b \\leq c", "a × b ≤ c")]
    #[case("\\frac{1}{2}", "1/2")]
    #[case("\\frac{a+b}{c}", "(a+b)/c")]
    #[case("\\sqrt{2}", "√2")]
    #[case("\\sqrt[3]{x+1}", "³√(x+1)")]
    #[case("\\sin x + \\cos y", "sin x + cos y")]
    #[case("\\text{m/s}", "m/s")]
    #[case("\\mathrm{kg}", "kg")]
    #[case("\\left( x \\right)", "( x )")]
    #[case("\\left. x \\right|", "x |")]
    #[case("\\vec{v}", "v\u{20D7}")]
    #[case("a \\neq b", "a ≠ b")]
    #[case("\\not= b", "≠ b")]
    #[case("x\\,dx", "x dx")]
    #[case("\\{1, 2\\}", "{1, 2}")]
    #[case("\\int_0^{\\infty} e^{-x} dx", "∫₀^∞ e⁻ˣ dx")]
    #[case("a - b", "a − b")]
    fn typesets_common_notation(#[case] expr: &str, #[case] expected: &str) {
        assert_eq!(inline(expr).unwrap(), expected);
    }

    #[test]
    fn block_line_breaks() {
        assert_eq!(
            block("\\begin{aligned} x &= 1 \\\\ y &= 2 \\end{aligned}").unwrap(),
            "x = 1\ny = 2"
        );
    }

    #[test]
    fn cases_environment() {
        assert_eq!(
            block("f(x) = \\begin{cases} 1 & x > 0 \\\\ 0 & x \\le 0 \\end{cases}").unwrap(),
            "f(x) = { 1 x > 0\n0 x ≤ 0"
        );
    }

    #[test]
    fn line_break_in_inline_is_an_error() {
        assert_eq!(inline("a \\\\ b"), Err(TypesetError::LineBreakInInline));
    }

    #[test]
    fn chemistry() {
        assert_eq!(inline("\\ce{H2O}").unwrap(), "H₂O");
        assert_eq!(
            inline("\\ce{2H2 + O2 -> 2H2O}").unwrap(),
            "2H₂ + O₂ → 2H₂O"
        );
    }

    #[rstest]
    #[case("\\frac{1}{", TypesetError::UnbalancedBraces { offset: 8 })]
    #[case("\\frac{1}", TypesetError::MissingArgument { command: "frac".into() })]
    #[case("\\foo{x}", TypesetError::UnknownCommand("foo".into()))]
    #[case("a}", TypesetError::UnexpectedClosingBrace { offset: 1 })]
    #[case("x^", TypesetError::DanglingScript { script: '^', offset: 1 })]
    #[case("x_}", TypesetError::DanglingScript { script: '_', offset: 1 })]
    #[case("\\begin{tabular}", TypesetError::UnknownEnvironment("tabular".into()))]
    #[case("\\begin{cases} x", TypesetError::UnclosedEnvironment("cases".into()))]
    #[case(
        "\\begin{cases} x \\end{aligned}",
        TypesetError::MismatchedEnvironment { expected: "cases".into(), found: "aligned".into() }
    )]
    #[case("x \\end{cases}", TypesetError::UnexpectedEnd("cases".into()))]
    #[case("\\ce{}", TypesetError::MissingArgument { command: "ce".into() })]
    #[case("\\text", TypesetError::MissingArgument { command: "text".into() })]
    #[case("\\", TypesetError::UnknownCommand(String::new()))]
    fn malformed_expressions_are_errors(#[case] expr: &str, #[case] expected: TypesetError) {
        assert_eq!(inline(expr), Err(expected));
    }

    #[rstest]
    #[case::groups(format!("{}x{}", "{".repeat(100_000), "}".repeat(100_000)))]
    #[case::unclosed_groups("{".repeat(100_000))]
    #[case::fractions("\\frac".repeat(10_000))]
    #[case::roots(format!("{}2", "\\sqrt".repeat(10_000)))]
    #[case::delimiters("\\left".repeat(10_000))]
    #[case::environments("\\begin{aligned}".repeat(10_000))]
    #[case::scripts(format!("x{}2", "^{".repeat(10_000)))]
    fn deep_nesting_is_an_error(#[case] expr: String) {
        for mode in [MathMode::Inline, MathMode::Block] {
            let result = UnicodeTypesetter.typeset(&expr, mode);
            assert!(
                matches!(result, Err(TypesetError::NestingTooDeep { .. })),
                "{mode:?}: {result:?}"
            );
        }
    }

    #[test]
    fn nesting_below_the_limit_typesets() {
        let depth = MAX_NESTING - 1;
        let expr = format!("{}x{}", "{".repeat(depth), "}".repeat(depth));
        assert_eq!(inline(&expr).unwrap(), "x");
    }

    #[test]
    fn wrap_keeps_single_tokens_bare() {
        assert_eq!(wrap("x"), "x");
        assert_eq!(wrap("12.5"), "12.5");
        assert_eq!(wrap("x²"), "x²");
        assert_eq!(wrap("a+b"), "(a+b)");
        assert_eq!(wrap(" n "), "n");
    }

    #[test]
    fn tidy_collapses_space() {
        assert_eq!(tidy("  a   b \n\n c "), "a b\nc");
    }
}
