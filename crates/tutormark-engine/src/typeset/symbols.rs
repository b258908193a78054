//! Command tables for the Unicode typesetter.

/// The Unicode rendering of a symbol command (`\alpha`, `\leq`, ...).
pub fn symbol(name: &str) -> Option<&'static str> {
    Some(match name {
        // lowercase greek
        "alpha" => "α",
        "beta" => "β",
        "gamma" => "γ",
        "delta" => "δ",
        "epsilon" => "ϵ",
        "varepsilon" => "ε",
        "zeta" => "ζ",
        "eta" => "η",
        "theta" => "θ",
        "vartheta" => "ϑ",
        "iota" => "ι",
        "kappa" => "κ",
        "lambda" => "λ",
        "mu" => "μ",
        "nu" => "ν",
        "xi" => "ξ",
        "pi" => "π",
        "varpi" => "ϖ",
        "rho" => "ρ",
        "varrho" => "ϱ",
        "sigma" => "σ",
        "varsigma" => "ς",
        "tau" => "τ",
        "upsilon" => "υ",
        "phi" => "ϕ",
        "varphi" => "φ",
        "chi" => "χ",
        "psi" => "ψ",
        "omega" => "ω",
        // uppercase greek
        "Gamma" => "Γ",
        "Delta" => "Δ",
        "Theta" => "Θ",
        "Lambda" => "Λ",
        "Xi" => "Ξ",
        "Pi" => "Π",
        "Sigma" => "Σ",
        "Upsilon" => "Υ",
        "Phi" => "Φ",
        "Psi" => "Ψ",
        "Omega" => "Ω",
        // binary operators
        "times" => "×",
        "div" => "÷",
        "cdot" => "·",
        "pm" => "±",
        "mp" => "∓",
        "ast" => "∗",
        "circ" => "∘",
        "bullet" => "•",
        "oplus" => "⊕",
        "otimes" => "⊗",
        "cup" => "∪",
        "cap" => "∩",
        "setminus" => "∖",
        "wedge" | "land" => "∧",
        "vee" | "lor" => "∨",
        // relations
        "leq" | "le" => "≤",
        "geq" | "ge" => "≥",
        "leqq" => "≦",
        "geqq" => "≧",
        "neq" | "ne" => "≠",
        "approx" => "≈",
        "equiv" => "≡",
        "sim" => "∼",
        "simeq" => "≃",
        "cong" => "≅",
        "propto" => "∝",
        "ll" => "≪",
        "gg" => "≫",
        "in" => "∈",
        "notin" => "∉",
        "ni" => "∋",
        "subset" => "⊂",
        "supset" => "⊃",
        "subseteq" => "⊆",
        "supseteq" => "⊇",
        "perp" => "⊥",
        "parallel" => "∥",
        "mid" => "∣",
        // arrows
        "to" | "rightarrow" => "→",
        "leftarrow" | "gets" => "←",
        "leftrightarrow" => "↔",
        "Rightarrow" | "implies" => "⇒",
        "Leftarrow" => "⇐",
        "Leftrightarrow" | "iff" => "⇔",
        "longrightarrow" => "⟶",
        "longleftarrow" => "⟵",
        "mapsto" => "↦",
        "uparrow" => "↑",
        "downarrow" => "↓",
        "rightleftharpoons" => "⇌",
        // big operators and misc
        "sum" => "∑",
        "prod" => "∏",
        "int" => "∫",
        "iint" => "∬",
        "oint" => "∮",
        "partial" => "∂",
        "nabla" => "∇",
        "infty" => "∞",
        "forall" => "∀",
        "exists" => "∃",
        "neg" | "lnot" => "¬",
        "emptyset" | "varnothing" => "∅",
        "angle" => "∠",
        "triangle" => "△",
        "degree" => "°",
        "prime" => "′",
        "hbar" => "ℏ",
        "ell" => "ℓ",
        "Re" => "ℜ",
        "Im" => "ℑ",
        "therefore" => "∴",
        "because" => "∵",
        "ldots" | "dots" => "…",
        "cdots" => "⋯",
        "vdots" => "⋮",
        "ddots" => "⋱",
        // delimiters
        "langle" => "⟨",
        "rangle" => "⟩",
        "lfloor" => "⌊",
        "rfloor" => "⌋",
        "lceil" => "⌈",
        "rceil" => "⌉",
        "lvert" | "rvert" | "vert" => "|",
        "lVert" | "rVert" | "Vert" => "‖",
        // blackboard letters used as sets
        "N" => "ℕ",
        "Z" => "ℤ",
        "Q" => "ℚ",
        "R" => "ℝ",
        "C" => "ℂ",
        // spacing
        "quad" => "  ",
        "qquad" => "    ",
        _ => return None,
    })
}

/// Operator names typeset upright as their own name (`\sin` → `sin`).
pub fn is_operator_name(name: &str) -> bool {
    matches!(
        name,
        "sin"
            | "cos"
            | "tan"
            | "cot"
            | "sec"
            | "csc"
            | "arcsin"
            | "arccos"
            | "arctan"
            | "sinh"
            | "cosh"
            | "tanh"
            | "log"
            | "ln"
            | "lg"
            | "exp"
            | "lim"
            | "liminf"
            | "limsup"
            | "max"
            | "min"
            | "sup"
            | "inf"
            | "det"
            | "dim"
            | "ker"
            | "deg"
            | "gcd"
            | "arg"
            | "Pr"
            | "mod"
    )
}

/// Commands whose single argument is copied as literal text.
pub fn is_text_command(name: &str) -> bool {
    matches!(
        name,
        "text" | "textrm" | "textit" | "textbf" | "mbox" | "operatorname"
    )
}

/// Font switches whose argument is typeset normally; plain text has no
/// fonts to switch.
pub fn is_font_command(name: &str) -> bool {
    matches!(
        name,
        "mathrm"
            | "mathbf"
            | "mathit"
            | "mathsf"
            | "mathtt"
            | "mathcal"
            | "mathbb"
            | "boldsymbol"
            | "mathscr"
    )
}

/// Commands that produce nothing visible in plain text.
pub fn is_ignored(name: &str) -> bool {
    matches!(
        name,
        "displaystyle" | "textstyle" | "limits" | "nolimits" | "big" | "Big" | "bigg" | "Bigg"
    )
}

/// The combining mark an accent command places on its argument.
pub fn accent(name: &str) -> Option<char> {
    Some(match name {
        "vec" => '\u{20D7}',
        "hat" | "widehat" => '\u{0302}',
        "bar" | "overline" => '\u{0305}',
        "tilde" | "widetilde" => '\u{0303}',
        "dot" => '\u{0307}',
        "ddot" => '\u{0308}',
        _ => return None,
    })
}

/// Environments understood by `\begin{...}`, with the text placed before and
/// after their body.
pub fn environment(name: &str) -> Option<(&'static str, &'static str)> {
    Some(match name {
        "aligned" | "align" | "align*" | "gathered" | "gather" | "gather*" | "split"
        | "equation" | "equation*" | "matrix" => ("", ""),
        "pmatrix" => ("(", ")"),
        "bmatrix" => ("[", "]"),
        "vmatrix" => ("|", "|"),
        "cases" => ("{ ", ""),
        _ => return None,
    })
}
