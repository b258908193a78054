// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_answer(paragraphs: usize) -> String {
    let base = "The area of a circle is $A = \\pi r^2$, so doubling $r$ quadruples it.\n\n\
                $$\n\\int_0^{\\infty} e^{-x} \\, dx = 1\n$$\n\n\
                Water forms from (\\ce{2H2 + O2 -> 2H2O}) and \\(\\frac{a}{b}\\) is a ratio.\n\n\
                A price of $5 is not math, and \\[x\\] closes fine.\n\n";
    base.repeat(paragraphs)
}

/// Many openers that never close, the worst case for closer searches.
#[allow(dead_code)]
pub fn generate_unclosed(repeats: usize) -> String {
    "\\( \\[ $$ $ (\\ce{ ".repeat(repeats)
}
