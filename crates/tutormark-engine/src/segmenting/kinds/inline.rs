/// Inline math written as `\( ... \)`. Never spans a line break.
pub struct ParenInline;

impl ParenInline {
    pub const OPEN: &'static [u8; 2] = b"\\(";
    pub const CLOSE: &'static [u8; 2] = b"\\)";
}

/// Inline math written as `$ ... $`. Never spans a line break and never
/// opens with a `$$` run.
pub struct DollarInline;

impl DollarInline {
    pub const DOLLAR: u8 = b'$';
}
