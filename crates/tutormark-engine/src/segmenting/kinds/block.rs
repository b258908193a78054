/// Display math written as `\[ ... \]`. May span lines.
pub struct BracketBlock;

impl BracketBlock {
    pub const OPEN: &'static [u8; 2] = b"\\[";
    pub const CLOSE: &'static [u8; 2] = b"\\]";
}

/// Display math written as `$$ ... $$`. May span lines.
///
/// Shares its leading byte with [`super::DollarInline`], which is why it is
/// tried first.
pub struct DollarBlock;

impl DollarBlock {
    pub const FENCE: &'static [u8; 2] = b"$$";
}
