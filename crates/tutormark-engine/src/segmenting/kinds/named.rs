/// A parenthesised named expression such as `(\ce{H2O})` or `( \text{mol} )`.
///
/// Only commands on the configured list are recognised; anything else in
/// parentheses stays prose.
pub struct NamedExpression;

impl NamedExpression {
    pub const OPEN: u8 = b'(';
    pub const CLOSE: u8 = b')';
    pub const ESCAPE: u8 = b'\\';
    pub const ARG_OPEN: u8 = b'{';
    pub const ARG_CLOSE: u8 = b'}';

    /// Commands recognised when no explicit list is configured.
    pub const DEFAULT_COMMANDS: &'static [&'static str] = &["ce", "text"];

    /// Padding allowed between the parentheses and the command.
    pub fn is_padding(b: u8) -> bool {
        b == b' ' || b == b'\t'
    }
}
