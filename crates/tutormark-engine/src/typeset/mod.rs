//! # Typesetting
//!
//! The seam between the renderer and whatever turns a math expression into
//! something a reader can see.
//!
//! - **`Typesetter`**: the capability the renderer depends on. Failures come
//!   back as [`TypesetError`] values, never as panics.
//! - **`UnicodeTypesetter`**: a built-in typesetter for terminals and plain
//!   HTML that writes a LaTeX subset as Unicode text.

pub mod chem;
pub mod script;
pub mod symbols;
pub mod unicode;

use serde::Serialize;
use thiserror::Error;

pub use unicode::UnicodeTypesetter;

/// Whether an expression sits inside a line or on its own line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MathMode {
    Inline,
    Block,
}

/// Typeset output for one expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Typeset {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesetError {
    #[error("unknown command \\{0}")]
    UnknownCommand(String),

    #[error("unknown environment {0}")]
    UnknownEnvironment(String),

    #[error("unclosed {{ opened at byte {offset}")]
    UnbalancedBraces { offset: usize },

    #[error("unexpected }} at byte {offset}")]
    UnexpectedClosingBrace { offset: usize },

    #[error("\\{command} is missing an argument")]
    MissingArgument { command: String },

    #[error("{script} at byte {offset} has nothing to attach to")]
    DanglingScript { script: char, offset: usize },

    #[error("\\end{{{found}}} does not close \\begin{{{expected}}}")]
    MismatchedEnvironment { expected: String, found: String },

    #[error("\\begin{{{0}}} is never closed")]
    UnclosedEnvironment(String),

    #[error("\\end{{{0}}} without a matching \\begin")]
    UnexpectedEnd(String),

    #[error("line break in inline math")]
    LineBreakInInline,

    #[error("nesting too deep at byte {offset}")]
    NestingTooDeep { offset: usize },
}

/// Renders a math expression, or explains why it cannot.
pub trait Typesetter {
    fn typeset(&self, expr: &str, mode: MathMode) -> Result<Typeset, TypesetError>;
}
