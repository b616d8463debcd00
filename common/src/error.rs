//! Shared error scaffolding. Mirrors the teacher's `ErrorType::SyntaxError { message }` /
//! `ErrorType::DevError { message }` shape, generalized to a `thiserror`-derived enum so it
//! also implements `std::error::Error` for callers that want ordinary `?`-propagation of a
//! fatal condition, even though the parser itself never propagates diagnostics this way
//! (see `parser::diagnostics`).

use thiserror::Error;

/// A position in the original source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub offset: u32,
}

impl Position {
    pub const fn start() -> Self {
        Self { line: 1, column: 1, offset: 0 }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Base error shape shared by crates that surface a fatal (non-recoverable) condition.
/// Day-to-day parse/walk errors are posted as diagnostics, not returned as `Err`; this type
/// exists for the cases where a caller genuinely needs to abort (e.g. malformed debug-info
/// input discovered before the walker even starts).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorType {
    #[error("syntax error: {message}")]
    SyntaxError { message: String },

    #[error("internal error: {message}")]
    DevError { message: String },
}
