//! The parser's diagnostic sink. Unlike the teacher's `Result<Option<ASTNode>, Vec<ErrorType>>`
//! idiom, which aborts the whole parse on the first error via `?`, every diagnostic here is
//! posted to an append-only sink and parsing continues — matching the propagation policy
//! described for this grammar fragment.

use common::error::Position;
use thiserror::Error;

/// Per §7's ambient-stack rule, this derives `thiserror::Error` (hence `Display` and
/// `std::error::Error`) even though the parser's own recovery policy never returns these as
/// `Result::Err` — they are data posted to `Diagnostics`, not control flow. A caller that
/// wants one as an ordinary, `?`-propagatable error can do so.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    #[error("expected {expected}, found {found}")]
    ExpectedToken { expected: String, found: String },
    #[error("unexpected token: {found}")]
    UnexpectedToken { found: String },
    #[error("expected expression, found {context}")]
    ExpectedExpression { context: String },
    #[error("unknown directive: {name}")]
    UnknownDirective { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub position: Position,
}

/// An append-only collector owned by the caller, not the parser. The parser never reads
/// back from it; posting is fire-and-forget.
#[derive(Debug, Default)]
pub struct Diagnostics {
    messages: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: DiagnosticKind, position: Position) {
        tracing::debug!(?kind, %position, "diagnostic posted");
        self.messages.push(Diagnostic { kind, position });
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_kind_displays_as_an_ordinary_error() {
        let kind = DiagnosticKind::ExpectedToken { expected: "Semicolon".into(), found: "RParen".into() };
        assert_eq!(kind.to_string(), "expected Semicolon, found RParen");
        let _: &dyn std::error::Error = &kind;
    }
}
