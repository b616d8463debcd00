//! The driver for the parsing process: owns the token cursor, the AST arena, and the
//! diagnostics sink, and exposes the entry points the other modules' `impl Parser` blocks
//! attach to. Grounded on the teacher's `Parser` struct and `Parser::parse`/`parse_router`
//! dispatch in `parser/src/core.rs`, generalized from a single monolithic router into the
//! per-construct dispatch this grammar's statement/expression/top-level layers need.

use crate::ast::{Ast, NodeId};
use crate::cursor::Cursor;
use crate::diagnostics::Diagnostics;
use lexer::token::Token;

pub struct Parser {
    pub(crate) cursor: Cursor,
    pub ast: Ast,
    pub diagnostics: Diagnostics,
}

/// Uses, top-level bindings, and work-queue nodes produced by one translation unit. All
/// three lists are append-only during parsing.
#[derive(Default)]
pub struct ParseResults {
    pub uses: Vec<NodeId>,
    pub bindings: Vec<NodeId>,
    pub pending: Vec<NodeId>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { cursor: Cursor::new(tokens), ast: Ast::new(), diagnostics: Diagnostics::new() }
    }

    /// Convenience constructor for tests and small embeddings: tokenizes `source` with the
    /// crate's own lexer and builds a parser over the result.
    pub fn from_source(source: &str) -> Self {
        Self::new(lexer::tokenize(source))
    }

    #[tracing::instrument(skip(self))]
    pub fn parse(&mut self) -> ParseResults {
        self.parse_program()
    }
}

/// Parses `source` end to end and returns the parser (so callers can inspect the arena,
/// the parse results, and any posted diagnostics).
pub fn parse_source(source: &str) -> (Parser, ParseResults) {
    let mut parser = Parser::from_source(source);
    let results = parser.parse();
    (parser, results)
}
