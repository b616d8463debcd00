//! Tokenizer for the front end: token kinds, positions, and a hand-rolled lexer that
//! turns source text into a flat, EOF-terminated token stream.

pub mod lexer;
pub mod token;

pub use lexer::{tokenize, Lexer};
pub use token::{Position, Token, TokenKind};
