//! `onyxfront`: the front end of the Onyx language — a tokenizer, a recursive-descent
//! parser producing a tagged arena-backed AST, and a debug-value walker for the Onyx virtual
//! machine (OVM). Adapted from the teacher's `sicc` root crate, trimmed to the two
//! subsystems this front end actually owns: semantic analysis, code generation, and linking
//! are out of scope (see `DESIGN.md`), so this crate re-exports `lexer`, `parser`, and
//! `debug` rather than wiring in `sts`/`ir`/`integration`.

pub use common;
pub use debug;
pub use lexer;
pub use parser;

pub use parser::{parse_source, ParseResults, Parser};
