//! Shared scaffolding used by the `lexer`, `parser`, and `debug` crates: a small
//! arena for arena-allocated node storage, and the error/diagnostic base types
//! those crates build their own enums out of.

pub mod arena;
pub mod error;

pub use arena::{Arena, Id};
pub use error::ErrorType;

/// Re-export point for the ambient `tracing` crate: `lexer`/`parser`/`debug` each instrument
/// their own entry points directly (`tracing::instrument`/`tracing::debug!`), but import the
/// crate through here so a single `common` dependency bump carries to all of them.
pub use tracing;
