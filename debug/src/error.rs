//! Fatal, well-formedness-check errors for a debug-type table. Distinct from the in-band
//! `(err)` / `(unknown)` / `(location unknown)` text the walker renders when it meets a bad
//! type or location mid-walk (§7: those are never exceptional): this is for a caller who
//! wants to reject a malformed debug-info table with an ordinary `?`-propagatable error
//! before ever constructing a [`crate::walker::ValueWalker`] over it, per §7's ambient-stack
//! rule that both crates' diagnostic/error enums derive `thiserror::Error`.

use thiserror::Error;

use crate::types::TypeId;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DebugError {
    #[error("type id {0:?} is out of bounds for this type table")]
    UnknownType(TypeId),
    #[error("alias/modifier/structure/array chain exceeds the maximum depth of {0}")]
    ChainTooDeep(usize),
}
