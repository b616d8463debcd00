//! The debug-value subsystem: debug-type descriptors (`types`), a read-only snapshot of
//! OVM-observable state (`state`), the value walker and its iteration cursor (`walker`),
//! scalar/aggregate rendering (`render`), the output buffer it renders into (`buffer`), and a
//! `thiserror`-derived well-formedness-check error (`error`) a caller can `?`-propagate
//! before constructing a walker at all.
//!
//! No direct teacher module covers this — `examples/luodiw-complete-compiler` generates
//! LLVM IR and never had a debug-value walker. File-per-concern organization and the
//! `impl SomeDriverStruct` split are grounded on the teacher's `ir/src/{block,statement,
//! primitive}.rs` structure; walker/render semantics are grounded directly on
//! `examples/original_source/interpreter/src/debug/debug_runtime_values.c`.

pub mod buffer;
pub mod error;
pub mod render;
pub mod state;
pub mod types;
pub mod walker;

/// Bound on alias/modifier-chain recursion depth. The debug-info producer is an external
/// collaborator whose acyclicity this crate does not assume; exceeding the bound renders
/// `(err)` rather than overflowing the stack.
pub const MAX_ALIAS_DEPTH: usize = 64;

pub use buffer::RenderBuffer;
pub use error::DebugError;
pub use state::{FuncDebugInfo, OvmEngine, OvmState, OvmValue, StackFrame};
pub use types::{DebugType, ModifierKind, PrimitiveKind, StructMember, TypeId, TypeTable};
pub use walker::{IterationCursor, LocationKind, ValueWalker};
