//! The debug type descriptor model. Grounded directly on
//! `examples/original_source/interpreter/src/debug/debug_runtime_values.c`'s handling of
//! `DbgType` variants (primitive/modifier/alias/function/structure/array), reshaped into a
//! Rust enum stored in a [`common::arena::Arena`] and addressed by [`TypeId`].

use common::arena::{Arena, Id};

use crate::error::DebugError;

pub type TypeId = Id<DebugType>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Void,
    SignedInt,
    UnsignedInt,
    Float,
    Boolean,
}

/// Pointer is the only modifier kind with walker/render-visible behavior; every other
/// modifier kind (e.g. a producer's notion of `const` or `volatile`) is transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKind {
    Pointer,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructMember {
    pub name: String,
    pub offset: u32,
    pub type_id: TypeId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DebugType {
    Primitive { kind: PrimitiveKind, size: u8 },
    Modifier { kind: ModifierKind, modified: TypeId, size: u8 },
    Alias { aliased: TypeId },
    Function,
    Structure { members: Vec<StructMember> },
    Array { element: TypeId, count: u32 },
}

#[derive(Debug, Default)]
pub struct TypeTable {
    types: Arena<DebugType>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self { types: Arena::new() }
    }

    pub fn alloc(&mut self, ty: DebugType) -> TypeId {
        self.types.alloc(ty)
    }

    pub fn get(&self, id: TypeId) -> &DebugType {
        self.types.get(id)
    }

    /// Checks that `root`, and every type id reachable from it through modifier/alias/
    /// structure/array links, is in bounds. A caller that wants to reject a malformed
    /// debug-info table with an ordinary `Result::Err` before handing it to a
    /// [`crate::walker::ValueWalker`] can call this first; the walker itself never does,
    /// since out-of-range access during a walk degrades to `(err)`/`Unknown` rather than
    /// failing the whole render (§7).
    pub fn validate(&self, root: TypeId) -> Result<(), DebugError> {
        self.validate_at(root, 0)
    }

    fn validate_at(&self, id: TypeId, depth: usize) -> Result<(), DebugError> {
        if depth > crate::MAX_ALIAS_DEPTH {
            return Err(DebugError::ChainTooDeep(crate::MAX_ALIAS_DEPTH));
        }
        if id.raw() as usize >= self.types.len() {
            return Err(DebugError::UnknownType(id));
        }
        match self.get(id) {
            DebugType::Primitive { .. } | DebugType::Function => Ok(()),
            DebugType::Modifier { modified, .. } => self.validate_at(*modified, depth + 1),
            DebugType::Alias { aliased } => self.validate_at(*aliased, depth + 1),
            DebugType::Array { element, .. } => self.validate_at(*element, depth + 1),
            DebugType::Structure { members } => {
                for member in members {
                    self.validate_at(member.type_id, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

/// Follows `Alias` and non-pointer `Modifier` links transparently until a semantically
/// active type (primitive, pointer, function, structure, array) is reached. Bounded at
/// [`crate::MAX_ALIAS_DEPTH`] since the debug-info producer is not trusted to hand over an
/// acyclic graph.
pub fn resolve_transparent(table: &TypeTable, type_id: TypeId, depth: usize) -> Option<DebugType> {
    if depth > crate::MAX_ALIAS_DEPTH {
        return None;
    }
    match table.get(type_id) {
        DebugType::Alias { aliased } => resolve_transparent(table, *aliased, depth + 1),
        DebugType::Modifier { kind: ModifierKind::Other, modified, .. } => resolve_transparent(table, *modified, depth + 1),
        other => Some(other.clone()),
    }
}
