//! The value walker: given a symbolic location and a debug type, produces a human-readable
//! rendering of a live value in a running OVM frame. Grounded directly on
//! `examples/original_source/interpreter/src/debug/debug_runtime_values.c`'s
//! `debug_runtime_value_build_{init,set_location,descend,step,build_string,clear,free}`.
//! Modeled as an explicit `Cursor` struct per the redesign note in §9 rather than a
//! coroutine — `step()` returning `bool` plus mutated cursor fields composes with any host
//! UI without imposing a concurrency model.

use crate::buffer::RenderBuffer;
use crate::render::{self, RenderCtx};
use crate::state::{FuncDebugInfo, OvmEngine, OvmState};
use crate::types::{DebugType, ModifierKind, TypeId, TypeTable};

/// Where a symbol's storage lives. `Unknown` is both the initial "nothing resolved yet"
/// state and the terminal state `descend` transitions to on an invalid drill-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    Register,
    Stack,
    Global,
    Unknown,
}

/// The value currently being inspected: where it lives and what type describes it. Distinct
/// from the iteration cursor below, which describes the *currently selected child* (which,
/// right after `set_location`, is the value itself).
#[derive(Debug, Clone, Copy)]
struct BaseCursor {
    loc_kind: LocationKind,
    loc: u32,
    type_id: TypeId,
}

/// The walker's public iteration state: the selected subvalue's display name, location, and
/// type, plus the `(index, max_index)` pair a host UI uses to know how many siblings there
/// are and whether it has already visited them all.
#[derive(Debug, Clone)]
pub struct IterationCursor {
    pub name: String,
    pub loc_kind: LocationKind,
    pub loc: u32,
    pub type_id: TypeId,
    pub has_children: bool,
    pub index: u32,
    pub max_index: u32,
}

/// Number of subvalues `descend`/`step` can drill into for `type_id`: 0 for
/// primitive/function/array/non-pointer-modifier, 1 for pointer, member-count for
/// structure, and the aliased type's own count for aliases. Bounded like every other
/// alias/modifier walk here, since the debug-info producer's acyclicity isn't assumed.
fn subvalue_count(types: &TypeTable, type_id: TypeId, depth: usize) -> u32 {
    if depth > crate::MAX_ALIAS_DEPTH {
        return 0;
    }
    match types.get(type_id) {
        DebugType::Primitive { .. } | DebugType::Function | DebugType::Array { .. } => 0,
        DebugType::Modifier { kind: ModifierKind::Pointer, .. } => 1,
        DebugType::Modifier { kind: ModifierKind::Other, modified, .. } => subvalue_count(types, *modified, depth + 1),
        DebugType::Alias { aliased } => subvalue_count(types, *aliased, depth + 1),
        DebugType::Structure { members } => members.len() as u32,
    }
}

/// Stateful cursor over one symbol's value. Owns its output buffer; never mutates the OVM
/// state it reads through `types`/`state`/`engine`.
pub struct ValueWalker<'a> {
    types: &'a TypeTable,
    state: &'a OvmState,
    engine: &'a OvmEngine,
    frame: usize,
    func: FuncDebugInfo,
    base: BaseCursor,
    it: IterationCursor,
    buffer: RenderBuffer,
}

impl<'a> ValueWalker<'a> {
    /// Equivalent of `debug_runtime_value_build_init` plus an immediate `set_location`: in
    /// this arena-backed port there is no separate allocator handle to hand the buffer, so
    /// construction and seeding the base cursor are one step.
    #[tracing::instrument(skip(types, state, engine))]
    pub fn new(
        types: &'a TypeTable,
        state: &'a OvmState,
        engine: &'a OvmEngine,
        frame: usize,
        func: FuncDebugInfo,
        loc_kind: LocationKind,
        loc: u32,
        type_id: TypeId,
        name: impl Into<String>,
    ) -> Self {
        let mut walker = Self {
            types,
            state,
            engine,
            frame,
            func,
            base: BaseCursor { loc_kind: LocationKind::Unknown, loc: 0, type_id },
            it: IterationCursor {
                name: String::new(),
                loc_kind: LocationKind::Unknown,
                loc: 0,
                type_id,
                has_children: false,
                index: 0,
                max_index: 0,
            },
            buffer: RenderBuffer::new(),
        };
        walker.set_location(loc_kind, loc, type_id, name);
        walker
    }

    fn ctx(&self) -> RenderCtx<'a> {
        RenderCtx { types: self.types, state: self.state, engine: self.engine, frame: self.frame, func: self.func }
    }

    pub fn iteration(&self) -> &IterationCursor {
        &self.it
    }

    /// Seeds the base cursor at `(loc_kind, loc, type_id)` and initializes the iteration
    /// cursor to describe the value itself (`has_children` iff `max_index > 0`).
    #[tracing::instrument(skip(self, name))]
    pub fn set_location(&mut self, loc_kind: LocationKind, loc: u32, type_id: TypeId, name: impl Into<String>) {
        let name = name.into();
        let max_index = subvalue_count(self.types, type_id, 0);
        self.base = BaseCursor { loc_kind, loc, type_id };
        self.it = IterationCursor {
            name,
            loc_kind,
            loc,
            type_id,
            has_children: max_index > 0,
            index: 0,
            max_index,
        };
    }

    /// Drills the *base* cursor into subvalue `index`. Valid only when the base type is a
    /// pointer (`index` must be 0) or a structure (`index` must be in-bounds); any other
    /// base type, or an out-of-range index, transitions the base to `LocationKind::Unknown`.
    #[tracing::instrument(skip(self))]
    pub fn descend(&mut self, index: u32) {
        self.it.index = 0;

        match self.types.get(self.base.type_id).clone() {
            DebugType::Modifier { kind: ModifierKind::Pointer, modified, .. } => {
                if index > 0 {
                    self.base.loc_kind = LocationKind::Unknown;
                    return;
                }

                self.base.type_id = modified;
                self.it.max_index = subvalue_count(self.types, modified, 0);
                self.it.index = 0;

                match self.base.loc_kind {
                    LocationKind::Register => match self.state.lookup_register(self.frame, self.base.loc) {
                        Some(value) => {
                            self.base.loc_kind = LocationKind::Global;
                            self.base.loc = value.as_u32();
                        }
                        None => self.base.loc_kind = LocationKind::Unknown,
                    },
                    LocationKind::Stack => match self.state.lookup_stack_pointer(self.frame, self.func) {
                        Some(stack_ptr) => match self.engine.read_u32(stack_ptr.wrapping_add(self.base.loc)) {
                            Some(value) => {
                                self.base.loc = value;
                                self.base.loc_kind = LocationKind::Global;
                            }
                            None => self.base.loc_kind = LocationKind::Unknown,
                        },
                        None => self.base.loc_kind = LocationKind::Unknown,
                    },
                    LocationKind::Global => match self.engine.read_u32(self.base.loc) {
                        Some(value) => self.base.loc = value,
                        None => self.base.loc_kind = LocationKind::Unknown,
                    },
                    LocationKind::Unknown => {}
                }
            }
            DebugType::Structure { members } => {
                let Some(member) = members.get(index as usize) else {
                    self.base.loc_kind = LocationKind::Unknown;
                    return;
                };

                self.base.type_id = member.type_id;
                self.it.max_index = subvalue_count(self.types, member.type_id, 0);
                self.it.name = member.name.clone();

                match self.base.loc_kind {
                    LocationKind::Register => self.base.loc += index,
                    LocationKind::Stack | LocationKind::Global => self.base.loc += member.offset,
                    LocationKind::Unknown => {}
                }
            }
            _ => self.base.loc_kind = LocationKind::Unknown,
        }
    }

    /// Advances the iteration cursor by one subvalue without changing the base. Returns
    /// `false` once `it_index >= max_index`, at which point `step()` is idempotent until
    /// `set_location` or `descend` is called again.
    pub fn step(&mut self) -> bool {
        if self.it.index >= self.it.max_index {
            return false;
        }

        match self.types.get(self.base.type_id).clone() {
            DebugType::Modifier { kind: ModifierKind::Pointer, modified, .. } => {
                self.it.loc_kind = self.base.loc_kind;
                self.it.loc = self.base.loc;
                self.it.name = format!("*{}", self.it.name);
                self.it.type_id = modified;
                self.it.has_children = subvalue_count(self.types, modified, 0) > 0;
            }
            DebugType::Structure { members } => {
                let member = &members[self.it.index as usize];
                self.it.name = member.name.clone();
                self.it.type_id = member.type_id;
                self.it.has_children = subvalue_count(self.types, member.type_id, 0) > 0;

                match self.base.loc_kind {
                    LocationKind::Register => {
                        self.it.loc_kind = LocationKind::Register;
                        self.it.loc = self.base.loc + self.it.index;
                    }
                    LocationKind::Stack => {
                        self.it.loc_kind = LocationKind::Stack;
                        self.it.loc = self.base.loc + member.offset;
                    }
                    LocationKind::Global => {
                        self.it.loc_kind = LocationKind::Global;
                        self.it.loc = self.base.loc + member.offset;
                    }
                    LocationKind::Unknown => {}
                }
            }
            _ => {}
        }

        self.it.index += 1;
        true
    }

    /// Renders the current iteration value into the owned buffer and returns it as a `&str`.
    pub fn build_string(&mut self) -> &str {
        self.buffer.clear();
        let ctx = self.ctx();
        match self.it.loc_kind {
            LocationKind::Register => render::render_from_register(&mut self.buffer, &ctx, self.it.loc, self.it.type_id, 0),
            LocationKind::Stack => render::render_from_stack(&mut self.buffer, &ctx, self.it.loc, self.it.type_id, 0),
            LocationKind::Global => {
                render::render_from_memory(&mut self.buffer, &ctx, self.it.loc, self.it.type_id, 0)
            }
            LocationKind::Unknown => self.buffer.push_str("(location unknown)"),
        }
        self.buffer.as_str()
    }

    /// Empties the output buffer without freeing its storage, preparing the next render.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
