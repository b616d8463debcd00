//! Scalar and aggregate rendering. Grounded directly on
//! `examples/original_source/interpreter/src/debug/debug_runtime_values.c`'s
//! `append_value_from_memory_with_type` / `append_ovm_value_with_type` /
//! `append_value_from_stack` / `append_value_from_register`, kept as four functions with the
//! same split of responsibility (memory-addressed vs. register-held values) rather than
//! collapsed into one, since the register-held path has genuinely different fallback rules
//! (see the structure and array cases below).

use crate::buffer::RenderBuffer;
use crate::state::{FuncDebugInfo, OvmEngine, OvmState, OvmValue, StackFrame};
use crate::types::{DebugType, ModifierKind, PrimitiveKind, TypeId, TypeTable};

/// The read-only context every render function needs: the type table to look up `TypeId`s
/// in, the OVM state/memory snapshot to read values from, and which frame the walker is
/// inspecting.
pub struct RenderCtx<'a> {
    pub types: &'a TypeTable,
    pub state: &'a OvmState,
    pub engine: &'a OvmEngine,
    pub frame: usize,
    pub func: FuncDebugInfo,
}

/// Resolves the byte size of `type_id`, following alias and transparent-modifier chains.
/// Used only to stride through array elements; bounded like every other alias walk here.
fn size_of(types: &TypeTable, type_id: TypeId, depth: usize) -> u32 {
    if depth > crate::MAX_ALIAS_DEPTH {
        return 0;
    }
    match types.get(type_id) {
        DebugType::Primitive { size, .. } => *size as u32,
        DebugType::Modifier { size, .. } => *size as u32,
        DebugType::Alias { aliased } => size_of(types, *aliased, depth + 1),
        DebugType::Function => 4,
        DebugType::Structure { members } => members
            .iter()
            .map(|m| m.offset + size_of(types, m.type_id, depth + 1))
            .max()
            .unwrap_or(0),
        DebugType::Array { element, count } => size_of(types, *element, depth + 1) * count,
    }
}

fn render_primitive_from_memory(buf: &mut RenderBuffer, engine: &OvmEngine, addr: u32, kind: PrimitiveKind, size: u8) {
    match kind {
        PrimitiveKind::Void => buf.push_str("void"),
        PrimitiveKind::SignedInt => match size {
            1 => match engine.read_i8(addr) {
                Some(v) => buf.push_fmt(format_args!("{v}")),
                None => buf.push_str("(err)"),
            },
            2 => match engine.read_i16(addr) {
                Some(v) => buf.push_fmt(format_args!("{v}")),
                None => buf.push_str("(err)"),
            },
            4 => match engine.read_i32(addr) {
                Some(v) => buf.push_fmt(format_args!("{v}")),
                None => buf.push_str("(err)"),
            },
            8 => match engine.read_i64(addr) {
                Some(v) => buf.push_fmt(format_args!("{v}")),
                None => buf.push_str("(err)"),
            },
            _ => buf.push_str("(err)"),
        },
        PrimitiveKind::UnsignedInt => match size {
            1 => match engine.read_u8(addr) {
                Some(v) => buf.push_fmt(format_args!("{v}")),
                None => buf.push_str("(err)"),
            },
            2 => match engine.read_u16(addr) {
                Some(v) => buf.push_fmt(format_args!("{v}")),
                None => buf.push_str("(err)"),
            },
            4 => match engine.read_u32(addr) {
                Some(v) => buf.push_fmt(format_args!("{v}")),
                None => buf.push_str("(err)"),
            },
            8 => match engine.read_u64(addr) {
                Some(v) => buf.push_fmt(format_args!("{v}")),
                None => buf.push_str("(err)"),
            },
            _ => buf.push_str("(err)"),
        },
        // Matches the original's `WRITE_FORMAT("%f", ...)`, which always prints six
        // fractional digits, not Rust's default shortest-round-trip `Display`.
        PrimitiveKind::Float => match size {
            4 => match engine.read_f32(addr) {
                Some(v) => buf.push_fmt(format_args!("{v:.6}")),
                None => buf.push_str("(err)"),
            },
            8 => match engine.read_f64(addr) {
                Some(v) => buf.push_fmt(format_args!("{v:.6}")),
                None => buf.push_str("(err)"),
            },
            _ => buf.push_str("(err)"),
        },
        PrimitiveKind::Boolean => match engine.read_u8(addr) {
            Some(v) => buf.push_str(if v != 0 { "true" } else { "false" }),
            None => buf.push_str("(err)"),
        },
    }
}

fn render_pointer_from_memory(buf: &mut RenderBuffer, engine: &OvmEngine, addr: u32, size: u8) {
    match size {
        4 => match engine.read_u32(addr) {
            Some(v) => buf.push_fmt(format_args!("0x{v:x}")),
            None => buf.push_str("(err)"),
        },
        8 => match engine.read_u64(addr) {
            Some(v) => buf.push_fmt(format_args!("0x{v:x}")),
            None => buf.push_str("(err)"),
        },
        _ => buf.push_str("(err)"),
    }
}

/// Renders the value at linear-memory address `addr`, as described by `type_id`. This is
/// the workhorse every stack- and global-located render eventually bottoms out in.
pub fn render_from_memory(buf: &mut RenderBuffer, ctx: &RenderCtx<'_>, addr: u32, type_id: TypeId, depth: usize) {
    if depth > crate::MAX_ALIAS_DEPTH {
        buf.push_str("(err)");
        return;
    }
    match ctx.types.get(type_id) {
        DebugType::Primitive { kind, size } => render_primitive_from_memory(buf, ctx.engine, addr, *kind, *size),
        DebugType::Modifier { kind: ModifierKind::Pointer, size, .. } => render_pointer_from_memory(buf, ctx.engine, addr, *size),
        DebugType::Modifier { kind: ModifierKind::Other, modified, .. } => render_from_memory(buf, ctx, addr, *modified, depth + 1),
        DebugType::Alias { aliased } => render_from_memory(buf, ctx, addr, *aliased, depth + 1),
        DebugType::Function => match ctx.engine.read_u32(addr) {
            Some(v) => buf.push_fmt(format_args!("func[{v}]")),
            None => buf.push_str("(err)"),
        },
        DebugType::Structure { members } => {
            buf.push_str("{ ");
            for (i, member) in members.iter().enumerate() {
                if i != 0 {
                    buf.push_str(", ");
                }
                buf.push_str(&member.name);
                buf.push_str("=");
                render_from_memory(buf, ctx, addr.wrapping_add(member.offset), member.type_id, depth + 1);
            }
            buf.push_str(" }");
        }
        DebugType::Array { element, count } => {
            buf.push_str("[");
            let elem_size = size_of(ctx.types, *element, 0);
            for i in 0..*count {
                if i != 0 {
                    buf.push_str(", ");
                }
                render_from_memory(buf, ctx, addr.wrapping_add(i * elem_size), *element, depth + 1);
            }
            buf.push_str("]");
        }
    }
}

/// Renders a register-held (not memory-addressed) scalar `value`, as described by
/// `type_id`. Structures take the one-scalar fallback path (member 0) documented in the
/// spec; arrays redirect to `render_from_memory` by treating `value` as a linear-memory
/// address, matching the original's `append_ovm_value_with_type`.
pub fn render_ovm_value(buf: &mut RenderBuffer, ctx: &RenderCtx<'_>, value: OvmValue, type_id: TypeId, depth: usize) {
    if depth > crate::MAX_ALIAS_DEPTH {
        buf.push_str("(err)");
        return;
    }
    match ctx.types.get(type_id) {
        DebugType::Primitive { kind, size } => match kind {
            PrimitiveKind::Void => buf.push_str("void"),
            PrimitiveKind::SignedInt => match size {
                1 => buf.push_fmt(format_args!("{}", value.as_i8())),
                2 => buf.push_fmt(format_args!("{}", value.as_i16())),
                4 => buf.push_fmt(format_args!("{}", value.as_i32())),
                8 => buf.push_fmt(format_args!("{}", value.as_i64())),
                _ => buf.push_str("(err)"),
            },
            PrimitiveKind::UnsignedInt => match size {
                1 => buf.push_fmt(format_args!("{}", value.as_u8())),
                2 => buf.push_fmt(format_args!("{}", value.as_u16())),
                4 => buf.push_fmt(format_args!("{}", value.as_u32())),
                8 => buf.push_fmt(format_args!("{}", value.as_u64())),
                _ => buf.push_str("(err)"),
            },
            // See the memory-path comment above: `%f` always prints six fractional digits.
            PrimitiveKind::Float => match size {
                4 => buf.push_fmt(format_args!("{:.6}", value.as_f32())),
                8 => buf.push_fmt(format_args!("{:.6}", value.as_f64())),
                _ => buf.push_str("(err)"),
            },
            PrimitiveKind::Boolean => buf.push_str(if value.as_u64() != 0 { "true" } else { "false" }),
        },
        DebugType::Modifier { kind: ModifierKind::Pointer, size, .. } => match size {
            4 => buf.push_fmt(format_args!("0x{:x}", value.as_u32())),
            8 => buf.push_fmt(format_args!("0x{:x}", value.as_u64())),
            _ => buf.push_str("(err)"),
        },
        DebugType::Modifier { kind: ModifierKind::Other, modified, .. } => render_ovm_value(buf, ctx, value, *modified, depth + 1),
        DebugType::Alias { aliased } => render_ovm_value(buf, ctx, value, *aliased, depth + 1),
        DebugType::Function => buf.push_fmt(format_args!("func[{}]", value.as_u32())),
        DebugType::Array { .. } => render_from_memory(buf, ctx, value.as_u32(), type_id, depth + 1),
        DebugType::Structure { members } => {
            if let Some(first) = members.first() {
                render_ovm_value(buf, ctx, value, first.type_id, depth + 1);
            } else {
                buf.push_str("(unknown)");
            }
        }
    }
}

/// Renders the value at stack offset `offset` in the current frame, resolving the frame's
/// stack pointer first.
pub fn render_from_stack(buf: &mut RenderBuffer, ctx: &RenderCtx<'_>, offset: u32, type_id: TypeId, depth: usize) {
    match ctx.state.lookup_stack_pointer(ctx.frame, ctx.func) {
        Some(stack_ptr) => render_from_memory(buf, ctx, stack_ptr.wrapping_add(offset), type_id, depth),
        None => buf.push_str("(no stack ptr)"),
    }
}

/// Renders the value held in register `reg` of the current frame. A structure splits its
/// members across consecutive registers (`reg`, `reg + 1`, ...) per the register-packed ABI
/// this debug info assumes; every other type reads a single register.
pub fn render_from_register(buf: &mut RenderBuffer, ctx: &RenderCtx<'_>, reg: u32, type_id: TypeId, depth: usize) {
    match ctx.types.get(type_id) {
        DebugType::Structure { members } => {
            buf.push_str("{ ");
            for (i, member) in members.iter().enumerate() {
                if i != 0 {
                    buf.push_str(", ");
                }
                buf.push_str(&member.name);
                buf.push_str("=");
                match ctx.state.lookup_register(ctx.frame, reg + i as u32) {
                    Some(value) => render_ovm_value(buf, ctx, value, member.type_id, depth + 1),
                    None => buf.push_str("(err)"),
                }
            }
            buf.push_str(" }");
        }
        _ => match ctx.state.lookup_register(ctx.frame, reg) {
            Some(value) => render_ovm_value(buf, ctx, value, type_id, depth),
            None => buf.push_str("(err)"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StructMember;

    fn two_field_struct(types: &mut TypeTable) -> TypeId {
        let u32_ty = types.alloc(DebugType::Primitive { kind: PrimitiveKind::UnsignedInt, size: 4 });
        types.alloc(DebugType::Structure {
            members: vec![
                StructMember { name: "a".into(), offset: 0, type_id: u32_ty },
                StructMember { name: "b".into(), offset: 4, type_id: u32_ty },
            ],
        })
    }

    #[test]
    fn structure_from_memory_renders_braces_with_members_in_order() {
        let mut types = TypeTable::new();
        let struct_ty = two_field_struct(&mut types);
        let engine = OvmEngine { memory: vec![0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00] };
        let state = OvmState::default();
        let ctx = RenderCtx { types: &types, state: &state, engine: &engine, frame: 0, func: FuncDebugInfo { stack_ptr_idx: 0 } };
        let mut buf = RenderBuffer::new();
        render_from_memory(&mut buf, &ctx, 0, struct_ty, 0);
        assert_eq!(buf.as_str(), "{ a=1, b=2 }");
    }

    #[test]
    fn array_from_memory_renders_brackets() {
        let mut types = TypeTable::new();
        let u8_ty = types.alloc(DebugType::Primitive { kind: PrimitiveKind::UnsignedInt, size: 1 });
        let array_ty = types.alloc(DebugType::Array { element: u8_ty, count: 3 });
        let engine = OvmEngine { memory: vec![65, 66, 67] };
        let state = OvmState::default();
        let ctx = RenderCtx { types: &types, state: &state, engine: &engine, frame: 0, func: FuncDebugInfo { stack_ptr_idx: 0 } };
        let mut buf = RenderBuffer::new();
        render_from_memory(&mut buf, &ctx, 0, array_ty, 0);
        assert_eq!(buf.as_str(), "[65, 66, 67]");
    }

    #[test]
    fn register_held_array_redirects_to_memory_render() {
        let mut types = TypeTable::new();
        let u8_ty = types.alloc(DebugType::Primitive { kind: PrimitiveKind::UnsignedInt, size: 1 });
        let array_ty = types.alloc(DebugType::Array { element: u8_ty, count: 3 });
        let engine = OvmEngine { memory: vec![65, 66, 67] };
        let state = OvmState { stack_frames: vec![StackFrame::default()], numbered_values: vec![OvmValue::from_u32(0)], value_number_offset: 0 };
        let ctx = RenderCtx { types: &types, state: &state, engine: &engine, frame: 0, func: FuncDebugInfo { stack_ptr_idx: 0 } };
        let mut buf = RenderBuffer::new();
        render_from_register(&mut buf, &ctx, 0, array_ty, 0);
        assert_eq!(buf.as_str(), "[65, 66, 67]");
    }

    #[test]
    fn register_held_structure_splits_across_consecutive_registers() {
        let mut types = TypeTable::new();
        let struct_ty = two_field_struct(&mut types);
        let engine = OvmEngine::default();
        let state = OvmState {
            stack_frames: vec![StackFrame::default()],
            numbered_values: vec![OvmValue(7), OvmValue(9)],
            value_number_offset: 0,
        };
        let ctx = RenderCtx { types: &types, state: &state, engine: &engine, frame: 0, func: FuncDebugInfo { stack_ptr_idx: 0 } };
        let mut buf = RenderBuffer::new();
        render_from_register(&mut buf, &ctx, 0, struct_ty, 0);
        assert_eq!(buf.as_str(), "{ a=7, b=9 }");
    }

    #[test]
    fn structure_scalar_fallback_renders_first_member() {
        let mut types = TypeTable::new();
        let struct_ty = two_field_struct(&mut types);
        let engine = OvmEngine::default();
        let state = OvmState::default();
        let ctx = RenderCtx { types: &types, state: &state, engine: &engine, frame: 0, func: FuncDebugInfo { stack_ptr_idx: 0 } };
        let mut buf = RenderBuffer::new();
        render_ovm_value(&mut buf, &ctx, OvmValue(42), struct_ty, 0);
        assert_eq!(buf.as_str(), "42");
    }

    #[test]
    fn alias_renders_transparently_same_as_aliased_type() {
        let mut types = TypeTable::new();
        let i32_ty = types.alloc(DebugType::Primitive { kind: PrimitiveKind::SignedInt, size: 4 });
        let alias_ty = types.alloc(DebugType::Alias { aliased: i32_ty });
        let engine = OvmEngine { memory: vec![0xfc, 0xff, 0xff, 0xff] };
        let state = OvmState::default();
        let ctx = RenderCtx { types: &types, state: &state, engine: &engine, frame: 0, func: FuncDebugInfo { stack_ptr_idx: 0 } };
        let mut direct = RenderBuffer::new();
        render_from_memory(&mut direct, &ctx, 0, i32_ty, 0);
        let mut aliased = RenderBuffer::new();
        render_from_memory(&mut aliased, &ctx, 0, alias_ty, 0);
        assert_eq!(direct.as_str(), aliased.as_str());
        assert_eq!(direct.as_str(), "-4");
    }

    #[test]
    fn float_from_memory_renders_six_fractional_digits() {
        let mut types = TypeTable::new();
        let f32_ty = types.alloc(DebugType::Primitive { kind: PrimitiveKind::Float, size: 4 });
        let engine = OvmEngine { memory: 1.5f32.to_le_bytes().to_vec() };
        let state = OvmState::default();
        let ctx = RenderCtx { types: &types, state: &state, engine: &engine, frame: 0, func: FuncDebugInfo { stack_ptr_idx: 0 } };
        let mut buf = RenderBuffer::new();
        render_from_memory(&mut buf, &ctx, 0, f32_ty, 0);
        assert_eq!(buf.as_str(), "1.500000");
    }

    #[test]
    fn float_from_register_renders_six_fractional_digits() {
        let mut types = TypeTable::new();
        let f64_ty = types.alloc(DebugType::Primitive { kind: PrimitiveKind::Float, size: 8 });
        let engine = OvmEngine::default();
        let state = OvmState::default();
        let ctx = RenderCtx { types: &types, state: &state, engine: &engine, frame: 0, func: FuncDebugInfo { stack_ptr_idx: 0 } };
        let mut buf = RenderBuffer::new();
        render_ovm_value(&mut buf, &ctx, OvmValue(2.25f64.to_bits()), f64_ty, 0);
        assert_eq!(buf.as_str(), "2.250000");
    }

    #[test]
    fn oversized_alias_chain_renders_err_instead_of_overflowing() {
        let mut types = TypeTable::new();
        let placeholder = types.alloc(DebugType::Primitive { kind: PrimitiveKind::Void, size: 0 });
        let mut prev = placeholder;
        for _ in 0..(crate::MAX_ALIAS_DEPTH + 5) {
            prev = types.alloc(DebugType::Alias { aliased: prev });
        }
        let engine = OvmEngine::default();
        let state = OvmState::default();
        let ctx = RenderCtx { types: &types, state: &state, engine: &engine, frame: 0, func: FuncDebugInfo { stack_ptr_idx: 0 } };
        let mut buf = RenderBuffer::new();
        render_from_memory(&mut buf, &ctx, 0, prev, 0);
        assert_eq!(buf.as_str(), "(err)");
    }
}
