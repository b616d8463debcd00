//! Read-only snapshot of OVM-observable state: the stack-frame array, the flat
//! numbered-values register file, and linear memory. Grounded directly on
//! `examples/original_source/interpreter/src/debug/debug_runtime_values.c`'s
//! `lookup_register_in_frame`/`lookup_stack_pointer` and the `ovm_state_t`/`ovm_engine_t`
//! shapes those functions read from. The walker never mutates any of this; it only reads
//! through shared references.

/// A single OVM register value, modeled as its raw bit pattern. The VM's own `ovm_value_t`
/// is a tagged union of scalar types all sharing the same storage; callers reinterpret the
/// bits according to the debug type they already know applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OvmValue(pub u64);

impl OvmValue {
    pub fn from_u32(v: u32) -> Self {
        Self(v as u64)
    }

    pub fn as_i8(self) -> i8 {
        self.0 as u8 as i8
    }
    pub fn as_i16(self) -> i16 {
        self.0 as u16 as i16
    }
    pub fn as_i32(self) -> i32 {
        self.0 as u32 as i32
    }
    pub fn as_i64(self) -> i64 {
        self.0 as i64
    }
    pub fn as_u8(self) -> u8 {
        self.0 as u8
    }
    pub fn as_u16(self) -> u16 {
        self.0 as u16
    }
    pub fn as_u32(self) -> u32 {
        self.0 as u32
    }
    pub fn as_u64(self) -> u64 {
        self.0
    }
    pub fn as_f32(self) -> f32 {
        f32::from_bits(self.0 as u32)
    }
    pub fn as_f64(self) -> f64 {
        f64::from_bits(self.0)
    }
}

/// One entry of `ovm_state_t.stack_frames`. Only the field the walker actually consults
/// (the value-number window base a *caller* frame hands to its callee) is modeled.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackFrame {
    pub value_number_base: u32,
}

/// Read-only snapshot of the parts of `ovm_state_t` the walker touches: the frame stack and
/// the dense, cross-frame register file those frames index into.
#[derive(Debug, Default)]
pub struct OvmState {
    pub stack_frames: Vec<StackFrame>,
    pub numbered_values: Vec<OvmValue>,
    pub value_number_offset: u32,
}

/// Per-function debug info the walker needs to find the current frame's stack pointer.
/// Carries only `stack_ptr_idx`, per the external-interfaces contract in the spec.
#[derive(Debug, Clone, Copy)]
pub struct FuncDebugInfo {
    pub stack_ptr_idx: u32,
}

impl OvmState {
    /// Resolves register `reg` in the frame at `frame` (an index into `stack_frames`, with
    /// the last entry being the currently-executing frame) to its absolute slot in
    /// `numbered_values`.
    ///
    /// Mirrors `lookup_register_in_frame` exactly: the top-of-stack frame reads its window
    /// from `value_number_offset`; any other frame reads from the *next* frame's
    /// `value_number_base`, since the VM spills a caller's value-number window when it makes
    /// a call.
    pub fn lookup_register(&self, frame: usize, reg: u32) -> Option<OvmValue> {
        if frame >= self.stack_frames.len() {
            return None;
        }
        let base = if frame + 1 == self.stack_frames.len() {
            self.value_number_offset
        } else {
            self.stack_frames[frame + 1].value_number_base
        };
        self.numbered_values.get((base + reg) as usize).copied()
    }

    /// Reads the stack-pointer register of `func`'s frame at `frame`.
    pub fn lookup_stack_pointer(&self, frame: usize, func: FuncDebugInfo) -> Option<u32> {
        self.lookup_register(frame, func.stack_ptr_idx).map(OvmValue::as_u32)
    }
}

/// Read-only view of the OVM's linear memory (`ovm_engine_t.memory`). All reads are
/// little-endian and bounds-checked: the debug-info producer is not trusted to hand over
/// in-bounds addresses, so an out-of-range read renders `(err)` instead of panicking.
#[derive(Debug, Default)]
pub struct OvmEngine {
    pub memory: Vec<u8>,
}

macro_rules! read_scalar {
    ($name:ident, $ty:ty, $len:expr) => {
        pub fn $name(&self, addr: u32) -> Option<$ty> {
            let bytes: [u8; $len] = self.read_bytes(addr, $len)?.try_into().ok()?;
            Some(<$ty>::from_le_bytes(bytes))
        }
    };
}

impl OvmEngine {
    pub fn read_bytes(&self, addr: u32, len: usize) -> Option<&[u8]> {
        let start = addr as usize;
        let end = start.checked_add(len)?;
        self.memory.get(start..end)
    }

    pub fn read_u8(&self, addr: u32) -> Option<u8> {
        self.read_bytes(addr, 1).map(|b| b[0])
    }

    pub fn read_i8(&self, addr: u32) -> Option<i8> {
        self.read_u8(addr).map(|b| b as i8)
    }

    read_scalar!(read_u16, u16, 2);
    read_scalar!(read_i16, i16, 2);
    read_scalar!(read_u32, u32, 4);
    read_scalar!(read_i32, i32, 4);
    read_scalar!(read_u64, u64, 8);
    read_scalar!(read_i64, i64, 8);
    read_scalar!(read_f32, f32, 4);
    read_scalar!(read_f64, f64, 8);
}
