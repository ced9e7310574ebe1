// SPDX-License-Identifier: MPL-2.0

//! CPU context of a user thread at the kernel boundary.
//!
//! [`UserContext`] is the view of the trap frame that the host kernel hands
//! to this subsystem when a thread traps in: the general-purpose register
//! block saved at kernel entry plus the thread's x87/SSE state. Restoring a
//! snapshot into the live trap frame makes the thread resume, upon kernel
//! return, at the snapshot's instruction pointer on the snapshot's stack.

/// The general-purpose register block of the trap frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GeneralRegs {
    pub rax: usize,
    pub rbx: usize,
    pub rcx: usize,
    pub rdx: usize,
    pub rsi: usize,
    pub rdi: usize,
    pub rbp: usize,
    pub rsp: usize,
    pub r8: usize,
    pub r9: usize,
    pub r10: usize,
    pub r11: usize,
    pub r12: usize,
    pub r13: usize,
    pub r14: usize,
    pub r15: usize,
    pub rip: usize,
    pub rflags: usize,
    pub fsbase: usize,
    pub gsbase: usize,
}

/// Cpu context, including both general-purpose registers and floating-point registers.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct UserContext {
    general: GeneralRegs,
    fpu_regs: FpuRegs,
}

impl UserContext {
    pub fn general_regs(&self) -> &GeneralRegs {
        &self.general
    }

    pub fn general_regs_mut(&mut self) -> &mut GeneralRegs {
        &mut self.general
    }

    pub fn fpu_regs(&self) -> &FpuRegs {
        &self.fpu_regs
    }

    pub fn fpu_regs_mut(&mut self) -> &mut FpuRegs {
        &mut self.fpu_regs
    }
}

macro_rules! cpu_context_impl_getter_setter {
    ( $( [ $field: ident, $setter_name: ident] ),*) => {
        impl UserContext {
            $(
                #[inline(always)]
                pub fn $field(&self) -> usize {
                    self.general.$field
                }

                #[inline(always)]
                pub fn $setter_name(&mut self, $field: usize) {
                    self.general.$field = $field;
                }
            )*
        }
    };
}

cpu_context_impl_getter_setter!(
    [rax, set_rax],
    [rbx, set_rbx],
    [rcx, set_rcx],
    [rdx, set_rdx],
    [rsi, set_rsi],
    [rdi, set_rdi],
    [rbp, set_rbp],
    [rsp, set_rsp],
    [r8, set_r8],
    [r9, set_r9],
    [r10, set_r10],
    [r11, set_r11],
    [r12, set_r12],
    [r13, set_r13],
    [r14, set_r14],
    [r15, set_r15],
    [rip, set_rip],
    [rflags, set_rflags],
    [fsbase, set_fsbase],
    [gsbase, set_gsbase]
);

/// The floating-point state of CPU.
///
/// The buffer is in the 512-byte fxsave/fxrstor format. Filling it from the
/// live register file and loading it back is the host arch glue's side of the
/// seam; this type owns the state image between the two.
#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub struct FpuRegs {
    buf: FxsaveArea,
}

/// x87 control word after `fninit`: all exceptions masked, 64-bit precision.
const FCW_DEFAULT: u16 = 0x037F;
/// MXCSR power-on default: all SSE exceptions masked.
const MXCSR_DEFAULT: u32 = 0x1F80;

/// Byte offset of MXCSR within the fxsave area.
const MXCSR_OFFSET: usize = 24;

impl FpuRegs {
    /// Creates a new instance with an all-zero buffer.
    pub const fn new() -> Self {
        Self {
            buf: FxsaveArea { data: [0; 512] },
        }
    }

    /// Resets the state to the x87/SSE power-on defaults.
    ///
    /// A fiber starts from this state instead of inheriting the creator's
    /// floating-point registers.
    pub fn init(&mut self) {
        self.buf.data = [0; 512];
        self.buf.data[0..2].copy_from_slice(&FCW_DEFAULT.to_le_bytes());
        self.buf.data[MXCSR_OFFSET..MXCSR_OFFSET + 4]
            .copy_from_slice(&MXCSR_DEFAULT.to_le_bytes());
    }

    /// Fills the state from a 512-byte slice in fxsave format.
    pub fn save_from_slice(&mut self, src: &[u8]) {
        self.buf.data.copy_from_slice(src);
    }

    /// Returns the floating point state as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf.data
    }
}

impl Default for FpuRegs {
    fn default() -> Self {
        Self::new()
    }
}

#[repr(C, align(16))]
#[derive(Debug, Clone, Copy)]
struct FxsaveArea {
    data: [u8; 512], // 512 bytes
}
