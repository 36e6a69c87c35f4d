//! SSE/FPU enablement.
//!
//! Detection never calls this; turning SSE on is a separate boot step that
//! runs only after the probe has seen the feature.

use super::access::CpuAccess;
use super::control_regs::{Cr0Flags, Cr4Flags};

/// CR0 with x87 emulation off and coprocessor monitoring on.
#[inline]
pub const fn sse_cr0(cr0: u64) -> u64 {
    (cr0 & !Cr0Flags::EM.bits()) | Cr0Flags::MP.bits()
}

/// CR4 with FXSAVE/FXRSTOR and unmasked SIMD exceptions enabled.
#[inline]
pub const fn sse_cr4(cr4: u64) -> u64 {
    cr4 | Cr4Flags::OSFXSR.bits() | Cr4Flags::OSXMMEXCPT.bits()
}

/// Enable SSE instructions by configuring CR0 and CR4.
pub fn enable_sse<A: CpuAccess + ?Sized>(cpu: &A) {
    cpu.write_cr0(sse_cr0(cpu.read_cr0()));
    cpu.write_cr4(sse_cr4(cpu.read_cr4()));
}
