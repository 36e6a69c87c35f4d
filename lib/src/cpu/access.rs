//! The seam between the CPU probe and the hardware.
//!
//! Everything above this trait decodes plain integers, so it can be driven
//! by scripted register values in tests. [`NativeCpu`] is the only
//! implementation that touches the processor.

use hwprobe_abi::arch::Msr;

use super::control_regs::{read_cr0, read_cr4, write_cr0, write_cr4};
use super::cpuid::{CpuidRegs, cpuid};
use super::msr::{read_msr_raw, write_msr_raw};

/// Raw instruction accessors: CPUID, RDMSR/WRMSR and CR0/CR4 moves.
///
/// Implementations return exactly what the hardware produced. No retries,
/// no leaf validation; callers decide whether a leaf is meaningful.
pub trait CpuAccess {
    fn cpuid(&self, leaf: u32) -> CpuidRegs;

    /// Returns `(low, high)`, i.e. (EAX, EDX).
    fn read_msr(&self, msr: Msr) -> (u32, u32);

    fn write_msr(&self, msr: Msr, low: u32, high: u32);

    fn read_cr0(&self) -> u64;

    fn write_cr0(&self, value: u64);

    fn read_cr4(&self) -> u64;

    fn write_cr4(&self, value: u64);
}

/// The processor this code is running on.
///
/// MSR and control-register methods are privileged and fault outside a
/// kernel context.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeCpu;

impl CpuAccess for NativeCpu {
    #[inline]
    fn cpuid(&self, leaf: u32) -> CpuidRegs {
        cpuid(leaf)
    }

    #[inline]
    fn read_msr(&self, msr: Msr) -> (u32, u32) {
        read_msr_raw(msr)
    }

    #[inline]
    fn write_msr(&self, msr: Msr, low: u32, high: u32) {
        write_msr_raw(msr, low, high)
    }

    #[inline]
    fn read_cr0(&self) -> u64 {
        read_cr0()
    }

    #[inline]
    fn write_cr0(&self, value: u64) {
        write_cr0(value)
    }

    #[inline]
    fn read_cr4(&self) -> u64 {
        read_cr4()
    }

    #[inline]
    fn write_cr4(&self, value: u64) {
        write_cr4(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // CPUID is unprivileged, so the native accessor can run on the host.
    #[test]
    fn native_cpuid_is_repeatable() {
        let cpu = NativeCpu;
        assert_eq!(cpu.cpuid(0), cpu.cpuid(0));
        assert!(cpu.cpuid(0).eax >= 1);
    }
}
