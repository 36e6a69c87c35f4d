//! CPUID instruction wrapper.
//!
//! Leaf numbers and feature bits live in `hwprobe_abi::arch::x86_64::cpuid`;
//! this module only issues the instruction and hands back the four output
//! registers untouched. No leaf is validated here: asking for a leaf the CPU
//! does not implement returns whatever the CPU returns (commonly zeros, or
//! the highest basic leaf's data on Intel).

/// The four output registers of one CPUID invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CpuidRegs {
    pub eax: u32,
    pub ebx: u32,
    pub ecx: u32,
    pub edx: u32,
}

impl CpuidRegs {
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    #[inline]
    pub const fn new(eax: u32, ebx: u32, ecx: u32, edx: u32) -> Self {
        Self { eax, ebx, ecx, edx }
    }
}

/// Execute CPUID with the given leaf (subleaf defaults to 0).
#[inline(always)]
#[allow(unused_unsafe)]
pub fn cpuid(leaf: u32) -> CpuidRegs {
    let res = unsafe { core::arch::x86_64::__cpuid(leaf) };
    CpuidRegs::new(res.eax, res.ebx, res.ecx, res.edx)
}
