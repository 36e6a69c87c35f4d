//! Model-Specific Register (MSR) addresses.
//!
//! MSRs are accessed via RDMSR/WRMSR instructions using a 32-bit address.
//! This module provides a type-safe `Msr` newtype that prevents accidentally
//! using an MSR address where a CPUID leaf or other value is expected.

/// Model-Specific Register address.
///
/// # Example
///
/// ```ignore
/// use hwprobe_abi::arch::x86_64::Msr;
///
/// let (lo, hi) = read_msr_raw(Msr::THERM_STATUS);
/// // read_msr_raw(0x19C);  // Compile error: expected Msr, found integer
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Msr(pub u32);

impl Msr {
    /// Thermal status MSR sampled by the boot probe.
    pub const THERM_STATUS: Self = Self(0x19C);

    /// Returns the raw MSR address for use with RDMSR/WRMSR.
    #[inline]
    pub const fn address(self) -> u32 {
        self.0
    }

    /// Creates a new MSR from a raw address.
    ///
    /// Use this for MSRs not defined as constants.
    #[inline]
    pub const fn new(address: u32) -> Self {
        Self(address)
    }
}

/// Combine the EDX:EAX halves produced by RDMSR into one 64-bit value.
#[inline]
pub const fn msr_combine(low: u32, high: u32) -> u64 {
    ((high as u64) << 32) | (low as u64)
}
