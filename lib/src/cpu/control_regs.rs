//! Control register access (CR0, CR4) with type-safe bitflags.
//!
//! Both registers are privileged; reading or writing them outside ring 0
//! raises #GP.

use bitflags::bitflags;
use core::arch::asm;

// =============================================================================
// CR0
// =============================================================================

bitflags! {
    /// Flags for the CR0 control register.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Cr0Flags: u64 {
        /// Protected Mode Enable.
        const PE = 1 << 0;
        /// Monitor Coprocessor.
        const MP = 1 << 1;
        /// Emulate Coprocessor (force x87 #NM).
        const EM = 1 << 2;
        /// Task Switched (set by hardware on task switch).
        const TS = 1 << 3;
        /// Extension Type (hardwired to 1 on modern CPUs).
        const ET = 1 << 4;
        /// Numeric Error (enable native x87 FPU error reporting).
        const NE = 1 << 5;
        /// Write Protect (prevent supervisor writes to read-only pages).
        const WP = 1 << 16;
        /// Alignment Mask (enable alignment checking in ring 3).
        const AM = 1 << 18;
        /// Not Write-through (disables write-through for the entire cache).
        const NW = 1 << 29;
        /// Cache Disable.
        const CD = 1 << 30;
        /// Paging Enable.
        const PG = 1 << 31;
    }
}

#[inline(always)]
pub fn read_cr0() -> u64 {
    let value: u64;
    unsafe {
        asm!("mov {}, cr0", out(reg) value, options(nomem, nostack, preserves_flags));
    }
    value
}

#[inline(always)]
pub fn write_cr0(value: u64) {
    unsafe {
        asm!("mov cr0, {}", in(reg) value, options(nostack, preserves_flags));
    }
}

// =============================================================================
// CR4
// =============================================================================

bitflags! {
    /// Flags for the CR4 control register.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Cr4Flags: u64 {
        /// Virtual-8086 Mode Extensions.
        const VME = 1 << 0;
        /// Protected-Mode Virtual Interrupts.
        const PVI = 1 << 1;
        /// Time Stamp Disable (restrict RDTSC to ring 0).
        const TSD = 1 << 2;
        /// Debugging Extensions.
        const DE = 1 << 3;
        /// Page Size Extensions (enable 4 MiB pages).
        const PSE = 1 << 4;
        /// Physical Address Extension.
        const PAE = 1 << 5;
        /// Machine Check Enable.
        const MCE = 1 << 6;
        /// Page Global Enable.
        const PGE = 1 << 7;
        /// Performance-Monitoring Counter Enable.
        const PCE = 1 << 8;
        /// OS support for FXSAVE/FXRSTOR.
        const OSFXSR = 1 << 9;
        /// OS support for unmasked SIMD floating-point exceptions.
        const OSXMMEXCPT = 1 << 10;
        /// XSAVE and Processor Extended States Enable.
        const OSXSAVE = 1 << 18;
    }
}

#[inline(always)]
pub fn read_cr4() -> u64 {
    let value: u64;
    unsafe {
        asm!("mov {}, cr4", out(reg) value, options(nomem, nostack, preserves_flags));
    }
    value
}

#[inline(always)]
pub fn write_cr4(value: u64) {
    unsafe {
        asm!("mov cr4, {}", in(reg) value, options(nostack, preserves_flags));
    }
}

pub const CR0_MP: u64 = Cr0Flags::MP.bits();
pub const CR0_EM: u64 = Cr0Flags::EM.bits();

pub const CR4_OSFXSR: u64 = Cr4Flags::OSFXSR.bits();
pub const CR4_OSXMMEXCPT: u64 = Cr4Flags::OSXMMEXCPT.bits();
