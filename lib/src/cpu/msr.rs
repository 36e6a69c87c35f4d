//! Model-Specific Register (MSR) read/write instructions.
//!
//! The `Msr` address type is defined in `hwprobe_abi::arch::msr`.
//! This module provides the RDMSR/WRMSR instruction wrappers. Both are
//! privileged; executing them outside ring 0 faults.

use core::arch::asm;

use hwprobe_abi::arch::Msr;

/// Read an MSR and return its (EAX, EDX) halves as the CPU produced them.
#[inline(always)]
pub fn read_msr_raw(msr: Msr) -> (u32, u32) {
    let low: u32;
    let high: u32;
    unsafe {
        asm!(
            "rdmsr",
            out("eax") low,
            out("edx") high,
            in("ecx") msr.address(),
            options(nomem, nostack, preserves_flags)
        );
    }
    (low, high)
}

/// Write the (EAX, EDX) halves to an MSR.
#[inline(always)]
pub fn write_msr_raw(msr: Msr, low: u32, high: u32) {
    unsafe {
        asm!(
            "wrmsr",
            in("eax") low,
            in("edx") high,
            in("ecx") msr.address(),
            options(nomem, nostack, preserves_flags)
        );
    }
}
