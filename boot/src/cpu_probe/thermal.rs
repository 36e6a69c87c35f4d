//! One-shot temperature sample from the thermal status MSR.

use hwprobe_abi::arch::{Msr, msr_combine};
use hwprobe_lib::cpu::CpuAccess;
use hwprobe_lib::klog_debug;

/// Reduce a raw thermal status reading to the coarse boot-log figure.
///
/// Integer division truncates, so anything below `256 << 16` reads as 0.
/// Virtualized CPUs return 0 from this MSR as well.
#[inline]
pub const fn temperature_from_raw(low: u32, high: u32) -> u64 {
    (msr_combine(low, high) >> 16) / 256
}

/// Sample `Msr::THERM_STATUS` and derive the temperature figure.
pub fn read_temperature<A: CpuAccess + ?Sized>(cpu: &A) -> u64 {
    let (low, high) = cpu.read_msr(Msr::THERM_STATUS);
    klog_debug!(
        "[cpuid] MSR {:#x} = {:#010x}:{:#010x}",
        Msr::THERM_STATUS.address(),
        high,
        low
    );
    temperature_from_raw(low, high)
}
