//! L2 cache descriptor (leaf 0x8000_0006 ECX).

use hwprobe_abi::arch::x86_64::cpuid::{
    CPUID_L2_ASSOC_MASK, CPUID_L2_ASSOC_SHIFT, CPUID_L2_LINE_SIZE_MASK, CPUID_L2_SIZE_MASK,
    CPUID_L2_SIZE_SHIFT, CPUID_LEAF_L2_CACHE,
};
use hwprobe_lib::cpu::CpuAccess;
use hwprobe_lib::klog_info;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheDescriptor {
    /// Bytes per line (bits 0..=7).
    pub line_size: u8,
    /// Associativity class code (bits 12..=14).
    pub associativity: u8,
    /// Size in KiB (bits 16..=31).
    pub size_kb: u16,
}

impl CacheDescriptor {
    pub const fn from_ecx(ecx: u32) -> Self {
        Self {
            line_size: (ecx & CPUID_L2_LINE_SIZE_MASK) as u8,
            associativity: ((ecx >> CPUID_L2_ASSOC_SHIFT) & CPUID_L2_ASSOC_MASK) as u8,
            size_kb: ((ecx >> CPUID_L2_SIZE_SHIFT) & CPUID_L2_SIZE_MASK) as u16,
        }
    }
}

/// Issued unconditionally; an unimplemented leaf decodes as all zeros.
pub fn report_l2_cache<A: CpuAccess + ?Sized>(cpu: &A) -> CacheDescriptor {
    let l2 = CacheDescriptor::from_ecx(cpu.cpuid(CPUID_LEAF_L2_CACHE).ecx);
    klog_info!(
        "[cpuid] L2 line size: {} B, associativity: {}, size: {} KB",
        l2.line_size,
        l2.associativity,
        l2.size_kb
    );
    l2
}
