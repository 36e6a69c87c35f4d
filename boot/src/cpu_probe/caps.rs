//! Capability flag sets produced by the probe.

use bitflags::bitflags;

bitflags! {
    /// Capabilities the rest of the kernel may gate on.
    ///
    /// Written once by the boot probe and read-only afterwards.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CpuCaps: u32 {
        /// Thermal monitor / clock-control MSRs (leaf 1 EDX bit 22).
        const THERMAL_MSR = 1 << 0;
        const MMX = 1 << 1;
        const SSE2 = 1 << 2;
        const AVX = 1 << 3;
        const RDRAND = 1 << 4;
    }
}

bitflags! {
    /// Everything decoded from the two leaf 1 passes.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct BasicFeatures: u32 {
        const FPU = 1 << 0;
        const ACPI_THERMAL = 1 << 1;
        const MMX = 1 << 2;
        const SSE2 = 1 << 3;
        const THERMAL_THROTTLE = 1 << 4;
        const AVX = 1 << 5;
        const XSAVE = 1 << 6;
        const RDRAND = 1 << 7;
    }
}

bitflags! {
    /// Leaf 0x8000_0001 findings.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ExtFeatures: u32 {
        const MSR = 1 << 0;
        const PAE = 1 << 1;
        const MCE = 1 << 2;
        const APIC = 1 << 3;
        const SYSCALL_K6 = 1 << 4;
        const SYSCALL = 1 << 5;
        const LONG_MODE = 1 << 6;
        const SSE4A = 1 << 7;
        const MISALIGN_SSE = 1 << 8;
    }
}

bitflags! {
    /// Leaf 0x8000_0007 findings.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PowerFeatures: u32 {
        const MCA_OVERFLOW_RECOVERY = 1 << 0;
        const SUCCOR = 1 << 1;
        const TEMP_SENSOR = 1 << 2;
        const THERMAL_TRIP = 1 << 3;
        const HW_THERMAL_CONTROL = 1 << 4;
        const SW_THERMAL_CONTROL = 1 << 5;
        const MULTIPLIER_STEPS_100MHZ = 1 << 6;
    }
}

impl CpuCaps {
    /// Project the leaf 1 findings onto the gating subset.
    pub const fn from_basic(basic: BasicFeatures) -> Self {
        let mut caps = Self::empty();
        if basic.contains(BasicFeatures::ACPI_THERMAL) {
            caps = caps.union(Self::THERMAL_MSR);
        }
        if basic.contains(BasicFeatures::MMX) {
            caps = caps.union(Self::MMX);
        }
        if basic.contains(BasicFeatures::SSE2) {
            caps = caps.union(Self::SSE2);
        }
        if basic.contains(BasicFeatures::AVX) {
            caps = caps.union(Self::AVX);
        }
        if basic.contains(BasicFeatures::RDRAND) {
            caps = caps.union(Self::RDRAND);
        }
        caps
    }
}

/// Tri-state answer for gating decisions.
///
/// A feature bit reads as zero both when the CPU lacks the feature and when
/// the leaf carrying it is not implemented. `Unknown` separates the second
/// case out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureState {
    Present,
    Absent,
    Unknown,
}

impl FeatureState {
    pub const fn from_parts(leaf_supported: bool, present: bool) -> Self {
        match (leaf_supported, present) {
            (false, _) => FeatureState::Unknown,
            (true, true) => FeatureState::Present,
            (true, false) => FeatureState::Absent,
        }
    }

    pub const fn is_present(self) -> bool {
        matches!(self, FeatureState::Present)
    }
}
