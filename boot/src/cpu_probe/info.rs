//! The record a probe run returns.

use hwprobe_abi::arch::x86_64::cpuid::{
    CPUID_LEAF_CENTAUR_MAX, CPUID_LEAF_EXT_INFO, CPUID_LEAF_EXT_MAX, CPUID_LEAF_EXT_POWER,
    CPUID_LEAF_FEATURES,
};

use super::cache::CacheDescriptor;
use super::caps::{BasicFeatures, CpuCaps, ExtFeatures, FeatureState, PowerFeatures};
use super::features::FeatureReport;
use super::identity::CpuIdentity;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuInfo {
    pub caps: CpuCaps,
    pub features: FeatureReport,
    pub identity: CpuIdentity,
    pub l2_cache: CacheDescriptor,
}

impl CpuInfo {
    #[inline]
    pub fn has(&self, caps: CpuCaps) -> bool {
        self.caps.contains(caps)
    }

    /// Whether `leaf` is within the range the CPU reported during the run.
    ///
    /// Basic leaves are bounded by leaf 0 EAX, extended leaves by
    /// 0x8000_0000 EAX, the 0xC000_0000 range by its own base leaf.
    pub fn leaf_supported(&self, leaf: u32) -> bool {
        match leaf {
            0..CPUID_LEAF_EXT_MAX => leaf <= self.identity.max_basic_leaf,
            CPUID_LEAF_EXT_MAX..=0x8FFF_FFFF => {
                self.features.max_ext_leaf >= CPUID_LEAF_EXT_MAX
                    && leaf <= self.features.max_ext_leaf
            }
            CPUID_LEAF_CENTAUR_MAX..=0xCFFF_FFFF => self
                .features
                .centaur_max_leaf
                .is_some_and(|max| leaf <= max),
            _ => false,
        }
    }

    pub fn basic_feature(&self, feature: BasicFeatures) -> FeatureState {
        FeatureState::from_parts(
            self.leaf_supported(CPUID_LEAF_FEATURES),
            self.features.basic.contains(feature),
        )
    }

    pub fn ext_feature(&self, feature: ExtFeatures) -> FeatureState {
        FeatureState::from_parts(
            self.leaf_supported(CPUID_LEAF_EXT_INFO),
            self.features.extended.contains(feature),
        )
    }

    pub fn power_feature(&self, feature: PowerFeatures) -> FeatureState {
        FeatureState::from_parts(
            self.leaf_supported(CPUID_LEAF_EXT_POWER),
            self.features.power.contains(feature),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_probe::config::ProbeConfig;
    use crate::cpu_probe::probe;
    use crate::cpu_probe::test_fixtures::{FakeCpu, vendor_regs};
    use hwprobe_abi::arch::x86_64::cpuid::CPUID_LEAF_VENDOR;
    use hwprobe_lib::CpuidRegs;

    fn info_for(cpu: &FakeCpu) -> CpuInfo {
        probe(cpu, &ProbeConfig::default())
    }

    #[test]
    fn leaf_ranges() {
        let cpu = FakeCpu::new()
            .with_leaf(CPUID_LEAF_VENDOR, vendor_regs(b"GenuineIntel", 0x0D))
            .with_leaf(CPUID_LEAF_EXT_MAX, CpuidRegs::new(0x8000_0008, 0, 0, 0));
        let info = info_for(&cpu);
        assert!(info.leaf_supported(0));
        assert!(info.leaf_supported(0x0D));
        assert!(!info.leaf_supported(0x0E));
        assert!(info.leaf_supported(0x8000_0007));
        assert!(info.leaf_supported(0x8000_0008));
        assert!(!info.leaf_supported(0x8000_0009));
        assert!(!info.leaf_supported(0x8FFF_FFFF));
        assert!(!info.leaf_supported(0xC000_0000));
        assert!(!info.leaf_supported(0x4000_0000));
    }

    #[test]
    fn garbage_ext_max_supports_nothing() {
        // Some CPUs echo basic-leaf data for unknown leaves.
        let cpu = FakeCpu::new().with_leaf(CPUID_LEAF_EXT_MAX, CpuidRegs::new(0x0D, 0, 0, 0));
        let info = info_for(&cpu);
        assert!(!info.leaf_supported(CPUID_LEAF_EXT_MAX));
        assert!(!info.leaf_supported(CPUID_LEAF_EXT_INFO));
    }

    #[test]
    fn centaur_range() {
        let cpu = FakeCpu::new()
            .with_leaf(CPUID_LEAF_CENTAUR_MAX, CpuidRegs::new(0xC000_0001, 0, 0, 0));
        let info = info_for(&cpu);
        assert!(info.leaf_supported(0xC000_0001));
        assert!(!info.leaf_supported(0xC000_0002));
    }

    #[test]
    fn absent_versus_unknown() {
        // Extended leaves stop at 0x8000_0001, so 0x8000_0007 is unknown.
        let cpu = FakeCpu::new()
            .with_leaf(CPUID_LEAF_VENDOR, vendor_regs(b"GenuineIntel", 1))
            .with_leaf(CPUID_LEAF_FEATURES, CpuidRegs::new(0, 0, 1 << 28, 0))
            .with_leaf(CPUID_LEAF_EXT_MAX, CpuidRegs::new(0x8000_0001, 0, 0, 0))
            .with_leaf(CPUID_LEAF_EXT_INFO, CpuidRegs::new(0, 0, 0, 1 << 29));
        let info = info_for(&cpu);
        assert_eq!(info.basic_feature(BasicFeatures::AVX), FeatureState::Present);
        assert_eq!(info.basic_feature(BasicFeatures::RDRAND), FeatureState::Absent);
        assert_eq!(info.ext_feature(ExtFeatures::LONG_MODE), FeatureState::Present);
        assert_eq!(info.ext_feature(ExtFeatures::SSE4A), FeatureState::Absent);
        assert_eq!(
            info.power_feature(PowerFeatures::TEMP_SENSOR),
            FeatureState::Unknown
        );
        assert!(info.has(CpuCaps::AVX));
        assert!(!info.has(CpuCaps::AVX | CpuCaps::RDRAND));
    }

    #[test]
    fn max_basic_leaf_zero_makes_leaf1_unknown() {
        let cpu = FakeCpu::new().with_leaf(CPUID_LEAF_FEATURES, CpuidRegs::new(0, 0, 0, 1));
        let info = info_for(&cpu);
        assert!(info.features.basic.contains(BasicFeatures::FPU));
        assert_eq!(info.basic_feature(BasicFeatures::FPU), FeatureState::Unknown);
    }
}
