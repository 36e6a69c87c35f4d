//! Boot-time CPU introspection.
//!
//! One run issues the CPUID leaf sequence, samples the thermal MSR when
//! leaf 1 advertises it, reports vendor and brand labels, decodes the AMD
//! extended block on AMD parts and reports the L2 cache descriptor. Every
//! finding is written to klog and returned in a [`CpuInfo`].
//!
//! Detection is read-only with respect to CPU state; enabling anything is
//! left to [`activate`].

pub mod activate;
pub mod amd;
pub mod cache;
pub mod caps;
pub mod config;
pub mod features;
pub mod identity;
pub mod info;
pub mod thermal;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use activate::{ActivationError, ActivationResult, activate_sse};
pub use amd::AmdExtendedInfo;
pub use cache::CacheDescriptor;
pub use caps::{BasicFeatures, CpuCaps, ExtFeatures, FeatureState, PowerFeatures};
pub use config::ProbeConfig;
pub use features::FeatureReport;
pub use identity::{BrandLabel, CpuIdentity, IdentityLabel, VendorLabel};
pub use info::CpuInfo;

use hwprobe_lib::cpu::CpuAccess;
use spin::Once;

/// Run the full probe once against `cpu`.
///
/// Leaf order is fixed: features, then identity, then the cache leaf.
/// Running it again on the same CPU yields an equal record.
pub fn probe<A: CpuAccess + ?Sized>(cpu: &A, config: &ProbeConfig) -> CpuInfo {
    let features = features::detect_features(cpu, config);
    let identity = identity::report_identity(cpu, config);
    let l2_cache = cache::report_l2_cache(cpu);

    CpuInfo {
        caps: CpuCaps::from_basic(features.basic),
        features,
        identity,
        l2_cache,
    }
}

/// Boot processor record. Other cores probe into their own `CpuInfo`.
static BOOT_CPU: Once<CpuInfo> = Once::new();

/// Probe the boot processor and publish the result.
///
/// Only the first call probes; later calls return the published record
/// without touching the CPU.
pub fn cpu_probe_init<A: CpuAccess + ?Sized>(cpu: &A, config: &ProbeConfig) -> &'static CpuInfo {
    BOOT_CPU.call_once(|| probe(cpu, config))
}

pub fn boot_cpu_info() -> Option<&'static CpuInfo> {
    BOOT_CPU.get()
}

/// Whether the boot processor has every capability in `caps`.
///
/// False until [`cpu_probe_init`] has run.
pub fn boot_cpu_has(caps: CpuCaps) -> bool {
    boot_cpu_info().is_some_and(|info| info.has(caps))
}
