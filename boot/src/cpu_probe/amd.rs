//! AMD-only extended identification.

use hwprobe_abi::arch::x86_64::cpuid::{
    CPUID_LEAF_AMD_VENDOR_LABEL, CPUID_LEAF_FEATURES, CPUID_SIG_FAMILY_SHIFT, CPUID_SIG_FIELD_MASK,
    CPUID_SIG_MODEL_SHIFT,
};
use hwprobe_lib::cpu::CpuAccess;
use hwprobe_lib::klog_info;

use super::identity::VendorLabel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AmdExtendedInfo {
    /// EAX, EBX, ECX of the vendor label leaf. Informational only.
    pub label: VendorLabel,
    /// Leaf 1 EAX bits 4..=7.
    pub model: u8,
    /// Leaf 1 EAX bits 8..=11.
    pub family: u8,
}

/// Base model and family from the leaf 1 EAX signature.
///
/// Extended model/family fields are not folded in.
#[inline]
pub const fn decode_signature(eax: u32) -> (u8, u8) {
    let model = (eax >> CPUID_SIG_MODEL_SHIFT) & CPUID_SIG_FIELD_MASK;
    let family = (eax >> CPUID_SIG_FAMILY_SHIFT) & CPUID_SIG_FIELD_MASK;
    (model as u8, family as u8)
}

pub fn read_amd_info<A: CpuAccess + ?Sized>(cpu: &A) -> AmdExtendedInfo {
    let regs = cpu.cpuid(CPUID_LEAF_AMD_VENDOR_LABEL);
    let label = VendorLabel::pack(&[regs.eax, regs.ebx, regs.ecx]);

    let (model, family) = decode_signature(cpu.cpuid(CPUID_LEAF_FEATURES).eax);

    klog_info!(
        "[cpuid] AMD processor, {:#x} = [{}]",
        CPUID_LEAF_AMD_VENDOR_LABEL,
        label.as_str()
    );
    klog_info!("[cpuid] cpu_model = [{}]", model);
    klog_info!("[cpuid] cpu_family = [{}]", family);

    AmdExtendedInfo {
        label,
        model,
        family,
    }
}
