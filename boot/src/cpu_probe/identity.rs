//! Manufacturer and brand labels.
//!
//! Labels are raw register bytes laid end to end: registers in the order
//! given, each register's bytes little-endian. The terminator slot is
//! always written, so a label is NUL-terminated even when none of the
//! registers contains a zero byte.

use core::fmt;

use hwprobe_abi::arch::x86_64::cpuid::{
    CPUID_LEAF_BRAND_0, CPUID_LEAF_BRAND_1, CPUID_LEAF_BRAND_2, CPUID_LEAF_EXT_MAX,
    CPUID_LEAF_VENDOR, CPUID_VENDOR_AMD_EBX,
};
use hwprobe_lib::cpu::CpuAccess;
use hwprobe_lib::{bytes_as_str, copy_bytes, klog_info};

use super::amd::{AmdExtendedInfo, read_amd_info};
use super::config::ProbeConfig;

/// Fixed-length label of `N - 1` payload bytes plus a NUL terminator.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct IdentityLabel<const N: usize> {
    bytes: [u8; N],
}

/// 12-byte manufacturer / vendor label.
pub type VendorLabel = IdentityLabel<13>;

/// 48-byte processor brand label.
pub type BrandLabel = IdentityLabel<49>;

impl<const N: usize> IdentityLabel<N> {
    pub const PAYLOAD_LEN: usize = N - 1;

    /// Pack register words into a label.
    ///
    /// Words beyond the payload are ignored; a short word list leaves the
    /// remaining payload zeroed.
    pub fn pack(words: &[u32]) -> Self {
        let mut bytes = [0u8; N];
        let mut offset = 0;
        for word in words {
            if offset >= Self::PAYLOAD_LEN {
                break;
            }
            offset += copy_bytes(
                &mut bytes[offset..Self::PAYLOAD_LEN],
                &word.to_le_bytes(),
                4,
            );
        }
        bytes[Self::PAYLOAD_LEN] = 0;
        Self { bytes }
    }

    /// The full buffer, terminator included.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// Text up to the first NUL.
    #[inline]
    pub fn as_str(&self) -> &str {
        bytes_as_str(&self.bytes)
    }

    /// The first packed register word.
    #[inline]
    pub fn first_unit(&self) -> u32 {
        u32::from_le_bytes([self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]])
    }
}

impl<const N: usize> fmt::Debug for IdentityLabel<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl<const N: usize> fmt::Display for IdentityLabel<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().trim())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuIdentity {
    pub max_basic_leaf: u32,
    pub vendor: VendorLabel,
    pub brand: Option<BrandLabel>,
    pub amd: Option<AmdExtendedInfo>,
}

impl CpuIdentity {
    pub fn is_amd(&self) -> bool {
        self.vendor.first_unit() == CPUID_VENDOR_AMD_EBX
    }
}

/// Leaf 0: maximum basic leaf and the EBX, EDX, ECX signature.
pub fn read_vendor<A: CpuAccess + ?Sized>(cpu: &A) -> (u32, VendorLabel) {
    let regs = cpu.cpuid(CPUID_LEAF_VENDOR);
    (regs.eax, VendorLabel::pack(&[regs.ebx, regs.edx, regs.ecx]))
}

/// Leaves 0x8000_0002..=0x8000_0004, only when 0x8000_0000 says they exist.
pub fn read_brand<A: CpuAccess + ?Sized>(cpu: &A) -> Option<BrandLabel> {
    if cpu.cpuid(CPUID_LEAF_EXT_MAX).eax < CPUID_LEAF_BRAND_2 {
        return None;
    }

    let mut words = [0u32; 12];
    for (i, leaf) in [CPUID_LEAF_BRAND_0, CPUID_LEAF_BRAND_1, CPUID_LEAF_BRAND_2]
        .into_iter()
        .enumerate()
    {
        let regs = cpu.cpuid(leaf);
        words[i * 4..i * 4 + 4].copy_from_slice(&[regs.eax, regs.ebx, regs.ecx, regs.edx]);
    }
    Some(BrandLabel::pack(&words))
}

/// Manufacturer, brand and (AMD only) the vendor extended block.
pub fn report_identity<A: CpuAccess + ?Sized>(cpu: &A, config: &ProbeConfig) -> CpuIdentity {
    let (max_basic_leaf, vendor) = read_vendor(cpu);
    klog_info!("[cpuid] manufacturer [{}]", vendor.as_str());

    let brand = read_brand(cpu);
    if let Some(brand) = &brand {
        klog_info!("[cpuid] 0x80000002:0x80000004 [{}]", brand.as_str());
    }

    let mut identity = CpuIdentity {
        max_basic_leaf,
        vendor,
        brand,
        amd: None,
    };
    if identity.is_amd() && config.vendor_ext {
        identity.amd = Some(read_amd_info(cpu));
    }
    identity
}
