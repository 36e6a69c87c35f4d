//! CPUID leaf numbers, feature bit masks and vendor signatures.
//!
//! Constants only. The instruction wrapper lives in `hwprobe_lib::cpu::cpuid`
//! and the decoding in `hwprobe_boot::cpu_probe`.

// =============================================================================
// CPUID Leaf Numbers
// =============================================================================

/// Maximum basic leaf (EAX) and manufacturer signature (EBX, EDX, ECX).
pub const CPUID_LEAF_VENDOR: u32 = 0x00;

/// Basic CPU information and feature flags.
pub const CPUID_LEAF_FEATURES: u32 = 0x01;

/// Maximum supported extended leaf.
pub const CPUID_LEAF_EXT_MAX: u32 = 0x8000_0000;

/// Extended function information.
pub const CPUID_LEAF_EXT_INFO: u32 = 0x8000_0001;

/// Processor brand string, bytes 0..16.
pub const CPUID_LEAF_BRAND_0: u32 = 0x8000_0002;

/// Processor brand string, bytes 16..32.
pub const CPUID_LEAF_BRAND_1: u32 = 0x8000_0003;

/// Processor brand string, bytes 32..48.
pub const CPUID_LEAF_BRAND_2: u32 = 0x8000_0004;

/// L2 cache and TLB descriptors.
pub const CPUID_LEAF_L2_CACHE: u32 = 0x8000_0006;

/// Advanced power management (RAS and thermal capabilities).
pub const CPUID_LEAF_EXT_POWER: u32 = 0x8000_0007;

/// Base of the 0xC000_0000 vendor range (Centaur/VIA); EAX is the range maximum.
pub const CPUID_LEAF_CENTAUR_MAX: u32 = 0xC000_0000;

/// AMD vendor label leaf.
///
/// Not an architecturally documented leaf. Treat whatever it returns as
/// informational only.
pub const CPUID_LEAF_AMD_VENDOR_LABEL: u32 = 0x8FFF_FFFF;

// =============================================================================
// CPUID Leaf 1 - EAX Signature Fields
// =============================================================================

pub const CPUID_SIG_MODEL_SHIFT: u32 = 4;
pub const CPUID_SIG_FAMILY_SHIFT: u32 = 8;
pub const CPUID_SIG_FIELD_MASK: u32 = 0x0F;

// =============================================================================
// CPUID Leaf 1 - EDX Feature Flags
// =============================================================================

/// Floating Point Unit on-chip.
pub const CPUID_FEAT_EDX_FPU: u32 = 1 << 0;

/// Thermal monitor and software-controlled clock MSRs (ACPI).
pub const CPUID_FEAT_EDX_ACPI: u32 = 1 << 22;

/// MMX technology.
pub const CPUID_FEAT_EDX_MMX: u32 = 1 << 23;

/// Bit reported under the SSE2 name by the boot probe.
pub const CPUID_FEAT_EDX_SSE2_PROBE: u32 = 1 << 25;

/// Automatic thermal throttling (TM).
pub const CPUID_FEAT_EDX_TM: u32 = 1 << 29;

// =============================================================================
// CPUID Leaf 1 - ECX Feature Flags
// =============================================================================

/// XSAVE/XRSTOR instructions.
pub const CPUID_FEAT_ECX_XSAVE: u32 = 1 << 26;

/// AVX extensions.
pub const CPUID_FEAT_ECX_AVX: u32 = 1 << 28;

/// RDRAND instruction.
pub const CPUID_FEAT_ECX_RDRAND: u32 = 1 << 30;

// =============================================================================
// CPUID Extended Leaf 0x80000001 - EDX Flags
// =============================================================================

/// Model Specific Registers.
pub const CPUID_EXT_FEAT_EDX_MSR: u32 = 1 << 5;

/// Physical Address Extension.
pub const CPUID_EXT_FEAT_EDX_PAE: u32 = 1 << 6;

/// Machine Check Exception.
pub const CPUID_EXT_FEAT_EDX_MCE: u32 = 1 << 7;

/// On-chip APIC.
pub const CPUID_EXT_FEAT_EDX_APIC: u32 = 1 << 9;

/// SYSCALL/SYSRET as implemented by AMD K6 (family 5, model 7).
pub const CPUID_EXT_FEAT_EDX_SYSCALL_K6: u32 = 1 << 10;

/// SYSCALL/SYSRET instructions.
pub const CPUID_EXT_FEAT_EDX_SYSCALL: u32 = 1 << 11;

/// Long mode (64-bit).
pub const CPUID_EXT_FEAT_EDX_LM: u32 = 1 << 29;

// =============================================================================
// CPUID Extended Leaf 0x80000001 - ECX Flags
// =============================================================================

/// SSE4a (AMD).
pub const CPUID_EXT_FEAT_ECX_SSE4A: u32 = 1 << 6;

/// Misaligned SSE mode.
pub const CPUID_EXT_FEAT_ECX_MISALIGNSSE: u32 = 1 << 7;

// =============================================================================
// CPUID Extended Leaf 0x80000007 - EBX / EDX Flags
// =============================================================================

/// MCA overflow recovery.
pub const CPUID_POWER_EBX_MCA_OVERFLOW: u32 = 1 << 0;

/// Software uncorrectable error containment and recovery (SUCCOR).
pub const CPUID_POWER_EBX_SUCCOR: u32 = 1 << 1;

/// Temperature sensor.
pub const CPUID_POWER_EDX_TS: u32 = 1 << 0;

/// Thermal trip.
pub const CPUID_POWER_EDX_TTP: u32 = 1 << 3;

/// Hardware thermal control (HTC).
pub const CPUID_POWER_EDX_TM: u32 = 1 << 4;

/// Software thermal control (STC).
pub const CPUID_POWER_EDX_STC: u32 = 1 << 5;

/// 100 MHz multiplier steps.
pub const CPUID_POWER_EDX_100MHZ_STEPS: u32 = 1 << 6;

// =============================================================================
// CPUID Extended Leaf 0x80000006 - ECX L2 Descriptor Fields
// =============================================================================

pub const CPUID_L2_LINE_SIZE_MASK: u32 = 0xFF;
pub const CPUID_L2_ASSOC_SHIFT: u32 = 12;
pub const CPUID_L2_ASSOC_MASK: u32 = 0x07;
pub const CPUID_L2_SIZE_SHIFT: u32 = 16;
pub const CPUID_L2_SIZE_MASK: u32 = 0xFFFF;

// =============================================================================
// Manufacturer Signatures (leaf 0, EBX word)
// =============================================================================

/// "Auth" of "AuthenticAMD".
pub const CPUID_VENDOR_AMD_EBX: u32 = 0x6874_7541;

/// "Genu" of "GenuineIntel".
pub const CPUID_VENDOR_INTEL_EBX: u32 = 0x756E_6547;
