//! Feature decoder: the fixed CPUID leaf sequence.
//!
//! Leaf 1 is issued twice; nothing is assumed to survive the thermal MSR
//! read in between. No leaf is checked for support first. An unimplemented
//! leaf reads as zero and its features are reported absent.

use bitflags::Flags;

use hwprobe_abi::arch::x86_64::cpuid::*;
use hwprobe_lib::cpu::{CpuAccess, CpuidRegs};
use hwprobe_lib::{klog_debug, klog_info};

use super::caps::{BasicFeatures, ExtFeatures, PowerFeatures};
use super::config::ProbeConfig;
use super::thermal::read_temperature;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg {
    Ebx,
    Ecx,
    Edx,
}

impl Reg {
    #[inline]
    const fn pick(self, regs: &CpuidRegs) -> u32 {
        match self {
            Reg::Ebx => regs.ebx,
            Reg::Ecx => regs.ecx,
            Reg::Edx => regs.edx,
        }
    }
}

/// One decoded bit: where it lives, what it sets, what the log calls it.
#[derive(Clone, Copy, Debug)]
pub struct FeatureBit<F: 'static> {
    pub flag: F,
    pub reg: Reg,
    pub mask: u32,
    pub name: &'static str,
}

const fn bit<F>(flag: F, reg: Reg, mask: u32, name: &'static str) -> FeatureBit<F> {
    FeatureBit {
        flag,
        reg,
        mask,
        name,
    }
}

// =============================================================================
// Decode tables
// =============================================================================

pub const LEAF1_FIRST_PASS: &[FeatureBit<BasicFeatures>] = &[
    bit(BasicFeatures::FPU, Reg::Edx, CPUID_FEAT_EDX_FPU, "FPU (x87)"),
    bit(BasicFeatures::ACPI_THERMAL, Reg::Edx, CPUID_FEAT_EDX_ACPI, "thermal MSRs (ACPI)"),
];

/// Rest of the first leaf 1 pass, reported after the temperature sample.
pub const LEAF1_FIRST_PASS_SIMD: &[FeatureBit<BasicFeatures>] = &[
    bit(BasicFeatures::MMX, Reg::Edx, CPUID_FEAT_EDX_MMX, "MMX"),
    bit(BasicFeatures::SSE2, Reg::Edx, CPUID_FEAT_EDX_SSE2_PROBE, "SSE2"),
];

pub const LEAF1_SECOND_PASS: &[FeatureBit<BasicFeatures>] = &[
    bit(
        BasicFeatures::THERMAL_THROTTLE,
        Reg::Edx,
        CPUID_FEAT_EDX_TM,
        "automatic thermal throttling",
    ),
    bit(BasicFeatures::AVX, Reg::Ecx, CPUID_FEAT_ECX_AVX, "AVX"),
    bit(BasicFeatures::XSAVE, Reg::Ecx, CPUID_FEAT_ECX_XSAVE, "XSAVE"),
    bit(BasicFeatures::RDRAND, Reg::Ecx, CPUID_FEAT_ECX_RDRAND, "RDRAND"),
];

pub const EXT_INFO_BITS: &[FeatureBit<ExtFeatures>] = &[
    bit(ExtFeatures::MSR, Reg::Edx, CPUID_EXT_FEAT_EDX_MSR, "MSR registers"),
    bit(ExtFeatures::PAE, Reg::Edx, CPUID_EXT_FEAT_EDX_PAE, "physical address extension"),
    bit(ExtFeatures::MCE, Reg::Edx, CPUID_EXT_FEAT_EDX_MCE, "machine check exception (MCE)"),
    bit(ExtFeatures::APIC, Reg::Edx, CPUID_EXT_FEAT_EDX_APIC, "APIC"),
    bit(
        ExtFeatures::SYSCALL_K6,
        Reg::Edx,
        CPUID_EXT_FEAT_EDX_SYSCALL_K6,
        "SYSCALL/SYSRET (AMD K6 model 7)",
    ),
    bit(ExtFeatures::SYSCALL, Reg::Edx, CPUID_EXT_FEAT_EDX_SYSCALL, "SYSCALL/SYSRET"),
    bit(ExtFeatures::LONG_MODE, Reg::Edx, CPUID_EXT_FEAT_EDX_LM, "AMD64 long mode"),
    bit(ExtFeatures::SSE4A, Reg::Ecx, CPUID_EXT_FEAT_ECX_SSE4A, "SSE4a"),
    bit(
        ExtFeatures::MISALIGN_SSE,
        Reg::Ecx,
        CPUID_EXT_FEAT_ECX_MISALIGNSSE,
        "misaligned SSE mode",
    ),
];

pub const EXT_POWER_BITS: &[FeatureBit<PowerFeatures>] = &[
    bit(
        PowerFeatures::MCA_OVERFLOW_RECOVERY,
        Reg::Ebx,
        CPUID_POWER_EBX_MCA_OVERFLOW,
        "MCA overflow recovery",
    ),
    bit(
        PowerFeatures::SUCCOR,
        Reg::Ebx,
        CPUID_POWER_EBX_SUCCOR,
        "uncorrectable error containment and recovery",
    ),
    bit(PowerFeatures::TEMP_SENSOR, Reg::Edx, CPUID_POWER_EDX_TS, "temperature sensor"),
    bit(PowerFeatures::THERMAL_TRIP, Reg::Edx, CPUID_POWER_EDX_TTP, "thermal trip"),
    bit(
        PowerFeatures::HW_THERMAL_CONTROL,
        Reg::Edx,
        CPUID_POWER_EDX_TM,
        "hardware thermal control (HTC)",
    ),
    bit(
        PowerFeatures::SW_THERMAL_CONTROL,
        Reg::Edx,
        CPUID_POWER_EDX_STC,
        "software thermal control (STC)",
    ),
    bit(
        PowerFeatures::MULTIPLIER_STEPS_100MHZ,
        Reg::Edx,
        CPUID_POWER_EDX_100MHZ_STEPS,
        "100 MHz multiplier control",
    ),
];

// =============================================================================
// Decoding
// =============================================================================

/// Collect every table entry whose bit is set in `regs`.
pub fn decode<F: Flags + Copy>(regs: &CpuidRegs, table: &[FeatureBit<F>]) -> F {
    let mut found = F::empty();
    for entry in table {
        if entry.reg.pick(regs) & entry.mask != 0 {
            found.insert(entry.flag);
        }
    }
    found
}

fn report<F: Flags + Copy>(found: F, table: &[FeatureBit<F>]) {
    for entry in table {
        if found.contains(entry.flag) {
            klog_info!("[cpuid] {} supported", entry.name);
        }
    }
}

fn query<A: CpuAccess + ?Sized>(cpu: &A, leaf: u32) -> CpuidRegs {
    let regs = cpu.cpuid(leaf);
    klog_debug!(
        "[cpuid] leaf {:#010x}: eax={:#010x} ebx={:#010x} ecx={:#010x} edx={:#010x}",
        leaf,
        regs.eax,
        regs.ebx,
        regs.ecx,
        regs.edx
    );
    regs
}

fn decode_and_report<A, F>(cpu: &A, leaf: u32, table: &[FeatureBit<F>]) -> F
where
    A: CpuAccess + ?Sized,
    F: Flags + Copy,
{
    let found = decode(&query(cpu, leaf), table);
    report(found, table);
    found
}

/// Everything the leaf sequence found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureReport {
    pub basic: BasicFeatures,
    pub extended: ExtFeatures,
    pub power: PowerFeatures,
    /// Leaf 0x8000_0000 EAX.
    pub max_ext_leaf: u32,
    /// Leaf 0xC000_0000 EAX, when it exceeds the base leaf.
    pub centaur_max_leaf: Option<u32>,
    /// Thermal MSR sample; taken only when leaf 1 advertises the MSRs.
    pub temperature: Option<u64>,
}

pub fn detect_features<A: CpuAccess + ?Sized>(cpu: &A, config: &ProbeConfig) -> FeatureReport {
    let leaf1 = query(cpu, CPUID_LEAF_FEATURES);
    let mut basic = decode(&leaf1, LEAF1_FIRST_PASS);
    report(basic, LEAF1_FIRST_PASS);

    let mut temperature = None;
    if basic.contains(BasicFeatures::ACPI_THERMAL) && config.thermal {
        let sample = read_temperature(cpu);
        klog_info!("[cpuid] temperature: {} (always 0 under QEMU/KVM)", sample);
        temperature = Some(sample);
    }

    let simd = decode(&leaf1, LEAF1_FIRST_PASS_SIMD);
    report(simd, LEAF1_FIRST_PASS_SIMD);
    basic |= simd;

    basic |= decode_and_report(cpu, CPUID_LEAF_FEATURES, LEAF1_SECOND_PASS);

    let max_ext_leaf = query(cpu, CPUID_LEAF_EXT_MAX).eax;
    klog_info!(
        "[cpuid] max extended leaf = {:#x} ({})",
        max_ext_leaf,
        max_ext_leaf
    );

    let extended = decode_and_report(cpu, CPUID_LEAF_EXT_INFO, EXT_INFO_BITS);
    let power = decode_and_report(cpu, CPUID_LEAF_EXT_POWER, EXT_POWER_BITS);

    let centaur = query(cpu, CPUID_LEAF_CENTAUR_MAX).eax;
    let centaur_max_leaf = if centaur > CPUID_LEAF_CENTAUR_MAX {
        klog_info!("[cpuid] {:#x} [EAX] = {:#x} ({})", CPUID_LEAF_CENTAUR_MAX, centaur, centaur);
        Some(centaur)
    } else {
        None
    };

    FeatureReport {
        basic,
        extended,
        power,
        max_ext_leaf,
        centaur_max_leaf,
        temperature,
    }
}
