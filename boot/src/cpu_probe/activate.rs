//! Feature activation, kept apart from detection.

use core::fmt;

use hwprobe_lib::cpu::control_regs::{Cr0Flags, Cr4Flags};
use hwprobe_lib::cpu::{CpuAccess, enable_sse, sse_cr0, sse_cr4};
use hwprobe_lib::klog_info;

use super::caps::CpuCaps;
use super::info::CpuInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationError {
    /// The probe did not see the capability on this CPU.
    NotDetected { feature: &'static str },
    /// A control register did not hold the value written to it.
    NotLatched {
        register: &'static str,
        expected: u64,
        actual: u64,
    },
}

impl fmt::Display for ActivationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotDetected { feature } => write!(f, "{} not detected on this CPU", feature),
            Self::NotLatched {
                register,
                expected,
                actual,
            } => write!(
                f,
                "{} reads {:#x} after writing {:#x}",
                register, actual, expected
            ),
        }
    }
}

pub type ActivationResult<T = ()> = Result<T, ActivationError>;

fn check_latched(register: &'static str, expected: u64, actual: u64) -> ActivationResult {
    if expected == actual {
        Ok(())
    } else {
        Err(ActivationError::NotLatched {
            register,
            expected,
            actual,
        })
    }
}

/// Turn SSE on, provided the probe found it.
pub fn activate_sse<A: CpuAccess + ?Sized>(cpu: &A, info: &CpuInfo) -> ActivationResult {
    if !info.has(CpuCaps::SSE2) {
        return Err(ActivationError::NotDetected { feature: "SSE2" });
    }

    let expected_cr0 = sse_cr0(cpu.read_cr0());
    let expected_cr4 = sse_cr4(cpu.read_cr4());
    enable_sse(cpu);

    let cr0 = cpu.read_cr0();
    let cr4 = cpu.read_cr4();
    check_latched("CR0", expected_cr0, cr0)?;
    check_latched("CR4", expected_cr4, cr4)?;

    klog_info!(
        "[cpu] SSE enabled: CR0={:?} CR4={:?}",
        Cr0Flags::from_bits_truncate(cr0),
        Cr4Flags::from_bits_truncate(cr4)
    );
    Ok(())
}
