#![no_std]

#[cfg(test)]
extern crate std;

pub mod cpu_probe;
pub mod early_init;

pub use cpu_probe::{
    ActivationError, CpuCaps, CpuInfo, FeatureState, ProbeConfig, boot_cpu_has, boot_cpu_info,
    cpu_probe_init, probe,
};
pub use early_init::boot_cpu_init;
