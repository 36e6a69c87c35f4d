#![no_std]

pub mod cpu;
pub mod klog;
pub mod ports;
pub mod string;

pub use cpu::{CpuAccess, CpuidRegs, NativeCpu};
pub use klog::{
    KlogLevel, is_enabled_level, klog_get_level, klog_init, klog_register_backend, klog_set_level,
};
pub use string::{bytes_as_str, copy_bytes};
