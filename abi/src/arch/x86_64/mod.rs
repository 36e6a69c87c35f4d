pub mod cpuid;
pub mod msr;

pub use msr::{Msr, msr_combine};
