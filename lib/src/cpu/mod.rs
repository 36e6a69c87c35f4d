pub mod access;
pub mod control_regs;
pub mod cpuid;
pub mod msr;
pub mod sse;

pub use access::{CpuAccess, NativeCpu};
pub use control_regs::*;
pub use cpuid::*;
pub use msr::*;
pub use sse::*;
