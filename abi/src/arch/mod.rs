//! Architecture-specific definitions.

#[cfg(target_arch = "x86_64")]
pub mod x86_64;

// Re-export x86_64 types at arch level for convenience
#[cfg(target_arch = "x86_64")]
pub use x86_64::*;
