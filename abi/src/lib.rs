//! hwprobe shared definitions.
//!
//! Register-level constants shared by the instruction wrappers in
//! `hwprobe-lib` and the decoders in `hwprobe-boot`: CPUID leaf numbers,
//! feature bit positions, vendor signature words and MSR addresses.
//! Keeping them in one crate means a bit position is written down exactly
//! once.

#![no_std]
#![forbid(unsafe_code)]

pub mod arch;
