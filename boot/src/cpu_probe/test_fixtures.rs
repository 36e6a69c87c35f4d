//! Scripted CPU for host-side probe tests.

use core::cell::{Cell, RefCell};
use core::fmt;

use std::collections::BTreeMap;
use std::string::{String, ToString};
use std::vec::Vec;

use hwprobe_abi::arch::Msr;
use hwprobe_abi::arch::x86_64::cpuid::{CPUID_LEAF_BRAND_0, CPUID_LEAF_BRAND_1, CPUID_LEAF_BRAND_2};
use hwprobe_lib::{CpuAccess, CpuidRegs, klog_register_backend};

std::thread_local! {
    static LOG_LINES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

// Each test runs on its own thread, so lines never mix between tests.
fn capture(args: fmt::Arguments<'_>) {
    LOG_LINES.with(|lines| lines.borrow_mut().push(args.to_string()));
}

/// Drain the klog lines this thread has emitted since the last `FakeCpu::new`.
pub fn take_log() -> Vec<String> {
    LOG_LINES.with(|lines| lines.take())
}

struct Script {
    answers: Vec<CpuidRegs>,
    next: usize,
}

/// Answers CPUID from a table and records every access.
///
/// Unscripted leaves and MSRs read as zero. A leaf given a sequence
/// answers each entry in turn and then keeps repeating the last one.
pub struct FakeCpu {
    leaves: RefCell<BTreeMap<u32, Script>>,
    msrs: BTreeMap<u32, (u32, u32)>,
    issued: RefCell<Vec<u32>>,
    msr_reads: RefCell<Vec<Msr>>,
    msr_writes: RefCell<Vec<(Msr, u32, u32)>>,
    cr0: Cell<u64>,
    cr4: Cell<u64>,
    frozen: bool,
}

impl FakeCpu {
    pub fn new() -> Self {
        // Keep log output off the host's I/O ports.
        klog_register_backend(capture);
        LOG_LINES.with(|lines| lines.borrow_mut().clear());
        Self {
            leaves: RefCell::new(BTreeMap::new()),
            msrs: BTreeMap::new(),
            issued: RefCell::new(Vec::new()),
            msr_reads: RefCell::new(Vec::new()),
            msr_writes: RefCell::new(Vec::new()),
            cr0: Cell::new(0),
            cr4: Cell::new(0),
            frozen: false,
        }
    }

    pub fn with_leaf(self, leaf: u32, regs: CpuidRegs) -> Self {
        self.with_leaf_sequence(leaf, &[regs])
    }

    pub fn with_leaf_sequence(self, leaf: u32, answers: &[CpuidRegs]) -> Self {
        self.leaves.borrow_mut().insert(
            leaf,
            Script {
                answers: answers.to_vec(),
                next: 0,
            },
        );
        self
    }

    pub fn with_brand(self, text: &[u8; 48]) -> Self {
        let [first, second, third] = brand_regs(text);
        self.with_leaf(CPUID_LEAF_BRAND_0, first)
            .with_leaf(CPUID_LEAF_BRAND_1, second)
            .with_leaf(CPUID_LEAF_BRAND_2, third)
    }

    pub fn with_msr(mut self, msr: Msr, low: u32, high: u32) -> Self {
        self.msrs.insert(msr.address(), (low, high));
        self
    }

    pub fn with_control_regs(self, cr0: u64, cr4: u64) -> Self {
        self.cr0.set(cr0);
        self.cr4.set(cr4);
        self
    }

    /// Control register writes are accepted and dropped.
    pub fn with_frozen_control_regs(mut self) -> Self {
        self.frozen = true;
        self
    }

    /// Leaves in the order they were issued.
    pub fn issued(&self) -> Vec<u32> {
        self.issued.borrow().clone()
    }

    pub fn issued_count(&self, leaf: u32) -> usize {
        self.issued.borrow().iter().filter(|&&l| l == leaf).count()
    }

    pub fn msr_reads(&self) -> Vec<Msr> {
        self.msr_reads.borrow().clone()
    }

    pub fn msr_writes(&self) -> Vec<(Msr, u32, u32)> {
        self.msr_writes.borrow().clone()
    }

    pub fn cr0(&self) -> u64 {
        self.cr0.get()
    }

    pub fn cr4(&self) -> u64 {
        self.cr4.get()
    }
}

impl CpuAccess for FakeCpu {
    fn cpuid(&self, leaf: u32) -> CpuidRegs {
        self.issued.borrow_mut().push(leaf);
        let mut leaves = self.leaves.borrow_mut();
        let Some(script) = leaves.get_mut(&leaf) else {
            return CpuidRegs::ZERO;
        };
        let Some(last) = script.answers.len().checked_sub(1) else {
            return CpuidRegs::ZERO;
        };
        let regs = script.answers[script.next.min(last)];
        script.next += 1;
        regs
    }

    fn read_msr(&self, msr: Msr) -> (u32, u32) {
        self.msr_reads.borrow_mut().push(msr);
        self.msrs.get(&msr.address()).copied().unwrap_or((0, 0))
    }

    fn write_msr(&self, msr: Msr, low: u32, high: u32) {
        self.msr_writes.borrow_mut().push((msr, low, high));
    }

    fn read_cr0(&self) -> u64 {
        self.cr0.get()
    }

    fn write_cr0(&self, value: u64) {
        if !self.frozen {
            self.cr0.set(value);
        }
    }

    fn read_cr4(&self) -> u64 {
        self.cr4.get()
    }

    fn write_cr4(&self, value: u64) {
        if !self.frozen {
            self.cr4.set(value);
        }
    }
}

fn word(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Leaf 0 answer for a 12-character vendor string.
pub fn vendor_regs(vendor: &[u8; 12], max_leaf: u32) -> CpuidRegs {
    CpuidRegs::new(
        max_leaf,
        word(&vendor[0..4]),
        word(&vendor[8..12]),
        word(&vendor[4..8]),
    )
}

/// Leaves 0x8000_0002..=0x8000_0004 for a 48-byte brand buffer.
pub fn brand_regs(text: &[u8; 48]) -> [CpuidRegs; 3] {
    core::array::from_fn(|leaf| {
        let chunk = &text[leaf * 16..(leaf + 1) * 16];
        CpuidRegs::new(
            word(&chunk[0..4]),
            word(&chunk[4..8]),
            word(&chunk[8..12]),
            word(&chunk[12..16]),
        )
    })
}

/// NUL-pad `text` to the 48-byte brand buffer.
pub fn padded_brand(text: &[u8]) -> [u8; 48] {
    let mut out = [0u8; 48];
    let len = text.len().min(out.len());
    out[..len].copy_from_slice(&text[..len]);
    out
}

#[test]
fn sequence_repeats_last_answer() {
    let a = CpuidRegs::new(1, 0, 0, 0);
    let b = CpuidRegs::new(2, 0, 0, 0);
    let cpu = FakeCpu::new().with_leaf_sequence(7, &[a, b]);
    assert_eq!(cpu.cpuid(7), a);
    assert_eq!(cpu.cpuid(7), b);
    assert_eq!(cpu.cpuid(7), b);
    assert_eq!(cpu.cpuid(8), CpuidRegs::ZERO);
    assert_eq!(cpu.issued(), [7, 7, 7, 8]);
}

#[test]
fn log_capture_is_per_fake() {
    let _cpu = FakeCpu::new();
    hwprobe_lib::klog_info!("first");
    hwprobe_lib::klog_debug!("below the default level");
    assert_eq!(take_log(), ["first"]);
    assert!(take_log().is_empty());

    hwprobe_lib::klog_info!("stale");
    let _cpu = FakeCpu::new();
    assert!(take_log().is_empty());
}
