use x86_64::instructions::port::Port;

pub const COM1: u16 = 0x3F8;

pub const UART_REG_THR: u16 = 0;
pub const UART_REG_LSR: u16 = 5;

pub const UART_LSR_TX_EMPTY: u8 = 0x20;

// ---------------------------------------------------------------------------
// Low-level serial I/O primitives
// ---------------------------------------------------------------------------
//
// Only the early-boot klog fallback writes through these; there is no
// serial driver in this workspace. Callers are responsible for
// serialisation.

/// Write one byte to a UART, polling the Line Status Register until the
/// transmit holding register is empty.
///
/// # Safety
///
/// Port I/O.  Caller must ensure `base` refers to a valid, initialised
/// 8250/16550-compatible UART and that concurrent access is serialised.
#[inline(always)]
pub unsafe fn serial_putc(base: u16, byte: u8) {
    let mut lsr: Port<u8> = Port::new(base + UART_REG_LSR);
    let mut thr: Port<u8> = Port::new(base + UART_REG_THR);
    unsafe {
        while (lsr.read() & UART_LSR_TX_EMPTY) == 0 {
            core::hint::spin_loop();
        }
        thr.write(byte);
    }
}

/// Write a byte slice to a UART, converting lone `\n` into `\r\n`.
///
/// # Safety
///
/// Same requirements as [`serial_putc`].
#[inline]
pub unsafe fn serial_write_bytes(base: u16, bytes: &[u8]) {
    for &b in bytes {
        if b == b'\n' {
            unsafe { serial_putc(base, b'\r') };
        }
        unsafe { serial_putc(base, b) };
    }
}
