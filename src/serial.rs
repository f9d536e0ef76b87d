//! Byte-oriented serial transport.
//!
//! Each architecture gets its own backend: the 16550 on COM1 for x86_64,
//! a PL011 probed over a list of known MMIO bases for aarch64, and the
//! NS16550-compatible port QEMU's virt machine maps at 0x1000_0000 for
//! riscv64. Everything above this module talks to `write_byte`, which
//! carries the line discipline: every LF goes out as CRLF.

use core::fmt;

#[cfg(target_arch = "x86_64")]
mod imp {
    use lazy_static::lazy_static;
    use spin::Mutex;
    use uart_16550::SerialPort;

    lazy_static! {
        static ref COM1: Mutex<SerialPort> = {
            let mut port = unsafe { SerialPort::new(0x3F8) };
            port.init();
            Mutex::new(port)
        };
    }

    pub fn init() {
        // Forces the lazy bring-up so the first print does not pay for it.
        COM1.lock();
    }

    pub fn putc(byte: u8) {
        COM1.lock().send_raw(byte);
    }
}

#[cfg(target_arch = "aarch64")]
mod imp {
    use lazy_static::lazy_static;
    use spin::Mutex;

    const FR_OFFSET: usize = 0x18;
    const FR_TXFF: u32 = 1 << 5;
    const FR_RXFE: u32 = 1 << 4;
    const TX_SPIN_LIMIT: u32 = 10_000;

    /// Candidate PL011 bases, most likely first: QEMU virt, Raspberry Pi 5
    /// (primary and secondary), Raspberry Pi 4.
    const CANDIDATES: [usize; 4] = [0x0900_0000, 0x10_7D00_1000, 0x10_7D05_0000, 0xFE20_1000];

    struct Pl011 {
        base: usize,
    }

    impl Pl011 {
        fn probe() -> Pl011 {
            for &base in CANDIDATES.iter() {
                let fr = unsafe { core::ptr::read_volatile((base + FR_OFFSET) as *const u32) };
                if fr != 0xFFFF_FFFF {
                    return Pl011 { base };
                }
            }
            Pl011 {
                base: CANDIDATES[0],
            }
        }

        fn flags(&self) -> u32 {
            unsafe { core::ptr::read_volatile((self.base + FR_OFFSET) as *const u32) }
        }

        fn putc(&mut self, byte: u8) {
            let mut spins = 0;
            while self.flags() & FR_TXFF != 0 {
                spins += 1;
                if spins >= TX_SPIN_LIMIT {
                    // FIFO stuck full, drop the byte rather than hang.
                    return;
                }
            }
            unsafe { core::ptr::write_volatile(self.base as *mut u32, byte as u32) }
        }

        fn getc(&mut self) -> u8 {
            while self.flags() & FR_RXFE != 0 {
                core::hint::spin_loop();
            }
            unsafe { (core::ptr::read_volatile(self.base as *const u32) & 0xFF) as u8 }
        }
    }

    lazy_static! {
        static ref UART: Mutex<Pl011> = Mutex::new(Pl011::probe());
    }

    pub fn init() {
        UART.lock();
    }

    pub fn putc(byte: u8) {
        UART.lock().putc(byte);
    }

    pub fn getc() -> u8 {
        UART.lock().getc()
    }
}

#[cfg(target_arch = "riscv64")]
mod imp {
    const BASE: usize = 0x1000_0000;
    const THR: usize = 0x00;
    const RBR: usize = 0x00;
    const LSR: usize = 0x05;
    const LSR_DR: u8 = 1 << 0;
    const LSR_THRE: u8 = 1 << 5;

    fn reg(offset: usize) -> *mut u8 {
        (BASE + offset) as *mut u8
    }

    pub fn init() {}

    pub fn putc(byte: u8) {
        unsafe {
            while core::ptr::read_volatile(reg(LSR)) & LSR_THRE == 0 {
                core::hint::spin_loop();
            }
            core::ptr::write_volatile(reg(THR), byte);
        }
    }

    pub fn getc() -> u8 {
        unsafe {
            while core::ptr::read_volatile(reg(LSR)) & LSR_DR == 0 {
                core::hint::spin_loop();
            }
            core::ptr::read_volatile(reg(RBR))
        }
    }
}

pub fn init() {
    imp::init();
}

/// Raw transmit, no translation.
pub fn putc(byte: u8) {
    imp::putc(byte);
}

/// Cooked transmit: LF becomes CRLF so raw terminals line up.
pub fn write_byte(byte: u8) {
    imp::putc(byte);
    if byte == b'\n' {
        imp::putc(b'\r');
    }
}

/// Blocking receive. Only wired up where the serial port is the input
/// device; x86_64 reads the PS/2 keyboard instead.
#[cfg(not(target_arch = "x86_64"))]
pub fn getc() -> u8 {
    imp::getc()
}

pub struct SerialWriter;

impl fmt::Write for SerialWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            write_byte(byte);
        }
        Ok(())
    }
}

#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    use core::fmt::Write;

    #[cfg(target_arch = "x86_64")]
    x86_64::instructions::interrupts::without_interrupts(|| {
        let _ = SerialWriter.write_fmt(args);
    });
    #[cfg(not(target_arch = "x86_64"))]
    {
        let _ = SerialWriter.write_fmt(args);
    }
}

/// Prints to the serial port.
#[macro_export]
macro_rules! serial_print {
    ($($arg:tt)*) => {
        $crate::serial::_print(format_args!($($arg)*))
    };
}

/// Prints to the serial port, appending a newline.
#[macro_export]
macro_rules! serial_println {
    () => ($crate::serial_print!("\n"));
    ($fmt:expr) => ($crate::serial_print!(concat!($fmt, "\n")));
    ($fmt:expr, $($arg:tt)*) => ($crate::serial_print!(
        concat!($fmt, "\n"), $($arg)*));
}
