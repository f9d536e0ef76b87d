//! Console fan-out: one output path feeding every attached sink.
//!
//! On x86_64 that is the serial port plus the VGA text buffer; on the
//! MMIO-UART targets the serial port is the whole console. Input comes
//! from the PS/2 keyboard on x86_64 and from the UART elsewhere.

use crate::serial;
use core::fmt;

/// Writes one byte to every sink. The serial side injects CR after LF,
/// the VGA side interprets the control bytes itself.
pub fn put_byte(byte: u8) {
    serial::write_byte(byte);
    #[cfg(target_arch = "x86_64")]
    crate::vga_buffer::put_byte(byte);
}

pub fn put_str(s: &str) {
    for byte in s.bytes() {
        put_byte(byte);
    }
}

/// Blocking read of the next input byte.
#[cfg(target_arch = "x86_64")]
pub fn read_byte() -> u8 {
    loop {
        let c = crate::keyboard::read_char();
        if c.is_ascii() {
            return c as u8;
        }
    }
}

#[cfg(not(target_arch = "x86_64"))]
pub fn read_byte() -> u8 {
    serial::getc()
}

pub struct Console;

impl fmt::Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        put_str(s);
        Ok(())
    }
}

#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    use core::fmt::Write;

    #[cfg(target_arch = "x86_64")]
    x86_64::instructions::interrupts::without_interrupts(|| {
        let _ = Console.write_fmt(args);
    });
    #[cfg(not(target_arch = "x86_64"))]
    {
        let _ = Console.write_fmt(args);
    }
}

/// Prints to every console sink.
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => ($crate::console::_print(format_args!($($arg)*)));
}

/// Prints to every console sink, appending a newline.
#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ($crate::print!("{}\n", format_args!($($arg)*)));
}
