#![no_std]
#![no_main]
#![feature(custom_test_frameworks)]
#![test_runner(cinder_os::test_runner)]
#![reexport_test_harness_main = "test_main"]

use cinder_os::{println, serial_println, shell, sys};
use core::panic::PanicInfo;

#[cfg(target_arch = "x86_64")]
use bootloader::{BootInfo, entry_point};

#[cfg(target_arch = "x86_64")]
entry_point!(kernel_main);

#[cfg(target_arch = "x86_64")]
fn kernel_main(_boot_info: &'static BootInfo) -> ! {
    kmain()
}

/// Bare entry for the MMIO-UART targets; the boot shim jumps here with
/// the stack already set up.
#[cfg(not(target_arch = "x86_64"))]
#[unsafe(no_mangle)]
pub extern "C" fn kernel_main() -> ! {
    kmain()
}

fn kmain() -> ! {
    cinder_os::init();
    serial_println!("cinder: serial console up ({})", sys::ARCH);
    serial_println!("cinder: file store seeded");
    println!("CinderOS v{} ({})", sys::VERSION, sys::ARCH);

    #[cfg(test)]
    test_main();

    shell::run()
}

#[cfg(not(test))]
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    println!("{}", info);
    cinder_os::hlt_loop();
}

#[cfg(test)]
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    cinder_os::test_panic_handler(info)
}
