#![no_std]
#![no_main]
#![feature(custom_test_frameworks)]
#![test_runner(cinder_os::test_runner)]
#![reexport_test_harness_main = "test_main"]

use bootloader::{BootInfo, entry_point};
use cinder_os::{print, println};
use core::panic::PanicInfo;

entry_point!(main);

fn main(_boot_info: &'static BootInfo) -> ! {
    cinder_os::init();
    test_main();
    cinder_os::hlt_loop();
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    cinder_os::test_panic_handler(info)
}

#[test_case]
fn test_println() {
    println!("console fan-out smoke test");
}

#[test_case]
fn test_println_many() {
    for i in 0..100 {
        println!("line {}", i);
    }
}

#[test_case]
fn test_print_without_newline() {
    print!("no newline");
    println!();
}
