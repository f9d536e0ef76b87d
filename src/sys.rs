//! Platform identity and power control.

pub const VERSION: &str = "0.1.0";

#[cfg(target_arch = "x86_64")]
pub const ARCH: &str = "x86_64";
#[cfg(target_arch = "aarch64")]
pub const ARCH: &str = "aarch64";
#[cfg(target_arch = "riscv64")]
pub const ARCH: &str = "riscv64";

/// Pulses the 8042 reset line on x86_64. The other targets have no
/// portable reset path, so they park the CPU instead.
pub fn reboot() -> ! {
    #[cfg(target_arch = "x86_64")]
    {
        use x86_64::instructions::port::Port;

        let mut status = Port::<u8>::new(0x64);
        unsafe {
            while status.read() & 0x02 != 0 {
                core::hint::spin_loop();
            }
            status.write(0xFE_u8);
        }
    }
    crate::hlt_loop();
}

/// Requests power-off from the platform, then parks the CPU in case the
/// request is ignored.
pub fn power_off() -> ! {
    #[cfg(target_arch = "x86_64")]
    {
        use x86_64::instructions::port::Port;

        unsafe {
            // QEMU ACPI PM1a control, then the older debug-exit ports.
            Port::<u16>::new(0x604).write(0x2000_u16);
            Port::<u16>::new(0xB004).write(0x2000_u16);
            Port::<u16>::new(0x8900).write(0x0000_u16);
            Port::<u16>::new(0x501).write(0x0031_u16);
        }
    }
    #[cfg(target_arch = "aarch64")]
    unsafe {
        // PSCI SYSTEM_OFF via the hypervisor call conduit.
        core::arch::asm!("hvc #0", inout("x0") 0x8400_0008_u64 => _);
    }
    #[cfg(target_arch = "riscv64")]
    unsafe {
        // Legacy SBI shutdown.
        core::arch::asm!("ecall", inout("a0") 0_usize => _, in("a7") 8_usize);
    }
    crate::hlt_loop();
}
