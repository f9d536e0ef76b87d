//! Polled PS/2 keyboard input.
//!
//! No interrupt wiring: the shell busy-waits on the controller status
//! port and feeds scancodes through `pc_keyboard` until a key press
//! decodes to a character.

use lazy_static::lazy_static;
use pc_keyboard::{DecodedKey, HandleControl, Keyboard, ScancodeSet1, layouts};
use spin::Mutex;
use x86_64::instructions::port::Port;

const STATUS_PORT: u16 = 0x64;
const DATA_PORT: u16 = 0x60;
const OUTPUT_FULL: u8 = 1 << 0;

lazy_static! {
    static ref KEYBOARD: Mutex<Keyboard<layouts::Us104Key, ScancodeSet1>> = Mutex::new(
        Keyboard::new(ScancodeSet1::new(), layouts::Us104Key, HandleControl::Ignore)
    );
}

/// Blocks until a key press decodes to a character. Releases and
/// non-character keys are consumed silently.
pub fn read_char() -> char {
    let mut status = Port::<u8>::new(STATUS_PORT);
    let mut data = Port::<u8>::new(DATA_PORT);
    let mut keyboard = KEYBOARD.lock();
    loop {
        while unsafe { status.read() } & OUTPUT_FULL == 0 {
            core::hint::spin_loop();
        }
        let scancode: u8 = unsafe { data.read() };
        if let Ok(Some(key_event)) = keyboard.add_byte(scancode) {
            if let Some(DecodedKey::Unicode(character)) = keyboard.process_keyevent(key_event) {
                return character;
            }
        }
    }
}
