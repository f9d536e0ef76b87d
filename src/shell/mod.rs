//! Interactive shell: line editor, tokenizer, history, dispatcher.

pub mod args;
pub mod commands;
pub mod history;

use crate::strbuf::StrBuf;
use crate::{console, print, println, sys};

/// Line buffer capacity; the editor accepts one byte less.
pub const MAX_COMMAND_LENGTH: usize = 256;

const PROMPT: &str = "cinder> ";

/// The main loop. Never returns; `exit` and `reboot` leave through the
/// power-control paths instead.
pub fn run() -> ! {
    println!();
    println!("CinderOS v{} shell", sys::VERSION);
    println!("Type 'help' for a list of commands");
    println!();
    loop {
        print!("{}", PROMPT);
        let mut line = StrBuf::<MAX_COMMAND_LENGTH>::new();
        read_line(&mut line);
        if line.is_empty() {
            continue;
        }
        history::record(line.as_str());
        commands::dispatch(line.as_str());
    }
}

/// Reads one line, echoing as it goes. CR or LF ends the line; backspace
/// rubs out the last byte; anything outside printable ASCII is ignored.
fn read_line(line: &mut StrBuf<MAX_COMMAND_LENGTH>) {
    loop {
        let byte = console::read_byte();
        match byte {
            b'\r' | b'\n' => {
                println!();
                return;
            }
            0x08 | 0x7F => {
                if line.pop().is_some() {
                    print!("\x08 \x08");
                }
            }
            0x20..=0x7E => {
                if line.len() < MAX_COMMAND_LENGTH - 1 {
                    let c = byte as char;
                    let _ = line.push(c);
                    print!("{}", c);
                }
            }
            _ => {}
        }
    }
}
