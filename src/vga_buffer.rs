//! VGA text-mode framebuffer at 0xb8000, 80x25 cells.
//!
//! The writer keeps a software cursor and mirrors it into the CRTC
//! registers after every visible change, so the blinking hardware cursor
//! tracks where the next glyph lands.

use lazy_static::lazy_static;
use spin::Mutex;
use volatile::Volatile;
use x86_64::instructions::port::Port;

const BUFFER_HEIGHT: usize = 25;
const BUFFER_WIDTH: usize = 80;
const TAB_STOP: usize = 4;

const CRTC_INDEX: u16 = 0x3D4;
const CRTC_DATA: u16 = 0x3D5;

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorCode(u8);

impl ColorCode {
    pub const fn new(foreground: Color, background: Color) -> ColorCode {
        ColorCode((background as u8) << 4 | (foreground as u8))
    }
}

const DEFAULT_COLOR: ColorCode = ColorCode::new(Color::LightGray, Color::Black);
const STATUS_COLOR: ColorCode = ColorCode::new(Color::Black, Color::LightGray);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
struct ScreenChar {
    ascii_character: u8,
    color_code: ColorCode,
}

#[repr(transparent)]
struct Buffer {
    chars: [[Volatile<ScreenChar>; BUFFER_WIDTH]; BUFFER_HEIGHT],
}

pub struct Writer {
    row: usize,
    col: usize,
    color_code: ColorCode,
    buffer: &'static mut Buffer,
}

impl Writer {
    /// Clears the screen, resets the cursor to the top-left corner and the
    /// attribute to light-gray on black.
    pub fn init(&mut self) {
        self.color_code = DEFAULT_COLOR;
        let blank = self.blank();
        for row in 0..BUFFER_HEIGHT {
            for col in 0..BUFFER_WIDTH {
                self.buffer.chars[row][col].write(blank);
            }
        }
        self.row = 0;
        self.col = 0;
        self.update_hw_cursor();
    }

    pub fn write_byte(&mut self, byte: u8) {
        match byte {
            b'\n' => self.new_line(),
            b'\r' => self.col = 0,
            0x08 => {
                if self.col > 0 {
                    self.col -= 1;
                    let blank = self.blank();
                    self.buffer.chars[self.row][self.col].write(blank);
                }
            }
            b'\t' => {
                let stop = (self.col + TAB_STOP) & !(TAB_STOP - 1);
                while self.col < stop && self.col < BUFFER_WIDTH {
                    self.put_char(b' ');
                }
                if self.col >= BUFFER_WIDTH {
                    self.new_line();
                }
            }
            0x20..=0x7e => {
                self.put_char(byte);
                if self.col >= BUFFER_WIDTH {
                    self.new_line();
                }
            }
            // Not printable in code page 437, show the replacement block.
            _ => {
                self.put_char(0xfe);
                if self.col >= BUFFER_WIDTH {
                    self.new_line();
                }
            }
        }
        self.update_hw_cursor();
    }

    fn put_char(&mut self, byte: u8) {
        self.buffer.chars[self.row][self.col].write(ScreenChar {
            ascii_character: byte,
            color_code: self.color_code,
        });
        self.col += 1;
    }

    fn new_line(&mut self) {
        self.col = 0;
        self.row += 1;
        if self.row >= BUFFER_HEIGHT {
            self.scroll_up();
            self.row = BUFFER_HEIGHT - 1;
        }
    }

    fn scroll_up(&mut self) {
        for row in 1..BUFFER_HEIGHT {
            for col in 0..BUFFER_WIDTH {
                let character = self.buffer.chars[row][col].read();
                self.buffer.chars[row - 1][col].write(character);
            }
        }
        let blank = self.blank();
        for col in 0..BUFFER_WIDTH {
            self.buffer.chars[BUFFER_HEIGHT - 1][col].write(blank);
        }
    }

    fn blank(&self) -> ScreenChar {
        ScreenChar {
            ascii_character: b' ',
            color_code: self.color_code,
        }
    }

    pub fn set_color(&mut self, color_code: ColorCode) {
        self.color_code = color_code;
    }

    /// Moves the cursor if the target cell is on screen. Out-of-range
    /// coordinates leave it where it is.
    pub fn set_cursor(&mut self, x: usize, y: usize) {
        if x < BUFFER_WIDTH && y < BUFFER_HEIGHT {
            self.col = x;
            self.row = y;
            self.update_hw_cursor();
        }
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.col, self.row)
    }

    /// Draws a single-line box with '+' corners, clipped to the screen.
    /// Neither the cursor nor the current attribute is disturbed.
    pub fn draw_box(&mut self, x: usize, y: usize, width: usize, height: usize, color: ColorCode) {
        if width == 0 || height == 0 {
            return;
        }
        let right = x + width - 1;
        let bottom = y + height - 1;
        for row in y..core::cmp::min(y + height, BUFFER_HEIGHT) {
            for col in x..core::cmp::min(x + width, BUFFER_WIDTH) {
                let edge_row = row == y || row == bottom;
                let edge_col = col == x || col == right;
                let glyph = match (edge_row, edge_col) {
                    (true, true) => b'+',
                    (true, false) => b'-',
                    (false, true) => b'|',
                    (false, false) => b' ',
                };
                self.buffer.chars[row][col].write(ScreenChar {
                    ascii_character: glyph,
                    color_code: color,
                });
            }
        }
    }

    /// Paints the bottom row as an inverse-video status bar.
    pub fn draw_status_bar(&mut self, text: &str) {
        let row = BUFFER_HEIGHT - 1;
        for col in 0..BUFFER_WIDTH {
            self.buffer.chars[row][col].write(ScreenChar {
                ascii_character: b' ',
                color_code: STATUS_COLOR,
            });
        }
        for (col, byte) in text.bytes().take(BUFFER_WIDTH).enumerate() {
            self.buffer.chars[row][col].write(ScreenChar {
                ascii_character: byte,
                color_code: STATUS_COLOR,
            });
        }
    }

    fn update_hw_cursor(&mut self) {
        let pos = (self.row * BUFFER_WIDTH + self.col) as u16;
        let mut index = Port::<u8>::new(CRTC_INDEX);
        let mut data = Port::<u8>::new(CRTC_DATA);
        unsafe {
            index.write(0x0F_u8);
            data.write((pos & 0xFF) as u8);
            index.write(0x0E_u8);
            data.write((pos >> 8) as u8);
        }
    }
}

lazy_static! {
    static ref WRITER: Mutex<Writer> = Mutex::new(Writer {
        row: 0,
        col: 0,
        color_code: DEFAULT_COLOR,
        buffer: unsafe { &mut *(0xb8000 as *mut Buffer) },
    });
}

pub fn init() {
    WRITER.lock().init();
}

pub fn clear() {
    WRITER.lock().init();
}

pub fn put_byte(byte: u8) {
    WRITER.lock().write_byte(byte);
}

pub fn set_colors(foreground: Color, background: Color) {
    WRITER.lock().set_color(ColorCode::new(foreground, background));
}

pub fn set_cursor(x: usize, y: usize) {
    WRITER.lock().set_cursor(x, y);
}

pub fn cursor() -> (usize, usize) {
    WRITER.lock().cursor()
}

pub fn draw_box(x: usize, y: usize, width: usize, height: usize, color: ColorCode) {
    WRITER.lock().draw_box(x, y, width, height, color);
}

pub fn draw_status_bar(text: &str) {
    WRITER.lock().draw_status_bar(text);
}
