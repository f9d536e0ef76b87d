//! In-RAM flat file store.
//!
//! A fixed table of 64 slots, no directories, no persistence. Timestamps
//! are logical ticks that advance once per mutating operation.

pub mod file;
pub mod store;

pub use file::{FileEntry, MAX_FILENAME, MAX_FILES, MAX_FILESIZE};
pub use store::{FileStore, LIST_BUFFER_SIZE, MemInfo, store};

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    /// Empty name, over-long name, or over-long content.
    BadArgument,
    /// No in-use slot carries the given name.
    NotFound,
    /// The slot table or a fixed buffer is full.
    CapacityExhausted,
}

impl FsError {
    /// The numeric code handlers report alongside failure messages.
    pub fn code(self) -> i32 {
        match self {
            FsError::BadArgument => -1,
            FsError::NotFound => -2,
            FsError::CapacityExhausted => -3,
        }
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            FsError::BadArgument => "bad argument",
            FsError::NotFound => "file not found",
            FsError::CapacityExhausted => "no space left",
        };
        f.write_str(msg)
    }
}

/// Resets the store and seeds the demo files.
pub fn init() {
    store::init();
}
