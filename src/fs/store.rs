use super::FsError;
use super::file::{FileEntry, MAX_FILENAME, MAX_FILES, MAX_FILESIZE};
use crate::strbuf::StrBuf;
use core::fmt::Write;
use spin::{Mutex, MutexGuard};

/// Holds a worst-case listing: 64 entries of at most ~110 bytes (31-byte
/// name, 6-digit size column, two 20-digit ticks) plus header and total.
pub const LIST_BUFFER_SIZE: usize = 8192;

/// Snapshot of store occupancy for `meminfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemInfo {
    pub files: usize,
    pub used: usize,
    pub available: usize,
}

pub struct FileStore {
    slots: [FileEntry; MAX_FILES],
    file_count: usize,
    bytes_used: usize,
    tick: u64,
}

// Const-initialized: the table is a quarter megabyte, so it must live in
// .bss from the start instead of being built on a stack and moved.
static STORE: Mutex<FileStore> = Mutex::new(FileStore::new());

/// Locks the global store.
pub fn store() -> MutexGuard<'static, FileStore> {
    STORE.lock()
}

pub(super) fn init() {
    let mut store = STORE.lock();
    store.reset();
    let _ = store.save(
        "welcome.txt",
        "Welcome to CinderOS!\nThis file store lives in RAM and is lost on reboot.\n",
    );
    let _ = store.save(
        "readme.txt",
        "CinderOS quick start:\n  ls                   list files\n  cat <file>           show a file\n  save <file> <text>   write a file\n  help                 full command list\n",
    );
}

impl FileStore {
    pub const fn new() -> FileStore {
        FileStore {
            slots: [FileEntry::EMPTY; MAX_FILES],
            file_count: 0,
            bytes_used: 0,
            tick: 0,
        }
    }

    pub fn reset(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.clear();
        }
        self.file_count = 0;
        self.bytes_used = 0;
        self.tick = 0;
    }

    pub fn file_count(&self) -> usize {
        self.file_count
    }

    pub fn bytes_used(&self) -> usize {
        self.bytes_used
    }

    /// Directories are not implemented; every file lives in the root.
    pub fn cwd(&self) -> &str {
        "/"
    }

    pub fn mem_info(&self) -> MemInfo {
        MemInfo {
            files: self.file_count,
            used: self.bytes_used,
            available: MAX_FILES * MAX_FILESIZE - self.bytes_used,
        }
    }

    /// In-use entries in slot order.
    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        self.slots.iter().filter(|entry| entry.in_use())
    }

    pub fn exists(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn size(&self, name: &str) -> usize {
        match self.find(name) {
            Some(idx) => self.slots[idx].size(),
            None => 0,
        }
    }

    /// Creates the file or replaces its content. A replaced file keeps its
    /// slot and creation tick.
    pub fn save(&mut self, name: &str, text: &str) -> Result<(), FsError> {
        validate_name(name)?;
        if text.len() >= MAX_FILESIZE {
            return Err(FsError::BadArgument);
        }
        if let Some(idx) = self.find(name) {
            self.bytes_used -= self.slots[idx].size();
            self.bytes_used += text.len();
            let tick = self.advance_tick();
            self.slots[idx].set_content(text);
            self.slots[idx].touch(tick);
            return Ok(());
        }
        let idx = self
            .slots
            .iter()
            .position(|entry| !entry.in_use())
            .ok_or(FsError::CapacityExhausted)?;
        let tick = self.advance_tick();
        self.slots[idx].create(name, text, tick);
        self.file_count += 1;
        self.bytes_used += text.len();
        Ok(())
    }

    /// Appends to an existing file. The combined size must stay under the
    /// per-file limit.
    pub fn append(&mut self, name: &str, text: &str) -> Result<(), FsError> {
        validate_name(name)?;
        let idx = self.find(name).ok_or(FsError::NotFound)?;
        if self.slots[idx].size() + text.len() >= MAX_FILESIZE {
            return Err(FsError::CapacityExhausted);
        }
        let tick = self.advance_tick();
        self.slots[idx].append_content(text);
        self.slots[idx].touch(tick);
        self.bytes_used += text.len();
        Ok(())
    }

    /// Borrows the stored content.
    pub fn content(&self, name: &str) -> Result<&str, FsError> {
        validate_name(name)?;
        let idx = self.find(name).ok_or(FsError::NotFound)?;
        Ok(self.slots[idx].content())
    }

    /// Copies the content into `out`, reserving one byte for a NUL
    /// terminator. Returns the number of bytes copied.
    pub fn read(&self, name: &str, out: &mut [u8]) -> Result<usize, FsError> {
        if out.is_empty() {
            return Err(FsError::BadArgument);
        }
        let text = self.content(name)?;
        let n = core::cmp::min(text.len(), out.len() - 1);
        out[..n].copy_from_slice(&text.as_bytes()[..n]);
        out[n] = 0;
        Ok(n)
    }

    pub fn delete(&mut self, name: &str) -> Result<(), FsError> {
        validate_name(name)?;
        let idx = self.find(name).ok_or(FsError::NotFound)?;
        self.bytes_used -= self.slots[idx].size();
        self.slots[idx].clear();
        self.file_count -= 1;
        Ok(())
    }

    /// Formats the directory listing into `out` and returns the number of
    /// files listed.
    pub fn list<const N: usize>(&self, out: &mut StrBuf<N>) -> Result<usize, FsError> {
        out.clear();
        writeln!(out, "Files in {}:", self.cwd()).map_err(|_| FsError::CapacityExhausted)?;
        let mut count = 0;
        for entry in self.entries() {
            writeln!(
                out,
                "{:<20} {:>6} bytes  [Created: {}, Modified: {}]",
                entry.name(),
                entry.size(),
                entry.created_tick(),
                entry.modified_tick()
            )
            .map_err(|_| FsError::CapacityExhausted)?;
            count += 1;
        }
        writeln!(out, "Total: {} file(s)", count).map_err(|_| FsError::CapacityExhausted)?;
        Ok(count)
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|entry| entry.in_use() && entry.name() == name)
    }

    fn advance_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}

fn validate_name(name: &str) -> Result<(), FsError> {
    if name.is_empty() || name.len() >= MAX_FILENAME {
        return Err(FsError::BadArgument);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_store<R>(f: impl FnOnce(&mut FileStore) -> R) -> R {
        let mut store = STORE.lock();
        store.reset();
        f(&mut store)
    }

    #[test_case]
    fn save_then_content_round_trips() {
        with_store(|store| {
            assert_eq!(store.save("hello.txt", "Hello World"), Ok(()));
            assert_eq!(store.content("hello.txt"), Ok("Hello World"));
            assert_eq!(store.size("hello.txt"), 11);
            assert_eq!(store.file_count(), 1);
            assert_eq!(store.bytes_used(), 11);
        });
    }

    #[test_case]
    fn save_existing_replaces_and_keeps_creation_tick() {
        with_store(|store| {
            let _ = store.save("a.txt", "first");
            let _ = store.save("a.txt", "second, longer");
            assert_eq!(store.content("a.txt"), Ok("second, longer"));
            assert_eq!(store.file_count(), 1);
            assert_eq!(store.bytes_used(), 14);
            let entry = store.entries().next();
            let entry = entry.unwrap();
            assert_eq!(entry.created_tick(), 1);
            assert_eq!(entry.modified_tick(), 2);
        });
    }

    #[test_case]
    fn append_concatenates_and_bumps_modified() {
        with_store(|store| {
            let _ = store.save("log.txt", "one");
            assert_eq!(store.append("log.txt", " two"), Ok(()));
            assert_eq!(store.content("log.txt"), Ok("one two"));
            let entry = store.entries().next().unwrap();
            assert!(entry.created_tick() < entry.modified_tick());
        });
    }

    #[test_case]
    fn append_to_missing_file_fails() {
        with_store(|store| {
            assert_eq!(store.append("ghost.txt", "boo"), Err(FsError::NotFound));
        });
    }

    #[test_case]
    fn delete_frees_the_slot() {
        with_store(|store| {
            let _ = store.save("tmp.txt", "data");
            assert_eq!(store.delete("tmp.txt"), Ok(()));
            assert!(!store.exists("tmp.txt"));
            assert_eq!(store.file_count(), 0);
            assert_eq!(store.bytes_used(), 0);
            assert_eq!(store.delete("tmp.txt"), Err(FsError::NotFound));
        });
    }

    #[test_case]
    fn name_length_limits() {
        with_store(|store| {
            let long31 = "aaaaaaaaaaaaaaaaaaaaaaaaaaa.txt"; // 31 chars
            let long32 = "aaaaaaaaaaaaaaaaaaaaaaaaaaaa.txt"; // 32 chars
            assert_eq!(long31.len(), 31);
            assert_eq!(long32.len(), 32);
            assert_eq!(store.save(long31, "x"), Ok(()));
            assert_eq!(store.save(long32, "x"), Err(FsError::BadArgument));
            assert_eq!(store.save("", "x"), Err(FsError::BadArgument));
        });
    }

    #[test_case]
    fn content_size_limits() {
        with_store(|store| {
            let big = [b'x'; MAX_FILESIZE];
            let fit = core::str::from_utf8(&big[..MAX_FILESIZE - 1]).unwrap();
            let too_big = core::str::from_utf8(&big).unwrap();
            assert_eq!(store.save("big.txt", fit), Ok(()));
            assert_eq!(store.save("big2.txt", too_big), Err(FsError::BadArgument));
            assert_eq!(store.append("big.txt", "x"), Err(FsError::CapacityExhausted));
            // Both rejections leave the store untouched.
            assert_eq!(store.content("big.txt"), Ok(fit));
            assert!(!store.exists("big2.txt"));
            assert_eq!(store.file_count(), 1);
            assert_eq!(store.bytes_used(), MAX_FILESIZE - 1);
        });
    }

    #[test_case]
    fn table_fills_at_sixty_four_files() {
        with_store(|store| {
            for i in 0..MAX_FILES {
                let mut name = StrBuf::<16>::new();
                let _ = write!(name, "f{}.txt", i);
                assert_eq!(store.save(name.as_str(), "x"), Ok(()));
            }
            assert_eq!(store.save("overflow.txt", "x"), Err(FsError::CapacityExhausted));
            // The failed create leaves the full table as it was.
            assert!(!store.exists("overflow.txt"));
            assert_eq!(store.file_count(), MAX_FILES);
            assert_eq!(store.bytes_used(), MAX_FILES);
            assert_eq!(store.content("f0.txt"), Ok("x"));
            let _ = store.delete("f0.txt");
            assert_eq!(store.save("overflow.txt", "x"), Ok(()));
        });
    }

    #[test_case]
    fn read_copies_and_nul_terminates() {
        with_store(|store| {
            let _ = store.save("r.txt", "abcdef");
            let mut buf = [0xAA_u8; 16];
            assert_eq!(store.read("r.txt", &mut buf), Ok(6));
            assert_eq!(&buf[..6], b"abcdef");
            assert_eq!(buf[6], 0);

            let mut small = [0xAA_u8; 4];
            assert_eq!(store.read("r.txt", &mut small), Ok(3));
            assert_eq!(&small[..3], b"abc");
            assert_eq!(small[3], 0);
        });
    }

    #[test_case]
    fn listing_reports_header_and_total() {
        with_store(|store| {
            let _ = store.save("hello.txt", "Hello World");
            let mut out = StrBuf::<512>::new();
            assert_eq!(store.list(&mut out), Ok(1));
            let text = out.as_str();
            assert!(text.starts_with("Files in /:\n"));
            assert!(text.contains("hello.txt                11 bytes  [Created: 1, Modified: 1]\n"));
            assert!(text.ends_with("Total: 1 file(s)\n"));
        });
    }

    #[test_case]
    fn listing_of_full_table_fits_buffer() {
        with_store(|store| {
            for i in 0..MAX_FILES {
                let mut name = StrBuf::<32>::new();
                let _ = write!(name, "aaaaaaaaaaaaaaaaaaaaaaaaaaa{:04}", i);
                assert_eq!(name.len(), 31);
                assert_eq!(store.save(name.as_str(), "payload"), Ok(()));
            }
            let mut out = StrBuf::<LIST_BUFFER_SIZE>::new();
            assert_eq!(store.list(&mut out), Ok(MAX_FILES));
            assert!(out.as_str().ends_with("Total: 64 file(s)\n"));
        });
    }

    #[test_case]
    fn listing_of_empty_store() {
        with_store(|store| {
            let mut out = StrBuf::<128>::new();
            assert_eq!(store.list(&mut out), Ok(0));
            assert_eq!(out.as_str(), "Files in /:\nTotal: 0 file(s)\n");
        });
    }

    #[test_case]
    fn meminfo_tracks_usage() {
        with_store(|store| {
            let _ = store.save("a.txt", "12345");
            let info = store.mem_info();
            assert_eq!(info.files, 1);
            assert_eq!(info.used, 5);
            assert_eq!(info.available, MAX_FILES * MAX_FILESIZE - 5);
        });
    }
}
