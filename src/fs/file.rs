pub const MAX_FILES: usize = 64;
pub const MAX_FILENAME: usize = 32;
pub const MAX_FILESIZE: usize = 4096;

/// One slot of the file table. Name and content live in fixed arrays;
/// `size` tracks how much of `content` is meaningful.
pub struct FileEntry {
    name: [u8; MAX_FILENAME],
    content: [u8; MAX_FILESIZE],
    size: usize,
    created_tick: u64,
    modified_tick: u64,
    in_use: bool,
}

impl FileEntry {
    pub const EMPTY: FileEntry = FileEntry {
        name: [0; MAX_FILENAME],
        content: [0; MAX_FILESIZE],
        size: 0,
        created_tick: 0,
        modified_tick: 0,
        in_use: false,
    };

    pub fn in_use(&self) -> bool {
        self.in_use
    }

    pub fn name(&self) -> &str {
        let len = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(MAX_FILENAME);
        // Names come in as `&str` and never shrink the UTF-8 invariant.
        unsafe { core::str::from_utf8_unchecked(&self.name[..len]) }
    }

    pub fn content(&self) -> &str {
        unsafe { core::str::from_utf8_unchecked(&self.content[..self.size]) }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn created_tick(&self) -> u64 {
        self.created_tick
    }

    pub fn modified_tick(&self) -> u64 {
        self.modified_tick
    }

    pub(super) fn create(&mut self, name: &str, text: &str, tick: u64) {
        self.name = [0; MAX_FILENAME];
        self.name[..name.len()].copy_from_slice(name.as_bytes());
        self.set_content(text);
        self.created_tick = tick;
        self.modified_tick = tick;
        self.in_use = true;
    }

    pub(super) fn set_content(&mut self, text: &str) {
        self.content[..text.len()].copy_from_slice(text.as_bytes());
        self.size = text.len();
    }

    pub(super) fn append_content(&mut self, text: &str) {
        self.content[self.size..self.size + text.len()].copy_from_slice(text.as_bytes());
        self.size += text.len();
    }

    pub(super) fn touch(&mut self, tick: u64) {
        self.modified_tick = tick;
    }

    pub(super) fn clear(&mut self) {
        self.name = [0; MAX_FILENAME];
        self.size = 0;
        self.created_tick = 0;
        self.modified_tick = 0;
        self.in_use = false;
    }
}
