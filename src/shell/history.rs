//! Fixed-size ring of recently executed command lines.

use super::MAX_COMMAND_LENGTH;
use crate::strbuf::StrBuf;
use spin::Mutex;

pub const HISTORY_SIZE: usize = 10;

const EMPTY_LINE: StrBuf<MAX_COMMAND_LENGTH> = StrBuf::new();

pub struct History {
    entries: [StrBuf<MAX_COMMAND_LENGTH>; HISTORY_SIZE],
    count: usize,
    next: usize,
}

impl History {
    pub const fn new() -> History {
        History {
            entries: [EMPTY_LINE; HISTORY_SIZE],
            count: 0,
            next: 0,
        }
    }

    /// Stores a line unless it is empty or repeats the previous entry.
    /// Once the ring is full the oldest line is overwritten.
    pub fn record(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }
        if let Some(last) = self.last() {
            if last == line {
                return;
            }
        }
        self.entries[self.next].clear();
        let _ = self.entries[self.next].push_str(line);
        self.next = (self.next + 1) % HISTORY_SIZE;
        if self.count < HISTORY_SIZE {
            self.count += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let start = if self.count < HISTORY_SIZE {
            0
        } else {
            self.next
        };
        (0..self.count).map(move |i| self.entries[(start + i) % HISTORY_SIZE].as_str())
    }

    fn last(&self) -> Option<&str> {
        if self.count == 0 {
            return None;
        }
        let idx = (self.next + HISTORY_SIZE - 1) % HISTORY_SIZE;
        Some(self.entries[idx].as_str())
    }
}

static HISTORY: Mutex<History> = Mutex::new(History::new());

pub fn record(line: &str) {
    HISTORY.lock().record(line);
}

/// Runs `f` with the shared history locked.
pub fn with<R>(f: impl FnOnce(&History) -> R) -> R {
    f(&HISTORY.lock())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_case]
    fn records_in_order() {
        let mut history = History::new();
        history.record("ls");
        history.record("pwd");
        let mut iter = history.iter();
        assert_eq!(iter.next(), Some("ls"));
        assert_eq!(iter.next(), Some("pwd"));
        assert_eq!(iter.next(), None);
    }

    #[test_case]
    fn skips_empty_and_repeated_lines() {
        let mut history = History::new();
        history.record("");
        history.record("ls");
        history.record("ls");
        history.record("pwd");
        history.record("ls");
        assert_eq!(history.len(), 3);
    }

    #[test_case]
    fn overwrites_oldest_when_full() {
        let mut history = History::new();
        history.record("cmd 0");
        history.record("cmd 1");
        history.record("cmd 2");
        history.record("cmd 3");
        history.record("cmd 4");
        history.record("cmd 5");
        history.record("cmd 6");
        history.record("cmd 7");
        history.record("cmd 8");
        history.record("cmd 9");
        history.record("cmd 10");
        history.record("cmd 11");
        assert_eq!(history.len(), HISTORY_SIZE);
        let mut iter = history.iter();
        assert_eq!(iter.next(), Some("cmd 2"));
        assert_eq!(iter.last(), Some("cmd 11"));
    }

    #[test_case]
    fn nonadjacent_duplicates_are_kept() {
        let mut history = History::new();
        history.record("ls");
        history.record("pwd");
        history.record("ls");
        assert_eq!(history.len(), 3);
    }
}
