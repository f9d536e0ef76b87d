//! Fixed-capacity string builder.
//!
//! The kernel has no heap, so anything that would reach for `String`
//! builds into a `StrBuf` instead. Writes that would overflow the
//! backing array fail instead of truncating, and the `fmt::Write` impl
//! lets `write!` target it directly.

use core::fmt;

/// Returned when a push would exceed the buffer capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExhausted;

pub struct StrBuf<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> StrBuf<N> {
    pub const fn new() -> Self {
        StrBuf { buf: [0; N], len: 0 }
    }

    pub fn as_str(&self) -> &str {
        // Only whole `str`s and `char`s are ever appended.
        unsafe { core::str::from_utf8_unchecked(&self.buf[..self.len]) }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn push(&mut self, c: char) -> Result<(), CapacityExhausted> {
        let mut encoded = [0u8; 4];
        self.push_str(c.encode_utf8(&mut encoded))
    }

    pub fn push_str(&mut self, s: &str) -> Result<(), CapacityExhausted> {
        let bytes = s.as_bytes();
        if self.len + bytes.len() > N {
            return Err(CapacityExhausted);
        }
        self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
        Ok(())
    }

    /// Removes and returns the last character, if any.
    pub fn pop(&mut self) -> Option<char> {
        let (idx, c) = self.as_str().char_indices().next_back()?;
        self.len = idx;
        Some(c)
    }
}

impl<const N: usize> fmt::Write for StrBuf<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s).map_err(|_| fmt::Error)
    }
}

impl<const N: usize> fmt::Display for StrBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> fmt::Debug for StrBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test_case]
    fn push_str_accumulates() {
        let mut buf = StrBuf::<16>::new();
        assert!(buf.push_str("hello").is_ok());
        assert!(buf.push(' ').is_ok());
        assert!(buf.push_str("world").is_ok());
        assert_eq!(buf.as_str(), "hello world");
        assert_eq!(buf.len(), 11);
    }

    #[test_case]
    fn overflow_is_rejected_without_partial_write() {
        let mut buf = StrBuf::<4>::new();
        assert!(buf.push_str("abc").is_ok());
        assert_eq!(buf.push_str("de"), Err(CapacityExhausted));
        assert_eq!(buf.as_str(), "abc");
    }

    #[test_case]
    fn exact_fit_is_accepted() {
        let mut buf = StrBuf::<4>::new();
        assert!(buf.push_str("abcd").is_ok());
        assert_eq!(buf.push('e'), Err(CapacityExhausted));
        assert_eq!(buf.as_str(), "abcd");
    }

    #[test_case]
    fn pop_removes_last_char() {
        let mut buf = StrBuf::<8>::new();
        let _ = buf.push_str("ab");
        assert_eq!(buf.pop(), Some('b'));
        assert_eq!(buf.as_str(), "a");
        assert_eq!(buf.pop(), Some('a'));
        assert_eq!(buf.pop(), None);
    }

    #[test_case]
    fn write_macro_formats_into_buffer() {
        let mut buf = StrBuf::<64>::new();
        let _ = write!(buf, "{:<8} {} bytes", "name", 42);
        assert_eq!(buf.as_str(), "name     42 bytes");
    }

    #[test_case]
    fn write_macro_overflow_reports_error() {
        let mut buf = StrBuf::<4>::new();
        assert!(write!(buf, "too long for this").is_err());
    }
}
