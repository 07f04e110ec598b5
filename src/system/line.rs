//! Fixed-capacity line buffer.
//!
//! A [`LineBuffer`] holds one raw input line. The reader fills it, the
//! tokenizer then rewrites it in place: NUL bytes are dropped in to delimit
//! tokens and quote decoration is spliced out with [`LineBuffer::remove_at`].
//! Nothing restores the original text afterwards.
//!
//! The byte just past the content is always NUL, so the content is
//! NUL-terminated at every point in its life.

use super::error::Error;

/// Capacity of a line buffer in bytes, terminator included.
pub const LINE_BUFFER_SIZE: usize = 128;

/// ASCII NUL, the line and token terminator.
pub const ASCII_NUL: u8 = 0x00;

/// How the reader finished a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A line feed was received and replaced by the terminator.
    Complete,
    /// The input exceeded the maximum line length; the buffer was emptied.
    TooLong,
    /// The console failed mid-line; the buffer holds what was read so far.
    DeviceError,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Termination {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Termination::Complete => defmt::write!(f, "Complete"),
            Termination::TooLong => defmt::write!(f, "TooLong"),
            Termination::DeviceError => defmt::write!(f, "DeviceError"),
        }
    }
}

/// An owned, fixed-capacity, NUL-terminated line.
///
/// # Examples
///
/// ```rust
/// use libtash::system::line::LineBuffer;
///
/// let mut line = LineBuffer::from_bytes(b"ecxho").unwrap();
/// assert_eq!(line.remove_at(2), Some(b'x'));
/// assert_eq!(line.as_bytes(), b"echo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    pub(crate) bytes: [u8; LINE_BUFFER_SIZE],
    pub(crate) len: usize,
    pub(crate) termination: Termination,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    /// Create an empty, zero-filled line.
    pub fn new() -> Self {
        Self {
            bytes: [ASCII_NUL; LINE_BUFFER_SIZE],
            len: 0,
            termination: Termination::Complete,
        }
    }

    /// Build a complete line from already edited bytes.
    ///
    /// Used to run command lines that do not come from a console, such as
    /// start-up scripts.
    ///
    /// # Errors
    ///
    /// * [`Error::LineTooLong`] - no room left for the terminator
    pub fn from_bytes(line: &[u8]) -> Result<Self, Error> {
        if line.len() >= LINE_BUFFER_SIZE {
            return Err(Error::LineTooLong);
        }

        let mut buffer = Self::new();
        buffer.bytes[..line.len()].copy_from_slice(line);
        buffer.len = line.len();
        Ok(buffer)
    }

    /// Number of content bytes, terminator excluded.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the line holds no content.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The content bytes. After tokenization these include the NUL delimiters.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// How the reader finished this line.
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// How the reader finished this line, as a `Result`.
    ///
    /// # Errors
    ///
    /// * [`Error::LineTooLong`] - the input overran the line and was dropped
    /// * [`Error::ReadError`] - the console failed; the line is partial
    pub fn status(&self) -> Result<(), Error> {
        match self.termination {
            Termination::Complete => Ok(()),
            Termination::TooLong => Err(Error::LineTooLong),
            Termination::DeviceError => Err(Error::ReadError),
        }
    }

    /// Drop all content, leaving a single terminator.
    pub fn clear(&mut self) {
        self.bytes[..self.len].fill(ASCII_NUL);
        self.len = 0;
    }

    /// Remove the byte at `index`, shifting the rest of the content (and
    /// the terminator) one place to the left.
    ///
    /// Returns the removed byte, or `None` when `index` is not inside the
    /// content. This is the only splice operation on a line.
    pub fn remove_at(&mut self, index: usize) -> Option<u8> {
        if index >= self.len {
            return None;
        }

        let removed = self.bytes[index];
        self.bytes.copy_within(index + 1..self.len, index);
        self.len -= 1;
        self.bytes[self.len] = ASCII_NUL;
        Some(removed)
    }
}
