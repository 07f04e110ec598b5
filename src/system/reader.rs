//! Console line reader.
//!
//! Reading is split in two layers:
//!
//! - [`LineEditor`] is IO-free. Raw bytes are read straight into its spare
//!   capacity and [`LineEditor::commit`] applies the editing rules to them in
//!   place, collecting the echo for the caller to write.
//! - [`read_line`] (and `read_line_async` with the `async` feature) drive an
//!   editor from a console: poll with a timeout, read, commit, echo, repeat.
//!
//! # Editing rules
//!
//! - Backspace (0x08) and delete (0x7F) erase the previous character and echo
//!   `"\b \b"`. On an empty line they do nothing.
//! - Carriage return is stored as line feed.
//! - Any other byte is stored and echoed. Reaching the maximum line length
//!   aborts the line with a notice and an empty buffer.
//! - The line is complete when the last byte of a read chunk is a line feed.
//!   Earlier line feeds in the same chunk stay in the buffer and act as
//!   command separators for the tokenizer.

use core::fmt::Write as _;

use heapless::{String, Vec};

use super::config::Config;
use super::error::Error;
use super::line::{ASCII_NUL, LINE_BUFFER_SIZE, LineBuffer, Termination};
#[cfg(feature = "async")]
use crate::device::{AsyncPoll, AsyncRead, AsyncWrite};
use crate::device::{Poll, Read, Write};

/// ASCII backspace character (0x08).
pub const ASCII_BACKSPACE: u8 = 0x08;
/// ASCII line feed character (0x0A).
pub const ASCII_LF: u8 = 0x0A;
/// ASCII carriage return character (0x0D).
pub const ASCII_CR: u8 = 0x0D;
/// ASCII delete character (0x7F).
pub const ASCII_DEL: u8 = 0x7F;

/// Sequence that visually erases the character left of the cursor.
pub const ERASE_SEQUENCE: &[u8] = b"\x08 \x08";

/// Room for the echo of one full chunk; every input byte echoes at most
/// [`ERASE_SEQUENCE`].
pub const ECHO_CAPACITY: usize = LINE_BUFFER_SIZE * ERASE_SEQUENCE.len();

/// Echo collected while committing a chunk.
pub type Echo = Vec<u8, ECHO_CAPACITY>;

/// Result of committing a chunk to a [`LineEditor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// More input is needed.
    Pending,
    /// A line feed ended the line.
    Complete,
    /// The line hit the maximum length and was discarded.
    TooLong,
}

/// IO-free line editing state.
///
/// # Examples
///
/// ```rust
/// use libtash::system::reader::{Echo, LineEditor, Step};
///
/// let mut editor = LineEditor::new(128, true);
/// let mut echo = Echo::new();
///
/// assert_eq!(editor.feed(b"lx\x08s\r", &mut echo), Step::Complete);
/// assert_eq!(editor.line().as_bytes(), b"ls");
/// assert_eq!(echo.as_slice(), b"lx\x08 \x08s\n");
/// ```
#[derive(Debug, Clone)]
pub struct LineEditor {
    line: LineBuffer,
    pos: usize,
    max_len: usize,
    echo_enabled: bool,
}

impl LineEditor {
    /// Create an editor for lines of at most `max_len` bytes, terminator
    /// included. `max_len` is clamped to [`LINE_BUFFER_SIZE`].
    pub fn new(max_len: usize, echo_enabled: bool) -> Self {
        Self {
            line: LineBuffer::new(),
            pos: 0,
            max_len: max_len.clamp(1, LINE_BUFFER_SIZE),
            echo_enabled,
        }
    }

    /// Create an editor following the reader settings of `config`.
    pub fn with_config(config: &Config) -> Self {
        Self::new(config.max_line_len, config.echo)
    }

    /// Maximum line length this editor enforces.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Current cursor position, i.e. the number of accepted bytes.
    pub fn cursor(&self) -> usize {
        self.pos
    }

    /// The line edited so far.
    pub fn line(&self) -> &LineBuffer {
        &self.line
    }

    /// Capacity still free for the next read. Never empty while the line is
    /// being edited.
    pub fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.line.bytes[self.pos..self.max_len]
    }

    /// Apply the editing rules to the first `count` bytes of the spare
    /// capacity, which the caller has just read into.
    ///
    /// The echo for the chunk is appended to `echo`.
    pub fn commit(&mut self, count: usize, echo: &mut Echo) -> Step {
        let count = count.min(self.max_len - self.pos);
        self.line.len = self.pos + count;

        for _ in 0..count {
            let byte = self.line.bytes[self.pos];

            if byte == ASCII_BACKSPACE || byte == ASCII_DEL {
                if self.pos > 0 {
                    self.pos -= 1;
                    self.line.remove_at(self.pos);
                    self.echo(echo, ERASE_SEQUENCE);
                }
                // The editing byte itself is not part of the line.
                self.line.remove_at(self.pos);
                continue;
            }

            if byte == ASCII_CR {
                self.line.bytes[self.pos] = ASCII_LF;
            }

            let stored = self.line.bytes[self.pos];
            self.echo(echo, &[stored]);

            self.pos += 1;
            if self.pos >= self.max_len {
                self.line.bytes.fill(ASCII_NUL);
                self.line.len = 0;
                self.pos = 0;
                return Step::TooLong;
            }
        }

        if self.pos > 0 && self.line.bytes[self.pos - 1] == ASCII_LF {
            self.pos -= 1;
            self.line.bytes[self.pos] = ASCII_NUL;
            self.line.len = self.pos;
            return Step::Complete;
        }

        Step::Pending
    }

    /// Copy `data` into the spare capacity and commit it.
    ///
    /// Bytes that do not fit are dropped; a chunk that large always ends in
    /// [`Step::TooLong`] anyway.
    pub fn feed(&mut self, data: &[u8], echo: &mut Echo) -> Step {
        let spare = self.spare_mut();
        let count = data.len().min(spare.len());
        spare[..count].copy_from_slice(&data[..count]);
        self.commit(count, echo)
    }

    /// Hand the line over to the caller.
    pub fn finish(mut self, termination: Termination) -> LineBuffer {
        self.line.len = self.pos;
        self.line.termination = termination;
        self.line
    }

    fn echo(&self, echo: &mut Echo, bytes: &[u8]) {
        if self.echo_enabled {
            // ECHO_CAPACITY covers a full chunk.
            let _ = echo.extend_from_slice(bytes);
        }
    }
}

/// Notice written when a line exceeds the maximum length.
fn too_long_notice(max_len: usize) -> String<96> {
    let mut notice = String::new();
    let _ = write!(
        notice,
        "\r\nlength of input is too long, maximum length is {}\r\n",
        max_len
    );
    notice
}

/// Write all of `bytes`. A zero-length write counts as a failure.
pub(crate) fn write_all<W: Write>(device: &mut W, mut bytes: &[u8]) -> Result<(), Error> {
    while !bytes.is_empty() {
        match device.write(bytes) {
            Ok(0) | Err(_) => return Err(Error::WriteError),
            Ok(n) => bytes = &bytes[n.min(bytes.len())..],
        }
    }
    Ok(())
}

fn send_echo<W: Write>(device: &mut W, echo: &mut Echo) {
    if !echo.is_empty() && write_all(device, echo).is_err() {
        warn!("echo failed");
    }
    echo.clear();
}

/// Read one line from `console`.
///
/// Waits up to [`Config::poll_timeout`] at a time for input and simply polls
/// again when nothing arrives, so the call only returns once a line feed,
/// an over-long line or a device failure ends the line. Line content
/// problems never surface as errors; check [`LineBuffer::termination`].
pub fn read_line<C>(console: &mut C, config: &Config) -> LineBuffer
where
    C: Read + Write + Poll,
{
    let mut editor = LineEditor::with_config(config);
    let mut echo = Echo::new();

    loop {
        match console.poll_readable(config.poll_timeout()) {
            Ok(true) => {}
            Ok(false) => {
                trace!("console idle, polling again");
                continue;
            }
            Err(_) => {
                error!("can not poll console");
                return editor.finish(Termination::DeviceError);
            }
        }

        let count = match console.read(editor.spare_mut()) {
            Ok(count) => count,
            Err(_) => {
                error!("can not read console");
                return editor.finish(Termination::DeviceError);
            }
        };

        let step = editor.commit(count, &mut echo);
        send_echo(console, &mut echo);

        match step {
            Step::Pending => {}
            Step::Complete => return editor.finish(Termination::Complete),
            Step::TooLong => {
                warn!("input line too long, maximum length is {}", editor.max_len());
                let notice = too_long_notice(editor.max_len());
                if write_all(console, notice.as_bytes()).is_err() {
                    warn!("too-long notice not displayed");
                }
                return editor.finish(Termination::TooLong);
            }
        }
    }
}

#[cfg(feature = "async")]
pub(crate) async fn write_all_async<W: AsyncWrite>(
    device: &mut W,
    mut bytes: &[u8],
) -> Result<(), Error> {
    while !bytes.is_empty() {
        match device.write(bytes).await {
            Ok(0) | Err(_) => return Err(Error::WriteError),
            Ok(n) => bytes = &bytes[n.min(bytes.len())..],
        }
    }
    Ok(())
}

/// Asynchronous counterpart of [`read_line`].
///
/// The timeout-bounded poll is awaited, which lets other tasks on the same
/// executor run while the console is idle.
#[cfg(feature = "async")]
pub async fn read_line_async<C>(console: &mut C, config: &Config) -> LineBuffer
where
    C: AsyncRead + AsyncWrite + AsyncPoll,
{
    let mut editor = LineEditor::with_config(config);
    let mut echo = Echo::new();

    loop {
        match console.poll_readable(config.poll_timeout()).await {
            Ok(true) => {}
            Ok(false) => continue,
            Err(_) => {
                error!("can not poll console");
                return editor.finish(Termination::DeviceError);
            }
        }

        let count = match console.read(editor.spare_mut()).await {
            Ok(count) => count,
            Err(_) => {
                error!("can not read console");
                return editor.finish(Termination::DeviceError);
            }
        };

        let step = editor.commit(count, &mut echo);
        if !echo.is_empty() && write_all_async(console, &echo).await.is_err() {
            warn!("echo failed");
        }
        echo.clear();

        match step {
            Step::Pending => {}
            Step::Complete => return editor.finish(Termination::Complete),
            Step::TooLong => {
                warn!("input line too long, maximum length is {}", editor.max_len());
                let notice = too_long_notice(editor.max_len());
                if write_all_async(console, notice.as_bytes()).await.is_err() {
                    warn!("too-long notice not displayed");
                }
                return editor.finish(Termination::TooLong);
            }
        }
    }
}
