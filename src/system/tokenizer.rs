//! In-place command line tokenizer and dispatcher.
//!
//! A completed [`LineBuffer`] is split into commands and arguments without a
//! second buffer. Token boundaries are marked by writing NUL bytes into the
//! line, and quote decoration is spliced out with
//! [`LineBuffer::remove_at`]. The resulting [`Args`] are spans into the line.
//!
//! # Grammar
//!
//! ```text
//! echo "a b" c          # ["echo", "a b", "c"]
//! echo a\"b             # ["echo", "a\"b"]
//! echo 1; echo 2        # two commands
//! echo hidden # gone    # ["echo", "hidden"], the rest is a comment
//! ```
//!
//! - Spaces separate arguments outside of quotes.
//! - `"` opens or closes a quoted section anywhere in an argument; inside it
//!   spaces, `;`, `#` and line feeds are ordinary characters.
//! - `\"` yields a literal quote; other backslashes are kept as is.
//! - `;` and line feed end a command. More commands may follow on the line.
//! - `#` at the start of an argument comments out the rest of the line.
//!
//! A command that ends inside a quoted section is dropped. At most
//! [`ARGS_MAX`] arguments are collected per command; once the vector is full
//! the last argument is finished and the rest of the line, later commands
//! included, is ignored.

use heapless::Vec;

use super::control::Control;
use super::error::Error;
use super::line::{ASCII_NUL, LineBuffer};
use super::reader::ASCII_LF;
use super::shell::{Executor, ShellResult};

/// Size of the argument vector, including the slot reserved for the null
/// marker that ends it.
pub const TOKEN_MAX: usize = 32;

/// Maximum number of arguments in one command.
pub const ARGS_MAX: usize = TOKEN_MAX - 1;

/// ASCII space character (0x20).
pub const ASCII_SPACE: u8 = 0x20;
/// ASCII double quote character (0x22).
pub const ASCII_QUOTE: u8 = b'"';
/// ASCII hash character (0x23), starts a comment.
pub const ASCII_HASH: u8 = b'#';
/// ASCII semicolon (0x3B), separates commands.
pub const ASCII_SEMICOLON: u8 = b';';
/// ASCII backslash (0x5C), escapes a double quote.
pub const ASCII_BACKSLASH: u8 = b'\\';

/// Position of the scanner relative to arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Between arguments.
    Void,
    /// Inside an unquoted part of an argument.
    Word,
    /// Inside a double-quoted part of an argument.
    Quote,
}

/// Location of one argument inside the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Number of bytes, terminator excluded.
    pub len: usize,
}

/// The argument vector of one command.
///
/// `Args` borrows the line it was cut from, so it can not outlive the line
/// or survive the next call to [`Commands::next_command`].
#[derive(Debug, Clone)]
pub struct Args<'a> {
    line: &'a [u8],
    spans: Vec<Span, ARGS_MAX>,
}

impl<'a> Args<'a> {
    /// Number of arguments, command name included.
    pub fn argc(&self) -> usize {
        self.spans.len()
    }

    /// Whether the command has no arguments at all.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Raw bytes of argument `index`.
    pub fn bytes(&self, index: usize) -> Option<&'a [u8]> {
        let span = self.spans.get(index)?;
        self.line.get(span.start..span.start + span.len)
    }

    /// Argument `index` as text, `None` when out of range or not UTF-8.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.bytes(index).and_then(|arg| core::str::from_utf8(arg).ok())
    }

    /// The spans backing the arguments.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Iterate over the raw arguments.
    pub fn iter(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        (0..self.argc()).filter_map(move |index| self.bytes(index))
    }

    /// Arguments as an `argv` slice. Arguments that are not valid UTF-8
    /// become empty strings.
    pub fn to_argv(&self) -> Vec<&'a str, ARGS_MAX> {
        let mut argv = Vec::new();
        for index in 0..self.argc() {
            // spans never exceeds ARGS_MAX
            let _ = argv.push(self.get(index).unwrap_or(""));
        }
        argv
    }
}

/// Lending cursor over the commands of one line.
///
/// # Examples
///
/// ```rust
/// use libtash::system::line::LineBuffer;
/// use libtash::system::tokenizer::Commands;
///
/// let mut line = LineBuffer::from_bytes(br#"echo "a b" c; ls"#).unwrap();
/// let mut commands = Commands::new(&mut line);
///
/// let args = commands.next_command().unwrap().unwrap();
/// assert_eq!(args.to_argv().as_slice(), &["echo", "a b", "c"]);
///
/// let args = commands.next_command().unwrap().unwrap();
/// assert_eq!(args.to_argv().as_slice(), &["ls"]);
///
/// assert!(commands.next_command().is_none());
/// ```
#[derive(Debug)]
pub struct Commands<'a> {
    line: &'a mut LineBuffer,
    cursor: usize,
    finished: bool,
}

impl<'a> Commands<'a> {
    /// Start tokenizing `line` from its first byte.
    pub fn new(line: &'a mut LineBuffer) -> Self {
        Self {
            line,
            cursor: 0,
            finished: false,
        }
    }

    fn at_end(&self, index: usize) -> bool {
        index >= self.line.len || self.line.bytes[index] == ASCII_NUL
    }

    fn escaped(&self, index: usize) -> bool {
        index > 0 && self.line.bytes[index - 1] == ASCII_BACKSLASH
    }

    /// Tokenize the next command.
    ///
    /// Returns `None` once the line is used up. A command may come back with
    /// no arguments (blank segment, comment); callers skip those. A command
    /// that ends inside quotes yields [`Error::UnclosedQuote`].
    pub fn next_command(&mut self) -> Option<Result<Args<'_>, Error>> {
        if self.finished || self.at_end(self.cursor) {
            self.finished = true;
            return None;
        }

        let mut state = State::Void;
        let mut starts: Vec<usize, ARGS_MAX> = Vec::new();
        let mut index = self.cursor;

        loop {
            if self.at_end(index) {
                self.finished = true;
                break;
            }

            let byte = self.line.bytes[index];
            match state {
                State::Void => match byte {
                    ASCII_SPACE => {}
                    ASCII_HASH => {
                        self.line.bytes[index] = ASCII_NUL;
                        if let Some(next) = self.line.bytes.get_mut(index + 1) {
                            *next = ASCII_NUL;
                        }
                        self.finished = true;
                        break;
                    }
                    ASCII_LF | ASCII_SEMICOLON => {
                        self.line.bytes[index] = ASCII_NUL;
                        index += 1;
                        break;
                    }
                    _ => {
                        let start = if byte == ASCII_QUOTE { index + 1 } else { index };
                        if starts.push(start).is_err() {
                            warn!("too many arguments, maximum is {}", ARGS_MAX);
                            break;
                        }
                        if starts.is_full() {
                            // The last argument is still scanned; nothing after
                            // this command is.
                            self.finished = true;
                        }
                        state = if byte == ASCII_QUOTE {
                            State::Quote
                        } else {
                            State::Word
                        };
                    }
                },
                State::Quote => {
                    if byte == ASCII_QUOTE {
                        if self.escaped(index) {
                            // The quote slides onto the backslash and is kept.
                            self.line.remove_at(index - 1);
                        } else {
                            self.line.remove_at(index);
                            state = State::Word;
                        }
                        continue;
                    }
                }
                State::Word => match byte {
                    ASCII_SPACE => {
                        self.line.bytes[index] = ASCII_NUL;
                        state = State::Void;
                    }
                    ASCII_QUOTE => {
                        if self.escaped(index) {
                            self.line.remove_at(index - 1);
                        } else {
                            self.line.remove_at(index);
                            state = State::Quote;
                        }
                        continue;
                    }
                    ASCII_LF | ASCII_SEMICOLON => {
                        self.line.bytes[index] = ASCII_NUL;
                        index += 1;
                        break;
                    }
                    _ => {}
                },
            }

            index += 1;
        }

        self.cursor = index;

        if state == State::Quote {
            warn!("unclosed double quotation mark");
            return Some(Err(Error::UnclosedQuote));
        }

        let line: &[u8] = self.line.as_bytes();
        let spans = starts
            .iter()
            .map(|&start| {
                let start = start.min(line.len());
                let len = line[start..]
                    .iter()
                    .position(|&byte| byte == ASCII_NUL)
                    .unwrap_or(line.len() - start);
                Span { start, len }
            })
            .collect();

        Some(Ok(Args { line, spans }))
    }
}

/// Tokenize `line` and hand every non-empty command to `executor`.
///
/// Returns the status of the last executed command, or [`ShellResult::Ok`]
/// when nothing ran. Parse failures drop the affected command and never
/// surface here.
pub fn execute_line<E>(line: &mut LineBuffer, executor: &mut E, control: &mut Control) -> ShellResult
where
    E: Executor + ?Sized,
{
    let mut status = ShellResult::Ok;
    let mut commands = Commands::new(line);

    while let Some(command) = commands.next_command() {
        match command {
            Ok(args) if args.is_empty() => {}
            Ok(args) => {
                debug!("dispatching command with {} argument(s)", args.argc());
                status = executor.execute(&args, control);
            }
            Err(_) => {}
        }
    }

    status
}
