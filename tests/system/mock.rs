use core::time::Duration;
use std::collections::VecDeque;

use libtash::device::error::Error;
use libtash::device::{Close, Console, Delay, Open, Poll, Read, Write};
use libtash::system::{Args, Control, Executor, ShellResult};

/// What the console does on the next poll.
#[derive(Debug, Clone)]
pub enum Event {
    /// The poll times out.
    Idle,
    /// The poll succeeds and the next read returns these bytes.
    Data(Vec<u8>),
    /// The poll succeeds and the next read fails.
    ReadError,
    /// The poll itself fails.
    PollError,
}

pub fn data(bytes: &[u8]) -> Event {
    Event::Data(bytes.to_vec())
}

/// Scripted console. Panics when the script runs dry so a test can never
/// spin forever in the reader.
#[derive(Debug, Default)]
pub struct MockConsole {
    script: VecDeque<Event>,
    pending: Option<Event>,
    pub output: Vec<u8>,
    pub polls: usize,
    pub last_timeout: Option<Duration>,
    pub fail_writes: usize,
    pub fail_close: bool,
}

impl MockConsole {
    pub fn new(script: impl IntoIterator<Item = Event>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Read for MockConsole {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        match self.pending.take() {
            Some(Event::Data(bytes)) => {
                let count = bytes.len().min(buf.len());
                buf[..count].copy_from_slice(&bytes[..count]);
                if count < bytes.len() {
                    self.script.push_front(Event::Data(bytes[count..].to_vec()));
                }
                Ok(count)
            }
            Some(Event::ReadError) => Err(Error::ReadError),
            _ => Ok(0),
        }
    }
}

impl Write for MockConsole {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.fail_writes > 0 {
            self.fail_writes -= 1;
            return Err(Error::WriteError);
        }
        self.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Poll for MockConsole {
    type Error = Error;

    fn poll_readable(&mut self, timeout: Duration) -> Result<bool, Self::Error> {
        self.polls += 1;
        self.last_timeout = Some(timeout);
        match self.script.pop_front() {
            Some(Event::Idle) => Ok(false),
            Some(Event::PollError) => Err(Error::ReadError),
            Some(event) => {
                self.pending = Some(event);
                Ok(true)
            }
            None => panic!("console script exhausted"),
        }
    }
}

impl Close for MockConsole {
    type Error = Error;

    fn close(self) -> Result<(), Self::Error> {
        if self.fail_close {
            Err(Error::NotOpen)
        } else {
            Ok(())
        }
    }
}

impl Console for MockConsole {}

/// Opener that fails a fixed number of times before handing out its console.
#[derive(Debug, Default)]
pub struct MockOpener {
    pub failures: usize,
    pub attempts: usize,
    pub console: Option<MockConsole>,
}

impl MockOpener {
    pub fn new(failures: usize, console: MockConsole) -> Self {
        Self {
            failures,
            attempts: 0,
            console: Some(console),
        }
    }
}

impl Open for MockOpener {
    type Console = MockConsole;
    type Error = Error;

    fn open(&mut self) -> Result<Self::Console, Self::Error> {
        self.attempts += 1;
        if self.attempts <= self.failures {
            return Err(Error::NotFound);
        }
        self.console.take().ok_or(Error::Busy)
    }
}

/// Delay that only records what it was asked to do.
#[derive(Debug, Default)]
pub struct MockDelay {
    pub calls: Vec<u32>,
}

impl Delay for MockDelay {
    fn delay_us(&mut self, us: u32) {
        self.calls.push(us);
    }
}

/// Executor that records every argument vector it receives.
#[derive(Debug)]
pub struct Recorder {
    pub calls: Vec<Vec<String>>,
    pub status: ShellResult,
    pub stop_on: Option<&'static str>,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            status: ShellResult::Ok,
            stop_on: Some("exit"),
        }
    }

    pub fn with_status(status: ShellResult) -> Self {
        Self {
            status,
            ..Self::new()
        }
    }
}

impl Executor for Recorder {
    fn execute(&mut self, args: &Args<'_>, control: &mut Control) -> ShellResult {
        assert!(args.argc() >= 1, "executor called without arguments");

        let argv: Vec<String> = args
            .iter()
            .map(|arg| String::from_utf8_lossy(arg).into_owned())
            .collect();
        if self.stop_on.is_some_and(|name| argv[0] == name) {
            control.stop();
        }
        self.calls.push(argv);
        self.status
    }
}

pub fn calls(expected: &[&[&str]]) -> Vec<Vec<String>> {
    expected
        .iter()
        .map(|argv| argv.iter().map(|arg| arg.to_string()).collect())
        .collect()
}

#[cfg(feature = "async")]
mod async_impls {
    use super::*;
    use libtash::device::{AsyncClose, AsyncConsole, AsyncDelay, AsyncPoll, AsyncRead, AsyncWrite};

    // The scripted console never blocks, so the async side reuses the sync one.
    impl AsyncRead for MockConsole {
        type Error = Error;
        async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            Read::read(self, buf)
        }
    }

    impl AsyncWrite for MockConsole {
        type Error = Error;
        async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            Write::write(self, buf)
        }
        async fn flush(&mut self) -> Result<(), Self::Error> {
            Write::flush(self)
        }
    }

    impl AsyncPoll for MockConsole {
        type Error = Error;
        async fn poll_readable(&mut self, timeout: Duration) -> Result<bool, Self::Error> {
            Poll::poll_readable(self, timeout)
        }
    }

    impl AsyncClose for MockConsole {
        type Error = Error;
        async fn close(self) -> Result<(), Self::Error> {
            Close::close(self)
        }
    }

    impl AsyncConsole for MockConsole {}

    impl AsyncDelay for MockDelay {
        async fn delay_us(&mut self, us: u32) {
            self.calls.push(us);
        }
    }
}
