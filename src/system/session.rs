//! Interactive shell session.
//!
//! A [`Session`] owns the console and the executor and runs the classic loop:
//!
//! ```text
//! open console (bounded retry)
//! while running:
//!     write prompt          -- on failure: back off, retry
//!     read line             -- poll with timeout, edit, echo
//!     execute line          -- tokenize, dispatch each command
//!     drop line
//! close console
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use libtash::system::config::Config;
//! use libtash::system::session::Session;
//! use libtash::system::shell::CommandRegistry;
//! # use core::time::Duration;
//! # use libtash::device::{Close, Console, Delay, Open, Poll, Read, Write};
//! # struct Uart;
//! # impl Read for Uart {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl Write for Uart {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Poll for Uart {
//! #     type Error = ();
//! #     fn poll_readable(&mut self, _timeout: Duration) -> Result<bool, Self::Error> { Ok(false) }
//! # }
//! # impl Close for Uart {
//! #     type Error = ();
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Console for Uart {}
//! # struct DevConsole;
//! # impl Open for DevConsole {
//! #     type Console = Uart;
//! #     type Error = ();
//! #     fn open(&mut self) -> Result<Uart, ()> { Ok(Uart) }
//! # }
//! # struct SpinDelay;
//! # impl Delay for SpinDelay { fn delay_us(&mut self, _us: u32) {} }
//!
//! let mut session = Session::open(
//!     &mut DevConsole,
//!     CommandRegistry::new(),
//!     SpinDelay,
//!     Config::default(),
//! )
//! .unwrap();
//!
//! session.run();
//! session.close().unwrap();
//! ```

use super::config::Config;
use super::control::Control;
use super::error::Error;
use super::reader::{read_line, write_all};
use super::shell::{Executor, ShellResult};
use super::tokenizer::execute_line;
use crate::device::{Console, Delay, Open};

#[cfg(feature = "async")]
use super::reader::{read_line_async, write_all_async};
#[cfg(feature = "async")]
use crate::device::{AsyncConsole, AsyncDelay};

/// Open a console, retrying with a back-off.
///
/// Makes [`Config::open_attempts`] attempts and sleeps
/// [`Config::backoff_us`] between them.
///
/// # Errors
///
/// * [`Error::OpenFailed`] - every attempt failed
pub fn open_console<O, D>(opener: &mut O, delay: &mut D, config: &Config) -> Result<O::Console, Error>
where
    O: Open,
    D: Delay,
{
    let attempts = config.open_attempts();

    for attempt in 1..=attempts {
        match opener.open() {
            Ok(console) => {
                debug!("console opened on attempt {}", attempt);
                return Ok(console);
            }
            Err(_) => {
                trace!("console open attempt {} failed", attempt);
                if attempt < attempts {
                    delay.delay_us(config.backoff_us);
                }
            }
        }
    }

    error!("can not open console, tried {} times", attempts);
    Err(Error::OpenFailed)
}

/// A shell bound to one console.
#[derive(Debug)]
pub struct Session<C, E, D> {
    console: C,
    executor: E,
    delay: D,
    config: Config,
    control: Control,
}

impl<C, E, D> Session<C, E, D> {
    /// Wrap an already opened console.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidConfig`] - `config` fails [`Config::validate`]
    pub fn new(console: C, executor: E, delay: D, config: Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self::assemble(console, executor, delay, config))
    }

    fn assemble(console: C, executor: E, delay: D, config: Config) -> Self {
        Self {
            console,
            executor,
            delay,
            config,
            control: Control::new(),
        }
    }

    /// The console the session runs on.
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Mutable access to the console.
    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// The executor commands are dispatched to.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Mutable access to the executor.
    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    /// The session configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The session flag.
    pub fn control(&self) -> &Control {
        &self.control
    }
}

impl<C, E, D> Session<C, E, D>
where
    C: Console,
    E: Executor,
    D: Delay,
{
    /// Validate `config` and open the console through `opener`.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidConfig`] - `config` fails [`Config::validate`]
    /// * [`Error::OpenFailed`] - the console could not be opened
    pub fn open<O>(opener: &mut O, executor: E, mut delay: D, config: Config) -> Result<Self, Error>
    where
        O: Open<Console = C>,
    {
        config.validate()?;
        let console = open_console(opener, &mut delay, &config)?;
        Ok(Self::assemble(console, executor, delay, config))
    }

    /// Run the read-execute loop until a command stops the session.
    ///
    /// Returns the status of the last command that ran.
    pub fn run(&mut self) -> ShellResult {
        let mut status = ShellResult::Ok;
        self.control.start();

        while self.control.is_running() {
            if write_all(&mut self.console, self.config.prompt.as_bytes()).is_err() {
                warn!("prompt is not displayed");
                self.delay.delay_us(self.config.backoff_us);
                continue;
            }

            let mut line = read_line(&mut self.console, &self.config);
            if line.status() == Err(Error::ReadError) {
                warn!("console failed, running partial line of {} byte(s)", line.len());
            }

            trace!("input line of {} byte(s)", line.len());
            status = execute_line(&mut line, &mut self.executor, &mut self.control);
        }

        status
    }

    /// Close the console and end the session.
    ///
    /// # Errors
    ///
    /// * [`Error::CloseFailed`] - the console reported an error on close
    pub fn close(self) -> Result<(), Error> {
        self.console.close().map_err(|_| Error::CloseFailed)
    }
}

#[cfg(feature = "async")]
impl<C, E, D> Session<C, E, D>
where
    C: AsyncConsole,
    E: Executor,
    D: AsyncDelay,
{
    /// Asynchronous counterpart of [`Session::run`].
    pub async fn run_async(&mut self) -> ShellResult {
        let mut status = ShellResult::Ok;
        self.control.start();

        while self.control.is_running() {
            if write_all_async(&mut self.console, self.config.prompt.as_bytes())
                .await
                .is_err()
            {
                warn!("prompt is not displayed");
                self.delay.delay_us(self.config.backoff_us).await;
                continue;
            }

            let mut line = read_line_async(&mut self.console, &self.config).await;
            if line.status() == Err(Error::ReadError) {
                warn!("console failed, running partial line of {} byte(s)", line.len());
            }

            status = execute_line(&mut line, &mut self.executor, &mut self.control);
        }

        status
    }

    /// Asynchronous counterpart of [`Session::close`].
    pub async fn close_async(self) -> Result<(), Error> {
        self.console.close().await.map_err(|_| Error::CloseFailed)
    }
}
