//! Console device abstraction.
//!
//! The shell talks to its console through a handful of small traits rather
//! than a concrete UART or character-device driver. Any byte-oriented endpoint
//! that can report readability within a timeout can host a shell session.
//!
//! Synchronous traits are always available; their `async` twins are enabled
//! with the `async` feature.

#![allow(missing_docs)]
#![allow(async_fn_in_trait)]
#![deny(unsafe_code)]

use core::time::Duration;

pub mod error;

/// Re-exports of common traits
pub mod prelude {
    #[cfg(feature = "async")]
    pub use super::{AsyncClose, AsyncConsole, AsyncDelay, AsyncPoll, AsyncRead, AsyncWrite};
    pub use super::{Close, Console, Delay, Open, Poll, Read, Write};
}

/// Byte source side of a console.
pub trait Read {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Read whatever is available into `buf`, returning the number of bytes.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Byte sink side of a console.
pub trait Write {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Write bytes to the device, returning how many were accepted.
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Flush the write buffer
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Readiness check with a bounded wait.
pub trait Poll {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Wait at most `timeout` for input. `Ok(false)` means the timeout elapsed.
    fn poll_readable(&mut self, timeout: Duration) -> Result<bool, Self::Error>;
}

/// Release of the device handle.
pub trait Close {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Close the console
    fn close(self) -> Result<(), Self::Error>;
}

/// A console the shell can run on.
pub trait Console: Read + Write + Poll + Close {}

/// Something that can hand out a console, e.g. by opening `/dev/console`.
pub trait Open {
    /// Associated console type
    type Console: Console;
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Make one attempt at opening the console
    fn open(&mut self) -> Result<Self::Console, Self::Error>;
}

/// Busy or scheduler-backed sleeping.
pub trait Delay {
    /// Sleep for at least `us` microseconds
    fn delay_us(&mut self, us: u32);
}

#[cfg(feature = "async")]
pub trait AsyncRead {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Read available bytes asynchronously
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

#[cfg(feature = "async")]
pub trait AsyncWrite {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Write bytes asynchronously
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Flush the write buffer asynchronously
    async fn flush(&mut self) -> Result<(), Self::Error>;
}

#[cfg(feature = "async")]
pub trait AsyncPoll {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Wait at most `timeout` for input asynchronously
    async fn poll_readable(&mut self, timeout: Duration) -> Result<bool, Self::Error>;
}

#[cfg(feature = "async")]
pub trait AsyncClose {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Close the console asynchronously
    async fn close(self) -> Result<(), Self::Error>;
}

#[cfg(feature = "async")]
pub trait AsyncConsole: AsyncRead + AsyncWrite + AsyncPoll + AsyncClose {}

#[cfg(feature = "async")]
pub trait AsyncDelay {
    /// Sleep for at least `us` microseconds asynchronously
    async fn delay_us(&mut self, us: u32);
}
