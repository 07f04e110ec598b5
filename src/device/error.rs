//! Common error types for console devices

/// A common error type for console devices.
///
/// Drivers are free to use their own error types with the [`device`](crate::device)
/// traits; this one covers the usual failure modes of a character device and is
/// simple enough for `no_std` targets.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The device node does not exist or could not be opened.
    NotFound,
    /// An operation was attempted on a console that is not open.
    NotOpen,
    /// An error occurred during a read operation.
    ReadError,
    /// An error occurred during a write operation.
    WriteError,
    /// The device is busy, try again later.
    Busy,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::NotFound => defmt::write!(f, "NotFound"),
            Error::NotOpen => defmt::write!(f, "NotOpen"),
            Error::ReadError => defmt::write!(f, "ReadError"),
            Error::WriteError => defmt::write!(f, "WriteError"),
            Error::Busy => defmt::write!(f, "Busy"),
        }
    }
}
