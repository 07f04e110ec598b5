//! Common error types for shell operations

/// A common error type for the shell.
///
/// Only [`Error::OpenFailed`] is fatal to a session. The remaining variants
/// describe conditions the shell recovers from on its own; they are surfaced
/// to callers that drive the reader or tokenizer directly.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The console could not be opened within the retry budget.
    OpenFailed,
    /// The console failed while a line was being read.
    ReadError,
    /// A write to the console failed or accepted no bytes.
    WriteError,
    /// The console could not be closed cleanly.
    CloseFailed,
    /// A command ended inside a double-quoted argument.
    UnclosedQuote,
    /// The line does not fit the line buffer.
    LineTooLong,
    /// A configuration value is out of range or could not be parsed.
    InvalidConfig,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::OpenFailed => defmt::write!(f, "OpenFailed"),
            Error::ReadError => defmt::write!(f, "ReadError"),
            Error::WriteError => defmt::write!(f, "WriteError"),
            Error::CloseFailed => defmt::write!(f, "CloseFailed"),
            Error::UnclosedQuote => defmt::write!(f, "UnclosedQuote"),
            Error::LineTooLong => defmt::write!(f, "LineTooLong"),
            Error::InvalidConfig => defmt::write!(f, "InvalidConfig"),
        }
    }
}
