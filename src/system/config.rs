//! Shell configuration.
//!
//! [`Config::default`] reproduces the fixed tuning of the classic console
//! shell: a 128 byte line, a six second readiness poll and five retries when
//! opening the console. Boards that keep their settings in flash can store
//! them as JSON and load them with [`Config::from_json`]; missing fields fall
//! back to the defaults.
//!
//! ```rust
//! use libtash::system::config::Config;
//!
//! let config = Config::from_json(br#"{"prompt":"> ","echo":false}"#).unwrap();
//! assert_eq!(config.prompt.as_str(), "> ");
//! assert!(!config.echo);
//! assert_eq!(config.max_line_len, 128);
//! ```

use core::time::Duration;

use heapless::String;
use serde::{Deserialize, Serialize};

use super::error::Error;
use super::line::LINE_BUFFER_SIZE;

/// Maximum length of the prompt string in bytes.
pub const PROMPT_MAX: usize = 16;

/// Prompt written before every line.
pub const DEFAULT_PROMPT: &str = "TASH>>";

/// How long a single readiness poll may block, in milliseconds.
pub const DEFAULT_POLL_TIMEOUT_MS: u32 = 6_000;

/// Extra attempts made after the first failed console open.
pub const DEFAULT_OPEN_RETRIES: u8 = 5;

/// Pause between console open attempts and after a failed prompt write.
pub const DEFAULT_BACKOFF_US: u32 = 20;

/// Runtime configuration of a shell session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Literal written to the console before each line is read.
    pub prompt: String<PROMPT_MAX>,
    /// Longest accepted line, terminator included. At most [`LINE_BUFFER_SIZE`].
    pub max_line_len: usize,
    /// Upper bound for one readiness poll on the console.
    pub poll_timeout_ms: u32,
    /// Retries after the first failed attempt to open the console.
    pub open_retries: u8,
    /// Back-off used between open attempts and after prompt write failures.
    pub backoff_us: u32,
    /// Echo accepted characters back to the console.
    pub echo: bool,
}

impl Default for Config {
    fn default() -> Self {
        let mut prompt = String::new();
        // DEFAULT_PROMPT is shorter than PROMPT_MAX.
        let _ = prompt.push_str(DEFAULT_PROMPT);

        Self {
            prompt,
            max_line_len: LINE_BUFFER_SIZE,
            poll_timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
            open_retries: DEFAULT_OPEN_RETRIES,
            backoff_us: DEFAULT_BACKOFF_US,
            echo: true,
        }
    }
}

impl Config {
    /// Parse a configuration from a JSON object and validate it.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidConfig`] - malformed JSON or out-of-range values
    pub fn from_json(json: &[u8]) -> Result<Self, Error> {
        let (config, _) =
            serde_json_core::from_slice::<Config>(json).map_err(|_| Error::InvalidConfig)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value can be honoured by the reader.
    ///
    /// A line needs room for at least one character and its terminator, and
    /// can never exceed the fixed line buffer.
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_line_len < 2 || self.max_line_len > LINE_BUFFER_SIZE {
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }

    /// Readiness poll timeout as a [`Duration`].
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.poll_timeout_ms))
    }

    /// Total number of console open attempts.
    pub fn open_attempts(&self) -> u16 {
        u16::from(self.open_retries) + 1
    }
}
