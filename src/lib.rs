//! # libtash - line shell for embedded consoles
//!
//! An interactive, line-oriented command shell for resource-constrained
//! targets. It reads raw characters from a console, edits them into a line
//! (echo, backspace/delete), splits the line into commands and arguments and
//! dispatches each command to an executor. The crate supports `no_std`
//! environments and never allocates.
//!
//! ## Features
//!
//! ### Line Reader
//! - Timeout-bounded readiness polling, so the shell can share a scheduler
//! - Backspace/delete editing with visual erase, CR to LF normalization
//! - Fixed 128 byte line buffer with an over-length guard
//!
//! ### Tokenizer
//! - Double-quoted arguments and `\"` escapes, stripped in place
//! - Several commands per line separated by `;`
//! - `#` comments
//!
//! ### Session
//! - Console open with bounded retry, prompt, read/execute loop
//! - Table-driven command registry with help, listing and `exit`
//!
//! ## Usage
//!
//! ```rust
//! use libtash::system::{execute_line, CommandRegistry, Control, LineBuffer, ShellResult};
//!
//! fn reboot(_argc: usize, _argv: &[&str]) -> ShellResult {
//!     ShellResult::Ok
//! }
//!
//! let mut registry = CommandRegistry::new();
//! registry.register_command("reboot", "Restart the device", reboot);
//!
//! let mut control = Control::new();
//! let mut line = LineBuffer::from_bytes(br#"reboot "now please"; exit"#).unwrap();
//! execute_line(&mut line, &mut registry, &mut control);
//! assert!(!control.is_running());
//! ```
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `async`: Enable async console traits, `read_line_async` and `Session::run_async`
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
mod fmt;

pub mod device;
pub mod system;
