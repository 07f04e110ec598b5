//! Command shell for embedded consoles.
//!
//! The shell is built from small pieces that can be used on their own:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Line Reader   │───▶│   Tokenizer /   │───▶│    Executor     │
//! │ (poll, edit,    │    │   Dispatcher    │    │ (CommandRegistry│
//! │  echo)          │    │ (in-place FSM)  │    │  or your own)   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!          │                       │                       │
//!          ▼                       ▼                       ▼
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   LineBuffer    │    │   Args (spans   │    │    Control      │
//! │ (fixed, owned)  │    │   into line)    │    │ (session flag)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - **[`reader`]**: reads one edited line from a console
//! - **[`tokenizer`]**: splits a line into commands and arguments in place
//! - **[`shell`]**: the [`Executor`](shell::Executor) seam and a command registry
//! - **[`session`]**: the prompt/read/execute loop on an opened console
//! - **[`config`]**: runtime settings, loadable from JSON
//!
//! # Usage
//!
//! Running a script line without a console:
//!
//! ```rust
//! use libtash::system::control::Control;
//! use libtash::system::line::LineBuffer;
//! use libtash::system::shell::{CommandRegistry, ShellResult};
//! use libtash::system::tokenizer::execute_line;
//!
//! let mut registry = CommandRegistry::new();
//! registry.register_command("status", "Show device status", |_, _| ShellResult::Ok);
//!
//! let mut line = LineBuffer::from_bytes(b"status # boot check").unwrap();
//! let status = execute_line(&mut line, &mut registry, &mut Control::new());
//! assert_eq!(status, ShellResult::Ok);
//! ```

pub mod config;
pub mod control;
pub mod error;
pub mod line;
pub mod reader;
pub mod session;
pub mod shell;
pub mod tokenizer;


pub use config::Config;
pub use control::Control;
pub use error::Error;
pub use line::{LineBuffer, Termination};
pub use reader::read_line;
pub use session::{Session, open_console};
pub use shell::{Command, CommandRegistry, Executor, ShellResult};
pub use tokenizer::{Args, Commands, execute_line};
