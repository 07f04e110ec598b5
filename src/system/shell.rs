//! Command execution.
//!
//! The tokenizer hands every parsed command to an [`Executor`]. Firmware with
//! its own command framework implements the trait directly; everyone else can
//! use [`CommandRegistry`], a fixed-capacity table of named commands with
//! built-in help, listing and `exit`.
//!
//! # Usage Examples
//!
//! ```rust
//! use libtash::system::control::Control;
//! use libtash::system::line::LineBuffer;
//! use libtash::system::shell::{CommandRegistry, ShellResult};
//! use libtash::system::tokenizer::execute_line;
//!
//! fn hello_command(argc: usize, argv: &[&str]) -> ShellResult {
//!     if argc > 1 {
//!         println!("Hello, {}!", argv[1]);
//!     } else {
//!         println!("Hello, World!");
//!     }
//!     ShellResult::Ok
//! }
//!
//! let mut registry = CommandRegistry::new();
//! registry.set_output_function(|text| print!("{}", text));
//! registry.register_command("hello", "Say hello", hello_command);
//!
//! let mut control = Control::new();
//! let mut line = LineBuffer::from_bytes(b"hello world; exit").unwrap();
//! assert_eq!(execute_line(&mut line, &mut registry, &mut control), ShellResult::Ok);
//! assert!(!control.is_running());
//! ```

use heapless::Vec;

use super::control::Control;
use super::tokenizer::Args;

/// Maximum number of dynamic commands that can be registered.
///
/// Static commands registered with
/// [`register_static_commands`](CommandRegistry::register_static_commands)
/// don't count against this limit.
pub const MAX_DYNAMIC_COMMANDS: usize = 32;

/// Status returned by commands and passed through the shell unchanged.
///
/// # Examples
///
/// ```rust
/// use libtash::system::shell::ShellResult;
///
/// fn example_command(argc: usize, argv: &[&str]) -> ShellResult {
///     if argc < 2 {
///         return ShellResult::InvalidParameter;
///     }
///
///     if argv[1] == "error" {
///         return ShellResult::Failed(-5);
///     }
///
///     ShellResult::Ok
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellResult {
    /// Operation completed successfully.
    Ok,
    /// Invalid parameter was provided to a command or shell operation.
    InvalidParameter,
    /// Insufficient memory to complete the operation.
    OutOfMemory,
    /// No command with the requested name exists.
    NotFound,
    /// The command failed with an implementation-defined code.
    Failed(i32),
}

#[cfg(feature = "defmt")]
impl defmt::Format for ShellResult {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ShellResult::Ok => defmt::write!(f, "Ok"),
            ShellResult::InvalidParameter => defmt::write!(f, "InvalidParameter"),
            ShellResult::OutOfMemory => defmt::write!(f, "OutOfMemory"),
            ShellResult::NotFound => defmt::write!(f, "NotFound"),
            ShellResult::Failed(code) => defmt::write!(f, "Failed({})", code),
        }
    }
}

/// Receiver of parsed commands.
///
/// The shell guarantees `args.argc() >= 1` for every call. `control` lets a
/// command end the session.
pub trait Executor {
    /// Run one command and report its status.
    fn execute(&mut self, args: &Args<'_>, control: &mut Control) -> ShellResult;
}

impl<F> Executor for F
where
    F: FnMut(&Args<'_>, &mut Control) -> ShellResult,
{
    fn execute(&mut self, args: &Args<'_>, control: &mut Control) -> ShellResult {
        self(args, control)
    }
}

/// Function signature for command handlers.
///
/// Command handlers receive the argument count and a slice of argument strings.
/// The first argument (`argv[0]`) is always the command name itself.
///
/// # Examples
///
/// ```rust
/// use libtash::system::shell::{ShellResult, CommandFn};
///
/// let echo_command: CommandFn = |argc, argv| {
///     for i in 1..argc {
///         print!("{} ", argv[i]);
///     }
///     println!();
///     ShellResult::Ok
/// };
/// ```
pub type CommandFn = fn(argc: usize, argv: &[&str]) -> ShellResult;

/// Function signature for output handlers.
///
/// Output handlers receive text from the registry (help, listings, errors)
/// and send it to the user, usually the same console the shell runs on.
pub type OutputFn = fn(&str);

/// Command structure containing metadata and handler function.
///
/// # Examples
///
/// ```rust
/// use libtash::system::shell::{Command, ShellResult};
///
/// let reboot = Command {
///     name: "reboot",
///     description: "Restart the device",
///     handler: |_, _| ShellResult::Ok,
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Command {
    /// The command name as typed by the user. Case-sensitive.
    pub name: &'static str,

    /// A brief description shown by `list` and `<name> --help`.
    pub description: &'static str,

    /// The function that implements the command logic.
    pub handler: CommandFn,
}

/// Table-driven [`Executor`].
///
/// Lookup order is dynamic commands, then static commands, then the
/// built-ins (`list`/`help`, `exit`/`quit`), so registered commands can
/// replace a built-in.
#[derive(Debug)]
pub struct CommandRegistry {
    dynamic_commands: Vec<Command, MAX_DYNAMIC_COMMANDS>,
    static_commands: Option<&'static [Command]>,
    output_fn: Option<OutputFn>,
    list_command_enabled: bool,
    exit_command_enabled: bool,
    help_enabled: bool,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Create an empty registry with all built-ins enabled and no output.
    pub fn new() -> Self {
        Self {
            dynamic_commands: Vec::new(),
            static_commands: None,
            output_fn: None,
            list_command_enabled: true,
            exit_command_enabled: true,
            help_enabled: true,
        }
    }

    /// Set the output function for help text and error messages.
    pub fn set_output_function(&mut self, output_fn: OutputFn) -> ShellResult {
        self.output_fn = Some(output_fn);
        ShellResult::Ok
    }

    /// Enable or disable the built-in `list` and `help` commands.
    pub fn set_list_command(&mut self, enabled: bool) {
        self.list_command_enabled = enabled;
    }

    /// Enable or disable the built-in `exit` and `quit` commands.
    pub fn set_exit_command(&mut self, enabled: bool) {
        self.exit_command_enabled = enabled;
    }

    /// Enable or disable `-h`/`--help` handling for every command.
    pub fn set_help(&mut self, enabled: bool) {
        self.help_enabled = enabled;
    }

    /// Register a dynamic command at runtime.
    ///
    /// # Returns
    ///
    /// * [`ShellResult::Ok`] - Command registered successfully
    /// * [`ShellResult::InvalidParameter`] - Empty command name provided
    /// * [`ShellResult::OutOfMemory`] - Maximum dynamic commands exceeded
    pub fn register_command(
        &mut self,
        name: &'static str,
        description: &'static str,
        handler: CommandFn,
    ) -> ShellResult {
        if name.is_empty() {
            return ShellResult::InvalidParameter;
        }

        let command = Command {
            name,
            description,
            handler,
        };

        match self.dynamic_commands.push(command) {
            Ok(()) => ShellResult::Ok,
            Err(_) => ShellResult::OutOfMemory,
        }
    }

    /// Register a table of commands defined at compile time.
    ///
    /// The table is borrowed, not copied, and replaces any previous table.
    pub fn register_static_commands(&mut self, commands: &'static [Command]) -> ShellResult {
        self.static_commands = Some(commands);
        ShellResult::Ok
    }

    /// Number of dynamically registered commands.
    pub fn dynamic_command_count(&self) -> usize {
        self.dynamic_commands.len()
    }

    /// Find a registered command by name.
    pub fn find(&self, name: &str) -> Option<&Command> {
        self.dynamic_commands
            .iter()
            .chain(self.static_commands.unwrap_or(&[]).iter())
            .find(|command| command.name == name)
    }

    fn output(&self, text: &str) {
        if let Some(output_fn) = self.output_fn {
            output_fn(text);
        }
    }

    fn show_command_help(&self, command_name: &str) {
        match self.find(command_name) {
            Some(command) => {
                self.output(command.description);
                self.output("\r\n");
            }
            None => self.output("Command not found.\r\n"),
        }
    }

    fn list_commands(&self) {
        self.output("Available commands:\r\n");

        let registered = self
            .dynamic_commands
            .iter()
            .chain(self.static_commands.unwrap_or(&[]).iter());
        for command in registered {
            self.output(command.name);
            self.output("\t\t");
            self.output(command.description);
            self.output("\r\n");
        }
    }
}

impl Executor for CommandRegistry {
    fn execute(&mut self, args: &Args<'_>, control: &mut Control) -> ShellResult {
        let argv = args.to_argv();
        let argc = argv.len();
        let Some(&command_name) = argv.first() else {
            return ShellResult::InvalidParameter;
        };

        if self.help_enabled && argc == 2 && (argv[1] == "-h" || argv[1] == "--help") {
            self.show_command_help(command_name);
            return ShellResult::Ok;
        }

        if let Some(command) = self.find(command_name) {
            return (command.handler)(argc, &argv);
        }

        match command_name {
            "list" | "help" if self.list_command_enabled => {
                self.list_commands();
                ShellResult::Ok
            }
            "exit" | "quit" if self.exit_command_enabled => {
                debug!("session stop requested");
                control.stop();
                ShellResult::Ok
            }
            _ => {
                if self.list_command_enabled {
                    self.output("Unknown command. Type 'list' to see available commands.\r\n");
                } else {
                    self.output("Unknown command.\r\n");
                }
                ShellResult::NotFound
            }
        }
    }
}
