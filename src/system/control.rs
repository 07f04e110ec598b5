//! Session flag.

/// Explicit session state shared between the shell loop and the commands it
/// runs.
///
/// The loop checks [`Control::is_running`] once per completed line; a command
/// such as `exit` calls [`Control::stop`] to end the session after the
/// current line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    running: bool,
}

impl Default for Control {
    fn default() -> Self {
        Self::new()
    }
}

impl Control {
    /// A running session.
    pub fn new() -> Self {
        Self { running: true }
    }

    /// Whether the loop should read another line.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Request shutdown once the current line has been dispatched.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub(crate) fn start(&mut self) {
        self.running = true;
    }
}
