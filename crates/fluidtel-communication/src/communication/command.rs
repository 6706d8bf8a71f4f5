//! Controller commands and their execution
//!
//! A command collects response lines until it decides it is done. The
//! executor owns the link to the controller; it writes the command and feeds
//! it lines until the command completes.

use async_trait::async_trait;
use fluidtel_core::ControllerError;

/// A command sent to a controller
pub trait ControllerCommand: Send + std::fmt::Debug {
    /// The text written to the controller
    fn command(&self) -> &str;

    /// Feed one response line to the command
    fn append_response(&mut self, line: &str);

    /// Check if the command has received its final response
    fn is_done(&self) -> bool;

    /// Check if the command completed successfully
    fn is_ok(&self) -> bool;

    /// Check if the command completed with an error
    fn is_error(&self) -> bool {
        self.is_done() && !self.is_ok()
    }
}

/// Sends commands and waits for them to complete
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Send a command and resolve once it is done
    ///
    /// Implementations do not time out on their own; callers bound the wait.
    async fn execute(&self, command: &mut dyn ControllerCommand) -> Result<(), ControllerError>;
}
