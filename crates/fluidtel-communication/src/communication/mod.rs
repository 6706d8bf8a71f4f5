//! Controller command layer
//!
//! Commands, the executor trait that delivers them, and the bounded retry
//! combinator built on top.

pub mod command;
pub mod retry;

pub use command::{CommandExecutor, ControllerCommand};
pub use retry::{send_and_wait_with_retry, RetryPolicy};
