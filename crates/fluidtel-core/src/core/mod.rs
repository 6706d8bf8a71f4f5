//! Notification and cancellation primitives shared by the firmware layer

pub mod cancel;
pub mod message;

pub use cancel::{CancelHandle, CancelSignal};
pub use message::{Message, MessageDispatcher, MessageLevel};
