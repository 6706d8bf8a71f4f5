//! Leveled console messages
//!
//! Provides:
//! - Message levels and the message type
//! - A dispatcher that publishes messages to subscribers

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

/// Severity of a console message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageLevel {
    /// Informational notice
    Info,
    /// Something unexpected that did not stop the operation
    Warning,
    /// An operation failed
    Error,
}

impl fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A leveled text message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Severity
    pub level: MessageLevel,
    /// Message text
    pub text: String,
}

impl Message {
    /// Create a new message
    pub fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.text)
    }
}

/// Message dispatcher for publishing console messages to subscribers
#[derive(Clone)]
pub struct MessageDispatcher {
    /// Broadcast sender channel for messages.
    tx: broadcast::Sender<Message>,
}

impl MessageDispatcher {
    /// Create a new message dispatcher
    ///
    /// # Arguments
    /// * `buffer_size` - Size of the broadcast buffer
    pub fn new(buffer_size: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer_size);
        Self { tx }
    }

    /// Subscribe to messages
    pub fn subscribe(&self) -> broadcast::Receiver<Message> {
        self.tx.subscribe()
    }

    /// Publish a message to all subscribers
    ///
    /// Returns the number of subscribers that received it. A dispatcher with
    /// no subscribers drops the message.
    pub fn dispatch(&self, level: MessageLevel, text: impl Into<String>) -> usize {
        let message = Message::new(level, text);
        tracing::debug!("{}", message);
        self.tx.send(message).unwrap_or(0)
    }
}

impl Default for MessageDispatcher {
    fn default() -> Self {
        Self::new(100)
    }
}
