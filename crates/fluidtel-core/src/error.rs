//! Error handling for FluidTel
//!
//! Provides error types for the layers of the library:
//! - Controller errors (command execution and the status query protocol)
//! - Firmware errors (telemetry parsing and firmware settings)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Controller error type
///
/// Represents errors raised while sending commands to a controller and
/// waiting for them to complete.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// A command attempt did not complete in time
    #[error("Controller operation timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// The waiting caller was cancelled
    #[error("Interrupted while waiting for the controller")]
    Interrupted,

    /// Every retry attempt failed
    #[error("Command did not complete after {attempts} attempts")]
    RetriesExhausted {
        /// Number of attempts made.
        attempts: u32,
    },
}

/// Firmware error type
///
/// Represents errors specific to firmware telemetry and settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FirmwareError {
    /// Version string is not a `major.minor.patch` triple
    #[error("Invalid firmware version: {version}")]
    InvalidVersion {
        /// The rejected version text.
        version: String,
    },

    /// A status report field could not be parsed
    #[error("Invalid {field} field: {reason}")]
    InvalidField {
        /// The field prefix, e.g. `MPos`.
        field: String,
        /// The reason the payload was rejected.
        reason: String,
    },

    /// Firmware settings could not be read
    #[error("Firmware settings unavailable: {reason}")]
    SettingsUnavailable {
        /// The reason the settings could not be read.
        reason: String,
    },

    /// Settings not available
    #[error("Setting {setting} not available")]
    SettingNotAvailable {
        /// The setting that is not available.
        setting: String,
    },
}

impl FirmwareError {
    /// Shorthand for a field-level parse failure
    pub fn invalid_field(field: &str, reason: impl Into<String>) -> Self {
        FirmwareError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Main error type for FluidTel
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Controller error
    #[error(transparent)]
    Controller(#[from] ControllerError),

    /// Firmware error
    #[error(transparent)]
    Firmware(#[from] FirmwareError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
