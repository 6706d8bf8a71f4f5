//! # FluidTel
//!
//! Interprets the telemetry a FluidNC controller emits over its serial link:
//! - Status reports merged into incrementally updated snapshots
//! - Welcome banners carrying firmware identity and version
//! - `[MSG:...]` frames
//! - Capability detection from firmware version and settings
//! - A retrying status query protocol
//!
//! ## Architecture
//!
//! FluidTel is organized as a workspace with multiple crates:
//!
//! 1. **fluidtel-core** - Positions, states, status snapshots, errors, messages
//! 2. **fluidtel-communication** - FluidNC parsing, capabilities, command retry
//! 3. **fluidtel-settings** - Configuration files
//! 4. **fluidtel** - Logging setup and the replay CLI

pub mod replay;

pub use fluidtel_communication::firmware;
pub use fluidtel_core::data;

pub use fluidtel_core::{
    AccessoryState, AccessoryStates, CancelHandle, CancelSignal, ControllerError,
    ControllerState, ControllerStatus, EnabledPins, Error, FirmwareError, Message,
    MessageDispatcher, MessageLevel, OverridePercents, Pin, Position, Result, Units,
};

pub use fluidtel_communication::{
    detect_capabilities, parse_status, query_for_status_report, send_and_wait_with_retry,
    Capability, CapabilitySet, CommandExecutor, ControllerCommand, FirmwareSetting,
    FirmwareSettingsProvider, FluidNCFrame, FluidNCSettings, GetStatusCommand, RetryPolicy,
    SemanticVersion, StatusTracker, WelcomeMessage,
};

pub use fluidtel_settings::{Config, LoggingSettings, QuerySettings, ReportingSettings};

pub use replay::{replay, ReplaySummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting on stderr
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with(&LoggingSettings::default())
}

/// Initialize logging from configured preferences
///
/// `RUST_LOG` takes precedence over `settings.level`. Logs go to stderr so
/// that stdout stays free for command output.
pub fn init_logging_with(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&settings.level))?;

    if settings.json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_line_number(true)
            .json();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
