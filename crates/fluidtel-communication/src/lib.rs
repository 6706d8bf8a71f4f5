//! # FluidTel Communication
//!
//! Firmware telemetry for FluidNC controllers: frame classification, welcome
//! banner parsing, status report parsing and merging, capability detection,
//! and the retrying status query protocol.

pub mod communication;
pub mod firmware;

pub use communication::{
    send_and_wait_with_retry, CommandExecutor, ControllerCommand, RetryPolicy,
};

pub use firmware::fluidnc::{
    detect_capabilities, parse_status, query_for_status_report, FluidNCFrame, FluidNCSettings,
    GetStatusCommand, StatusTracker, WelcomeMessage,
};
pub use firmware::{
    Capability, CapabilitySet, FirmwareSetting, FirmwareSettingsProvider, SemanticVersion,
};
