//! Firmware support
//!
//! - `grbl`: helpers shared by GRBL-compatible dialects
//! - `fluidnc`: FluidNC telemetry, capabilities and status queries

pub mod capabilities;
pub mod firmware_version;
pub mod fluidnc;
pub mod grbl;
pub mod settings;

pub use capabilities::{Capability, CapabilitySet};
pub use firmware_version::SemanticVersion;
pub use settings::{FirmwareSetting, FirmwareSettingsProvider};
