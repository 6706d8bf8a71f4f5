//! FluidNC Firmware Support
//!
//! FluidNC is a GRBL-derived firmware for ESP32 controllers. It reports
//! status in the GRBL 1.1 format and announces itself with a welcome banner
//! carrying its variant and semantic version.

pub mod capabilities;
pub mod commands;
pub mod frames;
pub mod query;
pub mod settings;
pub mod status_parser;
pub mod tracker;

pub use capabilities::{detect_capabilities, BASE_CAPABILITIES, FILE_SYSTEM_MIN_VERSION};
pub use commands::GetStatusCommand;
pub use frames::{
    is_message, is_welcome, parse_message, parse_variant, parse_version, FluidNCFrame,
    WelcomeMessage,
};
pub use query::{fetching_status_message, query_for_status_report};
pub use settings::FluidNCSettings;
pub use status_parser::{
    merge_status, parse_status, resolve_positions, ResolvedPositions, StatusField, StatusReport,
};
pub use tracker::StatusTracker;
