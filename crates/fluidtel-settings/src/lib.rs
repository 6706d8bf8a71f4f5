//! FluidTel Settings Crate
//!
//! Handles application configuration: status query retry parameters,
//! reporting units, and logging preferences.

pub mod config;

pub use config::{Config, LoggingSettings, QuerySettings, ReportingSettings};
