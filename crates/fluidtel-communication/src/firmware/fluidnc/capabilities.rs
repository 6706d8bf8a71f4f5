//! FluidNC capability detection
//!
//! Derives the capability set from the firmware version and a snapshot of
//! the firmware settings.

use super::super::capabilities::{Capability, CapabilitySet};
use super::super::firmware_version::SemanticVersion;
use super::super::settings::FirmwareSettingsProvider;
use fluidtel_core::FirmwareError;

/// First FluidNC release with file system commands
pub const FILE_SYSTEM_MIN_VERSION: SemanticVersion = SemanticVersion::new(3, 5, 2);

/// Capabilities every FluidNC controller supports
pub const BASE_CAPABILITIES: [Capability; 6] = [
    Capability::Jogging,
    Capability::ReturnToZero,
    Capability::ContinuousJogging,
    Capability::Homing,
    Capability::FirmwareSettings,
    Capability::Overrides,
];

/// Compute the capabilities of a FluidNC controller
///
/// Settings-derived capabilities are best-effort: if the provider fails,
/// soft limits and the per-axis capabilities are left out and everything
/// else is still detected. The two settings reads form one block, so a failed
/// soft-limit read also skips the axis scan. The file-system check does not
/// depend on either. An unknown version never grants the file system.
pub fn detect_capabilities(
    version: Option<&SemanticVersion>,
    settings: &dyn FirmwareSettingsProvider,
) -> CapabilitySet {
    let mut capabilities: CapabilitySet = BASE_CAPABILITIES.into_iter().collect();

    if let Err(e) = add_settings_capabilities(&mut capabilities, settings) {
        tracing::debug!("Skipping settings capabilities: {}", e);
    }

    if version.is_some_and(|v| *v >= FILE_SYSTEM_MIN_VERSION) {
        capabilities.add(Capability::FileSystem);
    }

    tracing::info!(
        "Detected {} capabilities for FluidNC {}",
        capabilities.len(),
        version.map_or_else(|| "(unknown version)".to_string(), |v| v.to_string())
    );
    capabilities
}

fn add_settings_capabilities(
    capabilities: &mut CapabilitySet,
    settings: &dyn FirmwareSettingsProvider,
) -> Result<(), FirmwareError> {
    if settings.is_soft_limits_enabled()? {
        capabilities.add(Capability::SoftLimits);
    }

    for setting in settings.all_settings()? {
        if let Some(axis) = axis_of_setting(&setting.key) {
            capabilities.add(axis);
        }
    }

    Ok(())
}

fn axis_of_setting(key: &str) -> Option<Capability> {
    let key = key.to_ascii_lowercase();
    let axis = key.strip_prefix("axes/")?.chars().next()?;
    Capability::for_axis(axis)
}
