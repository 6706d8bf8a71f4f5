//! Firmware settings framework
//!
//! Capability detection reads firmware settings through the
//! [`FirmwareSettingsProvider`] trait, so it works the same against a live
//! controller or a captured `$S` dump.

use fluidtel_core::FirmwareError;
use serde::{Deserialize, Serialize};

/// A firmware setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmwareSetting {
    /// Setting key, e.g. `axes/x/max_rate_mm_per_min`
    pub key: String,
    /// Current value as reported by the firmware
    pub value: String,
}

impl FirmwareSetting {
    /// Create a setting
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Read access to the firmware settings of a connected controller
///
/// Both operations may fail, e.g. when the settings have not been fetched yet.
pub trait FirmwareSettingsProvider: Send + Sync {
    /// Check whether soft limits are enabled
    fn is_soft_limits_enabled(&self) -> Result<bool, FirmwareError>;

    /// Get all settings
    fn all_settings(&self) -> Result<Vec<FirmwareSetting>, FirmwareError>;

    /// Get a setting by key
    fn get_setting(&self, key: &str) -> Result<FirmwareSetting, FirmwareError> {
        self.all_settings()?
            .into_iter()
            .find(|s| s.key == key)
            .ok_or_else(|| FirmwareError::SettingNotAvailable {
                setting: key.to_string(),
            })
    }
}
