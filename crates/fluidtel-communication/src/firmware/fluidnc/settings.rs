//! In-memory FluidNC settings store
//!
//! Holds the `$key=value` lines a FluidNC controller prints for `$S`.

use super::super::grbl::parse_setting_line;
use super::super::settings::{FirmwareSetting, FirmwareSettingsProvider};
use fluidtel_core::FirmwareError;
use std::collections::BTreeMap;
use std::path::Path;

/// FluidNC settings snapshot
///
/// A store that has never been loaded reports
/// [`FirmwareError::SettingsUnavailable`] from every provider call.
#[derive(Debug, Clone, Default)]
pub struct FluidNCSettings {
    settings: Option<BTreeMap<String, String>>,
}

impl FluidNCSettings {
    /// Create an empty, unloaded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from setting lines
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut settings = Self::new();
        settings.load_lines(lines);
        settings
    }

    /// Merge setting lines into the store
    ///
    /// Lines that are not `$key=value` are skipped. Returns the number of
    /// settings read. Marks the store as loaded even when nothing was read.
    pub fn load_lines<I, S>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let store = self.settings.get_or_insert_with(BTreeMap::new);
        let mut count = 0;
        for line in lines {
            if let Some((key, value)) = parse_setting_line(line.as_ref()) {
                store.insert(key, value);
                count += 1;
            }
        }
        tracing::debug!("Loaded {} FluidNC settings", count);
        count
    }

    /// Load setting lines from a captured `$S` dump
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<usize> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.load_lines(content.lines()))
    }

    /// Set a single setting
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.settings
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
    }

    /// Forget every setting and return to the unloaded state
    pub fn clear(&mut self) {
        self.settings = None;
    }

    /// Check whether settings have been loaded
    pub fn is_loaded(&self) -> bool {
        self.settings.is_some()
    }

    fn loaded(&self) -> Result<&BTreeMap<String, String>, FirmwareError> {
        self.settings
            .as_ref()
            .ok_or_else(|| FirmwareError::SettingsUnavailable {
                reason: "settings have not been loaded".to_string(),
            })
    }
}

impl FirmwareSettingsProvider for FluidNCSettings {
    fn is_soft_limits_enabled(&self) -> Result<bool, FirmwareError> {
        let settings = self.loaded()?;
        Ok(settings.iter().any(|(key, value)| {
            let key = key.to_ascii_lowercase();
            key.starts_with("axes/")
                && key.ends_with("/soft_limits")
                && value.trim().eq_ignore_ascii_case("true")
        }))
    }

    fn all_settings(&self) -> Result<Vec<FirmwareSetting>, FirmwareError> {
        Ok(self
            .loaded()?
            .iter()
            .map(|(key, value)| FirmwareSetting::new(key.clone(), value.clone()))
            .collect())
    }
}
