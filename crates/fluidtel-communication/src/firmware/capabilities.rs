//! Controller capabilities system
//!
//! Provides the capability tags a connected controller may advertise and the
//! set type that collects them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Capability flags for controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Supports jogging
    Jogging,
    /// Supports returning to work zero
    ReturnToZero,
    /// Supports continuous (held-key) jogging
    ContinuousJogging,
    /// Supports homing
    Homing,
    /// Exposes firmware settings
    FirmwareSettings,
    /// Supports feed, rapid and spindle overrides
    Overrides,
    /// Soft limits are enabled
    SoftLimits,
    /// X axis is configured
    XAxis,
    /// Y axis is configured
    YAxis,
    /// Z axis is configured
    ZAxis,
    /// A axis is configured
    AAxis,
    /// B axis is configured
    BAxis,
    /// C axis is configured
    CAxis,
    /// Supports the on-board file system
    FileSystem,
}

impl Capability {
    /// Per-axis capability for an axis letter
    pub fn for_axis(axis: char) -> Option<Self> {
        match axis.to_ascii_lowercase() {
            'x' => Some(Self::XAxis),
            'y' => Some(Self::YAxis),
            'z' => Some(Self::ZAxis),
            'a' => Some(Self::AAxis),
            'b' => Some(Self::BAxis),
            'c' => Some(Self::CAxis),
            _ => None,
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Jogging => write!(f, "Jogging"),
            Self::ReturnToZero => write!(f, "Return To Zero"),
            Self::ContinuousJogging => write!(f, "Continuous Jogging"),
            Self::Homing => write!(f, "Homing"),
            Self::FirmwareSettings => write!(f, "Firmware Settings"),
            Self::Overrides => write!(f, "Overrides"),
            Self::SoftLimits => write!(f, "Soft Limits"),
            Self::XAxis => write!(f, "X Axis"),
            Self::YAxis => write!(f, "Y Axis"),
            Self::ZAxis => write!(f, "Z Axis"),
            Self::AAxis => write!(f, "A Axis"),
            Self::BAxis => write!(f, "B Axis"),
            Self::CAxis => write!(f, "C Axis"),
            Self::FileSystem => write!(f, "File System"),
        }
    }
}

/// A set of capabilities; adding a capability twice is a no-op
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a capability, returning whether it was newly added
    pub fn add(&mut self, capability: Capability) -> bool {
        self.0.insert(capability)
    }

    /// Check if a capability is present
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    /// Number of capabilities
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in a stable order
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<T: IntoIterator<Item = Capability>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Capability> for CapabilitySet {
    fn extend<T: IntoIterator<Item = Capability>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}
