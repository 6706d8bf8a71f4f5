//! Controller status snapshots
//!
//! A [`ControllerStatus`] is an immutable view of the machine built from one
//! status report plus whatever the previous snapshot carried forward.

use super::{ControllerState, Position, Units};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Override percentages (Feed, Rapid, Spindle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverridePercents {
    /// Feed override percentage
    pub feed: u32,
    /// Rapid override percentage
    pub rapid: u32,
    /// Spindle override percentage
    pub spindle: u32,
}

impl OverridePercents {
    /// Create override percentages
    pub fn new(feed: u32, rapid: u32, spindle: u32) -> Self {
        Self {
            feed,
            rapid,
            spindle,
        }
    }
}

/// An input pin reported in the `Pn:` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pin {
    /// X limit switch
    X,
    /// Y limit switch
    Y,
    /// Z limit switch
    Z,
    /// A limit switch
    A,
    /// B limit switch
    B,
    /// C limit switch
    C,
    /// Probe input
    Probe,
    /// Safety door
    Door,
    /// Feed hold button
    Hold,
    /// Soft reset button
    SoftReset,
    /// Cycle start button
    CycleStart,
}

impl Pin {
    /// Map a single `Pn:` code character to a pin
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'X' => Some(Self::X),
            'Y' => Some(Self::Y),
            'Z' => Some(Self::Z),
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'P' => Some(Self::Probe),
            'D' => Some(Self::Door),
            'H' => Some(Self::Hold),
            'R' => Some(Self::SoftReset),
            'S' => Some(Self::CycleStart),
            _ => None,
        }
    }
}

/// The set of input pins currently triggered
///
/// An empty set means "nothing enabled".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnabledPins(BTreeSet<Pin>);

impl EnabledPins {
    /// Build the pin set from a `Pn:` code string such as `"XYP"`
    ///
    /// Characters that are not pin codes are skipped.
    pub fn from_codes(codes: &str) -> Self {
        Self(
            codes
                .chars()
                .filter_map(|code| {
                    let pin = Pin::from_code(code);
                    if pin.is_none() {
                        tracing::trace!("Ignoring unknown pin code '{}'", code);
                    }
                    pin
                })
                .collect(),
        )
    }

    /// Check whether a pin is triggered
    pub fn contains(&self, pin: Pin) -> bool {
        self.0.contains(&pin)
    }

    /// Check whether no pin is triggered
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of triggered pins
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate the triggered pins in a stable order
    pub fn iter(&self) -> impl Iterator<Item = Pin> + '_ {
        self.0.iter().copied()
    }
}

/// An accessory output reported in the `A:` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccessoryState {
    /// Spindle running clockwise
    SpindleCw,
    /// Spindle running counter-clockwise
    SpindleCcw,
    /// Flood coolant on
    Flood,
    /// Mist coolant on
    Mist,
}

impl AccessoryState {
    /// Map a single `A:` code character to an accessory state
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'S' => Some(Self::SpindleCw),
            'C' => Some(Self::SpindleCcw),
            'F' => Some(Self::Flood),
            'M' => Some(Self::Mist),
            _ => None,
        }
    }
}

/// The set of accessories currently active
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessoryStates(BTreeSet<AccessoryState>);

impl AccessoryStates {
    /// Build the accessory set from an `A:` code string such as `"SF"`
    pub fn from_codes(codes: &str) -> Self {
        Self(codes.chars().filter_map(AccessoryState::from_code).collect())
    }

    /// Check whether an accessory is active
    pub fn contains(&self, state: AccessoryState) -> bool {
        self.0.contains(&state)
    }

    /// Check whether no accessory is active
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the active accessories in a stable order
    pub fn iter(&self) -> impl Iterator<Item = AccessoryState> + '_ {
        self.0.iter().copied()
    }
}

/// Complete controller status snapshot
///
/// Built once per status report. Positions are `None` only when neither the
/// report nor any derivation could provide them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerStatus {
    /// Canonical machine state
    pub state: ControllerState,
    /// Free-form sub-state text (e.g. the alarm code in `Alarm:1`), empty when absent
    pub sub_state: String,
    /// Machine position
    pub machine_position: Option<Position>,
    /// Work position
    pub work_position: Option<Position>,
    /// Work coordinate offset
    pub work_coordinate_offset: Position,
    /// Current feed speed (units/min)
    pub feed_speed: f64,
    /// Current spindle speed (RPM)
    pub spindle_speed: f64,
    /// Units the controller reports positions in
    pub units: Units,
    /// Override percentages
    pub overrides: OverridePercents,
    /// Triggered input pins
    pub enabled_pins: EnabledPins,
    /// Active accessories
    pub accessory_states: AccessoryStates,
}

impl ControllerStatus {
    /// Create an empty snapshot in the given reporting units
    pub fn new(units: Units) -> Self {
        Self {
            state: ControllerState::Unknown,
            sub_state: String::new(),
            machine_position: None,
            work_position: None,
            work_coordinate_offset: Position::zero(units),
            feed_speed: 0.0,
            spindle_speed: 0.0,
            units,
            overrides: OverridePercents::default(),
            enabled_pins: EnabledPins::default(),
            accessory_states: AccessoryStates::default(),
        }
    }
}

impl Default for ControllerStatus {
    fn default() -> Self {
        Self::new(Units::MM)
    }
}

impl fmt::Display for ControllerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state)?;
        if !self.sub_state.is_empty() {
            write!(f, ":{}", self.sub_state)?;
        }
        if let Some(mpos) = &self.machine_position {
            write!(f, " MPos[{}]", mpos)?;
        }
        write!(f, " F:{} S:{}", self.feed_speed, self.spindle_speed)
    }
}
