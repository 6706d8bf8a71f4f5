//! Data models for positions, machine state, and status snapshots
//!
//! This module provides:
//! - Position tracking with full 6-axis support (X, Y, Z, A, B, C)
//! - Unit management (MM, INCH)
//! - The canonical controller state enumeration
//! - Status snapshots built from controller status reports

pub mod status;

pub use status::{
    AccessoryState, AccessoryStates, ControllerStatus, EnabledPins, OverridePercents, Pin,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Machine coordinate units (millimeters or inches)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Units {
    /// Millimeters (metric)
    #[default]
    MM,
    /// Inches (imperial)
    INCH,
    /// Unknown or uninitialized
    Unknown,
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Units::MM => write!(f, "mm"),
            Units::INCH => write!(f, "in"),
            Units::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "metric" | "millimeters" => Ok(Self::MM),
            "in" | "inch" | "inches" | "imperial" => Ok(Self::INCH),
            _ => Err(format!("Unknown units: {}", s)),
        }
    }
}

/// A 6-axis coordinate tagged with its unit
///
/// Positions are plain values; `+` and `-` operate component-wise and keep the
/// unit of the left-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X-axis position
    pub x: f64,
    /// Y-axis position
    pub y: f64,
    /// Z-axis position
    pub z: f64,
    /// A-axis (4th axis) position
    pub a: f64,
    /// B-axis (5th axis) position
    pub b: f64,
    /// C-axis (6th axis) position
    pub c: f64,
    /// Coordinate unit
    pub unit: Units,
}

impl Position {
    /// Create a position with all axes at zero
    pub fn zero(unit: Units) -> Self {
        Self::with_axes(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, unit)
    }

    /// Create a position with X, Y, Z set and the rotary axes at zero
    pub fn xyz(x: f64, y: f64, z: f64, unit: Units) -> Self {
        Self::with_axes(x, y, z, 0.0, 0.0, 0.0, unit)
    }

    /// Create a position with all six axes specified
    pub fn with_axes(x: f64, y: f64, z: f64, a: f64, b: f64, c: f64, unit: Units) -> Self {
        Self {
            x,
            y,
            z,
            a,
            b,
            c,
            unit,
        }
    }

    /// Get all axes as an array in X, Y, Z, A, B, C order
    pub fn axes(&self) -> [f64; 6] {
        [self.x, self.y, self.z, self.a, self.b, self.c]
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::zero(Units::MM)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
            a: self.a + rhs.a,
            b: self.b + rhs.b,
            c: self.c + rhs.c,
            unit: self.unit,
        }
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
            a: self.a - rhs.a,
            b: self.b - rhs.b,
            c: self.c - rhs.c,
            unit: self.unit,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X:{:.3} Y:{:.3} Z:{:.3} A:{:.3} B:{:.3} C:{:.3} ({})",
            self.x, self.y, self.z, self.a, self.b, self.c, self.unit
        )
    }
}

/// Machine/Controller state as reported in a status report
///
/// Tokens the controller sends that do not map to a known state become
/// [`ControllerState::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControllerState {
    /// Connected and idle, ready for commands
    Idle,
    /// Executing a G-code program
    Run,
    /// Program paused, awaiting resume
    Hold,
    /// Manual jog/movement mode
    Jog,
    /// Machine alarm state (requires manual intervention)
    Alarm,
    /// Check mode (dry-run without machine movement)
    Check,
    /// Safety door interlock triggered
    Door,
    /// Homing cycle in progress
    Home,
    /// Low-power sleep state
    Sleep,
    /// Unrecognized state token
    #[default]
    Unknown,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Run => write!(f, "Run"),
            Self::Hold => write!(f, "Hold"),
            Self::Jog => write!(f, "Jog"),
            Self::Alarm => write!(f, "Alarm"),
            Self::Check => write!(f, "Check"),
            Self::Door => write!(f, "Door"),
            Self::Home => write!(f, "Home"),
            Self::Sleep => write!(f, "Sleep"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}
