//! # FluidTel Core
//!
//! Core types shared by the FluidTel crates: positions, controller states,
//! status snapshots, error types, console messages, and cancellation.

pub mod core;
pub mod data;
pub mod error;

pub use core::{CancelHandle, CancelSignal, Message, MessageDispatcher, MessageLevel};

pub use data::{
    AccessoryState, AccessoryStates, ControllerState, ControllerStatus, EnabledPins,
    OverridePercents, Pin, Position, Units,
};

pub use error::{ControllerError, Error, FirmwareError, Result};
