//! GRBL-compatible helpers
//!
//! FluidNC speaks a superset of the GRBL 1.1 protocol; these helpers cover
//! the parts of that protocol every dialect shares.

pub mod utils;

pub use utils::{
    controller_state_from_grbl, is_command_error, is_status_report, parse_position,
    parse_setting_line,
};
