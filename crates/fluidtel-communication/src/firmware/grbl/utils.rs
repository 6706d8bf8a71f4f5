//! GRBL Protocol Utilities
//!
//! Helpers shared by every GRBL-compatible dialect: response classification,
//! state lookups, coordinate extraction, and setting lines.

use fluidtel_core::{ControllerState, FirmwareError, Position, Units};

/// Check if a line is a status report (`<...>`)
pub fn is_status_report(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 2 && trimmed.starts_with('<') && trimmed.ends_with('>')
}

/// Check if a response indicates an error
pub fn is_command_error(response: &str) -> bool {
    let trimmed = response.trim();
    trimmed.starts_with("error:") || trimmed.starts_with("alarm:")
}

/// Map a GRBL state token to the canonical controller state
///
/// Matching is case-insensitive; unrecognized tokens map to
/// [`ControllerState::Unknown`].
pub fn controller_state_from_grbl(state: &str) -> ControllerState {
    match state.trim().to_ascii_lowercase().as_str() {
        "idle" => ControllerState::Idle,
        "run" => ControllerState::Run,
        "hold" => ControllerState::Hold,
        "jog" => ControllerState::Jog,
        "alarm" => ControllerState::Alarm,
        "check" => ControllerState::Check,
        "door" => ControllerState::Door,
        "home" => ControllerState::Home,
        "sleep" => ControllerState::Sleep,
        unknown => {
            tracing::debug!("Unknown GRBL state '{}'", unknown);
            ControllerState::Unknown
        }
    }
}

/// Parse a comma-separated coordinate payload (`MPos:`, `WPos:`, `WCO:`)
///
/// Accepts three to six numbers in X, Y, Z, A, B, C order. Rotary axes the
/// controller does not report are zero.
pub fn parse_position(field: &str, payload: &str, units: Units) -> Result<Position, FirmwareError> {
    let coords = payload
        .split(',')
        .map(|s| {
            let s = s.trim();
            match s.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(FirmwareError::invalid_field(
                    field,
                    format!("'{}' is not a number", s),
                )),
            }
        })
        .collect::<Result<Vec<f64>, FirmwareError>>()?;

    if !(3..=6).contains(&coords.len()) {
        return Err(FirmwareError::invalid_field(
            field,
            format!("expected 3 to 6 coordinates, got {}", coords.len()),
        ));
    }

    let axis = |i: usize| coords.get(i).copied().unwrap_or(0.0);
    Ok(Position::with_axes(
        axis(0),
        axis(1),
        axis(2),
        axis(3),
        axis(4),
        axis(5),
        units,
    ))
}

/// Parse a setting line into key and value
///
/// Works for numeric GRBL settings (`$110=500.000`) and FluidNC path
/// settings (`$axes/x/max_rate_mm_per_min=5000`).
pub fn parse_setting_line(line: &str) -> Option<(String, String)> {
    let line = line.trim().strip_prefix('$')?;
    let (key, value) = line.split_once('=')?;
    let key = key.trim();

    if key.is_empty() {
        return None;
    }

    Some((key.to_string(), value.trim().to_string()))
}
