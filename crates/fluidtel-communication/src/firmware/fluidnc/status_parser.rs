//! FluidNC status report parsing
//!
//! Turns a `<State|Field:payload|...>` line into a [`ControllerStatus`]:
//! 1. Tokenise the body into [`StatusField`]s, one per `|`-separated part.
//! 2. Resolve machine/work positions through the work coordinate offset.
//! 3. Merge with the previous snapshot under the carry-forward rules.
//!
//! Every step is a pure function of its inputs. Field-level parse failures
//! are logged and skipped without affecting the other fields.

use super::super::grbl::{controller_state_from_grbl, parse_position};
use fluidtel_core::{
    AccessoryStates, ControllerState, ControllerStatus, EnabledPins, FirmwareError,
    OverridePercents, Position, Units,
};

/// One typed field of a status report
#[derive(Debug, Clone, PartialEq)]
pub enum StatusField {
    /// Leading `State` or `State:SubState` field
    State {
        /// Canonical state
        state: ControllerState,
        /// Text after the first `:`, empty when absent
        sub_state: String,
    },
    /// `MPos:`
    MachinePosition(Position),
    /// `WPos:`
    WorkPosition(Position),
    /// `WCO:`
    WorkCoordinateOffset(Position),
    /// `Ov:`
    Overrides(OverridePercents),
    /// `F:`
    FeedSpeed(f64),
    /// `FS:`
    FeedSpindle {
        /// Feed speed
        feed: f64,
        /// Spindle speed
        spindle: f64,
    },
    /// `Pn:`
    EnabledPins(EnabledPins),
    /// `A:`
    AccessoryStates(AccessoryStates),
    /// A field this parser does not interpret (`Bf:`, `Ln:`, ...)
    Unknown(String),
}

impl StatusField {
    /// Parse the leading state field
    pub fn parse_state(part: &str) -> Self {
        let (token, sub_state) = match part.split_once(':') {
            Some((token, sub)) => (token, sub.to_string()),
            None => (part, String::new()),
        };

        StatusField::State {
            state: controller_state_from_grbl(token),
            sub_state,
        }
    }

    /// Parse a non-leading field by its prefix
    pub fn parse(part: &str, units: Units) -> Result<Self, FirmwareError> {
        let Some((prefix, payload)) = part.split_once(':') else {
            return Ok(StatusField::Unknown(part.to_string()));
        };

        let field = match prefix {
            "MPos" => StatusField::MachinePosition(parse_position(prefix, payload, units)?),
            "WPos" => StatusField::WorkPosition(parse_position(prefix, payload, units)?),
            "WCO" => StatusField::WorkCoordinateOffset(parse_position(prefix, payload, units)?),
            "Ov" => StatusField::Overrides(parse_overrides(payload)?),
            "F" => StatusField::FeedSpeed(parse_number(prefix, payload)?),
            "FS" => {
                let (feed, spindle) = payload.split_once(',').ok_or_else(|| {
                    FirmwareError::invalid_field(prefix, "expected feed,spindle")
                })?;
                StatusField::FeedSpindle {
                    feed: parse_number(prefix, feed)?,
                    spindle: parse_number(prefix, spindle)?,
                }
            }
            "Pn" => StatusField::EnabledPins(EnabledPins::from_codes(payload)),
            "A" => StatusField::AccessoryStates(AccessoryStates::from_codes(payload)),
            _ => StatusField::Unknown(part.to_string()),
        };

        Ok(field)
    }
}

fn parse_number(field: &str, value: &str) -> Result<f64, FirmwareError> {
    let value = value.trim();
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FirmwareError::invalid_field(
            field,
            format!("'{}' is not a number", value),
        )),
    }
}

fn parse_overrides(payload: &str) -> Result<OverridePercents, FirmwareError> {
    let values = payload
        .split(',')
        .map(|v| {
            v.trim().parse::<u32>().map_err(|_| {
                FirmwareError::invalid_field("Ov", format!("'{}' is not a percentage", v))
            })
        })
        .collect::<Result<Vec<u32>, FirmwareError>>()?;

    match values.as_slice() {
        [feed, rapid, spindle] => Ok(OverridePercents::new(*feed, *rapid, *spindle)),
        _ => Err(FirmwareError::invalid_field(
            "Ov",
            format!("expected 3 values, got {}", values.len()),
        )),
    }
}

/// The fields of one status report, before resolution and merging
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusReport {
    /// Canonical state
    pub state: ControllerState,
    /// Sub-state text, empty when absent
    pub sub_state: String,
    /// Reported machine position
    pub machine_position: Option<Position>,
    /// Reported work position
    pub work_position: Option<Position>,
    /// Reported work coordinate offset
    pub work_coordinate_offset: Option<Position>,
    /// Reported override percentages
    pub overrides: Option<OverridePercents>,
    /// An `Ov:` field was present, even if its payload was unusable
    pub override_report: bool,
    /// Reported feed speed
    pub feed_speed: Option<f64>,
    /// Reported spindle speed
    pub spindle_speed: Option<f64>,
    /// Reported pins
    pub enabled_pins: Option<EnabledPins>,
    /// Reported accessories
    pub accessory_states: Option<AccessoryStates>,
}

impl StatusReport {
    /// Tokenise a status line
    ///
    /// The enclosing `<` and `>` are optional. Returns `None` for a line with
    /// an empty body.
    pub fn parse(line: &str, units: Units) -> Option<Self> {
        let body = line.trim();
        let body = body.strip_prefix('<').unwrap_or(body);
        let body = body.strip_suffix('>').unwrap_or(body);
        if body.is_empty() {
            return None;
        }

        let mut parts = body.split('|');
        let mut report = StatusReport::default();

        if let Some(first) = parts.next() {
            report.apply(StatusField::parse_state(first));
        }

        for part in parts {
            match StatusField::parse(part, units) {
                Ok(field) => report.apply(field),
                Err(e) => {
                    if part.starts_with("Ov:") {
                        report.override_report = true;
                    }
                    tracing::warn!("Skipping status field '{}': {}", part, e);
                }
            }
        }

        Some(report)
    }

    /// A report with an `Ov:` field restates overrides, pins and accessories
    pub fn is_override_report(&self) -> bool {
        self.override_report
    }

    fn apply(&mut self, field: StatusField) {
        match field {
            StatusField::State { state, sub_state } => {
                self.state = state;
                self.sub_state = sub_state;
            }
            StatusField::MachinePosition(p) => self.machine_position = Some(p),
            StatusField::WorkPosition(p) => self.work_position = Some(p),
            StatusField::WorkCoordinateOffset(p) => self.work_coordinate_offset = Some(p),
            StatusField::Overrides(o) => {
                self.overrides = Some(o);
                self.override_report = true;
            }
            StatusField::FeedSpeed(f) => self.feed_speed = Some(f),
            StatusField::FeedSpindle { feed, spindle } => {
                self.feed_speed = Some(feed);
                self.spindle_speed = Some(spindle);
            }
            StatusField::EnabledPins(p) => self.enabled_pins = Some(p),
            StatusField::AccessoryStates(a) => self.accessory_states = Some(a),
            StatusField::Unknown(raw) => tracing::trace!("Ignoring status field '{}'", raw),
        }
    }
}

/// Machine position, work position and work coordinate offset after resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPositions {
    /// Machine position
    pub machine: Option<Position>,
    /// Work position
    pub work: Option<Position>,
    /// Work coordinate offset
    pub offset: Position,
}

/// Derive whichever position the report omitted
///
/// An absent `WCO` falls back to the previous snapshot's offset, then to zero
/// in `units`. Positions reported together are taken as-is.
pub fn resolve_positions(
    report: &StatusReport,
    previous: Option<&ControllerStatus>,
    units: Units,
) -> ResolvedPositions {
    let offset = report
        .work_coordinate_offset
        .or_else(|| previous.map(|p| p.work_coordinate_offset))
        .unwrap_or_else(|| Position::zero(units));

    let (machine, work) = match (report.machine_position, report.work_position) {
        (None, Some(work)) => (Some(work + offset), Some(work)),
        (Some(machine), None) => (Some(machine), Some(machine - offset)),
        other => other,
    };

    ResolvedPositions {
        machine,
        work,
        offset,
    }
}

/// Combine a parsed report with the previous snapshot
///
/// Feed and spindle speeds carry forward unless reported. Outside an override
/// report, overrides, pins and accessories carry forward from the previous
/// snapshot. An override report restates all three: pins and accessories it
/// does not list are reset to empty. When its `Ov:` payload was unusable the
/// previous overrides are kept.
pub fn merge_status(
    previous: Option<&ControllerStatus>,
    report: &StatusReport,
    units: Units,
) -> ControllerStatus {
    let positions = resolve_positions(report, previous, units);

    let feed_speed = report
        .feed_speed
        .or_else(|| previous.map(|p| p.feed_speed))
        .unwrap_or(0.0);
    let spindle_speed = report
        .spindle_speed
        .or_else(|| previous.map(|p| p.spindle_speed))
        .unwrap_or(0.0);

    let (overrides, enabled_pins, accessory_states) = match previous {
        Some(prev) if !report.is_override_report() => (
            prev.overrides,
            prev.enabled_pins.clone(),
            prev.accessory_states.clone(),
        ),
        _ => (
            report
                .overrides
                .or_else(|| previous.map(|p| p.overrides))
                .unwrap_or_default(),
            report.enabled_pins.clone().unwrap_or_default(),
            report.accessory_states.clone().unwrap_or_default(),
        ),
    };

    ControllerStatus {
        state: report.state,
        sub_state: report.sub_state.clone(),
        machine_position: positions.machine,
        work_position: positions.work,
        work_coordinate_offset: positions.offset,
        feed_speed,
        spindle_speed,
        units,
        overrides,
        enabled_pins,
        accessory_states,
    }
}

/// Parse a status line into a new snapshot
pub fn parse_status(
    line: &str,
    previous: Option<&ControllerStatus>,
    units: Units,
) -> Option<ControllerStatus> {
    let report = StatusReport::parse(line, units)?;
    Some(merge_status(previous, &report, units))
}
