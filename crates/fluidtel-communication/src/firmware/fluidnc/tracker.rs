//! Per-session status tracking

use super::super::grbl::is_status_report;
use super::status_parser::parse_status;
use fluidtel_core::{ControllerStatus, Units};

/// Holds the latest snapshot of one controller session
///
/// Each accepted status line is merged with the previous snapshot, which is
/// then replaced.
#[derive(Debug, Clone, Default)]
pub struct StatusTracker {
    units: Units,
    last: Option<ControllerStatus>,
}

impl StatusTracker {
    /// Create a tracker for positions reported in `units`
    pub fn new(units: Units) -> Self {
        Self { units, last: None }
    }

    /// Merge a status line into the session
    ///
    /// Returns the new snapshot, or `None` if the line was not a `<...>`
    /// status report.
    pub fn update(&mut self, line: &str) -> Option<&ControllerStatus> {
        if !is_status_report(line) {
            return None;
        }
        let status = parse_status(line, self.last.as_ref(), self.units)?;
        tracing::trace!("Status: {}", status);
        self.last = Some(status);
        self.last.as_ref()
    }

    /// The latest snapshot
    pub fn last(&self) -> Option<&ControllerStatus> {
        self.last.as_ref()
    }

    /// Reporting units
    pub fn units(&self) -> Units {
        self.units
    }

    /// Forget the session, e.g. after a reconnect
    pub fn reset(&mut self) {
        self.last = None;
    }
}
