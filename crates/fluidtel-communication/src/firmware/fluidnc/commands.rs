//! FluidNC controller commands

use super::super::grbl::{is_command_error, is_status_report};
use super::status_parser::parse_status;
use crate::communication::ControllerCommand;
use fluidtel_core::{ControllerStatus, Units};

/// Real-time status query (`?`)
///
/// Done once a status report or an error line arrives. Other lines, such as
/// `[MSG:...]` frames interleaved by the firmware, are recorded but ignored.
#[derive(Debug, Clone, Default)]
pub struct GetStatusCommand {
    responses: Vec<String>,
    status_report: Option<String>,
    error: Option<String>,
}

impl GetStatusCommand {
    /// Create a new status query
    pub fn new() -> Self {
        Self::default()
    }

    /// The status report received, if any
    pub fn status_report(&self) -> Option<&str> {
        self.status_report.as_deref()
    }

    /// The error line received, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Every line fed to this command
    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    /// Parse the received report into a snapshot
    pub fn controller_status(
        &self,
        previous: Option<&ControllerStatus>,
        units: Units,
    ) -> Option<ControllerStatus> {
        parse_status(self.status_report.as_deref()?, previous, units)
    }
}

impl ControllerCommand for GetStatusCommand {
    fn command(&self) -> &str {
        "?"
    }

    fn append_response(&mut self, line: &str) {
        let line = line.trim();
        self.responses.push(line.to_string());

        if self.is_done() {
            return;
        }

        if is_status_report(line) {
            self.status_report = Some(line.to_string());
        } else if is_command_error(line) {
            self.error = Some(line.to_string());
        }
    }

    fn is_done(&self) -> bool {
        self.status_report.is_some() || self.error.is_some()
    }

    fn is_ok(&self) -> bool {
        self.status_report.is_some()
    }
}
