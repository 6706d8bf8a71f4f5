//! Replay of captured controller output
//!
//! Feeds a log of controller lines through the frame classifier and prints
//! one JSON line per event:
//! - every merged status snapshot
//! - the detected capabilities, once a welcome banner is seen and settings
//!   are available

use fluidtel_communication::{
    detect_capabilities, FirmwareSettingsProvider, FluidNCFrame, StatusTracker,
};
use fluidtel_core::Units;
use serde_json::json;
use std::io::{BufRead, Write};

/// Counts of what a replay saw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Status snapshots written
    pub status_reports: usize,
    /// `[MSG:...]` frames seen
    pub messages: usize,
    /// Welcome banners seen
    pub welcomes: usize,
    /// Lines that matched no frame
    pub other: usize,
}

/// Replay controller output from `input`, writing JSON lines to `output`
pub fn replay<R, W>(
    input: R,
    output: &mut W,
    units: Units,
    settings: Option<&dyn FirmwareSettingsProvider>,
) -> anyhow::Result<ReplaySummary>
where
    R: BufRead,
    W: Write,
{
    let mut tracker = StatusTracker::new(units);
    let mut summary = ReplaySummary::default();

    for line in input.lines() {
        let line = line?;
        match FluidNCFrame::classify(&line) {
            FluidNCFrame::Message(payload) => {
                summary.messages += 1;
                tracing::info!("Controller message: {}", payload);
            }
            FluidNCFrame::Welcome(welcome) => {
                summary.welcomes += 1;
                tracing::info!(
                    "Welcome from {} {} (variant {:?}, version {:?})",
                    welcome.vendor,
                    welcome.protocol_version,
                    welcome.variant,
                    welcome.version.map(|v| v.to_string())
                );
                tracker.reset();

                if let Some(settings) = settings {
                    let capabilities = detect_capabilities(welcome.version.as_ref(), settings);
                    let event = json!({ "welcome": welcome, "capabilities": capabilities });
                    writeln!(output, "{}", event)?;
                }
            }
            FluidNCFrame::StatusReport(raw) => match tracker.update(&raw) {
                Some(status) => {
                    summary.status_reports += 1;
                    writeln!(output, "{}", serde_json::to_string(status)?)?;
                }
                None => summary.other += 1,
            },
            FluidNCFrame::Other(raw) => {
                summary.other += 1;
                tracing::debug!("Unclassified line: {}", raw);
            }
        }
    }

    tracing::info!(
        "Replayed {} status reports, {} messages, {} welcome banners",
        summary.status_reports,
        summary.messages,
        summary.welcomes
    );
    Ok(summary)
}
