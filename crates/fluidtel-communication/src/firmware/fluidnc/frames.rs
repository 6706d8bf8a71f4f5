//! FluidNC frame classification and welcome banner parsing
//!
//! A frame is one line of controller output. FluidNC emits three kinds we
//! care about:
//! - Message frames: `[MSG:INFO: Some notice]`
//! - Welcome banners: `Grbl 3.4 [FluidNC v3.4.2 (wifi) '$' for help]`
//! - Status reports: `<Idle|MPos:0.000,0.000,0.000|FS:0,0>`
//!
//! Firmware identity is best-effort: every parser here returns `None` on
//! input it does not recognise.

use super::super::firmware_version::SemanticVersion;
use super::super::grbl::is_status_report;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

fn message_regex() -> &'static Regex {
    static MESSAGE_REGEX: OnceLock<Regex> = OnceLock::new();
    MESSAGE_REGEX.get_or_init(|| Regex::new(r"\[MSG:.*]").expect("invalid regex pattern"))
}

/// Welcome banner grammar
///
/// The bracketed group repeats, but each named group keeps only the capture
/// from the last iteration that matched it. Banners listing more than one
/// variant/version pair therefore report the last pair. Text after the
/// closing `]` is allowed.
fn welcome_regex() -> &'static Regex {
    static WELCOME_REGEX: OnceLock<Regex> = OnceLock::new();
    WELCOME_REGEX.get_or_init(|| {
        Regex::new(
            r"(?i)^(?P<vendor>.*)\s(?P<protocol>[0-9a-z.]*)\s\[((?P<variant>[a-zA-Z]*)?\s(v(?P<version>[0-9.]*))?)+.*]",
        )
        .expect("invalid regex pattern")
    })
}

/// Check if a line carries a `[MSG:...]` frame
pub fn is_message(line: &str) -> bool {
    message_regex().is_match(line)
}

/// Check if a line is a firmware welcome banner
pub fn is_welcome(line: &str) -> bool {
    welcome_regex().is_match(line.trim())
}

/// Extract the payload of a `[MSG:...]` frame
///
/// Returns the text between `[MSG:` and the final `]`.
pub fn parse_message(line: &str) -> Option<String> {
    let found = message_regex().find(line)?.as_str();
    let inner = found.strip_prefix("[MSG:")?.strip_suffix(']')?;
    Some(inner.to_string())
}

/// Extract the firmware version from a welcome banner
pub fn parse_version(line: &str) -> Option<SemanticVersion> {
    WelcomeMessage::parse(line)?.version
}

/// Extract the firmware variant name from a welcome banner
pub fn parse_variant(line: &str) -> Option<String> {
    WelcomeMessage::parse(line)?.variant
}

/// Identity fields carried by a welcome banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeMessage {
    /// Free-text vendor, e.g. `FluidNC` or `Grbl`
    pub vendor: String,
    /// Protocol version token preceding the bracketed group
    pub protocol_version: String,
    /// Firmware variant, e.g. `FNC`
    pub variant: Option<String>,
    /// Firmware version from the `v`-prefixed token
    pub version: Option<SemanticVersion>,
}

impl WelcomeMessage {
    /// Parse a welcome banner
    ///
    /// A missing or malformed firmware version leaves `version` empty rather
    /// than rejecting the banner.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = welcome_regex().captures(line.trim())?;

        let variant = caps
            .name("variant")
            .map(|m| m.as_str())
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        let version = caps.name("version").and_then(|m| {
            match m.as_str().parse::<SemanticVersion>() {
                Ok(version) => Some(version),
                Err(e) => {
                    tracing::debug!("Ignoring welcome version: {}", e);
                    None
                }
            }
        });

        Some(Self {
            vendor: caps
                .name("vendor")
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default(),
            protocol_version: caps
                .name("protocol")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            variant,
            version,
        })
    }
}

/// A classified line of controller output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FluidNCFrame {
    /// `[MSG:...]` frame with its payload
    Message(String),
    /// Welcome banner
    Welcome(WelcomeMessage),
    /// Raw `<...>` status report
    StatusReport(String),
    /// Anything else
    Other(String),
}

impl FluidNCFrame {
    /// Classify a line
    ///
    /// Message frames win over welcome banners, which win over status
    /// reports. Unrecognised lines are returned as [`FluidNCFrame::Other`].
    pub fn classify(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);

        let frame = if let Some(payload) = parse_message(line) {
            Self::Message(payload)
        } else if let Some(welcome) = WelcomeMessage::parse(line) {
            Self::Welcome(welcome)
        } else if is_status_report(line) {
            Self::StatusReport(line.trim().to_string())
        } else {
            Self::Other(line.to_string())
        };

        tracing::trace!("Classified frame: {:?}", frame);
        frame
    }
}
