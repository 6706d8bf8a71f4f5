use fluidtel_communication::firmware::fluidnc::*;
use fluidtel_communication::SemanticVersion;

#[test]
fn test_parse_version_from_welcome() {
    assert_eq!(
        parse_version("FluidNC 3.4.2 [FNC v3.4.2]"),
        Some(SemanticVersion::new(3, 4, 2))
    );
    assert_eq!(parse_version("garbage"), None);
}

#[test]
fn test_welcome_wire_example() {
    let line = "FluidNC 3.4.2 [FNC v3.4.2]";
    assert!(is_welcome(line));
    assert!(!is_message(line));

    let welcome = WelcomeMessage::parse(line).unwrap();
    assert_eq!(welcome.vendor, "FluidNC");
    assert_eq!(welcome.protocol_version, "3.4.2");
    assert_eq!(parse_variant(line).as_deref(), Some("FNC"));
}

#[test]
fn test_grbl_compatible_banner() {
    let line = "Grbl 3.4 [FluidNC v3.4.2 (wifi) '$' for help]";
    assert!(is_welcome(line));
    let welcome = WelcomeMessage::parse(line).unwrap();
    assert_eq!(welcome.vendor, "Grbl");
    assert_eq!(welcome.protocol_version, "3.4");
    assert_eq!(welcome.version, Some(SemanticVersion::new(3, 4, 2)));
    // The second iteration of the bracketed group matches an empty variant
    assert_eq!(welcome.variant, None);
}

#[test]
fn test_welcome_with_trailing_text() {
    let line = "Grbl 3.4 [FluidNC v3.4.2 (wifi) '$' for help] extra";
    assert!(is_welcome(line));
    assert_eq!(parse_version(line), Some(SemanticVersion::new(3, 4, 2)));

    let welcome = WelcomeMessage::parse("FluidNC 3.5.2 [FNC v3.5.2] ok").unwrap();
    assert_eq!(welcome.vendor, "FluidNC");
    assert_eq!(welcome.variant.as_deref(), Some("FNC"));
    assert_eq!(welcome.version, Some(SemanticVersion::new(3, 5, 2)));
}

#[test]
fn test_message_frame() {
    let line = "[MSG:INFO: Some notice]";
    assert!(is_message(line));
    assert_eq!(parse_message(line).as_deref(), Some("INFO: Some notice"));
    assert_eq!(
        FluidNCFrame::classify(line),
        FluidNCFrame::Message("INFO: Some notice".to_string())
    );
}

#[test]
fn test_unrecognised_lines() {
    for line in ["ok", "error:20", "", "[GC:G0 G54 G17 G21 G90 G94 M5 M9 T0 F0 S0]"] {
        assert!(
            matches!(FluidNCFrame::classify(line), FluidNCFrame::Other(_)),
            "{:?} should not be classified",
            line
        );
    }
}
