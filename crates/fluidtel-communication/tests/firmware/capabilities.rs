use fluidtel_communication::firmware::fluidnc::*;
use fluidtel_communication::{
    Capability, FirmwareSetting, FirmwareSettingsProvider, SemanticVersion,
};
use fluidtel_core::FirmwareError;

fn settings() -> FluidNCSettings {
    FluidNCSettings::from_lines([
        "$axes/x/steps_per_mm=80",
        "$axes/x/max_rate_mm_per_min=5000",
        "$Axes/Y/steps_per_mm=80",
        "$axes/z/soft_limits=true",
        "$axes/shared_stepper_disable_pin=NO_PIN",
        "$spindle/pwm_hz=5000",
    ])
}

/// Soft-limit lookup fails; enumerating settings works
struct SoftLimitsUnavailable;

impl FirmwareSettingsProvider for SoftLimitsUnavailable {
    fn is_soft_limits_enabled(&self) -> Result<bool, FirmwareError> {
        Err(FirmwareError::SettingsUnavailable {
            reason: "timeout".to_string(),
        })
    }

    fn all_settings(&self) -> Result<Vec<FirmwareSetting>, FirmwareError> {
        Ok(vec![FirmwareSetting::new("axes/a/steps_per_mm", "10")])
    }
}

#[test]
fn test_file_system_from_3_5_2() {
    let v352 = SemanticVersion::new(3, 5, 2);
    let v351 = SemanticVersion::new(3, 5, 1);
    let v400 = SemanticVersion::new(4, 0, 0);

    assert!(detect_capabilities(Some(&v352), &settings()).has_capability(Capability::FileSystem));
    assert!(!detect_capabilities(Some(&v351), &settings()).has_capability(Capability::FileSystem));
    assert!(detect_capabilities(Some(&v400), &settings()).has_capability(Capability::FileSystem));
    assert!(!detect_capabilities(None, &settings()).has_capability(Capability::FileSystem));
}

#[test]
fn test_settings_capabilities() {
    let capabilities = detect_capabilities(Some(&SemanticVersion::new(3, 4, 2)), &settings());

    assert!(capabilities.has_capability(Capability::SoftLimits));
    assert!(capabilities.has_capability(Capability::XAxis));
    assert!(capabilities.has_capability(Capability::YAxis));
    assert!(capabilities.has_capability(Capability::ZAxis));
    assert!(!capabilities.has_capability(Capability::AAxis));
    assert!(!capabilities.has_capability(Capability::BAxis));
    assert!(!capabilities.has_capability(Capability::CAxis));
    assert_eq!(capabilities.len(), BASE_CAPABILITIES.len() + 4);
}

#[test]
fn test_soft_limits_disabled() {
    let settings = FluidNCSettings::from_lines(["$axes/x/soft_limits=false"]);
    let capabilities = detect_capabilities(None, &settings);
    assert!(!capabilities.has_capability(Capability::SoftLimits));
    assert!(capabilities.has_capability(Capability::XAxis));
}

#[test]
fn test_settings_failure_skips_settings_capabilities() {
    let capabilities =
        detect_capabilities(Some(&SemanticVersion::new(3, 6, 0)), &SoftLimitsUnavailable);

    assert!(!capabilities.has_capability(Capability::SoftLimits));
    assert!(!capabilities.has_capability(Capability::AAxis));
    assert!(capabilities.has_capability(Capability::FileSystem));
    for capability in BASE_CAPABILITIES {
        assert!(capabilities.has_capability(capability));
    }
}
