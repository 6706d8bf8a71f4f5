use fluidtel_communication::firmware::fluidnc::*;
use fluidtel_core::{
    AccessoryState, ControllerState, ControllerStatus, OverridePercents, Pin, Position, Units,
};
use proptest::prelude::*;

fn parse(line: &str, previous: Option<&ControllerStatus>) -> ControllerStatus {
    parse_status(line, previous, Units::MM).unwrap()
}

#[test]
fn test_idle_with_feed_spindle() {
    let status = parse("<Idle|MPos:0.000,0.000,0.000|FS:0,0>", None);
    assert_eq!(status.state, ControllerState::Idle);
    assert_eq!(
        status.machine_position,
        Some(Position::xyz(0.0, 0.0, 0.0, Units::MM))
    );
    assert_eq!(status.feed_speed, 0.0);
    assert_eq!(status.spindle_speed, 0.0);
}

#[test]
fn test_override_report_without_accessories() {
    let previous = parse("<Idle|MPos:0,0,0|Ov:100,100,100|A:SM>", None);
    assert!(previous.accessory_states.contains(AccessoryState::Mist));

    let status = parse(
        "<Run|WPos:1.000,2.000,0.000|Ov:100,100,100|Pn:XY>",
        Some(&previous),
    );
    assert_eq!(status.state, ControllerState::Run);
    assert_eq!(status.overrides, OverridePercents::new(100, 100, 100));
    assert!(status.enabled_pins.contains(Pin::X));
    assert!(status.enabled_pins.contains(Pin::Y));
    assert_eq!(status.enabled_pins.len(), 2);
    assert!(status.accessory_states.is_empty());
}

#[test]
fn test_end_to_end_machine_and_offset() {
    let status = parse("<Idle|MPos:1.0,2.0,3.0|WCO:0.0,0.0,0.0>", None);
    assert_eq!(status.state, ControllerState::Idle);
    assert_eq!(
        status.machine_position,
        Some(Position::xyz(1.0, 2.0, 3.0, Units::MM))
    );
    assert_eq!(
        status.work_position,
        Some(Position::xyz(1.0, 2.0, 3.0, Units::MM))
    );
}

#[test]
fn test_end_to_end_alarm_carries_offset() {
    let mut previous = ControllerStatus::new(Units::MM);
    previous.work_coordinate_offset = Position::xyz(5.0, 0.0, 0.0, Units::MM);

    let status = parse("<Alarm:1|FS:0,0>", Some(&previous));
    assert_eq!(status.state, ControllerState::Alarm);
    assert_eq!(status.sub_state, "1");
    assert_eq!(
        status.work_coordinate_offset,
        Position::xyz(5.0, 0.0, 0.0, Units::MM)
    );
    assert_eq!(status.machine_position, None);
    assert_eq!(status.work_position, None);
}

#[test]
fn test_repeated_line_is_idempotent() {
    let line = "<Jog|WPos:1,2,3|WCO:0.5,0.5,0.5|Ov:110,100,90|Pn:Z|A:C>";
    let first = parse(line, None);
    let second = parse(line, Some(&first));
    assert_eq!(first, second);

    let line = "<Idle|MPos:4,4,4|F:100>";
    let third = parse(line, Some(&second));
    let fourth = parse(line, Some(&third));
    assert_eq!(third, fourth);
}

#[test]
fn test_non_override_report_carries_forward() {
    let override_report = parse("<Run|MPos:0,0,0|Ov:120,50,80|Pn:PD|A:SF>", None);
    let status = parse("<Run|MPos:1,0,0|FS:300,1000>", Some(&override_report));

    assert_eq!(status.overrides, override_report.overrides);
    assert_eq!(status.enabled_pins, override_report.enabled_pins);
    assert_eq!(status.accessory_states, override_report.accessory_states);
    assert_eq!(status.feed_speed, 300.0);
}

#[test]
fn test_override_report_resets_pins() {
    let previous = parse("<Idle|MPos:0,0,0|Ov:100,100,100|Pn:XYZ>", None);
    assert_eq!(previous.enabled_pins.len(), 3);

    let status = parse("<Idle|MPos:0,0,0|Ov:100,100,100>", Some(&previous));
    assert!(status.enabled_pins.is_empty());
}

#[test]
fn test_rotary_axes() {
    let status = parse("<Idle|MPos:1,2,3,90,0,45|WCO:1,1,1,0,0,0>", None);
    let work = status.work_position.unwrap();
    assert_eq!(work.axes(), [0.0, 1.0, 2.0, 90.0, 0.0, 45.0]);
}

#[test]
fn test_unparsable_override_field_still_marks_override_report() {
    let previous = parse("<Idle|MPos:0,0,0|Ov:100,100,100|Pn:Y>", None);
    let status = parse("<Idle|MPos:0,0,0|Ov:100,100|Pn:X>", Some(&previous));
    assert!(status.enabled_pins.contains(Pin::X));
    assert!(!status.enabled_pins.contains(Pin::Y));
    assert_eq!(status.overrides, OverridePercents::new(100, 100, 100));

    let status = parse("<Idle|MPos:0,0,0|Ov:abc>", Some(&previous));
    assert!(status.enabled_pins.is_empty());
}

#[test]
fn test_tracker_follows_session() {
    let mut tracker = StatusTracker::new(Units::MM);
    tracker.update("<Idle|MPos:10,0,0|WCO:2,0,0|Ov:100,100,100>");
    let status = tracker.update("<Run|WPos:9,0,0>").unwrap();
    assert_eq!(
        status.machine_position,
        Some(Position::xyz(11.0, 0.0, 0.0, Units::MM))
    );
    assert_eq!(status.overrides, OverridePercents::new(100, 100, 100));
}

fn coordinate() -> impl Strategy<Value = f64> {
    (-100_000i32..100_000).prop_map(|v| f64::from(v) / 1000.0)
}

fn format_position(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{:.3}", v))
        .collect::<Vec<_>>()
        .join(",")
}

proptest! {
    #[test]
    fn prop_work_is_machine_minus_offset(
        machine in proptest::collection::vec(coordinate(), 3),
        offset in proptest::collection::vec(coordinate(), 3),
    ) {
        let line = format!(
            "<Idle|MPos:{}|WCO:{}>",
            format_position(&machine),
            format_position(&offset)
        );
        let status = parse(&line, None);
        let machine = status.machine_position.unwrap();
        let work = status.work_position.unwrap();
        let offset = status.work_coordinate_offset;
        for i in 0..6 {
            prop_assert!((work.axes()[i] - (machine.axes()[i] - offset.axes()[i])).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_machine_is_work_plus_offset(
        work in proptest::collection::vec(coordinate(), 3),
        offset in proptest::collection::vec(coordinate(), 3),
    ) {
        let line = format!(
            "<Run|WPos:{}|WCO:{}>",
            format_position(&work),
            format_position(&offset)
        );
        let status = parse(&line, None);
        let machine = status.machine_position.unwrap();
        let work = status.work_position.unwrap();
        let offset = status.work_coordinate_offset;
        for i in 0..6 {
            prop_assert!((machine.axes()[i] - (work.axes()[i] + offset.axes()[i])).abs() < 1e-9);
        }
    }
}
