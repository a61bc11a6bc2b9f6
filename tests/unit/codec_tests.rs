//! Unit tests for telemetry wire decoding.

use sweepmap::telemetry::codec::{decode_end, decode_start, decode_update};
use sweepmap::telemetry::TelemetryCommand;
use sweepmap::AppError;

#[test]
fn decodes_a_start_payload() {
    let command = decode_start("r1/a1/250/300/1600000000").expect("valid payload");
    let TelemetryCommand::StartSession {
        robot_id,
        area_id,
        x,
        y,
        timestamp,
    } = command
    else {
        panic!("expected a start command");
    };
    assert_eq!(robot_id, "r1");
    assert_eq!(area_id, "a1");
    assert_eq!((x, y), (250, 300));
    assert_eq!(timestamp.timestamp(), 1_600_000_000);
}

#[test]
fn decodes_an_update_payload() {
    let command = decode_update("r1/-50/1200/1600000042").expect("valid payload");
    let TelemetryCommand::UpdateSession {
        robot_id,
        x,
        y,
        timestamp,
    } = command
    else {
        panic!("expected an update command");
    };
    assert_eq!(robot_id, "r1");
    assert_eq!((x, y), (-50, 1_200), "negative coordinates are accepted");
    assert_eq!(timestamp.timestamp(), 1_600_000_042);
}

#[test]
fn decodes_an_end_payload() {
    let command = decode_end("r1/0/0/1600000099").expect("valid payload");
    assert!(matches!(command, TelemetryCommand::EndSession { .. }));
    assert_eq!(command.robot_id(), "r1");
}

#[test]
fn rejects_payloads_with_missing_fields() {
    for payload in ["r1/a1/250/300", "r1/250/300", "r1", ""] {
        let err = decode_start(payload).expect_err("field count is wrong");
        assert!(matches!(err, AppError::Telemetry(_)), "got: {err}");
    }
    let err = decode_update("r1/250/1600000000").expect_err("field count is wrong");
    assert!(matches!(err, AppError::Telemetry(_)));
}

#[test]
fn rejects_non_numeric_coordinates() {
    let err = decode_update("r1/east/300/1600000000").expect_err("bad coordinate");
    assert!(matches!(err, AppError::Telemetry(_)));
    assert!(err.to_string().contains("coordinate"));
}

#[test]
fn rejects_non_numeric_timestamps() {
    let err = decode_end("r1/250/300/yesterday").expect_err("bad timestamp");
    assert!(matches!(err, AppError::Telemetry(_)));
    assert!(err.to_string().contains("timestamp"));
}

#[test]
fn a_zero_timestamp_decodes_to_the_unix_epoch() {
    // The wire sentinel for "clock never set" decodes fine; rejecting it
    // is the lifecycle service's job.
    let command = decode_update("r1/250/300/0").expect("decodes");
    let TelemetryCommand::UpdateSession { timestamp, .. } = command else {
        panic!("expected an update command");
    };
    assert_eq!(timestamp.timestamp(), 0);
}
