//! Unit tests for configuration parsing and validation.

use sweepmap::{AppError, GlobalConfig};

#[test]
fn empty_toml_yields_defaults() {
    let config = GlobalConfig::from_toml_str("").expect("defaults apply");
    assert_eq!(config.http_port, 3000);
    assert_eq!(config.db_path, "sweepmap.db");
    assert_eq!(config.history_max, 10);
    assert_eq!(config.telemetry.port, 1884);
    assert_eq!(config.telemetry.topic_session_start, "/robot/session/start");
    assert_eq!(config.telemetry.topic_session_update, "/robot/session/update");
    assert_eq!(config.telemetry.topic_session_end, "/robot/session/end");
}

#[test]
fn full_toml_overrides_defaults() {
    let raw = r#"
http_port = 8080
db_path = "/tmp/robots.db"
history_max = 25

[telemetry]
port = 2883
topic_session_start = "/fleet/start"
topic_session_update = "/fleet/update"
topic_session_end = "/fleet/end"
"#;
    let config = GlobalConfig::from_toml_str(raw).expect("valid config");
    assert_eq!(config.http_port, 8080);
    assert_eq!(config.db_path, "/tmp/robots.db");
    assert_eq!(config.history_max, 25);
    assert_eq!(config.telemetry.port, 2883);
    assert_eq!(config.telemetry.topic_session_start, "/fleet/start");
}

#[test]
fn rejects_zero_history_max() {
    let err = GlobalConfig::from_toml_str("history_max = 0").expect_err("invalid");
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn rejects_colliding_ports() {
    let raw = "http_port = 4000\n[telemetry]\nport = 4000\n";
    let err = GlobalConfig::from_toml_str(raw).expect_err("invalid");
    assert!(matches!(err, AppError::Config(_)));
    assert!(err.to_string().contains("must differ"));
}

#[test]
fn rejects_topics_containing_spaces() {
    let raw = "[telemetry]\ntopic_session_start = \"/robot/session start\"\n";
    let err = GlobalConfig::from_toml_str(raw).expect_err("invalid");
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn rejects_invalid_toml_syntax() {
    let err = GlobalConfig::from_toml_str("http_port = ").expect_err("invalid");
    assert!(matches!(err, AppError::Config(_)));
}
