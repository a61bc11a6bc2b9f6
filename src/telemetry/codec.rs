//! Wire decoding for robot telemetry payloads.
//!
//! Robots publish slash-delimited plain-text payloads:
//!
//! | Message | Payload |
//! |---|---|
//! | start   | `robotID/areaID/x/y/unixTimestamp` |
//! | update  | `robotID/x/y/unixTimestamp` |
//! | end     | `robotID/x/y/unixTimestamp` |
//!
//! Any malformed field drops the whole message: a command either decodes
//! completely or never reaches the lifecycle service.

use chrono::{DateTime, Utc};

use crate::{AppError, Result};

/// A decoded telemetry command from a robot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelemetryCommand {
    /// Robot signals the start of a new cleaning session.
    StartSession {
        /// Robot to do the cleaning.
        robot_id: String,
        /// Area to clean.
        area_id: String,
        /// Initial X coordinate.
        x: i64,
        /// Initial Y coordinate.
        y: i64,
        /// Session start time, according to the robot.
        timestamp: DateTime<Utc>,
    },
    /// Robot reports a position during an active session.
    UpdateSession {
        /// Robot doing the cleaning.
        robot_id: String,
        /// Current X coordinate.
        x: i64,
        /// Current Y coordinate.
        y: i64,
        /// Report time, according to the robot.
        timestamp: DateTime<Utc>,
    },
    /// Robot signals the end of its cleaning session.
    EndSession {
        /// Robot doing the cleaning.
        robot_id: String,
        /// Final X coordinate.
        x: i64,
        /// Final Y coordinate.
        y: i64,
        /// Session end time, according to the robot.
        timestamp: DateTime<Utc>,
    },
}

impl TelemetryCommand {
    /// Identity of the robot this command belongs to. Dispatch is keyed
    /// on it so transitions for one robot stay strictly ordered.
    #[must_use]
    pub fn robot_id(&self) -> &str {
        match self {
            Self::StartSession { robot_id, .. }
            | Self::UpdateSession { robot_id, .. }
            | Self::EndSession { robot_id, .. } => robot_id,
        }
    }
}

/// Decode a session-start payload: `robotID/areaID/x/y/unixTimestamp`.
///
/// # Errors
///
/// Returns `AppError::Telemetry` when the payload does not have exactly
/// five fields or any numeric field fails to parse.
pub fn decode_start(payload: &str) -> Result<TelemetryCommand> {
    let parts: Vec<&str> = payload.splitn(5, '/').collect();
    let [robot_id, area_id, x, y, ts] = parts.as_slice() else {
        return Err(AppError::Telemetry(format!(
            "invalid message '{payload}', should contain 'robotID/areaID/robotX/robotY/unixTimestamp'"
        )));
    };
    Ok(TelemetryCommand::StartSession {
        robot_id: (*robot_id).to_owned(),
        area_id: (*area_id).to_owned(),
        x: parse_coordinate(x, payload)?,
        y: parse_coordinate(y, payload)?,
        timestamp: parse_timestamp(ts, payload)?,
    })
}

/// Decode a position-update payload: `robotID/x/y/unixTimestamp`.
///
/// # Errors
///
/// Returns `AppError::Telemetry` when the payload does not have exactly
/// four fields or any numeric field fails to parse.
pub fn decode_update(payload: &str) -> Result<TelemetryCommand> {
    let (robot_id, x, y, timestamp) = decode_report(payload)?;
    Ok(TelemetryCommand::UpdateSession {
        robot_id,
        x,
        y,
        timestamp,
    })
}

/// Decode a session-end payload: `robotID/x/y/unixTimestamp`.
///
/// # Errors
///
/// Returns `AppError::Telemetry` when the payload does not have exactly
/// four fields or any numeric field fails to parse.
pub fn decode_end(payload: &str) -> Result<TelemetryCommand> {
    let (robot_id, x, y, timestamp) = decode_report(payload)?;
    Ok(TelemetryCommand::EndSession {
        robot_id,
        x,
        y,
        timestamp,
    })
}

fn decode_report(payload: &str) -> Result<(String, i64, i64, DateTime<Utc>)> {
    let parts: Vec<&str> = payload.splitn(4, '/').collect();
    let [robot_id, x, y, ts] = parts.as_slice() else {
        return Err(AppError::Telemetry(format!(
            "invalid message '{payload}', should contain 'robotID/robotX/robotY/unixTimestamp'"
        )));
    };
    Ok((
        (*robot_id).to_owned(),
        parse_coordinate(x, payload)?,
        parse_coordinate(y, payload)?,
        parse_timestamp(ts, payload)?,
    ))
}

fn parse_coordinate(raw: &str, payload: &str) -> Result<i64> {
    raw.parse().map_err(|_| {
        AppError::Telemetry(format!("invalid coordinate '{raw}' in message: '{payload}'"))
    })
}

fn parse_timestamp(raw: &str, payload: &str) -> Result<DateTime<Utc>> {
    let secs: i64 = raw.parse().map_err(|_| {
        AppError::Telemetry(format!("invalid timestamp '{raw}' in message: '{payload}'"))
    })?;
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        AppError::Telemetry(format!(
            "timestamp '{raw}' out of range in message: '{payload}'"
        ))
    })
}
