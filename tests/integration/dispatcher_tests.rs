//! Dispatcher tests: decoded commands flow through the per-robot workers
//! into the lifecycle service.

use std::sync::Arc;
use std::time::Duration;

use sweepmap::models::RobotHistory;
use sweepmap::service::RobotService;
use sweepmap::telemetry::{TelemetryCommand, TelemetryDispatcher};

use super::test_helpers::{harness, ts, Harness};

const T0: i64 = 1_600_000_000;

/// Poll the robot's history until `pred` holds or the deadline passes.
async fn wait_for_history<F>(h: &Harness, robot_id: &str, pred: F) -> RobotHistory
where
    F: Fn(&RobotHistory) -> bool,
{
    for _ in 0..100 {
        if let Ok(history) = h.robots.history(robot_id, 10).await {
            if pred(&history) {
                return history;
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("history for robot {robot_id} never reached the expected state");
}

#[tokio::test]
async fn commands_drive_a_session_from_start_to_end() {
    let h = harness().await;
    let dispatcher = TelemetryDispatcher::new(Arc::clone(&h.robots));

    dispatcher
        .dispatch(TelemetryCommand::StartSession {
            robot_id: h.robot.id.clone(),
            area_id: h.small_area.id.clone(),
            x: 0,
            y: 0,
            timestamp: ts(T0),
        })
        .await;
    dispatcher
        .dispatch(TelemetryCommand::UpdateSession {
            robot_id: h.robot.id.clone(),
            x: 250,
            y: 250,
            timestamp: ts(T0 + 1),
        })
        .await;
    dispatcher
        .dispatch(TelemetryCommand::UpdateSession {
            robot_id: h.robot.id.clone(),
            x: 750,
            y: 250,
            timestamp: ts(T0 + 2),
        })
        .await;
    dispatcher
        .dispatch(TelemetryCommand::EndSession {
            robot_id: h.robot.id.clone(),
            x: 750,
            y: 750,
            timestamp: ts(T0 + 30),
        })
        .await;

    let history = wait_for_history(&h, &h.robot.id, |hist| {
        hist.sessions.first().is_some_and(|s| !s.is_active)
    })
    .await;

    let session = &history.sessions[0];
    assert_eq!(session.duration_sec, 30);
    // Start report plus two updates plus the closing report.
    assert_eq!(session.position_history.len(), 4);
    let visited: u32 = session.area.grid.iter().map(|sq| sq.passes).sum();
    assert_eq!(visited, 3);
}

#[tokio::test]
async fn a_failing_command_does_not_wedge_the_worker() {
    let h = harness().await;
    let dispatcher = TelemetryDispatcher::new(Arc::clone(&h.robots));

    // No session exists yet, so this update fails inside the worker.
    dispatcher
        .dispatch(TelemetryCommand::UpdateSession {
            robot_id: h.robot.id.clone(),
            x: 250,
            y: 250,
            timestamp: ts(T0),
        })
        .await;
    // The same worker must still process the start that follows.
    dispatcher
        .dispatch(TelemetryCommand::StartSession {
            robot_id: h.robot.id.clone(),
            area_id: h.small_area.id.clone(),
            x: 0,
            y: 0,
            timestamp: ts(T0 + 1),
        })
        .await;

    let history = wait_for_history(&h, &h.robot.id, |hist| !hist.sessions.is_empty()).await;
    assert_eq!(history.sessions.len(), 1);
    assert!(history.sessions[0].is_active);
}

#[tokio::test]
async fn robots_get_independent_workers() {
    let h = harness().await;
    let dispatcher = Arc::new(TelemetryDispatcher::new(Arc::clone(&h.robots)));

    for (robot, area) in [(&h.robot, &h.small_area), (&h.other_robot, &h.area)] {
        dispatcher
            .dispatch(TelemetryCommand::StartSession {
                robot_id: robot.id.clone(),
                area_id: area.id.clone(),
                x: 0,
                y: 0,
                timestamp: ts(T0),
            })
            .await;
    }
    dispatcher
        .dispatch(TelemetryCommand::EndSession {
            robot_id: h.robot.id.clone(),
            x: 0,
            y: 0,
            timestamp: ts(T0 + 10),
        })
        .await;

    wait_for_history(&h, &h.robot.id, |hist| {
        hist.sessions.first().is_some_and(|s| !s.is_active)
    })
    .await;
    let other = wait_for_history(&h, &h.other_robot.id, |hist| !hist.sessions.is_empty()).await;
    assert!(other.sessions[0].is_active);
}
