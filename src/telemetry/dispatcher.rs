//! Per-robot ordered command dispatch.
//!
//! Every lifecycle transition reads a robot's current-session reference,
//! mutates it, and writes it back, so commands for the same robot must
//! never interleave. The dispatcher keys one worker task per robot
//! identity; its bounded queue preserves arrival order, and workers for
//! different robots run fully in parallel with no shared state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{info, warn};

use crate::service::{RobotRepository, RobotService, StartSessionArgs, UpdateSessionArgs};
use crate::telemetry::TelemetryCommand;

/// Queue depth per robot worker; a robot reporting faster than its
/// transitions persist gets backpressured at the transport.
const WORKER_QUEUE_DEPTH: usize = 64;

/// Routes decoded telemetry commands to the lifecycle service, one
/// ordered worker per robot.
pub struct TelemetryDispatcher<R> {
    service: Arc<RobotService<R>>,
    workers: Mutex<HashMap<String, mpsc::Sender<TelemetryCommand>>>,
}

impl<R: RobotRepository + 'static> TelemetryDispatcher<R> {
    /// Create a dispatcher over the given lifecycle service.
    #[must_use]
    pub fn new(service: Arc<RobotService<R>>) -> Self {
        Self {
            service,
            workers: Mutex::new(HashMap::new()),
        }
    }

    /// Enqueue a command on its robot's worker, spawning the worker on
    /// first contact.
    ///
    /// Awaiting the bounded send is what keeps per-robot ordering: the
    /// caller cannot race ahead of the queue.
    pub async fn dispatch(&self, command: TelemetryCommand) {
        let robot_id = command.robot_id().to_owned();
        let tx = {
            let mut workers = self.workers.lock().await;
            workers
                .entry(robot_id.clone())
                .or_insert_with(|| {
                    let (tx, rx) = mpsc::channel(WORKER_QUEUE_DEPTH);
                    tokio::spawn(run_worker(Arc::clone(&self.service), robot_id.clone(), rx));
                    tx
                })
                .clone()
        };
        if tx.send(command).await.is_err() {
            warn!(robot_id, "telemetry worker gone, command dropped");
        }
    }
}

async fn run_worker<R: RobotRepository>(
    service: Arc<RobotService<R>>,
    robot_id: String,
    mut rx: mpsc::Receiver<TelemetryCommand>,
) {
    while let Some(command) = rx.recv().await {
        apply(&service, command).await;
    }
    info!(robot_id, "telemetry worker stopped");
}

/// Apply one command to the lifecycle service.
///
/// Errors are logged and the command dropped; a lost update is expected
/// to be superseded by the robot's next periodic report.
async fn apply<R: RobotRepository>(service: &RobotService<R>, command: TelemetryCommand) {
    match command {
        TelemetryCommand::StartSession {
            robot_id,
            area_id,
            x,
            y,
            timestamp,
        } => {
            let result = service
                .start_session(StartSessionArgs {
                    robot_id,
                    area_id,
                    robot_x: x,
                    robot_y: y,
                    started_at: timestamp,
                })
                .await;
            if let Err(err) = result {
                warn!(%err, "could not start session");
            }
        }
        TelemetryCommand::UpdateSession {
            robot_id,
            x,
            y,
            timestamp,
        } => {
            let result = service
                .update_session(UpdateSessionArgs {
                    robot_id,
                    robot_x: x,
                    robot_y: y,
                    reported_at: timestamp,
                    end_session: false,
                })
                .await;
            if let Err(err) = result {
                warn!(%err, "could not update session");
            }
        }
        TelemetryCommand::EndSession {
            robot_id,
            x,
            y,
            timestamp,
        } => {
            let result = service
                .end_session(UpdateSessionArgs {
                    robot_id,
                    robot_x: x,
                    robot_y: y,
                    reported_at: timestamp,
                    end_session: true,
                })
                .await;
            if let Err(err) = result {
                warn!(%err, "could not end session");
            }
        }
    }
}
