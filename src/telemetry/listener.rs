//! TCP transport adapter for robot telemetry.
//!
//! Accepts newline-delimited `topic payload` messages, a thin stand-in
//! for a broker feed. Each line is matched against the configured
//! session topics and decoded; malformed messages are dropped with a
//! logged warning and never reach the lifecycle service.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::TelemetryConfig;
use crate::service::RobotRepository;
use crate::telemetry::{codec, TelemetryDispatcher};
use crate::{AppError, Result};

/// Serve the telemetry listener until cancellation.
///
/// Each accepted connection gets its own reader task; commands are
/// forwarded to the dispatcher, which serializes them per robot.
///
/// # Errors
///
/// Returns `AppError::Io` if the listener fails to bind.
pub async fn serve<R: RobotRepository + 'static>(
    config: TelemetryConfig,
    dispatcher: Arc<TelemetryDispatcher<R>>,
    ct: CancellationToken,
) -> Result<()> {
    let bind = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = TcpListener::bind(bind)
        .await
        .map_err(|err| AppError::Io(format!("telemetry listener failed to bind {bind}: {err}")))?;
    info!(%bind, "telemetry listener ready");

    let config = Arc::new(config);
    loop {
        tokio::select! {
            () = ct.cancelled() => break,
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, peer)) => {
                        tokio::spawn(handle_connection(
                            stream,
                            peer,
                            Arc::clone(&config),
                            Arc::clone(&dispatcher),
                            ct.clone(),
                        ));
                    }
                    Err(err) => warn!(%err, "telemetry accept failed"),
                }
            }
        }
    }

    info!("telemetry listener stopped");
    Ok(())
}

async fn handle_connection<R: RobotRepository + 'static>(
    stream: TcpStream,
    peer: SocketAddr,
    config: Arc<TelemetryConfig>,
    dispatcher: Arc<TelemetryDispatcher<R>>,
    ct: CancellationToken,
) {
    info!(%peer, "telemetry connection opened");
    let mut lines = BufReader::new(stream).lines();
    loop {
        let line = tokio::select! {
            () = ct.cancelled() => break,
            line = lines.next_line() => line,
        };
        match line {
            Ok(Some(line)) => handle_line(&line, &config, &dispatcher).await,
            Ok(None) => break,
            Err(err) => {
                warn!(%peer, %err, "telemetry read failed");
                break;
            }
        }
    }
    info!(%peer, "telemetry connection closed");
}

/// Decode one `topic payload` line and forward the command.
async fn handle_line<R: RobotRepository + 'static>(
    line: &str,
    config: &TelemetryConfig,
    dispatcher: &TelemetryDispatcher<R>,
) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    let Some((topic, payload)) = line.split_once(' ') else {
        warn!(line, "dropping telemetry line without topic");
        return;
    };

    let decoded = if topic == config.topic_session_start {
        codec::decode_start(payload)
    } else if topic == config.topic_session_update {
        codec::decode_update(payload)
    } else if topic == config.topic_session_end {
        codec::decode_end(payload)
    } else {
        warn!(topic, "dropping message on unknown topic");
        return;
    };

    match decoded {
        Ok(command) => dispatcher.dispatch(command).await,
        Err(err) => warn!(%err, "dropping malformed telemetry message"),
    }
}
