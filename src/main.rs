#![forbid(unsafe_code)]

//! `sweepmap` — coverage tracking server binary.
//!
//! Bootstraps configuration, connects the `SQLite` store, and starts the
//! telemetry listener plus the HTTP query API.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use sweepmap::api::{self, ApiContext};
use sweepmap::persistence::{db, seed, SqliteAreaRepository, SqliteRobotRepository};
use sweepmap::service::{AreaService, RobotService};
use sweepmap::telemetry::{listener, TelemetryDispatcher};
use sweepmap::{AppError, GlobalConfig, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "sweepmap", about = "Cleaning robot coverage tracking server", version, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Seed demo robots and areas on startup if the database is empty.
    #[arg(long)]
    seed: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;
    info!("sweepmap server bootstrap");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    // ── Load configuration ──────────────────────────────
    let config = match &args.config {
        Some(path) => GlobalConfig::load_from_path(path)?,
        None => GlobalConfig::default(),
    };
    info!(
        http_port = config.http_port,
        telemetry_port = config.telemetry.port,
        db_path = %config.db_path,
        "configuration loaded"
    );

    // ── Initialize database ─────────────────────────────
    let pool = db::connect(&config.db_path).await?;
    info!("database connected");

    if args.seed {
        seed::seed_demo_data(&pool).await?;
    }

    // ── Build services ──────────────────────────────────
    let robot_service = Arc::new(RobotService::new(SqliteRobotRepository::new(pool.clone())));
    let area_service = Arc::new(AreaService::new(SqliteAreaRepository::new(pool.clone())));
    let dispatcher = Arc::new(TelemetryDispatcher::new(Arc::clone(&robot_service)));

    let ctx = ApiContext {
        robots: Arc::clone(&robot_service),
        areas: area_service,
        history_max: config.history_max,
    };

    // ── Start listeners ─────────────────────────────────
    let ct = CancellationToken::new();

    let telemetry_ct = ct.clone();
    let telemetry_config = config.telemetry.clone();
    let telemetry_handle = tokio::spawn(async move {
        if let Err(err) = listener::serve(telemetry_config, dispatcher, telemetry_ct).await {
            error!(%err, "telemetry listener failed");
        }
    });

    let api_ct = ct.clone();
    let api_port = config.http_port;
    let api_handle = tokio::spawn(async move {
        if let Err(err) = api::serve(api_port, ctx, api_ct).await {
            error!(%err, "api server failed");
        }
    });

    info!("sweepmap server ready");

    // ── Wait for shutdown signal ────────────────────────
    shutdown_signal().await;
    info!("shutdown signal received");
    ct.cancel();

    let _ = tokio::join!(telemetry_handle, api_handle);
    pool.close().await;
    info!("sweepmap shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(err) => {
                tracing::warn!(%err, "failed to register SIGTERM handler, using ctrl-c only");
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = ctrl_c.await {
            tracing::error!(%err, "ctrl-c signal handler failed");
        }
    }
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(env_filter);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
