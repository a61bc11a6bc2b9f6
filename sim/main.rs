#![forbid(unsafe_code)]

//! `sweepmap-sim` — load simulator.
//!
//! Drives a number of concurrent fake cleaning sessions against a
//! running server: robots and areas are fetched from the query API, then
//! each simulated robot publishes start/update/end telemetry lines over
//! the TCP listener while walking a deterministic serpentine path.

use std::time::Duration;

use clap::Parser;
use rand::Rng;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use sweepmap::config::TelemetryConfig;
use sweepmap::models::{Area, Robot};
use sweepmap::{AppError, Result};

#[derive(Debug, Parser)]
#[command(name = "sweepmap-sim", about = "Cleaning session load simulator", version, long_about = None)]
struct Cli {
    /// Base URL of a running sweepmap query API.
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    api_url: String,

    /// Address of the telemetry TCP listener.
    #[arg(long, default_value = "127.0.0.1:1884")]
    telemetry_addr: String,

    /// Number of concurrent cleaning sessions to run.
    #[arg(long, default_value_t = 4)]
    concur: u32,

    /// Delay between position reports, in milliseconds.
    #[arg(long, default_value_t = 250)]
    report_interval_ms: u64,
}

#[derive(Debug, Deserialize)]
struct RobotsResponse {
    robots: Vec<Robot>,
}

#[derive(Debug, Deserialize)]
struct AreasResponse {
    areas: Vec<Area>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .try_init()
        .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?;

    let args = Cli::parse();
    let client = reqwest::Client::new();

    let robots: RobotsResponse = fetch_json(&client, &format!("{}/v1/robots", args.api_url)).await?;
    let areas: AreasResponse = fetch_json(&client, &format!("{}/v1/areas", args.api_url)).await?;
    if robots.robots.is_empty() || areas.areas.is_empty() {
        return Err(AppError::Config(
            "server has no robots or areas; start it with --seed".into(),
        ));
    }
    info!(
        robots = robots.robots.len(),
        areas = areas.areas.len(),
        "fetched inventory"
    );

    let topics = TelemetryConfig::default();
    let mut handles = Vec::new();
    for i in 0..args.concur {
        // Pick a robot, an area, and a random session length up front;
        // the RNG handle must not cross an await point.
        let (robot, area, moves) = {
            let mut rng = rand::thread_rng();
            let robot = robots.robots[rng.gen_range(0..robots.robots.len())].clone();
            let area = areas.areas[rng.gen_range(0..areas.areas.len())].clone();
            (robot, area, rng.gen_range(2..=51))
        };

        let session_id = format!("sess{:03}", i + 1);
        let addr = args.telemetry_addr.clone();
        let topics = topics.clone();
        let interval = Duration::from_millis(args.report_interval_ms);
        handles.push(tokio::spawn(async move {
            if let Err(err) =
                run_cleaning_session(&session_id, &addr, &topics, &robot, &area, moves, interval)
                    .await
            {
                warn!(session_id, %err, "simulated session failed");
            }
        }));

        // Stagger session starts.
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    for handle in handles {
        let _ = handle.await;
    }
    info!("all simulated sessions finished");
    Ok(())
}

async fn fetch_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T> {
    client
        .get(url)
        .send()
        .await
        .map_err(|err| AppError::Io(format!("GET {url} failed: {err}")))?
        .json()
        .await
        .map_err(|err| AppError::Io(format!("GET {url} returned invalid body: {err}")))
}

async fn run_cleaning_session(
    session_id: &str,
    addr: &str,
    topics: &TelemetryConfig,
    robot: &Robot,
    area: &Area,
    moves: u32,
    interval: Duration,
) -> Result<()> {
    let mut stream = TcpStream::connect(addr)
        .await
        .map_err(|err| AppError::Io(format!("connect {addr} failed: {err}")))?;

    info!(session_id, robot = %robot.id, area = %area.id, moves, "session start");
    publish(
        &mut stream,
        &topics.topic_session_start,
        &format!("{}/{}/0/0/{}", robot.id, area.id, now_unix()),
    )
    .await?;
    tokio::time::sleep(interval).await;

    let mut path = SnakePath::new(200, area.size_x, area.size_y, robot.size);
    let mut x = 0;
    let mut y = 0;
    for _ in 0..moves {
        (x, y) = path.next_position();
        publish(
            &mut stream,
            &topics.topic_session_update,
            &format!("{}/{x}/{y}/{}", robot.id, now_unix()),
        )
        .await?;
        tokio::time::sleep(interval).await;
    }

    info!(session_id, robot = %robot.id, x, y, "session end");
    publish(
        &mut stream,
        &topics.topic_session_end,
        &format!("{}/{x}/{y}/{}", robot.id, now_unix()),
    )
    .await
}

async fn publish(stream: &mut TcpStream, topic: &str, payload: &str) -> Result<()> {
    stream
        .write_all(format!("{topic} {payload}\n").as_bytes())
        .await
        .map_err(|err| AppError::Io(format!("publish failed: {err}")))
}

fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Serpentine path generator: sweep right, drop one robot-diameter row,
/// sweep left, and reverse vertical direction at the far wall. Positions
/// stay clamped inside the area by the robot's radius.
struct SnakePath {
    speed: i64,
    robot_size: i64,
    robot_center: i64,
    x: i64,
    y: i64,
    go_right: bool,
    go_down: bool,
    size_x: i64,
    size_y: i64,
}

impl SnakePath {
    fn new(speed: i64, size_x: i64, size_y: i64, robot_size: i64) -> Self {
        Self {
            speed,
            robot_size,
            robot_center: robot_size / 2,
            x: 0,
            y: 0,
            go_right: true,
            go_down: true,
            size_x,
            size_y,
        }
    }

    fn next_position(&mut self) -> (i64, i64) {
        if self.go_right {
            self.x += self.speed;
            if self.x > self.size_x - self.robot_center {
                // Past the right wall.
                self.x = self.size_x - self.robot_center;
                self.go_right = false;
                self.step_row();
            }
        } else {
            self.x -= self.speed;
            if self.x < self.robot_center {
                // Past the left wall.
                self.x = self.robot_center;
                self.go_right = true;
                self.step_row();
            }
        }
        (self.x, self.y)
    }

    /// Move one row down (or up), reversing at the top or bottom wall.
    fn step_row(&mut self) {
        if self.go_down {
            self.y += self.robot_size;
            if self.y > self.size_y - self.robot_center {
                self.y = self.size_y - self.robot_center;
                self.go_down = false;
            }
        } else {
            self.y -= self.robot_size;
            if self.y < self.robot_center {
                self.y = self.robot_center;
                self.go_down = true;
            }
        }
    }
}
