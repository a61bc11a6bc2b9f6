#![forbid(unsafe_code)]

//! Coverage tracking for cleaning robots.
//!
//! Robots publish position telemetry while cleaning rectangular areas; the
//! server partitions each area into a grid sized to the robot's footprint,
//! counts edge-triggered cell passes, and tracks cleaning sessions from
//! start to end.

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod persistence;
pub mod service;
pub mod telemetry;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
