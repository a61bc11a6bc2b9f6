//! Telemetry ingest: wire decoding, per-robot dispatch, and the TCP
//! transport adapter robots publish their session messages through.

pub mod codec;
pub mod dispatcher;
pub mod listener;

pub use codec::TelemetryCommand;
pub use dispatcher::TelemetryDispatcher;
