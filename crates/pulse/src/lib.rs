//! Pulse - periodic HTTP liveness monitoring
//!
//! Each configured target gets a [`Monitor`] that probes it on a fixed
//! cadence and keeps a bounded rolling history of the results. Monitors are
//! collected in a [`Registry`] built once at startup and shared with the
//! presentation layer, which reads snapshots and can trigger checks on demand.

pub mod config;
pub mod error;
pub mod monitoring;

pub use config::{Config, MonitorConfig};
pub use error::{CheckError, ConfigError, MonitorError};
pub use monitoring::{
    CheckOutcome, CheckStatus, Checker, HistoryBuffer, HttpChecker, Monitor, MonitorSnapshot,
    MonitorStatus, ProbeOutcome, Prober, Registry, StatusRecord,
};

use std::time::Duration;

/// Wait between the end of one scheduled check and the start of the next.
pub const CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Upper bound on a single probe, connect to last byte.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Number of records each monitor keeps.
pub const HISTORY_CAPACITY: usize = 100;
