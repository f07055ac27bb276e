/// Monitoring engine
///
/// This module is responsible for:
/// - Probing HTTP targets and classifying them UP or DOWN
/// - Keeping a bounded history of results per target
/// - Scheduling periodic checks and serving consistent snapshots
pub mod checker;
pub mod history;
pub mod monitor;
pub mod registry;
pub mod types;

pub use checker::{Checker, HttpChecker, ProbeOutcome, Prober};
pub use history::HistoryBuffer;
pub use monitor::Monitor;
pub use registry::Registry;
pub use types::{CheckOutcome, CheckStatus, MonitorSnapshot, MonitorStatus, StatusRecord};
