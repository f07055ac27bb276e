use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of a single probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckStatus {
    #[serde(rename = "UP")]
    Up,
    #[serde(rename = "DOWN")]
    Down,
}

impl CheckStatus {
    pub fn is_up(self) -> bool {
        matches!(self, CheckStatus::Up)
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Up => write!(f, "UP"),
            CheckStatus::Down => write!(f, "DOWN"),
        }
    }
}

/// Status shown for a monitor; `Unknown` until its first check completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MonitorStatus {
    #[default]
    Unknown,
    #[serde(rename = "UP")]
    Up,
    #[serde(rename = "DOWN")]
    Down,
}

impl From<CheckStatus> for MonitorStatus {
    fn from(status: CheckStatus) -> Self {
        match status {
            CheckStatus::Up => MonitorStatus::Up,
            CheckStatus::Down => MonitorStatus::Down,
        }
    }
}

impl std::fmt::Display for MonitorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonitorStatus::Unknown => write!(f, "Unknown"),
            MonitorStatus::Up => write!(f, "UP"),
            MonitorStatus::Down => write!(f, "DOWN"),
        }
    }
}

/// One entry of a monitor's history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub timestamp: DateTime<Utc>,
    pub status: CheckStatus,
}

impl StatusRecord {
    pub fn new(timestamp: DateTime<Utc>, status: CheckStatus) -> Self {
        Self { timestamp, status }
    }
}

/// What a completed check recorded on its monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub status: CheckStatus,
    pub checked_at: DateTime<Utc>,
}

/// Point-in-time copy of a monitor, taken under its lock.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorSnapshot {
    pub key: String,
    pub name: String,
    pub url: String,
    pub current_status: MonitorStatus,
    pub last_check: Option<DateTime<Utc>>,
    /// Oldest first
    pub history: Vec<StatusRecord>,
    pub running: bool,
}

impl MonitorSnapshot {
    /// History for display, most recent check first
    pub fn history_newest_first(&self) -> impl Iterator<Item = &StatusRecord> {
        self.history.iter().rev()
    }
}
