use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use super::checker::Prober;
use super::history::HistoryBuffer;
use super::types::{CheckOutcome, MonitorSnapshot, MonitorStatus, StatusRecord};
use crate::CHECK_INTERVAL;
use crate::config::MonitorConfig;
use crate::error::MonitorError;

/// Scheduling state shared with the loop task.
///
/// Every start bumps `generation`; a loop only keeps going while the
/// generation it was spawned for is still the running one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Schedule {
    running: bool,
    generation: u64,
}

impl Schedule {
    fn is_active(&self, generation: u64) -> bool {
        self.running && self.generation == generation
    }
}

/// Fields that change together on every completed check
#[derive(Debug, Default)]
struct MonitorState {
    current_status: MonitorStatus,
    last_check: Option<DateTime<Utc>>,
    history: HistoryBuffer,
}

/// A single monitored target and its rolling state.
pub struct Monitor {
    key: String,
    name: String,
    url: String,
    prober: Prober,
    state: Mutex<MonitorState>,
    schedule: watch::Sender<Schedule>,
}

impl std::fmt::Debug for Monitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("key", &self.key)
            .field("url", &self.url)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl Monitor {
    pub fn new(config: &MonitorConfig, prober: Prober) -> Self {
        let (schedule, _) = watch::channel(Schedule::default());

        Self {
            key: config.key.clone(),
            name: config.name.clone(),
            url: config.url.clone(),
            prober,
            state: Mutex::new(MonitorState::default()),
            schedule,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_running(&self) -> bool {
        self.schedule.borrow().running
    }

    /// Start the periodic check loop on the current tokio runtime.
    ///
    /// Returns `false` without doing anything if the monitor is already
    /// running.
    pub fn start_scheduling(self: &Arc<Self>) -> bool {
        let mut generation = 0;
        let started = self.schedule.send_if_modified(|schedule| {
            if schedule.running {
                return false;
            }
            schedule.running = true;
            schedule.generation += 1;
            generation = schedule.generation;
            true
        });

        if !started {
            debug!(monitor = %self.key, "Monitoring already running");
            return false;
        }

        let monitor = Arc::clone(self);
        let schedule = self.schedule.subscribe();
        tokio::spawn(async move {
            monitor.run_schedule(generation, schedule).await;
        });

        info!(monitor = %self.key, url = %self.url, "Health monitoring started");
        true
    }

    /// Ask the loop to exit. A check already in flight still completes and
    /// is recorded.
    pub fn stop_scheduling(&self) -> bool {
        let stopped = self.schedule.send_if_modified(|schedule| {
            let was_running = schedule.running;
            schedule.running = false;
            was_running
        });

        if stopped {
            info!(monitor = %self.key, "Health monitoring stop requested");
        }
        stopped
    }

    async fn run_schedule(&self, generation: u64, mut schedule: watch::Receiver<Schedule>) {
        loop {
            if !schedule.borrow().is_active(generation) {
                break;
            }

            if let Err(e) = self.perform_check().await {
                error!(monitor = %self.key, "Scheduled check failed: {}", e);
                break;
            }

            tokio::select! {
                _ = sleep(CHECK_INTERVAL) => {}
                _ = wait_until_inactive(&mut schedule, generation) => break,
            }
        }

        debug!(monitor = %self.key, generation, "Monitoring loop exited");
    }

    /// Probe the target and record the result.
    ///
    /// The probe runs without the state lock; status, timestamp and history
    /// entry are then written under one acquisition so readers see all three
    /// or none.
    pub async fn perform_check(&self) -> Result<CheckOutcome, MonitorError> {
        let probe = self.prober.check(&self.url).await;

        let outcome = {
            let mut state = self.lock_state()?;
            let checked_at = Utc::now();

            state.current_status = probe.status.into();
            state.last_check = Some(checked_at);
            state.history.append(StatusRecord::new(checked_at, probe.status));

            CheckOutcome { status: probe.status, checked_at }
        };

        if outcome.status.is_up() {
            info!(
                monitor = %self.key,
                status = %outcome.status,
                checked_at = %outcome.checked_at,
                "Health check"
            );
        } else {
            warn!(
                monitor = %self.key,
                status = %outcome.status,
                checked_at = %outcome.checked_at,
                "Health check"
            );
        }

        Ok(outcome)
    }

    /// Consistent copy of status, last check time and history.
    pub fn read_state(&self) -> Result<MonitorSnapshot, MonitorError> {
        let state = self.lock_state()?;

        Ok(MonitorSnapshot {
            key: self.key.clone(),
            name: self.name.clone(),
            url: self.url.clone(),
            current_status: state.current_status,
            last_check: state.last_check,
            history: state.history.snapshot(),
            running: self.is_running(),
        })
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, MonitorState>, MonitorError> {
        self.state.lock().map_err(|_| MonitorError::StatePoisoned { key: self.key.clone() })
    }
}

async fn wait_until_inactive(schedule: &mut watch::Receiver<Schedule>, generation: u64) {
    // A dropped sender means the monitor is gone, which also ends the loop
    let _ = schedule.wait_for(|s| !s.is_active(generation)).await;
}
