use std::collections::HashMap;
use std::sync::Arc;

use super::checker::Prober;
use super::monitor::Monitor;
use crate::config::MonitorConfig;
use crate::error::ConfigError;

/// Every monitor of the process, keyed by path segment.
///
/// Membership is fixed at construction so lookups need no locking.
#[derive(Debug, Default)]
pub struct Registry {
    monitors: Vec<Arc<Monitor>>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Build one monitor per entry, keeping configuration order.
    ///
    /// All monitors share `prober` and with it the HTTP connection pool.
    pub fn from_config(configs: &[MonitorConfig], prober: &Prober) -> Result<Self, ConfigError> {
        let mut registry = Self::default();

        for config in configs {
            if registry.index.contains_key(&config.key) {
                return Err(ConfigError::DuplicateKey(config.key.clone()));
            }

            registry.index.insert(config.key.clone(), registry.monitors.len());
            registry.monitors.push(Arc::new(Monitor::new(config, prober.clone())));
        }

        Ok(registry)
    }

    pub fn lookup(&self, key: &str) -> Option<Arc<Monitor>> {
        self.index.get(key).map(|&i| Arc::clone(&self.monitors[i]))
    }

    /// Monitors in configuration order
    pub fn all(&self) -> impl Iterator<Item = (&str, &Arc<Monitor>)> {
        self.monitors.iter().map(|monitor| (monitor.key(), monitor))
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Start every monitor's schedule. Must run inside a tokio runtime.
    pub fn start_all(&self) {
        for monitor in &self.monitors {
            monitor.start_scheduling();
        }
        tracing::info!("Started {} monitor(s)", self.monitors.len());
    }

    /// Request every loop to stop; in-flight checks are left to finish.
    pub fn stop_all(&self) {
        for monitor in &self.monitors {
            monitor.stop_scheduling();
        }
        tracing::info!("Stopped {} monitor(s)", self.monitors.len());
    }
}
