use std::collections::HashSet;
use std::{env, fmt, fs, path};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// Keys that would collide with fixed routes of the dashboard.
pub const RESERVED_KEYS: &[&str] = &["health", "api"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub monitors: Vec<MonitorConfig>,
}

/// One monitored target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Path segment identifying the monitor, e.g. `/ariaibot`
    pub key: String,
    /// Human readable name shown on the dashboard
    pub name: String,
    pub url: String,
}

impl MonitorConfig {
    pub fn new(key: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { key: key.into(), name: name.into(), url: url.into() }
    }
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// Get default config path ($XDG_CONFIG_HOME/pulse/config.toml or
/// $HOME/.config/...)
fn default_config_path() -> Result<path::PathBuf, ConfigError> {
    let path = if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        path::PathBuf::from(config_home)
    } else if let Some(home_dir) = env::home_dir() {
        home_dir.join(".config")
    } else {
        return Err(ConfigError::ConfigPathUnavailable);
    };

    Ok(path.join("pulse/config.toml"))
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl Default for Config {
    fn default() -> Self {
        Self {
            monitors: vec![MonitorConfig::new(
                "ariaibot",
                "AriaiBot API",
                "https://ariaibot-2693c651aa05.herokuapp.com/health",
            )],
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_2 = write_indented(2);

        writeln!(f, "Configured monitors ({}):", self.monitors.len())?;
        for monitor in &self.monitors {
            write_title_1(f, &monitor.key)?;
            write_2(f, "Name", &monitor.name)?;
            write_2(f, "URL", &monitor.url)?;
        }

        Ok(())
    }
}

impl Config {
    /// Generate Config structure from file
    ///
    /// Reads `~/.config/pulse/config.toml` or the specified path (forced to a
    /// `.toml` extension). A default config is written there if none exists.
    ///
    /// ```no_run
    /// let cfg = pulse::Config::from_config(None::<&std::path::Path>)?;
    /// println!("{}", cfg);
    /// # Ok::<(), pulse::ConfigError>(())
    /// ```
    pub fn from_config(optional_path: Option<impl AsRef<path::Path>>) -> Result<Self, ConfigError> {
        let config_path: path::PathBuf = if let Some(path) = optional_path {
            normalize_toml_path(path.as_ref())
        } else {
            default_config_path()?
        };

        let config = if config_path.exists() {
            let raw_string = fs::read_to_string(&config_path)
                .map_err(|source| ConfigError::Read { path: config_path.clone(), source })?;
            Self::from_toml_str(&raw_string)
                .map_err(|source| ConfigError::Parse { path: config_path.clone(), source })?
        } else {
            let config = Self::default();
            config.write_config(&config_path)?;
            tracing::info!("Wrote default configuration to {}", config_path.display());
            config
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Serialize and write a config to a file
    pub fn write_config(&self, path: &path::Path) -> Result<(), ConfigError> {
        let config_str: String = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| ConfigError::Write { path: parent.to_path_buf(), source })?;
        }

        fs::write(path, config_str)
            .map_err(|source| ConfigError::Write { path: path.to_path_buf(), source })
    }

    /// Check that the monitor list can back a registry: keys unique and
    /// URL-safe, targets absolute http(s) URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monitors.is_empty() {
            return Err(ConfigError::Empty);
        }

        let mut seen = HashSet::new();
        for monitor in &self.monitors {
            if !is_valid_key(&monitor.key) {
                return Err(ConfigError::InvalidKey(monitor.key.clone()));
            }
            if RESERVED_KEYS.contains(&monitor.key.as_str()) {
                return Err(ConfigError::ReservedKey(monitor.key.clone()));
            }
            if !seen.insert(monitor.key.as_str()) {
                return Err(ConfigError::DuplicateKey(monitor.key.clone()));
            }

            let url = Url::parse(&monitor.url).map_err(|e| ConfigError::InvalidUrl {
                key: monitor.key.clone(),
                reason: e.to_string(),
            })?;
            match url.scheme() {
                "http" | "https" => {}
                other => {
                    return Err(ConfigError::InvalidUrl {
                        key: monitor.key.clone(),
                        reason: format!("unsupported scheme `{other}`"),
                    });
                }
            }
        }

        Ok(())
    }
}
