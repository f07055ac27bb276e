use std::io::Error as IoError;
use std::path::PathBuf;

use thiserror::Error;

/// Why a single probe did not come back UP.
///
/// Never leaves the prober: every variant is classified as DOWN.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected status code {0}")]
    UnexpectedStatus(u16),
}

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("state of monitor `{key}` is poisoned")]
    StatePoisoned { key: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: IoError },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: IoError },
    #[error("failed to parse {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("no config path available, set XDG_CONFIG_HOME or HOME")]
    ConfigPathUnavailable,
    #[error("at least one monitor must be configured")]
    Empty,
    #[error("duplicate monitor key `{0}`")]
    DuplicateKey(String),
    #[error("invalid monitor key `{0}`, use letters, digits, `-` or `_`")]
    InvalidKey(String),
    #[error("monitor key `{0}` is reserved")]
    ReservedKey(String),
    #[error("invalid url for monitor `{key}`: {reason}")]
    InvalidUrl { key: String, reason: String },
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
}
