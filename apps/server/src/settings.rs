use std::path::PathBuf;

use clap::Parser;

/// Process level settings, from flags or the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "pulse-server", version, about = "HTTP liveness dashboard")]
pub struct Settings {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Address to bind
    #[arg(short, long, env = "BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// Monitor list (TOML). Defaults to ~/.config/pulse/config.toml
    #[arg(short, long, env = "PULSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Seconds to let in-flight requests finish on shutdown
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = 15)]
    pub shutdown_timeout: u64,
}
