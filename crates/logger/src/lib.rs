//! Tracing subscriber setup shared by the Pulse binaries.

mod subscriber;

pub use subscriber::{LogFormat, init as init_tracing, init_with_level};
