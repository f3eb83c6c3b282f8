//! Tracing setup for the notifier binary.
//!
//! Logs go to stderr (text by default, JSON with `LOG_FORMAT=json`), filtered
//! by `RUST_LOG`. With `ENABLE_OTEL` and an OTLP endpoint configured, spans
//! are exported as well; call [`shutdown`] before exiting so they get flushed.

use anyhow::Result;

mod config;
mod tracing_init;

pub use config::{TelemetryConfig, TelemetryProtocol};
pub use tracing_init::{init_telemetry, telemetry_enabled};

/// Installs the subscriber for `service_name`, configured from the environment.
pub fn install(service_name: &str) -> Result<()> {
    init_telemetry(TelemetryConfig::from_env(
        service_name,
        env!("CARGO_PKG_VERSION"),
    ))
}

pub fn shutdown() {
    tracing_init::shutdown_telemetry();
}
