//! Tracing subscriber initialisation.

use anyhow::{Context, Result};
use tracing_subscriber::{
    layer::SubscriberExt, registry::Registry, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::config::{Config, LogFormat};

/// Install the global tracing subscriber described by `cfg`.
///
/// Events go to stderr so they never mix with a host's stdout.
/// `RUST_LOG` takes precedence over [`Config::log_level`].
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_telemetry(cfg: &Config) -> Result<()> {
    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match cfg.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .context("failed to initialise tracing subscriber")?;

    Ok(())
}
