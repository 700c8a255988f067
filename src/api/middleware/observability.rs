//! Observability setup.
//!
//! Installs the global tracing subscriber. `RUST_LOG` controls the level
//! (default: info); `LOG_FORMAT=json` switches to JSON lines on stderr.

use crate::config::LogFormat;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(format: LogFormat) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().try_init()?,
        LogFormat::Text => builder.with_ansi(false).try_init()?,
    }
    Ok(())
}
