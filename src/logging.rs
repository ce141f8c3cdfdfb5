use crate::error::IngestError;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "BDC_LOG";

/// Initialize tracing with the `BDC_LOG` filter, defaulting to "info".
///
/// Events go to stderr and, when `run_log` is given, are appended to that
/// file without colors.
///
/// # Errors
///
/// Will return `Err` if the log file cannot be opened or a subscriber is
/// already installed
pub fn init_tracing(run_log: Option<&Path>) -> Result<(), IngestError> {
    let file_layer = match run_log {
        Some(path) => {
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| IngestError::Config(format!("tracing: {e}")))
}
