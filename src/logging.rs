use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Environment variable naming the log file base path.
pub const LOG_ENV_VAR: &str = "CARDWIRE_LOG";

const DEFAULT_FILTER: &str = "info";

/// Initialize tracing with optional file output.
///
/// Logging is off unless `CARDWIRE_LOG` or `logging.file` names a path;
/// writing to the terminal would corrupt the UI.
///
/// Log files get unique names so concurrent instances do not clobber each
/// other: `{path}.{timestamp}.{pid}`
pub fn init_tracing(config: &LoggingConfig) {
    let env_path = std::env::var_os(LOG_ENV_VAR).map(PathBuf::from);
    let Some(log_path) = log_base_path(env_path, config) else {
        return;
    };

    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let unique_path = unique_log_path(&log_path, timestamp, pid);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback_filter(config)));

    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path.display());
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    tracing::info!(path = %unique_path.display(), "logging initialized");
}

/// The environment wins over the config file.
pub fn log_base_path(env_path: Option<PathBuf>, config: &LoggingConfig) -> Option<PathBuf> {
    env_path
        .filter(|path| !path.as_os_str().is_empty())
        .or_else(|| config.file.clone())
}

pub fn unique_log_path(base: &Path, timestamp: u64, pid: u32) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(format!(".{timestamp}.{pid}"));
    PathBuf::from(name)
}

/// Filter directive used when `RUST_LOG` is unset.
pub fn fallback_filter(config: &LoggingConfig) -> &str {
    config
        .filter
        .as_deref()
        .filter(|f| !f.trim().is_empty())
        .unwrap_or(DEFAULT_FILTER)
}
