//! Logging and observability helpers.

use std::fs;

use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

use crate::config;

const LOG_FILE_PREFIX: &str = "keyring.log";

/// Used when `RUST_LOG` is unset or invalid. Per-keystroke field edits log
/// at debug, so they stay out of the file by default.
const DEFAULT_FILTER: &str = "keyring_app_lib=info";

/// Installs the daily rolling file subscriber under the app's log directory.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let log_dir = config::log_directory();
    let _ = fs::create_dir_all(&log_dir);

    let file_appender: RollingFileAppender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .with_span_events(FmtSpan::CLOSE)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(log_dir = %log_dir.display(), "Logging to file");
    }
    installed
}
