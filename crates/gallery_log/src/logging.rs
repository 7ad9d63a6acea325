//! Structured logging setup with tracing

use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Prefix of the rolled log files: "gallery.2026-08-23", one per day
const LOG_FILE_PREFIX: &str = "gallery";

/// Initialize the logging system.
///
/// Returns the appender guard; dropping it flushes and stops the writer
/// thread, so the caller holds it for the whole session.
pub fn init_logging() -> anyhow::Result<WorkerGuard> {
    let log_dir = super::log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Stdout belongs to the interactive session, so records go to the
    // JSON file; debug builds mirror them to stderr as well.
    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json().with_writer(file_writer));

    #[cfg(debug_assertions)]
    let registry = registry.with(fmt::layer().compact().with_writer(std::io::stderr));

    registry.init();

    tracing::info!("Logging initialized");
    Ok(guard)
}

/// Delete rolled log files older than the retention window
pub fn cleanup_old_logs(days: u32) -> anyhow::Result<usize> {
    let threshold = SystemTime::now() - Duration::from_secs(u64::from(days) * 24 * 60 * 60);
    cleanup_dir(&super::log_dir(), threshold)
}

fn cleanup_dir(dir: &Path, threshold: SystemTime) -> anyhow::Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut deleted = 0;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !is_expired_log(&path, threshold) {
            continue;
        }
        match std::fs::remove_file(&path) {
            Ok(()) => {
                deleted += 1;
                tracing::debug!("Deleted old log: {:?}", path);
            }
            Err(e) => tracing::debug!("Could not delete {:?}: {}", path, e),
        }
    }

    tracing::info!("Cleaned up {} old log files", deleted);
    Ok(deleted)
}

/// Only rolled files ("<prefix>.<date>") are cleanup candidates; crash
/// reports and anything else sharing the directory are left alone.
fn is_expired_log(path: &Path, threshold: SystemTime) -> bool {
    let matches_prefix = path
        .file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| name.starts_with(LOG_FILE_PREFIX));
    if !matches_prefix {
        return false;
    }

    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_or(false, |modified| modified < threshold)
}
