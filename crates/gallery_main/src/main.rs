//! PocketGallery - persistent local image gallery
//!
//! Main entry point for the interactive command-line session.

mod app;

use anyhow::Result;

fn main() -> Result<()> {
    // Initialize logging and panic hook first; the guard keeps the
    // file writer alive until exit
    let _log_guard = gallery_log::init()?;

    // Load configuration
    let config = gallery_core::GalleryConfig::load().unwrap_or_default();

    if let Err(e) = gallery_log::cleanup_old_logs(config.log.retention_days) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("PocketGallery starting...");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(app::run(&config))
}
