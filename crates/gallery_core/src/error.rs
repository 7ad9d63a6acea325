//! Application error types

use thiserror::Error;

/// Main gallery error type
#[derive(Error, Debug)]
pub enum GalleryError {
    // ===== Recoverable Errors (notify user, continue) =====
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ===== Fatal Errors (application termination) =====
    #[error("Store error: {0}")]
    Store(#[from] gallery_store::StoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("System resource exhaustion: {0}")]
    SystemResource(String),

    #[error("Initialization failed: {0}")]
    Init(String),
}

impl GalleryError {
    /// Is this error recoverable?
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GalleryError::Io(_))
    }

    /// Is this a fatal error?
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            GalleryError::Io(e) => format!("Cannot read file: {}", e),
            GalleryError::Store(e) => format!("Gallery storage failed: {}", e),
            _ => self.to_string(),
        }
    }
}
