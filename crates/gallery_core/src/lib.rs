//! PocketGallery Core Domain Logic
//!
//! This crate contains:
//! - The gallery component (add, previous/next navigation, default view)
//! - The asynchronous data-URL encoder
//! - Configuration
//! - Error types
//! - The image target sink

pub mod config;
pub mod encoder;
pub mod error;
pub mod gallery;
pub mod target;

pub use config::{GalleryConfig, LogConfig, StorageConfig};
pub use encoder::DataUrlEncoder;
pub use error::GalleryError;
pub use gallery::{Gallery, ImageUpload, NavOutcome, SaveOutcome};
pub use target::{ImageSlot, ImageTarget};
