//! PocketGallery Persistence Layer
//!
//! Provides:
//! - `KvStore`, the flat string-keyed store capability the gallery is built on
//! - A file-backed implementation (single JSON document on disk)
//! - An in-memory implementation for tests
//! - The delimited-list codec for the stored image/filename lists

mod codec;
mod file_store;
mod kv;
mod memory;

pub use codec::{decode_filenames, decode_images, load_entries, persist_entries, ImageEntry};
pub use codec::{FILENAME_LIST_KEY, IMAGE_LIST_KEY};
pub use file_store::FileKvStore;
pub use kv::KvStore;
pub use memory::MemoryKvStore;

use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

/// Persistence errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed store file: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Get the data directory for the on-disk store
pub fn data_dir() -> PathBuf {
    ProjectDirs::from("com", "PocketGallery", "PocketGallery")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./data"))
}

/// Open the default on-disk store
pub fn init() -> Result<FileKvStore> {
    let dir = data_dir();
    std::fs::create_dir_all(&dir)?;

    let store = FileKvStore::open(dir.join("gallery.json"))?;
    tracing::info!("Store initialized at {:?}", store.path());
    Ok(store)
}
