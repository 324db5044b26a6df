//! Progress persistence
//!
//! Features:
//! - Versionless JSON snapshot with validation on load
//! - Pluggable stores (memory, file, browser LocalStorage)
//! - Atomic file writes (tmp → save)
//!
//! Callers treat every failure here as non-fatal.

pub mod snapshot;
pub mod store;

pub use snapshot::{Progress, ProgressSnapshot};
pub use store::{FileStore, MemoryStore, ProgressStore};

#[cfg(target_arch = "wasm32")]
pub use store::LocalStorageStore;

use thiserror::Error;

/// Errors raised by progress stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid snapshot: {0}")]
    Invalid(&'static str),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
