//! Local board library.
//!
//! Saved boards are plain export documents keyed by name, so anything in
//! the library can also be opened as a `stickerground.json` import.

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::document::{BoardDocument, ImportDocument};
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Board not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid board name: {0:?} (use letters, digits, '-' and '_')")]
    InvalidName(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for board storage backends.
pub trait BoardStorage: Send + Sync {
    /// Save a board under `name`, replacing any previous version.
    fn save(&self, name: &str, document: &BoardDocument) -> StorageResult<()>;

    /// Load a board. Older documents missing optional fields load fine.
    fn load(&self, name: &str) -> StorageResult<ImportDocument>;

    /// Delete a board. Deleting a missing board is not an error.
    fn delete(&self, name: &str) -> StorageResult<()>;

    /// List all board names.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a board exists.
    fn exists(&self, name: &str) -> StorageResult<bool>;
}
