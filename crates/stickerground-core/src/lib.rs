//! Stickerground Core Library
//!
//! Platform-agnostic board state and document format for the Stickerground
//! sticker board. Host capabilities (id generation, viewport size, file
//! delivery) are passed in, so the store runs the same in the browser, in
//! the native shell and in tests.

pub mod board;
pub mod config;
pub mod delivery;
pub mod document;
pub mod error;
pub mod ids;
pub mod sticker;
pub mod storage;
pub mod viewport;

pub use board::{BoardEvent, BoardState, BoardStore, SubscriptionId};
pub use config::{BoardConfig, ConfigError, DEFAULT_BACKGROUND_COLOR, DEFAULT_STICKER_SIZE};
pub use delivery::{DeliveredFile, FileDelivery, MemoryDelivery};
pub use document::{BoardDocument, EXPORT_FILE_NAME, EXPORT_MIME_TYPE, ImportDocument, ImportSticker};
pub use error::{BoardError, BoardResult};
pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
pub use sticker::{NewSticker, Sticker, StickerId};
pub use storage::{BoardStorage, StorageError, StorageResult};
pub use viewport::{DEFAULT_VIEWPORT, FixedViewport, Viewport};

#[cfg(not(target_arch = "wasm32"))]
pub use delivery::DirectoryDelivery;
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use delivery::BrowserDownload;

pub use kurbo::Point;
