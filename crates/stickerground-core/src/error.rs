//! Error types for board documents.

use thiserror::Error;

/// Errors raised while importing, exporting or delivering a board document.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Board document must be a JSON object")]
    NotAnObject,
    #[error("Board document has no \"stickers\" field")]
    MissingStickers,
    #[error("\"stickers\" must be an array")]
    StickersNotSequence,
    #[error("Sticker {index} is invalid: {source}")]
    InvalidSticker {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid board field \"{field}\": {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;
