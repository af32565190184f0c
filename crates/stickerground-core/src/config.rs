//! Board defaults.

use crate::document::EXPORT_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Page background used by a fresh board.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#f0f0f0";

/// Edge length of a newly placed sticker, in CSS pixels.
pub const DEFAULT_STICKER_SIZE: f64 = 250.0;

/// Errors loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Defaults applied by a [`BoardStore`](crate::board::BoardStore).
///
/// Every field is optional in the JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    pub default_background_color: String,
    pub default_sticker_size: f64,
    pub export_file_name: String,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            default_sticker_size: DEFAULT_STICKER_SIZE,
            export_file_name: EXPORT_FILE_NAME.to_string(),
            viewport_width: crate::viewport::DEFAULT_VIEWPORT.width,
            viewport_height: crate::viewport::DEFAULT_VIEWPORT.height,
        }
    }
}

impl BoardConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}
