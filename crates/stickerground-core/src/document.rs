//! Board import/export document format.
//!
//! Exports always carry every field ([`BoardDocument`]). Imports are
//! partial ([`ImportDocument`]): only `stickers` is required, and documents
//! written before canvas panning existed have no `canvasPosition`.

use crate::error::{BoardError, BoardResult};
use crate::ids::IdGenerator;
use crate::sticker::{Sticker, StickerId};
use kurbo::Point;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// File name used when delivering an export.
pub const EXPORT_FILE_NAME: &str = "stickerground.json";

/// MIME type of an exported board.
pub const EXPORT_MIME_TYPE: &str = "application/json";

/// A complete board as written to `stickerground.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDocument {
    pub background_image_url: String,
    pub page_background_color: String,
    pub stickers: Vec<Sticker>,
    pub canvas_position: Point,
}

impl BoardDocument {
    /// Serialize to pretty-printed JSON (2-space indent).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// A sticker as found in an import document. Everything but the JSON
/// object shape is optional, and numeric ids are read as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSticker {
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<StickerId>,
    #[serde(default = "origin")]
    pub position: Point,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub content: Value,
    #[serde(default)]
    pub options: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn origin() -> Point {
    Point::ZERO
}

/// `null` and `0` count as no id, like an empty string.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<StickerId>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(id) => Ok(Some(id)),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(None),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "invalid sticker id {}, expected a string or number",
            other
        ))),
    }
}

impl ImportSticker {
    /// Turn into a store sticker, generating an id if the import had none.
    ///
    /// An empty id counts as missing.
    pub fn into_sticker(self, ids: &mut dyn IdGenerator) -> Sticker {
        let id = match self.id {
            Some(id) if !id.is_empty() => id,
            _ => ids.next_id(),
        };
        Sticker {
            id,
            position: self.position,
            kind: self.kind,
            content: self.content,
            options: self.options,
            extra: self.extra,
        }
    }
}

impl From<Sticker> for ImportSticker {
    fn from(sticker: Sticker) -> Self {
        Self {
            id: Some(sticker.id),
            position: sticker.position,
            kind: sticker.kind,
            content: sticker.content,
            options: sticker.options,
            extra: sticker.extra,
        }
    }
}

/// A board document being loaded. Absent optional fields leave the
/// corresponding store values untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportDocument {
    pub stickers: Vec<ImportSticker>,
    pub background_image_url: Option<String>,
    pub page_background_color: Option<String>,
    pub canvas_position: Option<Point>,
}

impl ImportDocument {
    /// Parse an import document from JSON text.
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Validate and convert an already-parsed JSON value.
    ///
    /// `stickers` must be an array of objects; a `null` entry is read as an
    /// empty sticker. Empty strings and `null` count as absent for the
    /// optional fields.
    pub fn from_value(value: Value) -> BoardResult<Self> {
        let Value::Object(mut root) = value else {
            return Err(BoardError::NotAnObject);
        };

        let items = match root.remove("stickers") {
            None => return Err(BoardError::MissingStickers),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(BoardError::StickersNotSequence),
        };

        let stickers = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let item = match item {
                    Value::Null => Value::Object(Map::new()),
                    item => item,
                };
                serde_json::from_value(item)
                    .map_err(|source| BoardError::InvalidSticker { index, source })
            })
            .collect::<BoardResult<Vec<ImportSticker>>>()?;

        Ok(Self {
            stickers,
            background_image_url: take_string(&mut root, "backgroundImageUrl")?,
            page_background_color: take_string(&mut root, "pageBackgroundColor")?,
            canvas_position: take_field(&mut root, "canvasPosition")?,
        })
    }
}

impl From<BoardDocument> for ImportDocument {
    fn from(document: BoardDocument) -> Self {
        Self {
            stickers: document.stickers.into_iter().map(ImportSticker::from).collect(),
            background_image_url: Some(document.background_image_url).filter(|s| !s.is_empty()),
            page_background_color: Some(document.page_background_color).filter(|s| !s.is_empty()),
            canvas_position: Some(document.canvas_position),
        }
    }
}

fn take_field<T: serde::de::DeserializeOwned>(
    root: &mut Map<String, Value>,
    field: &'static str,
) -> BoardResult<Option<T>> {
    match root.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|source| BoardError::InvalidField { field, source }),
    }
}

fn take_string(root: &mut Map<String, Value>, field: &'static str) -> BoardResult<Option<String>> {
    Ok(take_field::<String>(root, field)?.filter(|s| !s.is_empty()))
}
