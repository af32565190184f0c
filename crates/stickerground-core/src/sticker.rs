//! Sticker data model.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unique identifier for a sticker.
///
/// Generated stickers carry a UUID string, but imported documents may use
/// any non-empty string, so ids are kept opaque.
pub type StickerId = String;

/// A positioned, typed content element placed on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sticker {
    /// Unique identifier.
    pub id: StickerId,
    /// Top-left corner in canvas space.
    pub position: Point,
    /// Rendering kind, e.g. `text` or `image`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Payload whose shape depends on `kind`.
    pub content: Value,
    /// Per-sticker display settings.
    pub options: Map<String, Value>,
    /// Fields the store does not interpret, kept so they survive a re-export.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Sticker {
    /// Create a sticker with empty options.
    pub fn new(id: impl Into<StickerId>, position: Point, kind: impl Into<String>, content: Value) -> Self {
        Self {
            id: id.into(),
            position,
            kind: kind.into(),
            content,
            options: Map::new(),
            extra: Map::new(),
        }
    }

    /// Look up a single display option.
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }
}

/// Input for [`BoardStore::add`](crate::board::BoardStore::add).
///
/// Only `kind` and `content` are meaningful to every sticker; the store
/// fills in a position from the viewport when none is given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewSticker {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub content: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,
}

impl NewSticker {
    /// A sticker of the given kind and content, placed by the store.
    pub fn new(kind: impl Into<String>, content: impl Into<Value>) -> Self {
        Self {
            position: None,
            kind: kind.into(),
            content: content.into(),
            options: None,
        }
    }

    /// Place the sticker explicitly instead of at the viewport center.
    pub fn at(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    /// Attach display options.
    pub fn with_options(mut self, options: Map<String, Value>) -> Self {
        self.options = Some(options);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sticker_serializes_type_field() {
        let sticker = Sticker::new("a", Point::new(1.0, 2.0), "text", json!("hi"));
        let value = serde_json::to_value(&sticker).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "a",
                "position": {"x": 1.0, "y": 2.0},
                "type": "text",
                "content": "hi",
                "options": {}
            })
        );
    }

    #[test]
    fn test_sticker_keeps_unknown_fields() {
        let input = json!({
            "id": "b",
            "position": {"x": 0.0, "y": 0.0},
            "type": "image",
            "content": {"src": "cat.png"},
            "options": {"rotate": 15},
            "size": {"width": 200}
        });
        let sticker: Sticker = serde_json::from_value(input.clone()).unwrap();

        assert_eq!(sticker.extra.get("size"), Some(&json!({"width": 200})));
        assert_eq!(sticker.option("rotate"), Some(&json!(15)));
        assert_eq!(serde_json::to_value(&sticker).unwrap(), input);
    }

    #[test]
    fn test_new_sticker_builder() {
        let mut options = Map::new();
        options.insert("color".to_string(), json!("red"));

        let new = NewSticker::new("text", "hi")
            .at(Point::new(10.0, 20.0))
            .with_options(options.clone());

        assert_eq!(new.kind, "text");
        assert_eq!(new.content, json!("hi"));
        assert_eq!(new.position, Some(Point::new(10.0, 20.0)));
        assert_eq!(new.options, Some(options));
    }

    #[test]
    fn test_new_sticker_from_json_defaults() {
        let new: NewSticker = serde_json::from_str(r#"{"type": "text"}"#).unwrap();
        assert_eq!(new.kind, "text");
        assert_eq!(new.content, Value::Null);
        assert!(new.position.is_none());
        assert!(new.options.is_none());
    }
}
