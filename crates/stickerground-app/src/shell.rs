//! Native shell: a board file on disk driven through the store.
//!
//! Each invocation opens the board file, applies one operation, and writes
//! the board back in export format.

use std::fs;
use std::path::{Path, PathBuf};

use stickerground_core::{
    BoardConfig, BoardError, BoardStorage, BoardStore, ConfigError, FileDelivery, NewSticker, Point,
    StorageError,
};
use thiserror::Error;

/// Shell errors.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("{0}")]
    Board(#[from] BoardError),
    #[error("{0}")]
    Storage(#[from] StorageError),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("No sticker with id {0}")]
    UnknownSticker(String),
    #[error("Sticker options must be a JSON object")]
    InvalidOptions,
}

/// Result type for shell operations.
pub type ShellResult<T> = Result<T, ShellError>;

/// A board file opened for editing.
pub struct Shell {
    store: BoardStore,
    path: PathBuf,
}

impl Shell {
    /// Open `path`, starting from an empty board if the file does not exist.
    pub fn open(path: impl Into<PathBuf>, config: BoardConfig) -> ShellResult<Self> {
        let path = path.into();
        let mut store = BoardStore::with_config(config);

        if path.exists() {
            let json = fs::read_to_string(&path).map_err(|source| ShellError::Io {
                path: path.display().to_string(),
                source,
            })?;
            store.load_json(&json)?;
            log::info!("Opened {}", path.display());
        } else {
            log::info!("{} does not exist, starting an empty board", path.display());
        }

        Ok(Self { store, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut BoardStore {
        &mut self.store
    }

    /// Write the board back to its file.
    pub fn save(&self) -> ShellResult<()> {
        let json = self.store.export_json()?;
        fs::write(&self.path, json).map_err(|source| ShellError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        log::debug!("Saved {}", self.path.display());
        Ok(())
    }

    /// Add a sticker. `content` is parsed as JSON when `raw_json` is set,
    /// otherwise taken as a string.
    pub fn add(
        &mut self,
        kind: &str,
        content: &str,
        raw_json: bool,
        position: Option<Point>,
        options: Option<&str>,
    ) -> ShellResult<String> {
        let content = if raw_json {
            serde_json::from_str::<serde_json::Value>(content).map_err(BoardError::from)?
        } else {
            serde_json::Value::String(content.to_string())
        };

        let mut sticker = NewSticker::new(kind, content);
        sticker.position = position;
        if let Some(options) = options {
            match serde_json::from_str::<serde_json::Value>(options).map_err(BoardError::from)? {
                serde_json::Value::Object(map) => sticker = sticker.with_options(map),
                _ => return Err(ShellError::InvalidOptions),
            }
        }

        Ok(self.store.add(sticker))
    }

    pub fn move_sticker(&mut self, id: &str, position: Point) -> ShellResult<()> {
        if self.store.update_position(id, position) {
            Ok(())
        } else {
            Err(ShellError::UnknownSticker(id.to_string()))
        }
    }

    pub fn remove(&mut self, id: &str) -> ShellResult<()> {
        self.store
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ShellError::UnknownSticker(id.to_string()))
    }

    pub fn raise(&mut self, id: &str) -> ShellResult<()> {
        if self.store.bring_to_front(id) {
            Ok(())
        } else {
            Err(ShellError::UnknownSticker(id.to_string()))
        }
    }

    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        self.store.update_canvas_position(delta_x, delta_y);
    }

    pub fn set_background(&mut self, image: Option<String>, color: Option<String>) {
        if let Some(image) = image {
            self.store.set_background_image_url(image);
        }
        if let Some(color) = color {
            self.store.set_page_background_color(color);
        }
    }

    /// Deliver the board as an export file.
    pub fn export(&self, delivery: &mut dyn FileDelivery) -> ShellResult<()> {
        self.store.export(delivery)?;
        Ok(())
    }

    /// Save the board into a library under `name`.
    pub fn save_to(&self, library: &dyn BoardStorage, name: &str) -> ShellResult<()> {
        library.save(name, &self.store.to_document())?;
        log::info!("Saved board to library as {}", name);
        Ok(())
    }

    /// Replace the board with one from a library.
    pub fn open_from(&mut self, library: &dyn BoardStorage, name: &str) -> ShellResult<()> {
        let document = library.load(name)?;
        self.store.load(document);
        Ok(())
    }

    /// Human-readable description of the board.
    pub fn summary(&self) -> String {
        let store = &self.store;
        let canvas = store.canvas_position();
        let background = if store.background_image_url().is_empty() {
            "(none)"
        } else {
            store.background_image_url()
        };

        let mut out = format!(
            "{}\n  background image: {}\n  background color: {}\n  canvas position: ({}, {})\n  stickers: {}\n",
            self.path.display(),
            background,
            store.page_background_color(),
            canvas.x,
            canvas.y,
            store.len(),
        );
        for sticker in store.stickers() {
            out.push_str(&format!(
                "    {} [{}] at ({}, {}): {}\n",
                sticker.id, sticker.kind, sticker.position.x, sticker.position.y, sticker.content
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stickerground_core::{FileStorage, MemoryDelivery};
    use tempfile::tempdir;

    fn open_new(dir: &Path) -> Shell {
        Shell::open(dir.join("board.json"), BoardConfig::default()).unwrap()
    }

    #[test]
    fn test_open_missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let shell = open_new(dir.path());

        assert!(shell.store().is_empty());
        assert_eq!(shell.store().page_background_color(), "#f0f0f0");
    }

    #[test]
    fn test_add_save_reopen() {
        let dir = tempdir().unwrap();
        let mut shell = open_new(dir.path());

        let id = shell
            .add("text", "hi", false, Some(Point::new(1.0, 2.0)), Some(r#"{"color": "red"}"#))
            .unwrap();
        shell.pan(5.0, -3.0);
        shell.set_background(Some("bg.png".to_string()), None);
        shell.save().unwrap();

        let reopened = open_new(dir.path());
        let sticker = reopened.store().sticker(&id).unwrap();
        assert_eq!(sticker.content, serde_json::json!("hi"));
        assert_eq!(sticker.options["color"], serde_json::json!("red"));
        assert_eq!(reopened.store().canvas_position(), Point::new(5.0, -3.0));
        assert_eq!(reopened.store().background_image_url(), "bg.png");
    }

    #[test]
    fn test_add_json_content() {
        let dir = tempdir().unwrap();
        let mut shell = open_new(dir.path());

        let id = shell.add("image", r#"{"src": "cat.png"}"#, true, None, None).unwrap();
        assert_eq!(
            shell.store().sticker(&id).unwrap().content,
            serde_json::json!({"src": "cat.png"})
        );
    }

    #[test]
    fn test_add_rejects_non_object_options() {
        let dir = tempdir().unwrap();
        let mut shell = open_new(dir.path());

        let result = shell.add("text", "hi", false, None, Some("[1]"));
        assert!(matches!(result, Err(ShellError::InvalidOptions)));
        assert!(shell.store().is_empty());
    }

    #[test]
    fn test_unknown_sticker_errors() {
        let dir = tempdir().unwrap();
        let mut shell = open_new(dir.path());

        assert!(matches!(
            shell.move_sticker("nope", Point::ZERO),
            Err(ShellError::UnknownSticker(_))
        ));
        assert!(matches!(shell.remove("nope"), Err(ShellError::UnknownSticker(_))));
        assert!(matches!(shell.raise("nope"), Err(ShellError::UnknownSticker(_))));
    }

    #[test]
    fn test_open_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("board.json");
        fs::write(&path, r##"{"pageBackgroundColor": "#fff"}"##).unwrap();

        let result = Shell::open(&path, BoardConfig::default());
        assert!(matches!(result, Err(ShellError::Board(BoardError::MissingStickers))));
    }

    #[test]
    fn test_export_and_library() {
        let dir = tempdir().unwrap();
        let mut shell = open_new(dir.path());
        let id = shell.add("text", "hi", false, None, None).unwrap();

        let mut delivery = MemoryDelivery::new();
        shell.export(&mut delivery).unwrap();
        assert_eq!(delivery.last().unwrap().file_name, "stickerground.json");

        let library = FileStorage::new(dir.path().join("library")).unwrap();
        shell.save_to(&library, "mine").unwrap();

        let mut other = Shell::open(dir.path().join("other.json"), BoardConfig::default()).unwrap();
        other.open_from(&library, "mine").unwrap();
        assert!(other.store().sticker(&id).is_some());
    }

    #[test]
    fn test_summary_lists_stickers() {
        let dir = tempdir().unwrap();
        let mut shell = open_new(dir.path());
        let id = shell.add("text", "hi", false, Some(Point::new(3.0, 4.0)), None).unwrap();

        let summary = shell.summary();
        assert!(summary.contains("background image: (none)"));
        assert!(summary.contains("stickers: 1"));
        assert!(summary.contains(&format!("{} [text] at (3, 4): \"hi\"", id)));
    }
}
