//! Delivery of exported boards to the user.
//!
//! Exporting is split in two: the store serializes the board, and a
//! [`FileDelivery`] hands the text to the platform. In the browser that is a
//! download; natively it is a file write or a save dialog.

use crate::error::{BoardError, BoardResult};

/// Hands a finished file to the host environment.
pub trait FileDelivery {
    /// Deliver `contents` under `file_name`.
    fn deliver(&mut self, file_name: &str, mime_type: &str, contents: &str) -> BoardResult<()>;
}

/// A file captured by [`MemoryDelivery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredFile {
    pub file_name: String,
    pub mime_type: String,
    pub contents: String,
}

/// Keeps delivered files in memory, for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryDelivery {
    files: Vec<DeliveredFile>,
}

impl MemoryDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    /// All files delivered so far, oldest first.
    pub fn files(&self) -> &[DeliveredFile] {
        &self.files
    }

    /// The most recent delivery.
    pub fn last(&self) -> Option<&DeliveredFile> {
        self.files.last()
    }
}

impl FileDelivery for MemoryDelivery {
    fn deliver(&mut self, file_name: &str, mime_type: &str, contents: &str) -> BoardResult<()> {
        self.files.push(DeliveredFile {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            contents: contents.to_string(),
        });
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::DirectoryDelivery;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Writes delivered files into a directory, replacing existing ones.
    #[derive(Debug, Clone)]
    pub struct DirectoryDelivery {
        dir: PathBuf,
    }

    impl DirectoryDelivery {
        /// Deliver into `dir`, creating it if needed.
        pub fn new(dir: impl Into<PathBuf>) -> BoardResult<Self> {
            let dir = dir.into();
            if !dir.exists() {
                fs::create_dir_all(&dir).map_err(|e| {
                    BoardError::Delivery(format!("Failed to create {}: {}", dir.display(), e))
                })?;
            }
            Ok(Self { dir })
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }
    }

    impl FileDelivery for DirectoryDelivery {
        fn deliver(&mut self, file_name: &str, _mime_type: &str, contents: &str) -> BoardResult<()> {
            let path = self.dir.join(file_name);
            fs::write(&path, contents).map_err(|e| {
                BoardError::Delivery(format!("Failed to write {}: {}", path.display(), e))
            })?;
            log::info!("Wrote {}", path.display());
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::BrowserDownload;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::*;
    use wasm_bindgen::{JsCast, JsValue};

    /// Triggers a browser save-as through a temporary object URL.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct BrowserDownload;

    impl BrowserDownload {
        pub fn new() -> Self {
            Self
        }
    }

    fn js_error(context: &str, err: JsValue) -> BoardError {
        BoardError::Delivery(format!("{}: {:?}", context, err))
    }

    impl FileDelivery for BrowserDownload {
        fn deliver(&mut self, file_name: &str, mime_type: &str, contents: &str) -> BoardResult<()> {
            let window = web_sys::window().ok_or_else(|| BoardError::Delivery("No window".into()))?;
            let document = window
                .document()
                .ok_or_else(|| BoardError::Delivery("No document".into()))?;

            let blob_parts = js_sys::Array::new();
            blob_parts.push(&JsValue::from_str(contents));

            let options = web_sys::BlobPropertyBag::new();
            options.set_type(mime_type);

            let blob = web_sys::Blob::new_with_str_sequence_and_options(&blob_parts, &options)
                .map_err(|e| js_error("Failed to create blob", e))?;

            let url = web_sys::Url::create_object_url_with_blob(&blob)
                .map_err(|e| js_error("Failed to create URL", e))?;

            let anchor = document
                .create_element("a")
                .map_err(|e| js_error("Failed to create element", e))
                .and_then(|element| {
                    element
                        .dyn_into::<web_sys::HtmlAnchorElement>()
                        .map_err(|e| js_error("Failed to cast to anchor", e.into()))
                });

            // The URL is released whether or not the click happened.
            if let Ok(a) = &anchor {
                a.set_href(&url);
                a.set_download(file_name);
                a.click();
            }
            web_sys::Url::revoke_object_url(&url).ok();

            anchor.map(|_| ())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_delivery_records_files() {
        let mut delivery = MemoryDelivery::new();
        delivery.deliver("a.json", "application/json", "{}").unwrap();
        delivery.deliver("b.json", "application/json", "[]").unwrap();

        assert_eq!(delivery.files().len(), 2);
        let last = delivery.last().unwrap();
        assert_eq!(last.file_name, "b.json");
        assert_eq!(last.contents, "[]");
    }

    #[test]
    fn test_directory_delivery_writes_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("exports");
        let mut delivery = DirectoryDelivery::new(&target).unwrap();

        delivery.deliver("board.json", "application/json", "{\"stickers\": []}").unwrap();

        let written = std::fs::read_to_string(target.join("board.json")).unwrap();
        assert_eq!(written, "{\"stickers\": []}");
        assert_eq!(delivery.dir(), target.as_path());
    }

    #[test]
    fn test_directory_delivery_overwrites() {
        let dir = tempdir().unwrap();
        let mut delivery = DirectoryDelivery::new(dir.path()).unwrap();

        delivery.deliver("board.json", "application/json", "old").unwrap();
        delivery.deliver("board.json", "application/json", "new").unwrap();

        assert_eq!(std::fs::read_to_string(dir.path().join("board.json")).unwrap(), "new");
    }
}
