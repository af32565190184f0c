//! Native save-as dialog delivery.

use stickerground_core::{BoardError, BoardResult, FileDelivery};

/// Asks the user where to put an export. Cancelling the dialog is not an
/// error; nothing is written.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogDelivery;

impl FileDelivery for DialogDelivery {
    fn deliver(&mut self, file_name: &str, _mime_type: &str, contents: &str) -> BoardResult<()> {
        let dialog = rfd::FileDialog::new()
            .set_title("Export Board")
            .set_file_name(file_name)
            .add_filter("Stickerground Board", &["json"]);

        let Some(path) = dialog.save_file() else {
            log::info!("Export cancelled");
            return Ok(());
        };

        std::fs::write(&path, contents).map_err(|e| {
            BoardError::Delivery(format!("Failed to write {}: {}", path.display(), e))
        })?;
        log::info!("Exported board to: {:?}", path);
        Ok(())
    }
}
