//! Stickerground Application
//!
//! Hosts for the board store: a native command-line shell that edits board
//! files, and WASM bindings for the browser UI.

#[cfg(not(target_arch = "wasm32"))]
pub mod shell;

#[cfg(not(target_arch = "wasm32"))]
pub use shell::{Shell, ShellError, ShellResult};

#[cfg(feature = "dialog")]
mod dialog;

#[cfg(feature = "dialog")]
pub use dialog::DialogDelivery;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{StickerBoard, start};
