//! WebAssembly bindings for the browser UI.
//!
//! The page constructs one [`StickerBoard`] at startup and keeps it for the
//! whole session. Pointer and button handlers call into it. Subscribed
//! callbacks receive each change with its new values, queued as a
//! microtask so the board is free again by the time they run and
//! `document()` can be called from inside them.

use stickerground_core::{
    BoardConfig, BoardStore, BrowserDownload, FixedViewport, NewSticker, Point,
};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Convert to a plain JS value; JSON objects stay objects instead of `Map`s.
fn to_plain_js<T: Serialize>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Run `callback(value)` once the current call into the board has returned.
fn deliver_later(callback: js_sys::Function, value: JsValue) {
    let Some(window) = web_sys::window() else {
        log::error!("No window to deliver board events on");
        return;
    };
    let deliver = Closure::once_into_js(move || {
        if let Err(e) = callback.call1(&JsValue::NULL, &value) {
            log::error!("Board subscriber failed: {:?}", e);
        }
    });
    window.queue_microtask(deliver.unchecked_ref());
}

fn window_viewport() -> FixedViewport {
    let Some(window) = web_sys::window() else {
        return FixedViewport::default();
    };
    let width = window.inner_width().ok().and_then(|v| v.as_f64());
    let height = window.inner_height().ok().and_then(|v| v.as_f64());
    match (width, height) {
        (Some(w), Some(h)) => FixedViewport::new(w, h),
        _ => FixedViewport::default(),
    }
}

/// Board handle exported to JavaScript.
#[wasm_bindgen]
pub struct StickerBoard {
    store: BoardStore,
}

#[wasm_bindgen]
impl StickerBoard {
    /// Create an empty board sized to the current window.
    #[wasm_bindgen(constructor)]
    pub fn new() -> StickerBoard {
        let store = BoardStore::with_config(BoardConfig::default()).with_viewport(window_viewport());
        StickerBoard { store }
    }

    /// Update the viewport after a window resize.
    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.store.set_viewport(FixedViewport::new(width, height));
    }

    /// Add a sticker from `{type, content, position?, options?}`.
    /// Returns the new sticker id.
    pub fn add(&mut self, sticker: JsValue) -> Result<String, JsValue> {
        let sticker: NewSticker = serde_wasm_bindgen::from_value(sticker)?;
        Ok(self.store.add(sticker))
    }

    /// Replace the board with an imported document (JSON text).
    pub fn load(&mut self, json: &str) -> Result<(), JsValue> {
        self.store.load_json(json).map_err(to_js_error)
    }

    /// Download the board as `stickerground.json`.
    pub fn export(&self) -> Result<(), JsValue> {
        self.store.export(&mut BrowserDownload::new()).map_err(to_js_error)
    }

    /// The board as pretty-printed JSON, without downloading it.
    #[wasm_bindgen(js_name = exportJson)]
    pub fn export_json(&self) -> Result<String, JsValue> {
        self.store.export_json().map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = updatePosition)]
    pub fn update_position(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.store.update_position(id, Point::new(x, y))
    }

    #[wasm_bindgen(js_name = updateCanvasPosition)]
    pub fn update_canvas_position(&mut self, delta_x: f64, delta_y: f64) {
        self.store.update_canvas_position(delta_x, delta_y);
    }

    #[wasm_bindgen(js_name = toggleDrag)]
    pub fn toggle_drag(&mut self) {
        self.store.toggle_drag();
    }

    #[wasm_bindgen(js_name = isDraggable)]
    pub fn is_draggable(&self) -> bool {
        self.store.is_draggable()
    }

    #[wasm_bindgen(js_name = setBackgroundImageUrl)]
    pub fn set_background_image_url(&mut self, url: String) {
        self.store.set_background_image_url(url);
    }

    #[wasm_bindgen(js_name = setPageBackgroundColor)]
    pub fn set_page_background_color(&mut self, color: String) {
        self.store.set_page_background_color(color);
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.store.remove(id).is_some()
    }

    #[wasm_bindgen(js_name = bringToFront)]
    pub fn bring_to_front(&mut self, id: &str) -> bool {
        self.store.bring_to_front(id)
    }

    /// Current board as a plain object in export format.
    pub fn document(&self) -> Result<JsValue, JsValue> {
        Ok(to_plain_js(&self.store.to_document())?)
    }

    /// Call `callback(event)` after every change, in change order.
    /// Returns a handle for `unsubscribe`.
    pub fn subscribe(&mut self, callback: js_sys::Function) -> f64 {
        let id = self.store.subscribe(move |event| {
            match to_plain_js(event) {
                Ok(value) => deliver_later(callback.clone(), value),
                Err(e) => log::error!("Failed to convert board event: {}", e),
            }
        });
        id as f64
    }

    pub fn unsubscribe(&mut self, id: f64) -> bool {
        self.store.unsubscribe(id as u64)
    }
}

impl Default for StickerBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize logging and panic reporting.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Fails only if a logger is already installed.
    console_log::init_with_level(log::Level::Info).ok();

    log::info!("Starting Stickerground (WASM)");
}
