//! Board state and the store that owns it.
//!
//! [`BoardStore`] is the single source of truth for a session: the sticker
//! list (in z-order, back to front), the page background and the canvas pan
//! offset. The UI layer holds a reference to the store, calls its operations
//! from pointer and button handlers, and re-renders when a subscribed
//! callback reports a [`BoardEvent`].

use crate::config::BoardConfig;
use crate::delivery::FileDelivery;
use crate::document::{BoardDocument, EXPORT_MIME_TYPE, ImportDocument};
use crate::error::BoardResult;
use crate::ids::{IdGenerator, UuidGenerator};
use crate::sticker::{NewSticker, Sticker, StickerId};
use crate::viewport::{FixedViewport, Viewport};
use kurbo::{Point, Vec2};
use serde::Serialize;
use std::collections::HashSet;

/// Immutable copy of everything the UI renders.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    pub stickers: Vec<Sticker>,
    pub background_image_url: String,
    pub page_background_color: String,
    pub canvas_position: Point,
    pub is_draggable: bool,
}

impl BoardState {
    fn new(config: &BoardConfig) -> Self {
        Self {
            stickers: Vec::new(),
            background_image_url: String::new(),
            page_background_color: config.default_background_color.clone(),
            canvas_position: Point::ZERO,
            is_draggable: true,
        }
    }
}

/// A change to the board, delivered to subscribers after it is applied.
///
/// Every event carries the new values, so a listener never has to read
/// them back from the store while the mutation is still in progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BoardEvent {
    StickerAdded { sticker: Sticker },
    StickerMoved { id: StickerId, position: Point },
    StickerRemoved { id: StickerId },
    StickerRaised { id: StickerId },
    /// The board was replaced by an import.
    Loaded { document: BoardDocument },
    CanvasMoved { position: Point },
    DragToggled { draggable: bool },
    BackgroundImageChanged { url: String },
    BackgroundColorChanged { color: String },
}

/// Handle returned by [`BoardStore::subscribe`].
pub type SubscriptionId = u64;

type Listener = Box<dyn FnMut(&BoardEvent)>;

/// Owns the board state and applies every mutation to it.
pub struct BoardStore {
    state: BoardState,
    config: BoardConfig,
    ids: Box<dyn IdGenerator>,
    viewport: Box<dyn Viewport>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardStore {
    /// Create an empty board with default settings.
    pub fn new() -> Self {
        Self::with_config(BoardConfig::default())
    }

    /// Create an empty board using `config` for its defaults.
    pub fn with_config(config: BoardConfig) -> Self {
        let viewport = FixedViewport::new(config.viewport_width, config.viewport_height);
        Self {
            state: BoardState::new(&config),
            config,
            ids: Box::new(UuidGenerator),
            viewport: Box::new(viewport),
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    /// Replace the id generator.
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Replace the viewport used for default placement.
    pub fn with_viewport(mut self, viewport: impl Viewport + 'static) -> Self {
        self.set_viewport(viewport);
        self
    }

    /// Swap the viewport, e.g. after the host window was resized.
    pub fn set_viewport(&mut self, viewport: impl Viewport + 'static) {
        self.viewport = Box::new(viewport);
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    // --- Reads -----------------------------------------------------------

    /// Stickers in rendering order (back to front).
    pub fn stickers(&self) -> &[Sticker] {
        &self.state.stickers
    }

    pub fn sticker(&self, id: &str) -> Option<&Sticker> {
        self.state.stickers.iter().find(|s| s.id == id)
    }

    pub fn background_image_url(&self) -> &str {
        &self.state.background_image_url
    }

    pub fn page_background_color(&self) -> &str {
        &self.state.page_background_color
    }

    pub fn canvas_position(&self) -> Point {
        self.state.canvas_position
    }

    pub fn is_draggable(&self) -> bool {
        self.state.is_draggable
    }

    pub fn len(&self) -> usize {
        self.state.stickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.stickers.is_empty()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> BoardState {
        self.state.clone()
    }

    // --- Mutations -------------------------------------------------------

    /// Append a sticker with a fresh id. Without an explicit (finite)
    /// position the sticker is centered in the viewport.
    pub fn add(&mut self, sticker: NewSticker) -> StickerId {
        let position = match sticker.position {
            Some(position) if position.is_finite() => position,
            requested => {
                if let Some(p) = requested {
                    log::debug!("Ignoring non-finite position ({}, {}) for new sticker", p.x, p.y);
                }
                self.viewport.centered(self.config.default_sticker_size)
            }
        };
        let id = self.fresh_id();

        let sticker = Sticker {
            id: id.clone(),
            position,
            kind: sticker.kind,
            content: sticker.content,
            options: sticker.options.unwrap_or_default(),
            extra: Default::default(),
        };
        self.state.stickers.push(sticker.clone());
        log::debug!("Added sticker {} at ({}, {})", id, position.x, position.y);

        self.emit(BoardEvent::StickerAdded { sticker });
        id
    }

    /// Replace the board with an imported document.
    ///
    /// Stickers keep their ids; stickers without one, or repeating an id
    /// already used earlier in the document, get a fresh id. Background and
    /// canvas fields are only overwritten when the document carries them.
    pub fn load(&mut self, document: ImportDocument) {
        let mut taken = HashSet::new();
        let keep: Vec<bool> = document
            .stickers
            .iter()
            .map(|s| matches!(&s.id, Some(id) if !id.is_empty() && taken.insert(id.clone())))
            .collect();

        let mut stickers = Vec::with_capacity(document.stickers.len());
        for (mut imported, keep) in document.stickers.into_iter().zip(keep) {
            if !keep {
                if let Some(duplicate) = imported.id.as_deref().filter(|id| !id.is_empty()) {
                    log::warn!("Duplicate sticker id {} in import, assigning a new one", duplicate);
                }
                let id = loop {
                    let candidate = self.ids.next_id();
                    if taken.insert(candidate.clone()) {
                        break candidate;
                    }
                };
                imported.id = Some(id);
            }
            if !imported.position.is_finite() {
                imported.position = Point::ZERO;
            }
            stickers.push(imported.into_sticker(&mut *self.ids));
        }
        self.state.stickers = stickers;

        if let Some(url) = document.background_image_url {
            self.state.background_image_url = url;
        }
        if let Some(color) = document.page_background_color {
            self.state.page_background_color = color;
        }
        if let Some(position) = document.canvas_position.filter(|p| p.is_finite()) {
            self.state.canvas_position = position;
        }

        log::info!("Loaded board with {} stickers", self.state.stickers.len());
        if !self.listeners.is_empty() {
            self.emit(BoardEvent::Loaded {
                document: self.to_document(),
            });
        }
    }

    /// Parse and load a JSON document. On error the board is unchanged.
    pub fn load_json(&mut self, json: &str) -> BoardResult<()> {
        let document = ImportDocument::from_json(json)?;
        self.load(document);
        Ok(())
    }

    /// Load an already-parsed JSON value. On error the board is unchanged.
    pub fn load_value(&mut self, value: serde_json::Value) -> BoardResult<()> {
        let document = ImportDocument::from_value(value)?;
        self.load(document);
        Ok(())
    }

    /// Move a sticker. Returns `false` if no sticker has that id or the
    /// position is not finite.
    pub fn update_position(&mut self, id: &str, position: Point) -> bool {
        if !position.is_finite() {
            log::debug!("Ignoring non-finite position ({}, {}) for {}", position.x, position.y, id);
            return false;
        }
        let Some(sticker) = self.state.stickers.iter_mut().find(|s| s.id == id) else {
            log::debug!("Ignoring move of unknown sticker {}", id);
            return false;
        };
        sticker.position = position;

        self.emit(BoardEvent::StickerMoved {
            id: id.to_string(),
            position,
        });
        true
    }

    /// Pan the canvas by a relative offset. Offsets that would leave the
    /// canvas at a non-finite position are ignored.
    pub fn update_canvas_position(&mut self, delta_x: f64, delta_y: f64) {
        let position = self.state.canvas_position + Vec2::new(delta_x, delta_y);
        if !position.is_finite() {
            log::debug!("Ignoring non-finite canvas offset ({}, {})", delta_x, delta_y);
            return;
        }
        self.state.canvas_position = position;
        log::debug!("Canvas moved to ({}, {})", position.x, position.y);

        self.emit(BoardEvent::CanvasMoved { position });
    }

    /// Flip between draggable and locked.
    pub fn toggle_drag(&mut self) {
        self.state.is_draggable = !self.state.is_draggable;
        let draggable = self.state.is_draggable;
        log::debug!("Dragging {}", if draggable { "enabled" } else { "locked" });

        self.emit(BoardEvent::DragToggled { draggable });
    }

    pub fn set_background_image_url(&mut self, url: impl Into<String>) {
        let url = url.into();
        self.state.background_image_url = url.clone();
        self.emit(BoardEvent::BackgroundImageChanged { url });
    }

    pub fn set_page_background_color(&mut self, color: impl Into<String>) {
        let color = color.into();
        self.state.page_background_color = color.clone();
        self.emit(BoardEvent::BackgroundColorChanged { color });
    }

    /// Remove a sticker, returning it if it existed.
    pub fn remove(&mut self, id: &str) -> Option<Sticker> {
        let index = self.state.stickers.iter().position(|s| s.id == id)?;
        let sticker = self.state.stickers.remove(index);

        self.emit(BoardEvent::StickerRemoved { id: sticker.id.clone() });
        Some(sticker)
    }

    /// Move a sticker to the end of the list so it renders on top.
    /// Returns `false` if no sticker has that id.
    pub fn bring_to_front(&mut self, id: &str) -> bool {
        let Some(index) = self.state.stickers.iter().position(|s| s.id == id) else {
            return false;
        };
        let sticker = self.state.stickers.remove(index);
        self.state.stickers.push(sticker);

        self.emit(BoardEvent::StickerRaised { id: id.to_string() });
        true
    }

    // --- Export ----------------------------------------------------------

    /// The full board as an export document.
    pub fn to_document(&self) -> BoardDocument {
        BoardDocument {
            background_image_url: self.state.background_image_url.clone(),
            page_background_color: self.state.page_background_color.clone(),
            stickers: self.state.stickers.clone(),
            canvas_position: self.state.canvas_position,
        }
    }

    /// Serialize the board as pretty-printed JSON.
    pub fn export_json(&self) -> BoardResult<String> {
        Ok(self.to_document().to_json()?)
    }

    /// Serialize the board and hand it to `delivery` under the configured
    /// export file name.
    pub fn export(&self, delivery: &mut dyn FileDelivery) -> BoardResult<()> {
        let json = self.export_json()?;
        delivery.deliver(&self.config.export_file_name, EXPORT_MIME_TYPE, &json)?;
        log::info!(
            "Exported {} stickers as {}",
            self.state.stickers.len(),
            self.config.export_file_name
        );
        Ok(())
    }

    // --- Observation -----------------------------------------------------

    /// Register a callback invoked after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&BoardEvent) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a callback. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: BoardEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    fn fresh_id(&mut self) -> StickerId {
        loop {
            let id = self.ids.next_id();
            if self.sticker(&id).is_none() {
                return id;
            }
        }
    }
}
