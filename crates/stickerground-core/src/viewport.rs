//! Viewport size queries used for default sticker placement.

use kurbo::{Point, Size};

/// Fallback viewport when the host does not report one.
pub const DEFAULT_VIEWPORT: Size = Size::new(800.0, 600.0);

/// Reports the size of the visible area, in CSS pixels.
pub trait Viewport {
    fn size(&self) -> Size;

    /// Top-left corner that centers a square sticker of `sticker_size`.
    fn centered(&self, sticker_size: f64) -> Point {
        let size = self.size();
        let half = sticker_size / 2.0;
        Point::new(size.width / 2.0 - half, size.height / 2.0 - half)
    }
}

/// A viewport of constant size, updated by the host on resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedViewport {
    size: Size,
}

impl FixedViewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
        }
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.size = Size::new(width, height);
    }
}

impl Default for FixedViewport {
    fn default() -> Self {
        Self { size: DEFAULT_VIEWPORT }
    }
}

impl From<Size> for FixedViewport {
    fn from(size: Size) -> Self {
        Self { size }
    }
}

impl Viewport for FixedViewport {
    fn size(&self) -> Size {
        self.size
    }
}
