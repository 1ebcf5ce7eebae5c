//! Status bar text and marquee

use heapless::String;
use lyra_display::FontProfile;

use super::lyrics::store_truncated;

/// Largest status bar text kept, in bytes
pub const META_CAPACITY: usize = 256;

/// Status bar text and its horizontal scroll
#[derive(Debug, Clone, Default)]
pub struct MetaState {
    text: String<META_CAPACITY>,
    pixel_width: u32,
    needs_scroll: bool,
    scroll_x: u32,
}

impl MetaState {
    /// No text
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Rendered width of the text
    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    /// Whether the text is wider than the space for it
    pub fn needs_scroll(&self) -> bool {
        self.needs_scroll
    }

    /// Marquee position in pixels
    pub fn scroll_x(&self) -> u32 {
        self.scroll_x
    }

    /// Replace the text, measured against `available` pixels
    ///
    /// Text beyond [`META_CAPACITY`] is dropped before comparing, so
    /// resending a long title is a no-op. Returns false if the stored text
    /// would not change.
    pub fn set_text(&mut self, text: &str, available: u32) -> bool {
        if !store_truncated(&mut self.text, text) {
            return false;
        }
        self.pixel_width = FontProfile::META.text_width(&self.text);
        self.needs_scroll = self.pixel_width > available;
        self.scroll_x = 0;
        true
    }

    /// Drop the text and scroll position
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Step the marquee one pixel, wrapping after the text and `gap`
    ///
    /// Returns false when the text fits and does not scroll.
    pub fn advance_marquee(&mut self, gap: u32) -> bool {
        if !self.needs_scroll {
            return false;
        }
        self.scroll_x = (self.scroll_x + 1) % (self.pixel_width + gap);
        true
    }
}
