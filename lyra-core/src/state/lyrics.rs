//! Lyric text, font selection and vertical scroll

use heapless::String;
use lyra_display::FontProfile;

use crate::layout::{self, Layout};

/// Largest lyric text kept, in bytes
pub const TEXT_CAPACITY: usize = lyra_protocol::LINE_CAPACITY;

/// Font size in effect before the host selects one
pub const DEFAULT_FONT_SIZE: f32 = 2.0;

/// Longest prefix of `src` that fits in `capacity` bytes, cut on a char boundary
fn fit(src: &str, capacity: usize) -> &str {
    let mut end = src.len().min(capacity);
    while !src.is_char_boundary(end) {
        end -= 1;
    }
    &src[..end]
}

/// Replace `dst` with the part of `src` it can hold
///
/// Returns false, leaving `dst` untouched, if that part equals `dst`.
pub(crate) fn store_truncated<const N: usize>(dst: &mut String<N>, src: &str) -> bool {
    let src = fit(src, N);
    if dst.as_str() == src {
        return false;
    }
    dst.clear();
    // Cannot fail, `src` is within capacity
    let _ = dst.push_str(src);
    true
}

/// The lyric shown in LYRICS mode
#[derive(Debug, Clone)]
pub struct LyricBuffer {
    text: String<TEXT_CAPACITY>,
    font_size: f32,
    profile: FontProfile,
    layout: Layout,
    /// Layout no longer matches text/profile
    stale: bool,
    scroll_offset: u32,
}

impl Default for LyricBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LyricBuffer {
    /// Empty text at the default font
    pub fn new() -> Self {
        Self {
            text: String::new(),
            font_size: DEFAULT_FONT_SIZE,
            profile: FontProfile::DEFAULT,
            layout: Layout::empty(FontProfile::DEFAULT),
            stale: false,
            scroll_offset: 0,
        }
    }

    /// Current raw text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Last accepted font size value
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Active font profile
    pub fn profile(&self) -> FontProfile {
        self.profile
    }

    /// Vertical scroll position in pixels
    pub fn scroll_offset(&self) -> u32 {
        self.scroll_offset
    }

    /// Replace the text
    ///
    /// Returns false, leaving everything untouched, if `text` equals the
    /// current text.
    pub fn set_text(&mut self, text: &str) -> bool {
        if !store_truncated(&mut self.text, text) {
            return false;
        }
        self.stale = true;
        self.scroll_offset = 0;
        true
    }

    /// Select a font by size value
    pub fn set_font(&mut self, size: f32) {
        self.font_size = size;
        self.profile = FontProfile::from_size(size);
        self.stale = true;
        self.scroll_offset = 0;
    }

    /// Drop the text, its layout and scroll position
    pub fn clear(&mut self) {
        self.text.clear();
        self.layout = Layout::empty(self.profile);
        self.stale = false;
        self.scroll_offset = 0;
    }

    /// Return to the top
    pub fn reset_scroll(&mut self) {
        self.scroll_offset = 0;
    }

    /// Re-wrap the text if it or the font changed since the last call
    pub fn ensure_layout(&mut self, width: u32) {
        if self.stale {
            self.layout = layout::wrap(&self.text, self.profile, width);
            self.stale = false;
        }
    }

    /// Wrapped lines; call [`Self::ensure_layout`] first
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Whether the layout needs recomputing
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Largest valid scroll offset for a viewport `visible` pixels tall
    pub fn max_scroll(&self, visible: u32) -> u32 {
        self.layout.total_height().saturating_sub(visible)
    }

    /// Advance the scroll by `step`, wrapping to the top past the end
    ///
    /// Does nothing when the text fits. Returns true if the offset changed.
    pub fn advance_scroll(&mut self, step: u32, visible: u32) -> bool {
        if self.text.is_empty() || self.layout.total_height() <= visible {
            return false;
        }
        let next = self.scroll_offset + step;
        let next = if next > self.max_scroll(visible) { 0 } else { next };
        let changed = next != self.scroll_offset;
        self.scroll_offset = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: u32 = 128;
    const VISIBLE: u32 = 48;

    #[test]
    fn test_set_text_idempotent() {
        let mut lyrics = LyricBuffer::new();
        assert!(lyrics.set_text("Hello world"));
        lyrics.ensure_layout(W);
        assert!(!lyrics.is_stale());
        assert!(!lyrics.set_text("Hello world"));
        assert!(!lyrics.is_stale());
    }

    #[test]
    fn test_truncates_on_char_boundary() {
        let long = "é".repeat(TEXT_CAPACITY);
        let mut lyrics = LyricBuffer::new();
        lyrics.set_text(&long);
        assert!(lyrics.text().len() <= TEXT_CAPACITY);
        assert!(lyrics.text().chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_font_change_rewraps() {
        let mut lyrics = LyricBuffer::new();
        lyrics.set_text("one two three four five");
        lyrics.ensure_layout(W);
        let before = lyrics.layout().total_height();
        lyrics.set_font(1.0);
        assert!(lyrics.is_stale());
        lyrics.ensure_layout(W);
        assert!(lyrics.layout().total_height() < before);
        assert_eq!(lyrics.profile(), FontProfile::Fixed(1));
    }

    #[test]
    fn test_scroll_wraps_to_top() {
        let mut lyrics = LyricBuffer::new();
        // Fixed(2): one word per line, 5 lines of 16px = 80px
        lyrics.set_text("aaaaaaa bbbbbbb ccccccc ddddddd eeeeeee");
        lyrics.ensure_layout(W);
        assert_eq!(lyrics.layout().total_height(), 80);
        assert_eq!(lyrics.max_scroll(VISIBLE), 32);

        assert!(lyrics.advance_scroll(16, VISIBLE));
        assert_eq!(lyrics.scroll_offset(), 16);
        assert!(lyrics.advance_scroll(16, VISIBLE));
        assert_eq!(lyrics.scroll_offset(), 32);
        assert!(lyrics.advance_scroll(16, VISIBLE));
        assert_eq!(lyrics.scroll_offset(), 0);
    }

    #[test]
    fn test_short_text_does_not_scroll() {
        let mut lyrics = LyricBuffer::new();
        lyrics.set_text("short");
        lyrics.ensure_layout(W);
        assert!(!lyrics.advance_scroll(16, VISIBLE));
        assert_eq!(lyrics.scroll_offset(), 0);
    }

    #[test]
    fn test_clear_resets_height() {
        let mut lyrics = LyricBuffer::new();
        lyrics.set_text("aaaaaaa bbbbbbb ccccccc ddddddd");
        lyrics.ensure_layout(W);
        lyrics.advance_scroll(16, VISIBLE);
        lyrics.clear();
        assert_eq!(lyrics.text(), "");
        assert_eq!(lyrics.scroll_offset(), 0);
        assert_eq!(lyrics.layout().total_height(), 0);
    }
}
