//! Text layout
//!
//! Greedy word wrap of lyric text into pixel-bounded lines. Lines are kept
//! as byte ranges into the source text so no text is copied; a line's words
//! are rendered separated by exactly one space advance regardless of how
//! much whitespace separated them in the source.

use heapless::Vec;
use lyra_display::FontProfile;

/// Maximum number of wrapped lines; text beyond this is dropped
pub const MAX_LINES: usize = 32;

/// Byte range of one wrapped line within the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineSpan {
    pub start: u16,
    pub end: u16,
}

impl LineSpan {
    /// The text of this line, still containing the source whitespace
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.start as usize..self.end as usize).unwrap_or("")
    }
}

/// Result of wrapping one text with one profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    lines: Vec<LineSpan, MAX_LINES>,
    line_height: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Self::empty(FontProfile::DEFAULT)
    }
}

impl Layout {
    /// A layout with no lines
    pub fn empty(profile: FontProfile) -> Self {
        Self {
            lines: Vec::new(),
            line_height: profile.line_height(),
        }
    }

    /// Wrapped lines in display order
    pub fn lines(&self) -> &[LineSpan] {
        &self.lines
    }

    /// Height of one line in pixels
    pub fn line_height(&self) -> u32 {
        self.line_height
    }

    /// Height of all lines in pixels
    pub fn total_height(&self) -> u32 {
        self.lines.len() as u32 * self.line_height
    }

    fn push(&mut self, start: usize, end: usize) -> bool {
        self.lines
            .push(LineSpan {
                start: start as u16,
                end: end as u16,
            })
            .is_ok()
    }

    fn is_full(&self) -> bool {
        self.lines.is_full()
    }
}

/// Rendered width of a wrapped line
///
/// Words are measured with the profile and joined by one space advance.
pub fn line_width(line: &str, profile: FontProfile) -> u32 {
    let mut width = 0;
    for (i, word) in line.split_whitespace().enumerate() {
        if i > 0 {
            width += profile.space_advance();
        }
        width += profile.text_width(word);
    }
    width
}

/// Iterate whitespace-separated words with their byte offsets
fn words(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split_whitespace()
        .map(move |word| (word.as_ptr() as usize - text.as_ptr() as usize, word))
}

/// Wrap `text` into lines no wider than `width` pixels
///
/// Deterministic: the output depends only on the arguments. A word wider
/// than `width` on its own is split between characters; every line holds
/// at least one character so the wrap always makes progress. At most
/// [`MAX_LINES`] lines are produced.
pub fn wrap(text: &str, profile: FontProfile, width: u32) -> Layout {
    let mut layout = Layout::empty(profile);
    // Spans are u16 offsets
    let text = truncate_to_boundary(text, u16::MAX as usize);
    let space = profile.space_advance();

    // Open line: (start byte, end byte, pixel width)
    let mut current: Option<(usize, usize, u32)> = None;

    for (offset, word) in words(text) {
        let word_end = offset + word.len();
        let word_width = profile.text_width(word);

        if let Some((start, end, line_px)) = current {
            let candidate = line_px + space + word_width;
            if candidate <= width {
                current = Some((start, word_end, candidate));
                continue;
            }
            current = None;
            if !layout.push(start, end) {
                return layout;
            }
        }

        if layout.is_full() {
            return layout;
        }

        if word_width <= width {
            current = Some((offset, word_end, word_width));
            continue;
        }

        // Character split for a word that cannot fit on any line
        let mut piece_start = offset;
        let mut piece_px = 0;
        for (i, ch) in word.char_indices() {
            let at = offset + i;
            let advance = profile.advance(ch);
            if piece_px + advance > width && at > piece_start {
                if !layout.push(piece_start, at) {
                    return layout;
                }
                piece_start = at;
                piece_px = 0;
            }
            piece_px += advance;
        }
        current = Some((piece_start, word_end, piece_px));
    }

    if let Some((start, end, _)) = current {
        layout.push(start, end);
    }
    layout
}

fn truncate_to_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
