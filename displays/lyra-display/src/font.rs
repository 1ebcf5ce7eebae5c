//! Built-in bitmap font and font profiles
//!
//! One 5x8 glyph set covers printable ASCII. Profiles scale it up and choose
//! between fixed-pitch and proportional spacing, which is all the variety a
//! 128x64 panel needs.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Columns per glyph
pub const GLYPH_COLUMNS: usize = 5;

/// Rows per glyph (bit 7 carries descenders)
pub const GLYPH_ROWS: u32 = 8;

/// Horizontal cell of the unscaled fixed-pitch font, glyph plus one blank column
pub const CELL_WIDTH: u32 = GLYPH_COLUMNS as u32 + 1;

const FIRST: u32 = 0x20;
const LAST: u32 = 0x7E;
const FALLBACK: char = '?';

/// Column-major glyphs for `' '..='~'`, bit 0 is the top row
#[rustfmt::skip]
static GLYPHS: [[u8; GLYPH_COLUMNS]; (LAST - FIRST + 1) as usize] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x56, 0x20, 0x50], // &
    [0x00, 0x08, 0x07, 0x03, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x2A, 0x1C, 0x7F, 0x1C, 0x2A], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x80, 0x70, 0x30, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x00, 0x60, 0x60, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x72, 0x49, 0x49, 0x49, 0x46], // 2
    [0x21, 0x41, 0x49, 0x4D, 0x33], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x31], // 6
    [0x41, 0x21, 0x11, 0x09, 0x07], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x46, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x00, 0x14, 0x00, 0x00], // :
    [0x00, 0x40, 0x34, 0x00, 0x00], // ;
    [0x00, 0x08, 0x14, 0x22, 0x41], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x59, 0x09, 0x06], // ?
    [0x3E, 0x41, 0x5D, 0x59, 0x4E], // @
    [0x7C, 0x12, 0x11, 0x12, 0x7C], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x41, 0x3E], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x41, 0x51, 0x73], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x1C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x26, 0x49, 0x49, 0x49, 0x32], // S
    [0x03, 0x01, 0x7F, 0x01, 0x03], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x03, 0x04, 0x78, 0x04, 0x03], // Y
    [0x61, 0x59, 0x49, 0x4D, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x41], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // backslash
    [0x00, 0x41, 0x41, 0x41, 0x7F], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x03, 0x07, 0x08, 0x00], // `
    [0x20, 0x54, 0x54, 0x78, 0x40], // a
    [0x7F, 0x28, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x28], // c
    [0x38, 0x44, 0x44, 0x28, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x00, 0x08, 0x7E, 0x09, 0x02], // f
    [0x18, 0xA4, 0xA4, 0x9C, 0x78], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x40, 0x3D, 0x00], // j
    [0x7F, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x78, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0xFC, 0x18, 0x24, 0x24, 0x18], // p
    [0x18, 0x24, 0x24, 0x18, 0xFC], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x24], // s
    [0x04, 0x04, 0x3F, 0x44, 0x24], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x4C, 0x90, 0x90, 0x90, 0x7C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x77, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x02, 0x01, 0x02, 0x04, 0x02], // ~
];

/// Glyph columns for a character; anything outside printable ASCII draws as `?`
pub fn glyph(ch: char) -> &'static [u8; GLYPH_COLUMNS] {
    let code = ch as u32;
    let code = if (FIRST..=LAST).contains(&code) {
        code
    } else {
        FALLBACK as u32
    };
    &GLYPHS[(code - FIRST) as usize]
}

/// First and last inked column of a glyph, `None` for blank glyphs
fn inked_span(columns: &[u8; GLYPH_COLUMNS]) -> Option<(usize, usize)> {
    let first = columns.iter().position(|&c| c != 0)?;
    let last = columns.iter().rposition(|&c| c != 0)?;
    Some((first, last))
}

/// How text is sized and spaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontProfile {
    /// Fixed pitch at an integer scale (1..=3)
    Fixed(u8),
    /// Proportional, 2x glyphs
    Sans9,
    /// Proportional, 3x glyphs
    Sans12,
}

impl Default for FontProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FontProfile {
    /// Profile in effect before the host selects one
    pub const DEFAULT: Self = FontProfile::Fixed(2);

    /// Profile used for the status bar
    pub const META: Self = FontProfile::Fixed(1);

    /// Map a requested font size to a profile
    ///
    /// Values near 1.5 and 2.5 select the proportional faces; anything else
    /// rounds to the nearest fixed-pitch scale. The caller is expected to
    /// have range-checked `size`.
    pub fn from_size(size: f32) -> Self {
        if size > 1.4 && size < 1.6 {
            FontProfile::Sans9
        } else if size > 2.4 && size < 2.6 {
            FontProfile::Sans12
        } else {
            // `as` truncates toward zero, which is floor for positive values
            let rounded = (size + 0.5) as i32;
            FontProfile::Fixed(rounded.clamp(1, 3) as u8)
        }
    }

    /// Pixel multiplier applied to each glyph
    pub fn scale(self) -> u32 {
        match self {
            FontProfile::Fixed(n) => n.clamp(1, 3) as u32,
            FontProfile::Sans9 => 2,
            FontProfile::Sans12 => 3,
        }
    }

    /// Returns true for proportionally spaced profiles
    pub fn is_proportional(self) -> bool {
        !matches!(self, FontProfile::Fixed(_))
    }

    /// Vertical distance between wrapped lines
    pub fn line_height(self) -> u32 {
        GLYPH_ROWS * self.scale()
    }

    /// Width of an inter-word space
    pub fn space_advance(self) -> u32 {
        if self.is_proportional() {
            3 * self.scale()
        } else {
            CELL_WIDTH * self.scale()
        }
    }

    /// Horizontal advance for one character
    pub fn advance(self, ch: char) -> u32 {
        if !self.is_proportional() {
            return CELL_WIDTH * self.scale();
        }
        match inked_span(glyph(ch)) {
            Some((first, last)) => (last - first + 2) as u32 * self.scale(),
            None => self.space_advance(),
        }
    }

    /// Width of `text` drawn as-is
    pub fn text_width(self, text: &str) -> u32 {
        text.chars().map(|ch| self.advance(ch)).sum()
    }
}

/// Draw `text` with its top-left corner at (`x`, `y`)
///
/// Glyphs falling entirely outside the target's bounding box are skipped, so
/// drawing through a clipped target only touches what is visible. Returns
/// the x coordinate following the last character.
pub fn draw_text<D>(
    target: &mut D,
    text: &str,
    x: i32,
    y: i32,
    profile: FontProfile,
) -> Result<i32, D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let bounds = target.bounding_box();
    let left = bounds.top_left.x;
    let right = left + bounds.size.width as i32;
    let mut cursor = x;

    for ch in text.chars() {
        let advance = profile.advance(ch) as i32;
        if cursor + advance > left && cursor < right {
            draw_glyph(target, ch, cursor, y, profile)?;
        }
        cursor += advance;
    }

    Ok(cursor)
}

fn draw_glyph<D>(target: &mut D, ch: char, x: i32, y: i32, profile: FontProfile) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let columns = glyph(ch);
    let Some((first, last)) = inked_span(columns) else {
        return Ok(());
    };
    // Proportional faces start at the first inked column
    let start = if profile.is_proportional() { first } else { 0 };
    let scale = profile.scale();
    let cell = Size::new(scale, scale);

    for (i, &bits) in columns[start..=last].iter().enumerate() {
        let px = x + (i as u32 * scale) as i32;
        for row in 0..GLYPH_ROWS {
            if bits & (1 << row) != 0 {
                let py = y + (row * scale) as i32;
                target.fill_solid(&Rectangle::new(Point::new(px, py), cell), BinaryColor::On)?;
            }
        }
    }
    Ok(())
}
