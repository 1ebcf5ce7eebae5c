//! Content region: lyrics or equalizer bars

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use lyra_display::draw_text;
use lyra_protocol::{EqLevels, EQ_BARS, EQ_MAX_LEVEL};

use super::{infallible, CONTENT_HEIGHT, EQ_MAX_BAR_HEIGHT};
use crate::state::LyricBuffer;

/// Draw the visible wrapped lines at the current scroll offset
///
/// The layout must be current.
pub(super) fn draw_lyrics<D>(target: &mut D, lyrics: &LyricBuffer)
where
    D: DrawTarget<Color = BinaryColor, Error = core::convert::Infallible>,
{
    let profile = lyrics.profile();
    let layout = lyrics.layout();
    let line_height = layout.line_height() as i32;
    let offset = lyrics.scroll_offset() as i32;

    for (i, line) in layout.lines().iter().enumerate() {
        let y = i as i32 * line_height - offset;
        if y + line_height <= 0 || y >= CONTENT_HEIGHT as i32 {
            continue;
        }
        let mut x = 0;
        for word in line.slice(lyrics.text()).split_whitespace() {
            if x > 0 {
                x += profile.space_advance() as i32;
            }
            x = infallible(draw_text(target, word, x, y, profile));
        }
    }
}

/// Draw bottom-aligned bars, one per level
pub(super) fn draw_equalizer<D>(target: &mut D, levels: &EqLevels)
where
    D: DrawTarget<Color = BinaryColor, Error = core::convert::Infallible>,
{
    let bar_width = lyra_display::WIDTH as u32 / EQ_BARS as u32;
    let base = EQ_MAX_BAR_HEIGHT as i32;

    for (i, &level) in levels.iter().enumerate() {
        let height = level.min(EQ_MAX_LEVEL) as u32 * EQ_MAX_BAR_HEIGHT / EQ_MAX_LEVEL as u32;
        if height == 0 {
            continue;
        }
        let x = (i as u32 * bar_width) as i32 + 1;
        let bar = Rectangle::new(
            Point::new(x, base - height as i32),
            Size::new(bar_width - 2, height),
        );
        infallible(target.fill_solid(&bar, BinaryColor::On));
    }
}
