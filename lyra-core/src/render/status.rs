//! Status bar: playback icon and meta text

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, Triangle};
use lyra_display::{draw_text, FontProfile, FrameBuffer};
use lyra_protocol::PlaybackState;

use super::{infallible, ICON_X, META_AVAILABLE_WIDTH, META_X, STATUS_BAR_Y};
use crate::state::MetaState;

const PAUSE_BAR: Size = Size::new(3, 11);
const PAUSE_GAP: i32 = 5;
const STOP_SQUARE: Size = Size::new(9, 9);

/// Draw the playback indicator at the left of the status bar
pub fn draw_icon(frame: &mut FrameBuffer, playback: PlaybackState) {
    let fill = PrimitiveStyle::with_fill(BinaryColor::On);
    let y = STATUS_BAR_Y;
    match playback {
        PlaybackState::Playing => infallible(
            Triangle::new(
                Point::new(ICON_X, y),
                Point::new(ICON_X, y + 10),
                Point::new(ICON_X + 8, y + 5),
            )
            .into_styled(fill)
            .draw(frame),
        ),
        PlaybackState::Paused => {
            for x in [ICON_X, ICON_X + PAUSE_GAP] {
                infallible(frame.fill_solid(&Rectangle::new(Point::new(x, y), PAUSE_BAR), BinaryColor::On));
            }
        }
        PlaybackState::Stopped => infallible(
            frame.fill_solid(&Rectangle::new(Point::new(ICON_X, y), STOP_SQUARE), BinaryColor::On),
        ),
    }
}

/// Draw the meta text, as a two-copy marquee when it does not fit
///
/// `gap` is the blank space between the end of one copy and the start of
/// the next.
pub fn draw_meta(frame: &mut FrameBuffer, meta: &MetaState, gap: u32) {
    if meta.text().is_empty() {
        return;
    }

    let area = Rectangle::new(
        Point::new(META_X, STATUS_BAR_Y),
        Size::new(META_AVAILABLE_WIDTH, (lyra_display::HEIGHT as i32 - STATUS_BAR_Y) as u32),
    );
    let mut target = frame.clipped(&area);

    if !meta.needs_scroll() {
        infallible(draw_text(&mut target, meta.text(), META_X, STATUS_BAR_Y, FontProfile::META));
        return;
    }

    let width = meta.pixel_width() as i32;
    let period = width + gap as i32;
    let right = lyra_display::WIDTH as i32;
    for copy in 0..2 {
        let x = META_X - meta.scroll_x() as i32 + copy * period;
        if x + width < META_X || x >= right {
            continue;
        }
        infallible(draw_text(&mut target, meta.text(), x, STATUS_BAR_Y, FontProfile::META));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_columns(frame: &FrameBuffer, xs: core::ops::Range<i32>) -> usize {
        xs.map(|x| (STATUS_BAR_Y..64).filter(|&y| frame.pixel(x, y)).count())
            .sum()
    }

    #[test]
    fn test_pause_icon_bars() {
        let mut frame = FrameBuffer::new();
        draw_icon(&mut frame, PlaybackState::Paused);
        assert_eq!(frame.lit_in_rows(0, 64), 2 * 3 * 11);
        assert!(frame.pixel(2, 52));
        assert!(!frame.pixel(5, 52));
        assert!(frame.pixel(7, 62));
    }

    #[test]
    fn test_play_icon_inside_icon_cell() {
        let mut frame = FrameBuffer::new();
        draw_icon(&mut frame, PlaybackState::Playing);
        assert!(frame.pixel(2, 52));
        assert!(frame.pixel(2, 62));
        assert!(frame.pixel(10, 57));
        assert_eq!(lit_columns(&frame, 11..128), 0);
    }

    #[test]
    fn test_static_meta_clipped_to_status_bar() {
        let mut meta = MetaState::new();
        meta.set_text("Artist", META_AVAILABLE_WIDTH);
        let mut frame = FrameBuffer::new();
        draw_meta(&mut frame, &meta, 30);
        assert_eq!(frame.lit_in_rows(0, STATUS_BAR_Y), 0);
        assert_eq!(lit_columns(&frame, 0..META_X), 0);
        assert!(lit_columns(&frame, META_X..META_X + 36) > 0);
    }

    #[test]
    fn test_marquee_never_draws_left_of_text_area() {
        let mut meta = MetaState::new();
        meta.set_text("Some Artist - A Very Long Title", META_AVAILABLE_WIDTH);
        let mut frame = FrameBuffer::new();
        for _ in 0..100 {
            meta.advance_marquee(30);
            frame.clear();
            draw_meta(&mut frame, &meta, 30);
            assert_eq!(lit_columns(&frame, 0..META_X), 0);
        }
    }

    #[test]
    fn test_marquee_second_copy_enters() {
        let mut meta = MetaState::new();
        // 186px wide; with a 30px gap the second copy starts at x = 16 + 216 - scroll
        meta.set_text("Some Artist - A Very Long Title", META_AVAILABLE_WIDTH);
        for _ in 0..200 {
            meta.advance_marquee(30);
        }
        let mut frame = FrameBuffer::new();
        draw_meta(&mut frame, &meta, 30);
        // First copy has scrolled out, second sits at x = 32
        assert_eq!(lit_columns(&frame, META_X..32), 0);
        assert!(lit_columns(&frame, 32..40) > 0);
    }
}
