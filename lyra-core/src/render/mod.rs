//! Display compositor
//!
//! Redraws the whole frame from [`DisplayState`]. Screen layout:
//!
//! ```text
//!  y=0  ┌────────────────────────────┐
//!       │ lyrics or equalizer        │
//!  y=48 ├────────────────────────────┤ cleared band
//!  y=49 │━━━━━━━━━━━━━━━━━━━━━━━━━━━━│ separator
//!  y=52 │ ▶  artist - title (marquee)│ status bar
//!  y=63 └────────────────────────────┘
//! ```

mod content;
mod status;

pub use status::{draw_icon, draw_meta};

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use lyra_display::{draw_text, FontProfile, FrameBuffer};
use lyra_protocol::{DisplayMode, PlaybackState};

use crate::config::FirmwareConfig;
use crate::state::DisplayState;

/// Height of the lyrics/equalizer region
pub const CONTENT_HEIGHT: u32 = 48;

/// Row of the separator line
pub const SEPARATOR_Y: i32 = 49;

/// Top row of the status bar
pub const STATUS_BAR_Y: i32 = 52;

/// Left edge of the playback icon
pub const ICON_X: i32 = 2;

/// Left edge of the meta text
pub const META_X: i32 = 16;

/// Horizontal space for the meta text
pub const META_AVAILABLE_WIDTH: u32 = lyra_display::WIDTH as u32 - META_X as u32;

/// Tallest equalizer bar
pub const EQ_MAX_BAR_HEIGHT: u32 = CONTENT_HEIGHT - 2;

/// Shown from power-up until the host first speaks
pub const BOOT_MESSAGE: &str = "Waiting for host";

/// Shown after the link times out
pub const DISCONNECTED_MESSAGE: &str = "Disconnected";

/// Row of the message on static screens
const MESSAGE_Y: i32 = 20;

/// Unwrap a draw on the frame buffer, which cannot fail
pub(crate) fn infallible<T>(result: Result<T, core::convert::Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Compose the full frame for the current state
///
/// Recomputes the lyric layout first if it is stale.
pub fn compose(state: &mut DisplayState, config: &FirmwareConfig, frame: &mut FrameBuffer) {
    state.lyrics.ensure_layout(lyra_display::WIDTH as u32);

    frame.clear();

    let region = Rectangle::new(
        Point::zero(),
        Size::new(lyra_display::WIDTH as u32, CONTENT_HEIGHT),
    );
    let mut content_target = frame.clipped(&region);
    match state.mode {
        DisplayMode::Lyrics => content::draw_lyrics(&mut content_target, &state.lyrics),
        DisplayMode::Equalizer => {
            content::draw_equalizer(&mut content_target, state.equalizer.levels())
        }
    }

    frame.clear_rows(CONTENT_HEIGHT as usize, STATUS_BAR_Y as usize);
    draw_separator(frame);
    draw_icon(frame, state.playback);
    draw_meta(frame, &state.meta, config.marquee_gap_px);
}

/// Compose a static message screen with the given status icon
pub fn compose_message(frame: &mut FrameBuffer, message: &str, icon: PlaybackState) {
    frame.clear();
    let width = FontProfile::META.text_width(message) as i32;
    let x = ((lyra_display::WIDTH as i32 - width) / 2).max(0);
    infallible(draw_text(frame, message, x, MESSAGE_Y, FontProfile::META));
    draw_separator(frame);
    draw_icon(frame, icon);
}

fn draw_separator(frame: &mut FrameBuffer) {
    let right = lyra_display::WIDTH as i32 - 1;
    infallible(
        Line::new(Point::new(0, SEPARATOR_Y), Point::new(right, SEPARATOR_Y))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(frame),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FirmwareConfig;
    use crate::dispatch::dispatch;
    use lyra_protocol::HostCommand;

    fn state_with(lines: &[&str]) -> DisplayState {
        let mut state = DisplayState::new(&FirmwareConfig::DEFAULT, 0);
        for line in lines {
            dispatch(&mut state, HostCommand::parse(line), 0);
        }
        state
    }

    #[test]
    fn test_separator_and_band() {
        let mut state = state_with(&["TXT|hello"]);
        let mut frame = FrameBuffer::new();
        compose(&mut state, &FirmwareConfig::DEFAULT, &mut frame);
        assert_eq!(frame.lit_in_rows(49, 50), 128);
        assert_eq!(frame.lit_in_rows(48, 49), 0);
        assert_eq!(frame.lit_in_rows(50, 52), 0);
    }

    #[test]
    fn test_lyrics_drawn_in_content_region() {
        let mut state = state_with(&["TXT|hello"]);
        let mut frame = FrameBuffer::new();
        compose(&mut state, &FirmwareConfig::DEFAULT, &mut frame);
        assert!(frame.lit_in_rows(0, 16) > 0);
        assert_eq!(frame.lit_in_rows(16, 48), 0);
    }

    #[test]
    fn test_lyrics_never_bleed_into_status_bar() {
        // Six lines of 16px at Fixed(2); only three fit
        let mut state = state_with(&["TXT|WWWWWWW WWWWWWW WWWWWWW WWWWWWW WWWWWWW WWWWWWW"]);
        let mut frame = FrameBuffer::new();
        compose(&mut state, &FirmwareConfig::DEFAULT, &mut frame);
        assert!(frame.lit_in_rows(32, 48) > 0);
        assert_eq!(frame.lit_in_rows(48, 49), 0);
        assert_eq!(frame.lit_in_rows(50, 52), 0);
        // Stopped icon only, no meta text
        assert_eq!(frame.lit_in_rows(52, 64), 81);
    }

    #[test]
    fn test_scrolled_lyrics_shift_up() {
        let mut state = state_with(&["TXT|WWWWWWW aaaaaaa"]);
        let mut frame = FrameBuffer::new();
        compose(&mut state, &FirmwareConfig::DEFAULT, &mut frame);
        let top_before = frame.lit_in_rows(0, 16);

        state.lyrics.set_text("WWWWWWW aaaaaaa bbbbbbb ccccccc");
        state.lyrics.ensure_layout(128);
        assert!(state.lyrics.advance_scroll(16, CONTENT_HEIGHT));
        compose(&mut state, &FirmwareConfig::DEFAULT, &mut frame);
        assert_ne!(frame.lit_in_rows(0, 16), top_before);
    }

    #[test]
    fn test_equalizer_bars() {
        let mut state = state_with(&["EQ|12,6,0"]);
        let mut frame = FrameBuffer::new();
        compose(&mut state, &FirmwareConfig::DEFAULT, &mut frame);
        // Bar 0 full height, 8px wide at x=1
        assert!(frame.pixel(1, 0));
        assert!(frame.pixel(8, 45));
        assert!(!frame.pixel(0, 45));
        assert!(!frame.pixel(9, 45));
        assert!(!frame.pixel(1, 46));
        // Bar 1 half height
        assert!(frame.pixel(11, 23));
        assert!(!frame.pixel(11, 22));
        // Bar 2 empty
        assert_eq!((21..29).filter(|&x| frame.pixel(x, 45)).count(), 0);
    }

    #[test]
    fn test_message_screen() {
        let mut frame = FrameBuffer::new();
        compose_message(&mut frame, DISCONNECTED_MESSAGE, PlaybackState::Stopped);
        assert!(frame.lit_in_rows(MESSAGE_Y, MESSAGE_Y + 8) > 0);
        assert_eq!(frame.lit_in_rows(0, MESSAGE_Y), 0);
        assert_eq!(frame.lit_in_rows(49, 50), 128);
        assert_eq!(frame.lit_in_rows(52, 64), 81);
    }
}
