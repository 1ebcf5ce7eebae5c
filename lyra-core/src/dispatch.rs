//! Command dispatcher
//!
//! Applies one parsed host command to the display state. Every command,
//! recognised or not, counts as link activity. Commands that change what is
//! on screen mark the frame dirty; repeats of the current value do not.

use lyra_protocol::{DeviceMessage, DisplayMode, HostCommand};

use crate::render::META_AVAILABLE_WIDTH;
use crate::state::DisplayState;

/// Accepted range for `FONT|` values
pub const FONT_SIZE_RANGE: core::ops::RangeInclusive<f32> = 1.0..=3.0;

/// Apply `command`, received at `now`
///
/// Returns the reply to send immediately, if the command has one.
pub fn dispatch(
    state: &mut DisplayState,
    command: HostCommand<'_>,
    now: u32,
) -> Option<DeviceMessage> {
    if state.connection.record_activity(now) {
        // Replace the boot or disconnected screen
        state.mark_dirty();
    }

    match command {
        HostCommand::Ping => return Some(DeviceMessage::Pong),
        HostCommand::Clear => {
            state.lyrics.clear();
            state.mark_dirty();
        }
        HostCommand::Text(text) => {
            if state.lyrics.set_text(text) {
                state.timers.lyric_scroll.restart(now);
                state.mark_dirty();
            }
        }
        HostCommand::Font(Some(size)) => {
            if FONT_SIZE_RANGE.contains(&size) && size != state.lyrics.font_size() {
                state.lyrics.set_font(size);
                state.timers.lyric_scroll.restart(now);
                state.mark_dirty();
            }
        }
        HostCommand::Status(playback) => {
            if state.playback != playback {
                state.playback = playback;
                state.mark_dirty();
            }
        }
        HostCommand::Meta(text) => {
            if state.meta.set_text(text, META_AVAILABLE_WIDTH) {
                state.timers.marquee.restart(now);
                state.mark_dirty();
            }
        }
        HostCommand::Mode(mode) => {
            state.set_mode(mode, now);
        }
        HostCommand::Equalizer(levels) => {
            state.equalizer.apply_host(levels, now);
            state.set_mode(DisplayMode::Equalizer, now);
            state.mark_dirty();
        }
        HostCommand::Font(None) | HostCommand::Unknown => {}
    }

    None
}
