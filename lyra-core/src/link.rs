//! Connection lifecycle
//!
//! The host is expected to talk at least every few seconds (it pings every
//! two). Silence longer than the configured timeout drops the link and wipes
//! everything that described the host's playback. Equalizer bars are left
//! as they were.

use lyra_protocol::PlaybackState;

use crate::config::FirmwareConfig;
use crate::state::DisplayState;

/// Change in link status observed during one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// First line after boot or after a timeout
    Established,
    /// Inactivity timeout
    Lost,
}

/// Drop the link if it has been silent for longer than the timeout
///
/// On timeout the lyric text, meta text, both scroll positions and the
/// playback indicator are reset. The caller is responsible for showing the
/// disconnected screen. Returns [`LinkEvent::Lost`] on the transition.
pub fn check_timeout(
    state: &mut DisplayState,
    config: &FirmwareConfig,
    now: u32,
) -> Option<LinkEvent> {
    if !state.connection.connected || state.connection.idle_ms(now) <= config.link_timeout_ms {
        return None;
    }

    state.connection.connected = false;
    state.lyrics.clear();
    state.meta.clear();
    state.playback = PlaybackState::Stopped;
    Some(LinkEvent::Lost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::dispatch;
    use lyra_protocol::{HostCommand, EQ_BARS};

    const CONFIG: FirmwareConfig = FirmwareConfig::DEFAULT;

    #[test]
    fn test_never_connected_never_times_out() {
        let mut state = DisplayState::new(&CONFIG, 0);
        assert_eq!(check_timeout(&mut state, &CONFIG, 60_000), None);
    }

    #[test]
    fn test_timeout_boundary() {
        let mut state = DisplayState::new(&CONFIG, 0);
        dispatch(&mut state, HostCommand::Ping, 1000);
        assert_eq!(check_timeout(&mut state, &CONFIG, 11_000), None);
        assert_eq!(check_timeout(&mut state, &CONFIG, 11_001), Some(LinkEvent::Lost));
        assert!(!state.connection.connected);
        // Only reported once
        assert_eq!(check_timeout(&mut state, &CONFIG, 20_000), None);
    }

    #[test]
    fn test_timeout_clears_playback_but_keeps_bars() {
        let mut state = DisplayState::new(&CONFIG, 0);
        for line in ["TXT|hello there", "META|artist", "STA|PLAY", "EQ|5,5,5"] {
            dispatch(&mut state, HostCommand::parse(line), 0);
        }
        check_timeout(&mut state, &CONFIG, 10_001);

        assert_eq!(state.lyrics.text(), "");
        assert_eq!(state.meta.text(), "");
        assert_eq!(state.meta.scroll_x(), 0);
        assert_eq!(state.playback, PlaybackState::Stopped);
        let mut bars = [0u8; EQ_BARS];
        bars[..3].copy_from_slice(&[5, 5, 5]);
        assert_eq!(state.equalizer.levels(), &bars);
    }

    #[test]
    fn test_reconnect_marks_dirty() {
        let mut state = DisplayState::new(&CONFIG, 0);
        dispatch(&mut state, HostCommand::Ping, 0);
        check_timeout(&mut state, &CONFIG, 10_001);
        state.clear_dirty();

        dispatch(&mut state, HostCommand::Ping, 12_000);
        assert!(state.connection.connected);
        assert!(state.is_dirty());
    }
}
