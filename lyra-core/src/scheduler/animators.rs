//! The three display animators
//!
//! Every animator polls its gate each cycle whether or not it is active, so
//! an animator that becomes active picks up the running cadence instead of
//! firing immediately.

use lyra_protocol::{DisplayMode, PlaybackState};

use super::rng::Lcg;
use crate::config::FirmwareConfig;
use crate::render::CONTENT_HEIGHT;
use crate::state::DisplayState;

/// Step the vertical lyric scroll
///
/// Active in LYRICS mode when the wrapped text is taller than the content
/// region. Returns true if the offset changed.
pub fn tick_lyric_scroll(state: &mut DisplayState, config: &FirmwareConfig, now: u32) -> bool {
    if !state.timers.lyric_scroll.poll(now) || state.mode != DisplayMode::Lyrics {
        return false;
    }
    state.lyrics.ensure_layout(lyra_display::WIDTH as u32);
    state
        .lyrics
        .advance_scroll(config.lyric_scroll_step_px, CONTENT_HEIGHT)
}

/// Step the status bar marquee
///
/// Active only when the meta text is wider than the space for it.
pub fn tick_marquee(state: &mut DisplayState, config: &FirmwareConfig, now: u32) -> bool {
    if !state.timers.marquee.poll(now) {
        return false;
    }
    state.meta.advance_marquee(config.marquee_gap_px)
}

/// Perturb the equalizer bars
///
/// Active in EQUALIZER mode while playing, once host data is older than the
/// freshness window. Returns true if any bar moved.
pub fn tick_jitter(
    state: &mut DisplayState,
    rng: &mut Lcg,
    config: &FirmwareConfig,
    now: u32,
) -> bool {
    if !state.timers.jitter.poll(now) {
        return false;
    }
    let active = state.mode == DisplayMode::Equalizer
        && state.playback == PlaybackState::Playing
        && !state.equalizer.is_fresh(now, config.eq_fresh_ms);
    if !active {
        return false;
    }

    let mut changed = false;
    for bar in 0..lyra_protocol::EQ_BARS {
        let delta = rng.delta(config.jitter_amplitude);
        changed |= state.equalizer.nudge(bar, delta);
    }
    changed
}

/// Run every animator once, marking the frame dirty on visible change
pub fn tick_all(state: &mut DisplayState, rng: &mut Lcg, config: &FirmwareConfig, now: u32) {
    let scrolled = tick_lyric_scroll(state, config, now);
    let marqueed = tick_marquee(state, config, now);
    let jittered = tick_jitter(state, rng, config, now);
    if scrolled || marqueed || jittered {
        state.mark_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::META_AVAILABLE_WIDTH;
    use lyra_protocol::EQ_BARS;

    const CONFIG: FirmwareConfig = FirmwareConfig::DEFAULT;

    fn state() -> DisplayState {
        DisplayState::new(&CONFIG, 0)
    }

    #[test]
    fn test_lyric_scroll_cadence() {
        let mut s = state();
        s.lyrics.set_text("aaaaaaa bbbbbbb ccccccc ddddddd eeeeeee");
        assert!(!tick_lyric_scroll(&mut s, &CONFIG, 1999));
        assert!(tick_lyric_scroll(&mut s, &CONFIG, 2000));
        assert_eq!(s.lyrics.scroll_offset(), 16);
        assert!(!tick_lyric_scroll(&mut s, &CONFIG, 3999));
        assert!(tick_lyric_scroll(&mut s, &CONFIG, 4000));
        assert_eq!(s.lyrics.scroll_offset(), 32);
    }

    #[test]
    fn test_lyric_scroll_idle_in_equalizer_mode() {
        let mut s = state();
        s.lyrics.set_text("aaaaaaa bbbbbbb ccccccc ddddddd eeeeeee");
        s.set_mode(DisplayMode::Equalizer, 0);
        assert!(!tick_lyric_scroll(&mut s, &CONFIG, 2000));
        assert_eq!(s.lyrics.scroll_offset(), 0);
    }

    #[test]
    fn test_marquee_only_when_needed() {
        let mut s = state();
        s.meta.set_text("short", META_AVAILABLE_WIDTH);
        assert!(!tick_marquee(&mut s, &CONFIG, 50));

        s.meta.set_text("A rather long artist - and a long title", META_AVAILABLE_WIDTH);
        assert!(tick_marquee(&mut s, &CONFIG, 100));
        assert_eq!(s.meta.scroll_x(), 1);
    }

    #[test]
    fn test_jitter_requires_playing_equalizer() {
        let mut s = state();
        let mut rng = Lcg::new(3);
        s.set_mode(DisplayMode::Equalizer, 0);
        assert!(!tick_jitter(&mut s, &mut rng, &CONFIG, 80));

        s.playback = PlaybackState::Playing;
        s.set_mode(DisplayMode::Lyrics, 80);
        assert!(!tick_jitter(&mut s, &mut rng, &CONFIG, 160));
    }

    #[test]
    fn test_jitter_waits_for_stale_data() {
        let mut s = state();
        let mut rng = Lcg::new(3);
        s.set_mode(DisplayMode::Equalizer, 0);
        s.playback = PlaybackState::Playing;
        s.equalizer.apply_host([6; EQ_BARS], 0);

        // Fresh data wins
        assert!(!tick_jitter(&mut s, &mut rng, &CONFIG, 80));
        assert!(!tick_jitter(&mut s, &mut rng, &CONFIG, 160));
        assert_eq!(s.equalizer.levels(), &[6; EQ_BARS]);

        let mut moved = false;
        let mut now = 240;
        for _ in 0..20 {
            now += 80;
            let before = *s.equalizer.levels();
            moved |= tick_jitter(&mut s, &mut rng, &CONFIG, now);
            for (a, b) in before.iter().zip(s.equalizer.levels()) {
                assert!((*a as i16 - *b as i16).abs() <= 2);
            }
        }
        assert!(moved);
    }

    #[test]
    fn test_tick_all_marks_dirty() {
        let mut s = state();
        let mut rng = Lcg::new(1);
        s.meta.set_text("A rather long artist - and a long title", META_AVAILABLE_WIDTH);
        tick_all(&mut s, &mut rng, &CONFIG, 10);
        assert!(!s.is_dirty());
        tick_all(&mut s, &mut rng, &CONFIG, 50);
        assert!(s.is_dirty());
    }
}
