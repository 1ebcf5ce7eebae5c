//! Shared display state
//!
//! One record holds everything the main loop knows. Subsystems receive it
//! by mutable reference, mutate what they own, and mark the frame dirty when
//! the change is visible.

pub mod connection;
pub mod equalizer;
pub mod lyrics;
pub mod meta;

pub use connection::ConnectionState;
pub use equalizer::EqualizerState;
pub use lyrics::{LyricBuffer, TEXT_CAPACITY};
pub use meta::{MetaState, META_CAPACITY};

use lyra_protocol::{DisplayMode, PlaybackState};

use crate::config::FirmwareConfig;
use crate::scheduler::Timers;

/// Complete firmware state
#[derive(Debug, Clone)]
pub struct DisplayState {
    /// Host link liveness
    pub connection: ConnectionState,
    /// Content shown above the status bar
    pub mode: DisplayMode,
    /// Lyric text and its layout
    pub lyrics: LyricBuffer,
    /// Status bar text and marquee position
    pub meta: MetaState,
    /// Status bar icon
    pub playback: PlaybackState,
    /// Equalizer bars
    pub equalizer: EqualizerState,
    /// Animation schedule
    pub timers: Timers,
    dirty: bool,
}

impl DisplayState {
    /// Power-on state at time `now`
    pub fn new(config: &FirmwareConfig, now: u32) -> Self {
        Self {
            connection: ConnectionState::new(now),
            mode: DisplayMode::default(),
            lyrics: LyricBuffer::new(),
            meta: MetaState::new(),
            playback: PlaybackState::default(),
            equalizer: EqualizerState::new(),
            timers: Timers::new(config, now),
            dirty: false,
        }
    }

    /// Request a redraw on the next cycle
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether a redraw is pending
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Forget a pending redraw
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Switch display mode, resetting the lyric scroll on change
    ///
    /// Returns true if the mode changed.
    pub fn set_mode(&mut self, mode: DisplayMode, now: u32) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.lyrics.reset_scroll();
        self.timers.lyric_scroll.restart(now);
        self.dirty = true;
        true
    }
}
