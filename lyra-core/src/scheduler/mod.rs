//! Animation scheduling
//!
//! Each animator owns a [`Periodic`] gate and runs at most once per cycle.
//! Animators report whether they changed anything visible; the caller turns
//! that into a redraw.

pub mod animators;
pub mod periodic;
pub mod rng;

pub use animators::{tick_all, tick_jitter, tick_lyric_scroll, tick_marquee};
pub use periodic::Periodic;
pub use rng::Lcg;

use crate::config::FirmwareConfig;

/// The independently clocked animation gates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timers {
    /// Vertical lyric scroll
    pub lyric_scroll: Periodic,
    /// Horizontal status bar marquee
    pub marquee: Periodic,
    /// Equalizer jitter
    pub jitter: Periodic,
}

impl Timers {
    /// All gates first due one period after `now`
    pub fn new(config: &FirmwareConfig, now: u32) -> Self {
        Self {
            lyric_scroll: Periodic::new(config.lyric_scroll_period_ms, now),
            marquee: Periodic::new(config.marquee_period_ms, now),
            jitter: Periodic::new(config.jitter_period_ms, now),
        }
    }
}
