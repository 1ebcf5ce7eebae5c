//! Equalizer bar levels

use lyra_protocol::{EqLevels, EQ_BARS, EQ_MAX_LEVEL};

/// Bar levels plus the age of the last host update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EqualizerState {
    levels: EqLevels,
    /// Time the host last sent levels (ms), `None` before the first `EQ|`
    pub last_host_update: Option<u32>,
}

impl Default for EqualizerState {
    fn default() -> Self {
        Self::new()
    }
}

impl EqualizerState {
    /// All bars at zero
    pub const fn new() -> Self {
        Self {
            levels: [0; EQ_BARS],
            last_host_update: None,
        }
    }

    /// Current levels
    pub fn levels(&self) -> &EqLevels {
        &self.levels
    }

    /// Replace all levels with host data received at `now`
    pub fn apply_host(&mut self, levels: EqLevels, now: u32) {
        for (slot, level) in self.levels.iter_mut().zip(levels) {
            *slot = level.min(EQ_MAX_LEVEL);
        }
        self.last_host_update = Some(now);
    }

    /// Whether host data arrived less than `window_ms` before `now`
    pub fn is_fresh(&self, now: u32, window_ms: u32) -> bool {
        match self.last_host_update {
            Some(at) => now.wrapping_sub(at) < window_ms,
            None => false,
        }
    }

    /// Offset one bar, clamping to the valid range
    ///
    /// Returns true if the level changed.
    pub fn nudge(&mut self, bar: usize, delta: i8) -> bool {
        let Some(slot) = self.levels.get_mut(bar) else {
            return false;
        };
        let next = (*slot as i16 + delta as i16).clamp(0, EQ_MAX_LEVEL as i16) as u8;
        let changed = next != *slot;
        *slot = next;
        changed
    }
}
