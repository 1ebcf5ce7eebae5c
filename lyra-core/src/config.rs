//! Firmware configuration
//!
//! Every timing constant the display logic depends on lives in
//! [`FirmwareConfig`]. The firmware build script fills it from
//! `display.toml`; tests and host tools use [`FirmwareConfig::DEFAULT`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A period or interval that must be positive is zero
    ZeroPeriod,
    /// Long-press threshold does not exceed the debounce interval
    LongPressTooShort,
    /// Lyric scroll step is zero
    ZeroScrollStep,
    /// Jitter amplitude exceeds the equalizer range
    JitterOutOfRange,
}

/// Tunable timings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct FirmwareConfig {
    /// Inactivity before the link is considered lost (ms)
    pub link_timeout_ms: u32,
    /// Required stable time before a button change is accepted (ms)
    pub debounce_ms: u32,
    /// Hold time that turns a press into a long press (ms)
    pub long_press_ms: u32,
    /// Interval between vertical lyric scroll steps (ms)
    pub lyric_scroll_period_ms: u32,
    /// Vertical lyric scroll step (px)
    pub lyric_scroll_step_px: u32,
    /// Interval between marquee steps (ms)
    pub marquee_period_ms: u32,
    /// Blank space between marquee copies (px)
    pub marquee_gap_px: u32,
    /// Interval between equalizer jitter ticks (ms)
    pub jitter_period_ms: u32,
    /// Largest per-tick jitter delta, either sign
    pub jitter_amplitude: u8,
    /// Host equalizer data younger than this suppresses jitter (ms)
    pub eq_fresh_ms: u32,
}

impl Default for FirmwareConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FirmwareConfig {
    /// Stock timings
    pub const DEFAULT: Self = Self {
        link_timeout_ms: 10_000,
        debounce_ms: 50,
        long_press_ms: 700,
        lyric_scroll_period_ms: 2000,
        lyric_scroll_step_px: 16,
        marquee_period_ms: 50,
        marquee_gap_px: 30,
        jitter_period_ms: 80,
        jitter_amplitude: 2,
        eq_fresh_ms: 250,
    };

    /// Check the configuration for values the firmware cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            self.link_timeout_ms,
            self.debounce_ms,
            self.lyric_scroll_period_ms,
            self.marquee_period_ms,
            self.jitter_period_ms,
        ];
        if periods.contains(&0) {
            return Err(ConfigError::ZeroPeriod);
        }
        if self.long_press_ms <= self.debounce_ms {
            return Err(ConfigError::LongPressTooShort);
        }
        if self.lyric_scroll_step_px == 0 {
            return Err(ConfigError::ZeroScrollStep);
        }
        if self.jitter_amplitude > lyra_protocol::EQ_MAX_LEVEL {
            return Err(ConfigError::JitterOutOfRange);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(FirmwareConfig::DEFAULT.validate(), Ok(()));
        assert_eq!(FirmwareConfig::default(), FirmwareConfig::DEFAULT);
    }

    #[test]
    fn test_zero_period_rejected() {
        let config = FirmwareConfig {
            marquee_period_ms: 0,
            ..FirmwareConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPeriod));
    }

    #[test]
    fn test_long_press_must_exceed_debounce() {
        let config = FirmwareConfig {
            long_press_ms: 50,
            ..FirmwareConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::LongPressTooShort));
    }

    #[test]
    fn test_jitter_bounds() {
        let config = FirmwareConfig {
            jitter_amplitude: 13,
            ..FirmwareConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::JitterOutOfRange));
    }
}
