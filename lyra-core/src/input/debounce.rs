//! Push button debouncing
//!
//! Turns a polled, bouncing contact into discrete short and long presses.
//! Each physical press produces exactly one event: a long press as soon as
//! the hold threshold passes, otherwise a short press on release.

use lyra_protocol::ButtonEvent;

use crate::config::FirmwareConfig;

/// Debouncer bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    /// Last raw reading
    pub raw: bool,
    /// Accepted state
    pub debounced: bool,
    /// Time the raw reading last changed (ms)
    pub raw_changed_at: u32,
    /// Time the current press was accepted (ms)
    pub press_started_at: u32,
    /// An accepted press is in progress
    pub held: bool,
    /// The current press already produced a long-press event
    pub long_press_sent: bool,
}

/// Button debouncer
#[derive(Debug, Clone)]
pub struct Debouncer {
    state: ButtonState,
    debounce_ms: u32,
    long_press_ms: u32,
}

impl Debouncer {
    /// Released button, timings from `config`
    pub fn new(config: &FirmwareConfig) -> Self {
        Self {
            state: ButtonState::default(),
            debounce_ms: config.debounce_ms,
            long_press_ms: config.long_press_ms,
        }
    }

    /// Current bookkeeping
    pub fn state(&self) -> &ButtonState {
        &self.state
    }

    /// Feed one raw reading taken at `now`
    ///
    /// `pressed` is true while the contact is closed. Returns at most one
    /// event per call.
    pub fn poll(&mut self, pressed: bool, now: u32) -> Option<ButtonEvent> {
        let s = &mut self.state;

        if pressed != s.raw {
            s.raw = pressed;
            s.raw_changed_at = now;
        }

        let stable_for = now.wrapping_sub(s.raw_changed_at);
        if s.raw != s.debounced && stable_for >= self.debounce_ms {
            s.debounced = s.raw;
            if s.debounced {
                s.press_started_at = now;
                s.held = true;
                s.long_press_sent = false;
            } else {
                let short = s.held && !s.long_press_sent;
                s.held = false;
                s.long_press_sent = false;
                return short.then_some(ButtonEvent::Press);
            }
        }

        if s.held && !s.long_press_sent {
            let held_for = now.wrapping_sub(s.press_started_at);
            if held_for >= self.long_press_ms {
                s.long_press_sent = true;
                return Some(ButtonEvent::LongPress);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debouncer() -> Debouncer {
        Debouncer::new(&FirmwareConfig::DEFAULT)
    }

    /// Hold `level` from `from` to `to` (exclusive), polling every ms
    fn run(d: &mut Debouncer, level: bool, from: u32, to: u32) -> std::vec::Vec<(u32, ButtonEvent)> {
        (from..to)
            .filter_map(|t| d.poll(level, t).map(|e| (t, e)))
            .collect()
    }

    #[test]
    fn test_short_press() {
        let mut d = debouncer();
        assert!(run(&mut d, true, 0, 300).is_empty());
        assert!(d.state().held);
        let events = run(&mut d, false, 300, 400);
        assert_eq!(events, [(350, ButtonEvent::Press)]);
    }

    #[test]
    fn test_long_press_only() {
        let mut d = debouncer();
        // Accepted at 50, long press due at 750
        let events = run(&mut d, true, 0, 1000);
        assert_eq!(events, [(750, ButtonEvent::LongPress)]);
        assert!(run(&mut d, false, 1000, 1200).is_empty());
        assert!(!d.state().held);
    }

    #[test]
    fn test_bounce_is_filtered() {
        let mut d = debouncer();
        for t in 0..40 {
            assert_eq!(d.poll(t % 2 == 0, t), None);
        }
        assert!(!d.state().debounced);
        assert!(run(&mut d, false, 40, 200).is_empty());
    }

    #[test]
    fn test_release_bounce_does_not_double_fire() {
        let mut d = debouncer();
        run(&mut d, true, 0, 200);
        // Contact chatters on release
        let mut events = std::vec::Vec::new();
        for t in 200..230 {
            events.extend(d.poll(t % 3 != 0, t));
        }
        events.extend(run(&mut d, false, 230, 400).into_iter().map(|(_, e)| e));
        assert_eq!(events, [ButtonEvent::Press]);
    }

    #[test]
    fn test_sparse_polling() {
        let mut d = debouncer();
        assert_eq!(d.poll(true, 0), None);
        assert_eq!(d.poll(true, 60), None);
        assert_eq!(d.poll(true, 900), Some(ButtonEvent::LongPress));
        assert_eq!(d.poll(false, 1000), None);
        assert_eq!(d.poll(false, 1100), None);
    }
}
