//! Button events reported to the host

/// Debounced button press reported over the serial link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Released before the long-press threshold
    Press,
    /// Held past the long-press threshold (sent while still held)
    LongPress,
}

// Wire format values
const EVENT_PRESS: &str = "BTN|PRESS\n";
const EVENT_LONG_PRESS: &str = "BTN|LONG\n";

impl ButtonEvent {
    /// Wire representation including the line terminator
    pub fn as_line(self) -> &'static str {
        match self {
            ButtonEvent::Press => EVENT_PRESS,
            ButtonEvent::LongPress => EVENT_LONG_PRESS,
        }
    }

    /// Returns true for the long-press variant
    pub fn is_long(&self) -> bool {
        matches!(self, ButtonEvent::LongPress)
    }
}
