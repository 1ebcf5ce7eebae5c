//! Command vocabulary of the host serial link
//!
//! Two directions share the link:
//! - Host → Display: display commands (`TXT|...`, `EQ|...`, heartbeats)
//! - Display → Host: heartbeat replies and button events
//!
//! Parsing is best-effort. Nothing here ever fails: unknown verbs become
//! [`HostCommand::Unknown`] and malformed numbers fall back to a default.

use crate::events::ButtonEvent;

// Verbs: Host → Display
pub const VERB_PING: &str = "PING";
pub const VERB_CLEAR: &str = "CLR";
pub const VERB_TEXT: &str = "TXT";
pub const VERB_FONT: &str = "FONT";
pub const VERB_STATUS: &str = "STA";
pub const VERB_META: &str = "META";
pub const VERB_MODE: &str = "MODE";
pub const VERB_EQ: &str = "EQ";

/// Field separator between verb and payload
pub const SEPARATOR: char = '|';

/// Number of equalizer bars carried by an `EQ|` command
pub const EQ_BARS: usize = 12;

/// Highest equalizer level
pub const EQ_MAX_LEVEL: u8 = 12;

/// Playback indicator shown in the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackState {
    /// Map a `STA|` payload; anything unrecognised means stopped
    pub fn from_payload(payload: &str) -> Self {
        match payload {
            "PLAY" => PlaybackState::Playing,
            "PAUSE" => PlaybackState::Paused,
            _ => PlaybackState::Stopped,
        }
    }
}

/// Content shown in the main display region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    #[default]
    Lyrics,
    Equalizer,
}

impl DisplayMode {
    /// Map a `MODE|` payload; only `EQ` selects the equalizer
    pub fn from_payload(payload: &str) -> Self {
        if payload == VERB_EQ {
            DisplayMode::Equalizer
        } else {
            DisplayMode::Lyrics
        }
    }
}

/// Equalizer bar levels, always exactly [`EQ_BARS`] entries in `0..=EQ_MAX_LEVEL`
pub type EqLevels = [u8; EQ_BARS];

/// Commands parsed from host-originated lines
///
/// Text payloads borrow from the line they were parsed from.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostCommand<'a> {
    /// Heartbeat request, answered with `PONG`
    Ping,
    /// Clear lyric content
    Clear,
    /// Replace the lyric text
    Text(&'a str),
    /// Select the font profile; `None` if the value was not a number
    Font(Option<f32>),
    /// Set the playback indicator
    Status(PlaybackState),
    /// Replace the status bar text
    Meta(&'a str),
    /// Select the display mode
    Mode(DisplayMode),
    /// Set equalizer levels
    Equalizer(EqLevels),
    /// Unrecognised verb, ignored
    Unknown,
}

impl<'a> HostCommand<'a> {
    /// Parse a trimmed, non-empty line
    pub fn parse(line: &'a str) -> Self {
        match line {
            VERB_PING => return HostCommand::Ping,
            VERB_CLEAR => return HostCommand::Clear,
            _ => {}
        }

        let Some((verb, payload)) = line.split_once(SEPARATOR) else {
            return HostCommand::Unknown;
        };

        match verb {
            VERB_TEXT => HostCommand::Text(payload),
            VERB_FONT => HostCommand::Font(payload.trim().parse::<f32>().ok()),
            VERB_STATUS => HostCommand::Status(PlaybackState::from_payload(payload)),
            VERB_META => HostCommand::Meta(payload),
            VERB_MODE => HostCommand::Mode(DisplayMode::from_payload(payload)),
            VERB_EQ => HostCommand::Equalizer(parse_levels(payload)),
            _ => HostCommand::Unknown,
        }
    }

    /// Returns true if this command was recognised
    pub fn is_known(&self) -> bool {
        !matches!(self, HostCommand::Unknown)
    }
}

/// Parse up to [`EQ_BARS`] comma-separated levels
///
/// Missing trailing bars are zero, extra fields are ignored, each value is
/// clamped to `0..=EQ_MAX_LEVEL`.
pub fn parse_levels(payload: &str) -> EqLevels {
    let mut levels = [0u8; EQ_BARS];
    for (slot, field) in levels.iter_mut().zip(payload.split(',')) {
        let value = parse_int(field).clamp(0, EQ_MAX_LEVEL as i32);
        *slot = value as u8;
    }
    levels
}

/// Lenient integer parse: optional whitespace and sign, then leading digits
///
/// Returns 0 when no digits are present. Saturates instead of overflowing.
pub fn parse_int(field: &str) -> i32 {
    let bytes = field.trim_start().as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let mut value: i32 = 0;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        value = value.saturating_mul(10).saturating_add((b - b'0') as i32);
    }

    if negative {
        -value
    } else {
        value
    }
}

/// Messages sent from the display to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceMessage {
    /// Heartbeat reply
    Pong,
    /// Button activity
    Button(ButtonEvent),
}

impl DeviceMessage {
    /// Wire representation including the line terminator
    pub fn as_line(&self) -> &'static str {
        match self {
            DeviceMessage::Pong => "PONG\n",
            DeviceMessage::Button(event) => event.as_line(),
        }
    }

    /// Wire bytes including the line terminator
    pub fn as_bytes(&self) -> &'static [u8] {
        self.as_line().as_bytes()
    }
}
