//! Lyra Serial Protocol
//!
//! This crate defines the line-based protocol between the companion host
//! application (PC) and the Lyra display module. The protocol is plain
//! printable text so it can be driven from a terminal during bring-up.
//!
//! # Protocol Overview
//!
//! Every message is one line terminated by `\n` or `\r`:
//! ```text
//! ┌──────┬───┬──────────────┬────┐
//! │ VERB │ | │ PAYLOAD      │ \n │
//! └──────┴───┴──────────────┴────┘
//! ```
//!
//! | Direction | Message |
//! |---|---|
//! | host → display | `PING`, `CLR`, `TXT\|text`, `FONT\|1.0-3.0`, `STA\|PLAY\|PAUSE\|STOP`, `META\|text`, `MODE\|LYR\|EQ`, `EQ\|v0,v1,...` |
//! | display → host | `PONG`, `BTN\|PRESS`, `BTN\|LONG` |
//!
//! There is no acknowledgement and no negative acknowledgement. The display
//! renders what it is told and reports button activity; retransmission is the
//! host's job.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod events;
pub mod line;

pub use command::{
    parse_levels, DeviceMessage, DisplayMode, EqLevels, HostCommand, PlaybackState, EQ_BARS,
    EQ_MAX_LEVEL,
};
pub use events::ButtonEvent;
pub use line::{LineAssembler, LINE_CAPACITY};
