//! Board-agnostic logic for the Lyra display module
//!
//! This crate contains everything the display firmware does that does not
//! touch hardware:
//!
//! - The shared display state record
//! - Host command dispatch
//! - Word wrap for lyric text
//! - Scroll, marquee and equalizer animators
//! - Button debouncing
//! - Link timeout handling
//! - Frame composition
//! - The cooperative cycle tying them together
//!
//! Hardware enters only through the `lyra-hal` traits and
//! [`lyra_display::DisplayBackend`], so every piece runs under `cargo test`
//! on the host.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod dispatch;
pub mod input;
pub mod layout;
pub mod link;
pub mod render;
pub mod scheduler;
pub mod state;

pub use config::{ConfigError, FirmwareConfig};
pub use controller::{Controller, CycleReport};
pub use link::LinkEvent;
pub use state::DisplayState;
