//! Rendering primitives for the Lyra display module
//!
//! This crate provides:
//! - [`FrameBuffer`], a 128x64 1-bpp image that is an embedded-graphics
//!   `DrawTarget`
//! - The built-in glyph set and [`FontProfile`] text metrics
//! - [`DisplayBackend`], the hand-off point between composed frames and a panel
//! - [`Sh1106`], the panel driver used on the display board
//!
//! Nothing here knows about the serial protocol or the application state;
//! `lyra-core` decides what to draw.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backend;
pub mod font;
pub mod frame;
pub mod sh1106;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use font::{draw_text, FontProfile};
pub use frame::{FrameBuffer, HEIGHT, WIDTH};
pub use sh1106::Sh1106;
