//! Physical input handling

pub mod debounce;

pub use debounce::{ButtonState, Debouncer};
