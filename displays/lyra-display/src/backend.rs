//! Display backend trait
//!
//! Defines the interface between the compositor and a physical panel.

use crate::frame::FrameBuffer;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Display not initialized
    NotInitialized,
}

/// Display backend trait
///
/// The compositor renders into a [`FrameBuffer`] and hands the finished
/// frame to the backend in one call. Both calls block until the transfer
/// completes.
pub trait DisplayBackend {
    /// Run the panel's power-up sequence
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Send a complete frame to the panel
    fn flush(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError>;
}
