//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs.

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Toggle the pin state
    fn toggle(&mut self);
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// A push button
///
/// Hides the wiring polarity so input logic only deals with "pressed".
pub trait Button {
    /// Raw, undebounced reading: true while the contact is closed
    fn is_pressed(&self) -> bool;
}

/// Button wired between the pin and ground with a pull-up
pub struct ActiveLow<P>(pub P);

impl<P: InputPin> Button for ActiveLow<P> {
    fn is_pressed(&self) -> bool {
        self.0.is_low()
    }
}

/// Button wired between the pin and VCC with a pull-down
pub struct ActiveHigh<P>(pub P);

impl<P: InputPin> Button for ActiveHigh<P> {
    fn is_pressed(&self) -> bool {
        self.0.is_high()
    }
}
