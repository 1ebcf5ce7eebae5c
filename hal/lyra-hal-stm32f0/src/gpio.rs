//! GPIO abstractions for STM32F0
//!
//! Newtypes that let embassy pins stand in for the `lyra-hal` pin traits.

use embassy_stm32::gpio::{Input, Output};

/// A GPIO pin driven through `lyra-hal`
pub struct Pin<P>(pub P);

impl lyra_hal::InputPin for Pin<Input<'_>> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

impl lyra_hal::OutputPin for Pin<Output<'_>> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn toggle(&mut self) {
        self.0.toggle();
    }
}
