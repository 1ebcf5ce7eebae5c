//! I2C bus driver for STM32F0
//!
//! Provides I2C communication for peripherals like the SH1106 OLED display.

use embassy_stm32::i2c::Error as I2cError;
use lyra_hal::I2cBus;

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// NACK received
    Nack,
    /// Timeout
    Timeout,
    /// CRC error
    Crc,
    /// Overrun
    Overrun,
    /// Other error
    Other,
}

impl From<I2cError> for I2cBusError {
    fn from(e: I2cError) -> Self {
        match e {
            I2cError::Bus => I2cBusError::Bus,
            I2cError::Arbitration => I2cBusError::ArbitrationLost,
            I2cError::Nack => I2cBusError::Nack,
            I2cError::Timeout => I2cBusError::Timeout,
            I2cError::Crc => I2cBusError::Crc,
            I2cError::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

/// Blocking I2C master
///
/// Wraps any `embedded-hal` 1.0 I2C implementation; on this chip that is
/// embassy's `I2c<'_, Blocking, Master>`.
pub struct I2cMaster<I>(pub I);

impl<I> I2cBus for I2cMaster<I>
where
    I: embedded_hal::i2c::I2c,
    I2cBusError: From<I::Error>,
{
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        Ok(self.0.write(address, data)?)
    }
}

/// Build the embassy I2C configuration for the display bus
pub fn i2c_config(config: &lyra_hal::I2cConfig) -> embassy_stm32::i2c::Config {
    let mut out = embassy_stm32::i2c::Config::default();
    out.frequency = embassy_stm32::time::Hertz(config.frequency);
    out
}
