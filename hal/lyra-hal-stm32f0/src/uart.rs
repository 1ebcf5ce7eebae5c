//! UART driver for STM32F0
//!
//! Adapts embassy's interrupt-buffered USART halves to the non-blocking
//! `lyra-hal` serial traits. The ring buffers are filled by the USART
//! interrupt, so polling them never stalls the render loop.

use embassy_stm32::usart::Error as UsartError;
use embedded_io::{Read, ReadReady, Write};
use lyra_hal::{SerialRx, SerialTx};

/// Error from UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartBusError {
    /// Framing error
    Framing,
    /// Noise error
    Noise,
    /// Overrun error
    Overrun,
    /// Parity error
    Parity,
    /// Buffer too small
    BufferTooSmall,
    /// Other error
    Other,
}

impl From<UsartError> for UartBusError {
    fn from(e: UsartError) -> Self {
        match e {
            UsartError::Framing => UartBusError::Framing,
            UsartError::Noise => UartBusError::Noise,
            UsartError::Overrun => UartBusError::Overrun,
            UsartError::Parity => UartBusError::Parity,
            UsartError::BufferTooLong => UartBusError::BufferTooSmall,
            _ => UartBusError::Other,
        }
    }
}

/// Receive half of a buffered UART
pub struct UartRx<R>(pub R);

impl<R> SerialRx for UartRx<R>
where
    R: Read + ReadReady,
    UartBusError: From<R::Error>,
{
    type Error = UartBusError;

    fn try_read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() || !self.0.read_ready()? {
            return Ok(0);
        }
        Ok(self.0.read(buf)?)
    }
}

/// Transmit half of a buffered UART
pub struct UartTx<W>(pub W);

impl<W> SerialTx for UartTx<W>
where
    W: Write,
    UartBusError: From<W::Error>,
{
    type Error = UartBusError;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let mut rest = data;
        while !rest.is_empty() {
            match self.0.write(rest)? {
                0 => return Err(UartBusError::Other),
                n => rest = &rest[n..],
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(self.0.flush()?)
    }
}

/// Build the embassy USART configuration for the host link
pub fn usart_config(config: &lyra_hal::UartConfig) -> embassy_stm32::usart::Config {
    use embassy_stm32::usart;
    use lyra_hal::uart::{DataBits, Parity, StopBits};

    let mut out = usart::Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = match config.data_bits {
        DataBits::Seven => usart::DataBits::DataBits7,
        DataBits::Eight => usart::DataBits::DataBits8,
        DataBits::Nine => usart::DataBits::DataBits9,
    };
    out.parity = match config.parity {
        Parity::None => usart::Parity::ParityNone,
        Parity::Even => usart::Parity::ParityEven,
        Parity::Odd => usart::Parity::ParityOdd,
    };
    out.stop_bits = match config.stop_bits {
        StopBits::One => usart::StopBits::STOP1,
        StopBits::Two => usart::StopBits::STOP2,
    };
    out
}
