//! UART serial communication abstractions
//!
//! The display firmware never waits on the serial link: the receiver is
//! polled for whatever bytes have already arrived, and the transmitter is
//! expected to be buffered.

/// Non-blocking UART receiver
pub trait SerialRx {
    /// Error type for receive operations
    type Error;

    /// Copy already-received bytes into `buf`
    ///
    /// Returns the number of bytes copied, which is 0 when nothing is
    /// pending. Must not wait for data to arrive.
    fn try_read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// UART transmitter
pub trait SerialTx {
    /// Error type for transmit operations
    type Error;

    /// Queue all of `data` for transmission
    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 115200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl UartConfig {
    /// 8N1 at the given baud rate
    pub const fn with_baudrate(baudrate: u32) -> Self {
        Self {
            baudrate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}
