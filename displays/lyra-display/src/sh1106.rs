//! SH1106 OLED Display Driver
//!
//! Driver for 128x64 SH1106-based OLED panels on I2C. The controller has
//! 132 columns of RAM; the visible 128 start at column 2.

use lyra_hal::I2cBus;

use crate::backend::{DisplayBackend, DisplayError};
use crate::frame::{FrameBuffer, PAGES, WIDTH};

/// Default I2C address (0x3D with the address pin pulled high)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// First visible RAM column
const COLUMN_OFFSET: u8 = 2;

/// Control byte: command stream follows
const CONTROL_COMMAND: u8 = 0x00;

/// Control byte: display data follows
const CONTROL_DATA: u8 = 0x40;

/// SH1106 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Power-up sequence, sent as one command stream
const INIT_SEQUENCE: [u8; 23] = [
    CONTROL_COMMAND,
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80, // Default clock
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14,                  // Enable charge pump
    cmd::SET_SEG_REMAP,    // Flip horizontally
    cmd::SET_COM_SCAN_DEC, // Flip vertically
    cmd::SET_COM_PINS,
    0x12, // Alternative COM config
    cmd::SET_CONTRAST,
    0xCF, // High contrast
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// SH1106 OLED driver
pub struct Sh1106<I2C> {
    i2c: I2C,
    address: u8,
    initialized: bool,
}

impl<I2C: I2cBus> Sh1106<I2C> {
    /// Create a driver for a panel at [`DEFAULT_ADDRESS`]
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a driver for a panel at `address`
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            initialized: false,
        }
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, bytes)
            .map_err(|_| DisplayError::Communication)
    }
}

impl<I2C: I2cBus> DisplayBackend for Sh1106<I2C> {
    fn init(&mut self) -> Result<(), DisplayError> {
        self.write(&INIT_SEQUENCE)?;
        self.initialized = true;
        Ok(())
    }

    fn flush(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }

        let mut data = [0u8; WIDTH + 1];
        data[0] = CONTROL_DATA;

        for page in 0..PAGES {
            self.write(&[
                CONTROL_COMMAND,
                cmd::SET_PAGE_ADDR | page as u8,
                cmd::SET_LOW_COLUMN | (COLUMN_OFFSET & 0x0F),
                cmd::SET_HIGH_COLUMN | (COLUMN_OFFSET >> 4),
            ])?;
            data[1..].copy_from_slice(frame.page(page));
            self.write(&data)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[derive(Default)]
    struct RecordingBus {
        writes: Vec<(u8, Vec<u8>)>,
        fail: bool,
    }

    impl I2cBus for RecordingBus {
        type Error = ();

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.writes.push((address, data.to_vec()));
            Ok(())
        }
    }

    #[test]
    fn test_init_sends_command_stream() {
        let mut display = Sh1106::new(RecordingBus::default());
        display.init().unwrap();
        let bus = display.release();
        assert_eq!(bus.writes.len(), 1);
        let (addr, bytes) = &bus.writes[0];
        assert_eq!(*addr, 0x3C);
        assert_eq!(bytes[0], CONTROL_COMMAND);
        assert_eq!(bytes[1], cmd::DISPLAY_OFF);
        assert_eq!(*bytes.last().unwrap(), cmd::DISPLAY_ON);
    }

    #[test]
    fn test_flush_before_init_rejected() {
        let mut display = Sh1106::new(RecordingBus::default());
        let frame = FrameBuffer::new();
        assert_eq!(display.flush(&frame), Err(DisplayError::NotInitialized));
    }

    #[test]
    fn test_flush_writes_every_page() {
        let mut display = Sh1106::with_address(RecordingBus::default(), 0x3D);
        display.init().unwrap();

        let mut frame = FrameBuffer::new();
        frame.set_pixel(0, 0, true);
        frame.set_pixel(127, 63, true);
        display.flush(&frame).unwrap();

        let bus = display.release();
        // init + (addressing + data) per page
        assert_eq!(bus.writes.len(), 1 + 2 * PAGES);
        assert!(bus.writes.iter().all(|(addr, _)| *addr == 0x3D));

        let (_, first_addr) = &bus.writes[1];
        assert_eq!(first_addr.as_slice(), &[0x00, 0xB0, 0x02, 0x10]);

        let (_, first_data) = &bus.writes[2];
        assert_eq!(first_data.len(), WIDTH + 1);
        assert_eq!(first_data[0], CONTROL_DATA);
        assert_eq!(first_data[1], 0x01);

        let (_, last_data) = &bus.writes[2 * PAGES];
        assert_eq!(last_data[WIDTH], 0x80);
    }

    #[test]
    fn test_bus_error_maps_to_communication() {
        let bus = RecordingBus {
            fail: true,
            ..Default::default()
        };
        let mut display = Sh1106::new(bus);
        assert_eq!(display.init(), Err(DisplayError::Communication));
    }
}
