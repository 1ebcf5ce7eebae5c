//! STM32F0-specific HAL for the Lyra display firmware
//!
//! This crate implements the `lyra-hal` traits on top of embassy-stm32
//! peripherals. It supports:
//!
//! - STM32F042K6 (the Lyra display board)
//! - STM32F042F6
//!
//! # Features
//!
//! - `stm32f042k6` - Enable support for STM32F042K6T6
//! - `stm32f042f6` - Enable support for STM32F042F6P6
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! The firmware constructs embassy peripherals itself and wraps them:
//! buffered USART halves in [`uart::UartRx`] / [`uart::UartTx`], the
//! blocking I2C master in [`i2c::I2cMaster`], and GPIO in [`gpio::Pin`].

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod uart;

pub use gpio::Pin;
pub use i2c::{i2c_config, I2cBusError, I2cMaster};
pub use uart::{usart_config, UartBusError, UartRx, UartTx};
