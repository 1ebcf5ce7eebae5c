//! Lyra Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the display logic is written
//! against. Chip-specific crates implement them; host tests implement them
//! with scripted mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  lyra-core / lyra-display               │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lyra-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ lyra-hal-     │       │  host test    │
//! │   stm32f0     │       │    mocks      │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::Button`] - Digital I/O
//! - [`uart::SerialRx`], [`uart::SerialTx`] - Serial communication
//! - [`i2c::I2cBus`] - I2C bus operations

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{ActiveHigh, ActiveLow, Button, InputPin, OutputPin};
pub use i2c::{I2cBus, I2cConfig};
pub use uart::{SerialRx, SerialTx, UartConfig};
