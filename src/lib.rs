//! IS31FL3733 LED Matrix Driver
//!
//! A driver for the IS31FL3733 16x12 dot matrix LED controller.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 I2C support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Paged register access with page select before every transaction
//! - Immediate and buffered brightness updates
//! - Auto Breath Mode (ABM) configuration
//! - Open/short detection and interrupts
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::i2c::{I2c, Operation, SevenBitAddress};
//! use is31fl3733::{
//!     AddressPin, Builder, I2cInterface, Is31fl3733, LedState, Resistor, Selection, i2c_address,
//! };
//!
//! # struct MockI2c;
//! # impl embedded_hal::i2c::ErrorType for MockI2c { type Error = Infallible; }
//! # impl I2c for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: SevenBitAddress,
//! #         _operations: &mut [Operation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # let i2c = MockI2c;
//! let interface = I2cInterface::new(i2c, i2c_address(AddressPin::Gnd, AddressPin::Gnd));
//! let config = Builder::new()
//!     .global_current(0x80)
//!     .sw_pull_up(Resistor::R32K)
//!     .cs_pull_down(Resistor::R32K)
//!     .build();
//!
//! let mut matrix = Is31fl3733::new(interface, config);
//! if matrix.init().is_err() {
//!     return;
//! }
//!
//! // Light the top row at half brightness
//! let _ = matrix.set_led_pwm(Selection::Row(0), 0x80);
//! let _ = matrix.set_led_state(Selection::Row(0), LedState::On);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Auto Breath Mode configuration
pub mod abm;
/// Device configuration types and builder
pub mod config;
/// Core device operations
pub mod device;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// LED matrix geometry
pub mod matrix;
/// IS31FL3733 register map
pub mod register;
/// Coordinate rotation utilities
pub mod rotation;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod test_utils;

pub use abm::{AbmConfig, AbmNumber, LOOP_FOREVER, LOOP_TIMES_MAX, LedMode, LoopBegin, LoopEnd};
pub use config::{Builder, Config, Resistor, Rotation, SyncMode, UpdateDiscipline};
pub use device::{InterruptMask, InterruptStatus, Is31fl3733, LedState, LedStatus};
pub use error::Error;
pub use interface::InterfaceError;
pub use interface::{AddressPin, I2cInterface, RegisterInterface, i2c_address};
pub use matrix::{COLUMNS, LED_COUNT, ROWS, Selection};
pub use register::PagedRegister;

#[cfg(feature = "graphics")]
pub use graphics::GraphicMatrix;
