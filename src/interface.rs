//! Hardware interface abstraction
//!
//! This module provides the [`RegisterInterface`] trait and the
//! [`I2cInterface`] struct for talking to the IS31FL3733 over I2C.
//!
//! The interface only knows about 8-bit register addresses. Paging is the
//! driver's job, see [`Is31fl3733`](crate::Is31fl3733).
//!
//! ## Bus Address
//!
//! The chip's 7-bit address depends on how the ADDR1 and ADDR2 pins are
//! strapped, see [`i2c_address`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::i2c::{I2c, Operation, SevenBitAddress};
//! use is31fl3733::{AddressPin, I2cInterface, RegisterInterface, i2c_address};
//! # use core::convert::Infallible;
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
//! let address = i2c_address(AddressPin::Gnd, AddressPin::Gnd);
//! let mut interface = I2cInterface::new(MockI2c, address);
//!
//! // Unlock the command register
//! let _ = interface.write(0xFE, &[0xC5]);
//! ```

use core::fmt::Debug;
use embedded_hal::i2c::{I2c, Operation};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Base 7-bit I2C address, all address pins tied to GND
pub const BASE_ADDRESS: u8 = 0x50;

/// Trait for register-level access to the IS31FL3733
///
/// Two primitives are enough to drive the chip: a multi-byte write starting
/// at a register, and a multi-byte read starting at a register. The register
/// pointer auto-increments on the device side.
///
/// ## Implementing
///
/// For most cases, use the provided [`I2cInterface`]. Implement this trait
/// yourself to run the driver over a different transport or to record bus
/// traffic in tests.
pub trait RegisterInterface {
    /// Error type for interface operations
    type Error: Debug;

    /// Write `data` starting at `register`
    ///
    /// # Errors
    ///
    /// Returns an error if the bus transaction fails.
    fn write(&mut self, register: u8, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Fill `data` with bytes read starting at `register`
    ///
    /// # Errors
    ///
    /// Returns an error if the bus transaction fails.
    fn read(&mut self, register: u8, data: &mut [u8]) -> InterfaceResult<(), Self::Error>;
}

impl<T> RegisterInterface for &mut T
where
    T: RegisterInterface,
{
    type Error = T::Error;

    fn write(&mut self, register: u8, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        T::write(self, register, data)
    }

    fn read(&mut self, register: u8, data: &mut [u8]) -> InterfaceResult<(), Self::Error> {
        T::read(self, register, data)
    }
}

/// Connection of an ADDR pin
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum AddressPin {
    /// Pin tied to GND
    #[default]
    Gnd = 0x00,
    /// Pin tied to SCL
    Scl = 0x01,
    /// Pin tied to SDA
    Sda = 0x02,
    /// Pin tied to VCC
    Vcc = 0x03,
}

/// Compute the 7-bit I2C address from the ADDR2 and ADDR1 pin straps
///
/// ```
/// use is31fl3733::{AddressPin, i2c_address};
///
/// assert_eq!(i2c_address(AddressPin::Gnd, AddressPin::Gnd), 0x50);
/// assert_eq!(i2c_address(AddressPin::Sda, AddressPin::Vcc), 0x5B);
/// ```
pub const fn i2c_address(addr2: AddressPin, addr1: AddressPin) -> u8 {
    BASE_ADDRESS | ((addr2 as u8) << 2) | addr1 as u8
}

/// Errors that can occur at the interface level
#[derive(Debug)]
pub enum InterfaceError<I2cErr> {
    /// I2C communication error
    I2c(I2cErr),
}

impl<I2cErr: Debug> core::fmt::Display for InterfaceError<I2cErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::I2c(e) => write!(f, "I2C error: {e:?}"),
        }
    }
}

impl<I2cErr: Debug> core::error::Error for InterfaceError<I2cErr> {}

/// Hardware interface implementation for IS31FL3733
///
/// Implements [`RegisterInterface`] for an embedded-hal v1.0 [`I2c`] bus.
/// The bus address is fixed at construction.
pub struct I2cInterface<I2C> {
    /// I2C bus
    i2c: I2C,
    /// 7-bit device address
    address: u8,
}

impl<I2C> I2cInterface<I2C>
where
    I2C: I2c,
{
    /// Create a new interface for the device at the 7-bit `address`
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Get the 7-bit device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the underlying bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> RegisterInterface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = InterfaceError<I2C::Error>;

    fn write(&mut self, register: u8, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        // Adjacent writes go out as one frame, the device auto-increments
        // from the register address
        self.i2c
            .transaction(
                self.address,
                &mut [Operation::Write(&[register]), Operation::Write(data)],
            )
            .map_err(InterfaceError::I2c)
    }

    fn read(&mut self, register: u8, data: &mut [u8]) -> InterfaceResult<(), Self::Error> {
        self.i2c
            .write_read(self.address, &[register], data)
            .map_err(InterfaceError::I2c)
    }
}
