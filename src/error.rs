//! Error types for the driver
//!
//! - [`Error`] - Runtime errors during device operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level I2C errors
//!
//! Out-of-range LED coordinates are not errors. They select a whole row,
//! column or the full matrix, see [`Selection`](crate::Selection).
//!
//! ## Example
//!
//! ```
//! use is31fl3733::{Error, Is31fl3733, RegisterInterface};
//! # #[derive(Debug)]
//! # struct NullInterface;
//! # impl RegisterInterface for NullInterface {
//! #     type Error = core::convert::Infallible;
//! #     fn write(&mut self, _register: u8, _data: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn read(&mut self, _register: u8, _data: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! let mut device = Is31fl3733::new(NullInterface, Default::default());
//!
//! // Bulk operations need one entry per LED
//! let result = device.set_led_pwms(&[0u8; 10]);
//! assert!(matches!(result, Err(Error::BufferTooSmall { required: 192, provided: 10 })));
//! ```

use crate::interface::RegisterInterface;

/// Errors that can occur when interacting with the device
///
/// Generic over the interface type to preserve the specific error type.
/// A bus error aborts the operation in flight; the RAM mirror may then be
/// ahead of the device until the next successful write of the same registers.
pub enum Error<I: RegisterInterface> {
    /// Interface error (I2C)
    ///
    /// Wraps the underlying error from the [`RegisterInterface`]
    /// implementation. Never retried by the driver.
    Interface(I::Error),
    /// Buffer is too small for the matrix
    ///
    /// Bulk operations need one byte per LED.
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
}

impl<I: RegisterInterface> core::fmt::Debug for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => f.debug_tuple("Interface").field(e).finish(),
            Self::BufferTooSmall { required, provided } => f
                .debug_struct("BufferTooSmall")
                .field("required", required)
                .field("provided", provided)
                .finish(),
        }
    }
}

impl<I: RegisterInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
        }
    }
}

impl<I: RegisterInterface> core::error::Error for Error<I> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockError, MockInterface};
    use alloc::format;

    #[test]
    fn test_display() {
        let err: Error<MockInterface> = Error::BufferTooSmall {
            required: 192,
            provided: 24,
        };
        assert_eq!(
            format!("{err}"),
            "Buffer too small: required 192 bytes, provided 24"
        );

        let err: Error<MockInterface> = Error::Interface(MockError);
        assert_eq!(format!("{err}"), "Interface error: MockError");
        assert_eq!(format!("{err:?}"), "Interface(MockError)");
    }
}
