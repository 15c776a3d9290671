//! Graphics support via embedded-graphics
//!
//! This module provides the [`GraphicMatrix`] struct which wraps
//! [`Is31fl3733`] and implements the
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) trait from
//! the embedded-graphics ecosystem.
//!
//! Pixels are [`Gray8`]; the luma becomes the LED's PWM value. Drawing only
//! touches the brightness buffer. Call [`GraphicMatrix::update`] to push a
//! finished frame to the chip.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     pixelcolor::Gray8,
//!     prelude::*,
//!     primitives::{Circle, Line, PrimitiveStyle},
//! };
//! use is31fl3733::{GraphicMatrix, Is31fl3733, RegisterInterface};
//! # #[derive(Debug)]
//! # struct NullInterface;
//! # impl RegisterInterface for NullInterface {
//! #     type Error = core::convert::Infallible;
//! #     fn write(&mut self, _register: u8, _data: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn read(&mut self, _register: u8, _data: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let device = Is31fl3733::new(NullInterface, Default::default());
//! let mut matrix = GraphicMatrix::new(device);
//!
//! let _ = matrix.clear(Gray8::BLACK);
//!
//! let _ = Circle::new(Point::new(2, 1), 10)
//!     .into_styled(PrimitiveStyle::with_stroke(Gray8::new(0x40), 1))
//!     .draw(&mut matrix);
//!
//! let _ = Line::new(Point::new(0, 11), Point::new(15, 0))
//!     .into_styled(PrimitiveStyle::with_stroke(Gray8::WHITE, 1))
//!     .draw(&mut matrix);
//!
//! // Update physical matrix
//! let _ = matrix.update();
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::{Gray8, GrayColor},
    prelude::Pixel,
};

use crate::device::{DeviceResult, Is31fl3733};
use crate::interface::RegisterInterface;
use crate::rotation::{apply_rotation, logical_size};

/// LED matrix as a grayscale drawing surface
///
/// Rotation comes from the device's [`Config`](crate::Config).
pub struct GraphicMatrix<I>
where
    I: RegisterInterface,
{
    /// The underlying driver
    device: Is31fl3733<I>,
}

impl<I> GraphicMatrix<I>
where
    I: RegisterInterface,
{
    /// Wrap a driver
    pub fn new(device: Is31fl3733<I>) -> Self {
        Self { device }
    }

    /// Push the drawn frame to the chip
    ///
    /// See [`Is31fl3733::update`]: on/off follows brightness, so black
    /// pixels are switched off.
    pub fn update(&mut self) -> DeviceResult<I> {
        self.device.update()
    }

    /// Access the underlying driver
    pub fn device(&self) -> &Is31fl3733<I> {
        &self.device
    }

    /// Access the underlying driver mutably
    ///
    /// Useful for register-level operations such as ABM between frames.
    pub fn device_mut(&mut self) -> &mut Is31fl3733<I> {
        &mut self.device
    }

    /// Unwrap the driver
    pub fn release(self) -> Is31fl3733<I> {
        self.device
    }

    fn set_pixel(&mut self, x: u8, y: u8, color: Gray8) {
        let (cs, sw) = apply_rotation(x, y, self.device.config().rotation);
        self.device.set_led(cs, sw, color.luma());
    }
}

impl<I> DrawTarget for GraphicMatrix<I>
where
    I: RegisterInterface,
{
    type Color = Gray8;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let sz = self.size();

        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }

            let (x, y) = (x as u32, y as u32);
            if x >= sz.width || y >= sz.height {
                continue;
            }

            self.set_pixel(x as u8, y as u8, color);
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.device.fill(color.luma());
        Ok(())
    }
}

impl<I> OriginDimensions for GraphicMatrix<I>
where
    I: RegisterInterface,
{
    fn size(&self) -> Size {
        let (width, height) = logical_size(self.device.config().rotation);
        Size::new(width as u32, height as u32)
    }
}
