//! Coordinate rotation utilities
//!
//! Maps logical (x, y) pixel coordinates to physical (cs, sw) LED
//! coordinates. In native orientation x runs along the CS lines and y along
//! the SW lines, giving a 16 by 12 canvas.
//!
//! ## Rotation Modes
//!
//! - **Rotate0**: Native orientation, 16x12
//! - **Rotate90**: 90° clockwise, 12x16
//! - **Rotate180**: 180° rotation, origin at CS15/SW11
//! - **Rotate270**: 270° clockwise, 12x16
//!
//! ## Example
//!
//! ```
//! use is31fl3733::{rotation::apply_rotation, Rotation};
//!
//! assert_eq!(apply_rotation(0, 0, Rotation::Rotate0), (0, 0));
//! assert_eq!(apply_rotation(0, 0, Rotation::Rotate180), (15, 11));
//! ```

use crate::config::Rotation;
use crate::matrix::{COLUMNS, ROWS};

/// Logical canvas size (width, height) for a rotation
pub const fn logical_size(rotation: Rotation) -> (u8, u8) {
    match rotation {
        Rotation::Rotate0 | Rotation::Rotate180 => (COLUMNS, ROWS),
        Rotation::Rotate90 | Rotation::Rotate270 => (ROWS, COLUMNS),
    }
}

/// Apply rotation to get physical LED coordinates
///
/// `x` and `y` must lie inside [`logical_size`] for the rotation; callers
/// clip first.
///
/// # Returns
///
/// `(cs, sw)` of the LED showing the logical pixel.
pub const fn apply_rotation(x: u8, y: u8, rotation: Rotation) -> (u8, u8) {
    match rotation {
        Rotation::Rotate0 => (x, y),
        Rotation::Rotate90 => (COLUMNS - 1 - y, x),
        Rotation::Rotate180 => (COLUMNS - 1 - x, ROWS - 1 - y),
        Rotation::Rotate270 => (y, ROWS - 1 - x),
    }
}
