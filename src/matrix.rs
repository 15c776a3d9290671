//! LED matrix geometry
//!
//! The IS31FL3733 drives 16 current sources (CS, columns) against 12 switch
//! lines (SW, rows). Three register layouts index into that matrix:
//!
//! | Layout            | Size      | Offset of (cs, sw)   | Bit          |
//! |-------------------|-----------|----------------------|--------------|
//! | On/off, open, short | 24 bytes | `2 * sw + cs / 8`   | `cs % 8`     |
//! | PWM, ABM mode     | 192 bytes | `sw * 16 + cs`       | whole byte   |
//!
//! Bitmaps are packed LSB first: CS0 is bit 0 of the first byte of a row,
//! CS8 is bit 0 of the second.
//!
//! ## Example
//!
//! ```
//! use is31fl3733::matrix::{bitmap_mask, bitmap_offset, level_offset};
//!
//! assert_eq!(level_offset(3, 5), 83);
//! assert_eq!(bitmap_offset(9, 5), 11);
//! assert_eq!(bitmap_mask(9), 0x02);
//! ```

/// Number of CS lines (columns)
pub const COLUMNS: u8 = 16;

/// Number of SW lines (rows)
pub const ROWS: u8 = 12;

/// Total number of LEDs
pub const LED_COUNT: usize = COLUMNS as usize * ROWS as usize;

/// Length of the on/off, open and short bitmaps in bytes
pub const BITMAP_LEN: usize = LED_COUNT / 8;

/// Bitmap bytes per SW row
pub const BITMAP_ROW_LEN: usize = COLUMNS as usize / 8;

/// Byte offset of an LED in the PWM and ABM mode arrays
pub const fn level_offset(cs: u8, sw: u8) -> u8 {
    sw * COLUMNS + cs
}

/// Byte offset of an LED in the on/off, open and short bitmaps
pub const fn bitmap_offset(cs: u8, sw: u8) -> u8 {
    (sw << 1) + cs / 8
}

/// Bit of an LED inside its bitmap byte
pub const fn bitmap_mask(cs: u8) -> u8 {
    0x01 << (cs % 8)
}

/// Whether (cs, sw) names a physical LED
pub const fn in_bounds(cs: u8, sw: u8) -> bool {
    cs < COLUMNS && sw < ROWS
}

/// Set of LEDs an operation applies to
///
/// Out-of-range coordinates never fail: they widen the selection along that
/// axis. [`Selection::from_coordinates`] applies the same rule to raw
/// (cs, sw) pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// One LED
    Single {
        /// CS line (column)
        cs: u8,
        /// SW line (row)
        sw: u8,
    },
    /// Every LED on one SW line
    Row(u8),
    /// Every LED on one CS line
    Column(u8),
    /// Every LED
    All,
}

impl Selection {
    /// Build a selection from raw coordinates
    ///
    /// - both in range: that LED
    /// - `sw` in range, `cs` out of range: the whole row
    /// - `cs` in range, `sw` out of range: the whole column
    /// - both out of range: every LED
    ///
    /// ```
    /// use is31fl3733::Selection;
    ///
    /// assert_eq!(Selection::from_coordinates(3, 5), Selection::Single { cs: 3, sw: 5 });
    /// assert_eq!(Selection::from_coordinates(16, 5), Selection::Row(5));
    /// assert_eq!(Selection::from_coordinates(3, 0xFF), Selection::Column(3));
    /// assert_eq!(Selection::from_coordinates(16, 12), Selection::All);
    /// ```
    pub const fn from_coordinates(cs: u8, sw: u8) -> Self {
        if sw < ROWS {
            if cs < COLUMNS {
                Self::Single { cs, sw }
            } else {
                Self::Row(sw)
            }
        } else if cs < COLUMNS {
            Self::Column(cs)
        } else {
            Self::All
        }
    }

    /// Bring a hand-built selection back into range
    ///
    /// `Row(20)` becomes `All`, `Single { cs: 20, sw: 1 }` becomes `Row(1)`.
    pub const fn normalized(self) -> Self {
        match self {
            Self::Single { cs, sw } => Self::from_coordinates(cs, sw),
            Self::Row(sw) => Self::from_coordinates(COLUMNS, sw),
            Self::Column(cs) => Self::from_coordinates(cs, ROWS),
            Self::All => Self::All,
        }
    }

    /// Whether the LED at (cs, sw) is part of this selection
    pub fn contains(self, cs: u8, sw: u8) -> bool {
        if !in_bounds(cs, sw) {
            return false;
        }
        match self.normalized() {
            Self::Single { cs: c, sw: s } => c == cs && s == sw,
            Self::Row(s) => s == sw,
            Self::Column(c) => c == cs,
            Self::All => true,
        }
    }
}

/// Pack a byte-per-LED array into an on/off bitmap
///
/// Any non-zero entry turns its LED on.
pub fn pack_bitmap(levels: &[u8; LED_COUNT], bitmap: &mut [u8; BITMAP_LEN]) {
    bitmap.fill(0);
    for sw in 0..ROWS {
        for cs in 0..COLUMNS {
            if levels[level_offset(cs, sw) as usize] != 0 {
                bitmap[bitmap_offset(cs, sw) as usize] |= bitmap_mask(cs);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_offset_corners() {
        assert_eq!(level_offset(0, 0), 0);
        assert_eq!(level_offset(15, 0), 15);
        assert_eq!(level_offset(0, 1), 16);
        assert_eq!(level_offset(15, 11), 191);
    }

    #[test]
    fn test_bitmap_offset_and_mask() {
        // CS0..7 land in the first byte of the row, CS8..15 in the second
        assert_eq!(bitmap_offset(7, 0), 0);
        assert_eq!(bitmap_offset(8, 0), 1);
        assert_eq!(bitmap_offset(0, 11), 22);
        assert_eq!(bitmap_offset(15, 11), 23);
        assert_eq!(bitmap_mask(0), 0x01);
        assert_eq!(bitmap_mask(7), 0x80);
        assert_eq!(bitmap_mask(8), 0x01);
        assert_eq!(bitmap_mask(15), 0x80);
    }

    #[test]
    fn test_from_coordinates_dispatch() {
        assert_eq!(Selection::from_coordinates(0, 0), Selection::Single { cs: 0, sw: 0 });
        assert_eq!(Selection::from_coordinates(COLUMNS, 11), Selection::Row(11));
        assert_eq!(Selection::from_coordinates(15, ROWS), Selection::Column(15));
        assert_eq!(Selection::from_coordinates(0xFF, 0xFF), Selection::All);
    }

    #[test]
    fn test_normalized_widens_out_of_range() {
        assert_eq!(Selection::Row(12).normalized(), Selection::All);
        assert_eq!(Selection::Column(16).normalized(), Selection::All);
        assert_eq!(Selection::Single { cs: 16, sw: 2 }.normalized(), Selection::Row(2));
        assert_eq!(Selection::Single { cs: 2, sw: 12 }.normalized(), Selection::Column(2));
        assert_eq!(Selection::Row(4).normalized(), Selection::Row(4));
    }

    #[test]
    fn test_contains() {
        assert!(Selection::Row(3).contains(9, 3));
        assert!(!Selection::Row(3).contains(9, 4));
        assert!(Selection::Column(9).contains(9, 11));
        assert!(Selection::All.contains(15, 11));
        assert!(!Selection::All.contains(16, 0));
        assert!(Selection::Single { cs: 1, sw: 2 }.contains(1, 2));
        assert!(!Selection::Single { cs: 1, sw: 2 }.contains(2, 1));
    }

    #[test]
    fn test_pack_bitmap_nonzero_is_on() {
        let mut levels = [0u8; LED_COUNT];
        levels[level_offset(0, 0) as usize] = 1;
        levels[level_offset(9, 0) as usize] = 0xFF;
        levels[level_offset(15, 11) as usize] = 0x80;

        let mut bitmap = [0xAAu8; BITMAP_LEN];
        pack_bitmap(&levels, &mut bitmap);

        assert_eq!(bitmap[0], 0x01);
        assert_eq!(bitmap[1], 0x02);
        assert_eq!(bitmap[23], 0x80);
        assert!(bitmap[2..23].iter().all(|byte| *byte == 0));
    }
}
