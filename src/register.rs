//! IS31FL3733 register map
//!
//! The IS31FL3733 has four register pages behind a page-select indirection,
//! plus a handful of common registers that are reachable from any page.
//!
//! ## Paged Access
//!
//! Every paged access follows the same sequence:
//! 1. Write [`WRITE_UNLOCK`] to [`COMMAND_WRITE_LOCK`]
//! 2. Write the page number to [`COMMAND`]
//! 3. Read or write at the in-page offset
//!
//! The unlock is consumed by the page select, so it is repeated for every
//! access. Paged registers are described by [`PagedRegister`], a 16-bit value
//! with the page in the high byte and the in-page offset in the low byte.
//!
//! ## Example
//!
//! ```
//! use is31fl3733::register::{self, PagedRegister};
//!
//! assert_eq!(register::LED_PWM.page(), 1);
//! assert_eq!(register::GLOBAL_CURRENT.offset(), 0x01);
//!
//! // Third PWM register
//! let reg = register::LED_PWM.offset_by(2);
//! assert_eq!(reg, PagedRegister::new(1, 0x02));
//! ```

/// A register inside one of the four register pages
///
/// Stored as `page << 8 | offset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PagedRegister(u16);

impl PagedRegister {
    /// Create a register from its page and in-page offset
    pub const fn new(page: u8, offset: u8) -> Self {
        Self(((page as u16) << 8) | offset as u16)
    }

    /// Create a register from its 16-bit logical address
    pub const fn from_address(address: u16) -> Self {
        Self(address)
    }

    /// 16-bit logical address
    pub const fn address(self) -> u16 {
        self.0
    }

    /// Page holding the register
    pub const fn page(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Offset of the register inside its page
    pub const fn offset(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Register `n` positions after this one, in the same page
    ///
    /// The offset wraps within the page; the page never changes.
    pub const fn offset_by(self, n: u8) -> Self {
        Self::new(self.page(), self.offset().wrapping_add(n))
    }
}

// Common registers (not paged)

/// Command register (0xFD), selects the active page
pub const COMMAND: u8 = 0xFD;

/// Command register write lock (0xFE)
///
/// Must receive [`WRITE_UNLOCK`] right before every write to [`COMMAND`].
pub const COMMAND_WRITE_LOCK: u8 = 0xFE;

/// Interrupt mask register (0xF0)
pub const INTERRUPT_MASK: u8 = 0xF0;

/// Interrupt status register (0xF1)
pub const INTERRUPT_STATUS: u8 = 0xF1;

/// Value unlocking [`COMMAND`] for a single write
pub const WRITE_UNLOCK: u8 = 0xC5;

// Page numbers

/// LED control page: on/off, open and short bitmaps
pub const PAGE_LED_CONTROL: u8 = 0x00;
/// PWM page: one brightness byte per LED
pub const PAGE_PWM: u8 = 0x01;
/// Auto breath mode page: one mode byte per LED
pub const PAGE_ABM: u8 = 0x02;
/// Function page: configuration, current, ABM generators, resistors, reset
pub const PAGE_FUNCTION: u8 = 0x03;

// Page 0

/// LED on/off bitmap (24 bytes, 2 per SW row)
pub const LED_ON_OFF: PagedRegister = PagedRegister::new(PAGE_LED_CONTROL, 0x00);
/// LED open-detection bitmap (24 bytes, read only)
pub const LED_OPEN: PagedRegister = PagedRegister::new(PAGE_LED_CONTROL, 0x18);
/// LED short-detection bitmap (24 bytes, read only)
pub const LED_SHORT: PagedRegister = PagedRegister::new(PAGE_LED_CONTROL, 0x30);

// Page 1

/// PWM array (192 bytes)
pub const LED_PWM: PagedRegister = PagedRegister::new(PAGE_PWM, 0x00);

// Page 2

/// Auto breath mode selection array (192 bytes)
pub const LED_ABM: PagedRegister = PagedRegister::new(PAGE_ABM, 0x00);

// Page 3

/// Configuration register
pub const CONFIGURATION: PagedRegister = PagedRegister::new(PAGE_FUNCTION, 0x00);
/// Global current control register
pub const GLOBAL_CURRENT: PagedRegister = PagedRegister::new(PAGE_FUNCTION, 0x01);
/// Auto breath control block 1 (4 bytes)
pub const ABM1: PagedRegister = PagedRegister::new(PAGE_FUNCTION, 0x02);
/// Auto breath control block 2 (4 bytes)
pub const ABM2: PagedRegister = PagedRegister::new(PAGE_FUNCTION, 0x06);
/// Auto breath control block 3 (4 bytes)
pub const ABM3: PagedRegister = PagedRegister::new(PAGE_FUNCTION, 0x0A);
/// Time update register, latches ABM settings on write
pub const TIME_UPDATE: PagedRegister = PagedRegister::new(PAGE_FUNCTION, 0x0E);
/// SW pull-up resistor selection
pub const SW_PULL_UP: PagedRegister = PagedRegister::new(PAGE_FUNCTION, 0x0F);
/// CS pull-down resistor selection
pub const CS_PULL_DOWN: PagedRegister = PagedRegister::new(PAGE_FUNCTION, 0x10);
/// Reset register, reading it resets all registers to their defaults
pub const RESET: PagedRegister = PagedRegister::new(PAGE_FUNCTION, 0x11);

// Configuration register bits

/// Software shutdown disable (normal operation)
pub const CONFIGURATION_SSD: u8 = 0x01;
/// Auto breath enable
pub const CONFIGURATION_BEN: u8 = 0x02;
/// Open/short detection enable
pub const CONFIGURATION_OSD: u8 = 0x04;
/// Mask of the SYNC field (bits 7:6)
pub const CONFIGURATION_SYNC_MASK: u8 = 0xC0;

// Interrupt mask bits

/// Auto clear interrupt
pub const INTERRUPT_MASK_IAC: u8 = 0x08;
/// Auto breath interrupt
pub const INTERRUPT_MASK_IAB: u8 = 0x04;
/// Dot short interrupt
pub const INTERRUPT_MASK_IS: u8 = 0x02;
/// Dot open interrupt
pub const INTERRUPT_MASK_IO: u8 = 0x01;

// Interrupt status bits

/// ABM3 finished
pub const INTERRUPT_STATUS_ABM3: u8 = 0x10;
/// ABM2 finished
pub const INTERRUPT_STATUS_ABM2: u8 = 0x08;
/// ABM1 finished
pub const INTERRUPT_STATUS_ABM1: u8 = 0x04;
/// Short detected
pub const INTERRUPT_STATUS_SB: u8 = 0x02;
/// Open detected
pub const INTERRUPT_STATUS_OB: u8 = 0x01;
