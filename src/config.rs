//! Device configuration types and builder

use crate::register::{CONFIGURATION_SSD, CONFIGURATION_SYNC_MASK};

/// Matrix rotation relative to native orientation
///
/// Only affects the graphics layer; register-level operations always use
/// physical (cs, sw) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Rotation {
    /// No rotation, 16 wide by 12 high
    #[default]
    Rotate0,
    /// Rotate 90 degrees clockwise, 12 wide by 16 high
    Rotate90,
    /// Rotate 180 degrees
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

/// SYNC pin function, configuration register bits 7:6
///
/// Several chips can share one oscillator by making one the master and the
/// others slaves.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(u8)]
pub enum SyncMode {
    /// SYNC pin unused
    #[default]
    HighImpedance = 0x00,
    /// Drive the clock on the SYNC pin
    Master = 0x40,
    /// Take the clock from the SYNC pin
    Slave = 0x80,
}

/// Pull-up (SW) or pull-down (CS) resistor used for de-ghosting
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(u8)]
pub enum Resistor {
    /// No resistor
    #[default]
    None = 0x00,
    /// 0.5 kOhm
    R500 = 0x01,
    /// 1.0 kOhm
    R1K = 0x02,
    /// 2.0 kOhm
    R2K = 0x03,
    /// 4.0 kOhm
    R4K = 0x04,
    /// 8.0 kOhm
    R8K = 0x05,
    /// 16 kOhm
    R16K = 0x06,
    /// 32 kOhm
    R32K = 0x07,
}

/// How brightness changes reach the device
///
/// Both disciplines are always available through their own methods; this
/// only picks the route taken by
/// [`Is31fl3733::set_brightness`](crate::Is31fl3733::set_brightness) and
/// [`Is31fl3733::flush`](crate::Is31fl3733::flush).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum UpdateDiscipline {
    /// Every change is written to the PWM page right away. On/off state is
    /// managed separately.
    #[default]
    Immediate,
    /// Changes stay in RAM until a flush. The flush derives on/off from
    /// brightness: any non-zero level turns the LED on.
    Buffered,
}

/// Device configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Global current control value programmed by `init`
    pub global_current: u8,
    /// SYNC pin function
    pub sync: SyncMode,
    /// SW pull-up resistor
    pub sw_pull_up: Resistor,
    /// CS pull-down resistor
    pub cs_pull_down: Resistor,
    /// Route for [`set_brightness`](crate::Is31fl3733::set_brightness)
    pub discipline: UpdateDiscipline,
    /// Rotation used by the graphics layer
    pub rotation: Rotation,
}

impl Config {
    /// Configuration register value for normal operation
    ///
    /// Software shutdown disabled, SYNC set, auto breath and open/short
    /// detection off.
    pub fn configuration_register(&self) -> u8 {
        (self.sync as u8 & CONFIGURATION_SYNC_MASK) | CONFIGURATION_SSD
    }
}

impl Default for Config {
    fn default() -> Self {
        Builder::new().build()
    }
}

/// Builder for constructing device configuration
///
/// # Example
///
/// ```
/// use is31fl3733::{Builder, Resistor, UpdateDiscipline};
///
/// let config = Builder::new()
///     .global_current(0x80)
///     .sw_pull_up(Resistor::R32K)
///     .cs_pull_down(Resistor::R32K)
///     .discipline(UpdateDiscipline::Buffered)
///     .build();
/// assert_eq!(config.global_current, 0x80);
/// ```
#[must_use]
pub struct Builder {
    global_current: u8,
    sync: SyncMode,
    sw_pull_up: Resistor,
    cs_pull_down: Resistor,
    discipline: UpdateDiscipline,
    rotation: Rotation,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            // Full scale; the reset default of 0 keeps every LED dark
            global_current: 0xFF,
            sync: SyncMode::HighImpedance,
            sw_pull_up: Resistor::None,
            cs_pull_down: Resistor::None,
            discipline: UpdateDiscipline::Immediate,
            rotation: Rotation::Rotate0,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the global current control value
    pub fn global_current(mut self, value: u8) -> Self {
        self.global_current = value;
        self
    }

    /// Set the SYNC pin function
    pub fn sync(mut self, sync: SyncMode) -> Self {
        self.sync = sync;
        self
    }

    /// Set the SW pull-up resistor
    pub fn sw_pull_up(mut self, resistor: Resistor) -> Self {
        self.sw_pull_up = resistor;
        self
    }

    /// Set the CS pull-down resistor
    pub fn cs_pull_down(mut self, resistor: Resistor) -> Self {
        self.cs_pull_down = resistor;
        self
    }

    /// Set the update discipline
    pub fn discipline(mut self, discipline: UpdateDiscipline) -> Self {
        self.discipline = discipline;
        self
    }

    /// Set the graphics rotation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        Config {
            global_current: self.global_current,
            sync: self.sync,
            sw_pull_up: self.sw_pull_up,
            cs_pull_down: self.cs_pull_down,
            discipline: self.discipline,
            rotation: self.rotation,
        }
    }
}
