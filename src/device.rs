//! Core device operations
//!
//! [`Is31fl3733`] owns the transport and a RAM mirror of the matrix:
//! brightness per LED, the packed on/off bitmap and the ABM mode per LED.
//!
//! ## Paged Register Access
//!
//! The active page is never cached. Every paged read or write unlocks the
//! command register and selects the page again, so a transaction from
//! another driver on a shared bus cannot leave the chip on the wrong page
//! between two calls.
//!
//! ## Update Disciplines
//!
//! Two ways of getting brightness to the device coexist:
//!
//! - **Immediate**: [`set_led_state`](Is31fl3733::set_led_state) and
//!   [`set_led_pwm`](Is31fl3733::set_led_pwm) write through on every call.
//!   On/off and brightness are independent; a PWM value of 0 leaves the
//!   on/off bit alone.
//! - **Buffered**: [`set_led`](Is31fl3733::set_led) and
//!   [`fill`](Is31fl3733::fill) only touch RAM. [`update`](Is31fl3733::update)
//!   derives on/off from brightness (non-zero is on) and pushes both pages
//!   in two bulk writes.
//!
//! [`set_brightness`](Is31fl3733::set_brightness) and
//! [`flush`](Is31fl3733::flush) pick one of the two according to
//! [`Config::discipline`].

use crate::abm::LedMode;
use crate::config::{Config, Resistor, UpdateDiscipline};
use crate::error::Error;
use crate::interface::RegisterInterface;
use crate::matrix::{
    BITMAP_LEN, BITMAP_ROW_LEN, COLUMNS, LED_COUNT, ROWS, Selection, bitmap_mask, bitmap_offset,
    in_bounds, level_offset, pack_bitmap,
};
use crate::register::{
    self, COMMAND, COMMAND_WRITE_LOCK, CONFIGURATION_OSD, CONFIGURATION_SSD, INTERRUPT_MASK_IAB,
    INTERRUPT_MASK_IAC, INTERRUPT_MASK_IO, INTERRUPT_MASK_IS, INTERRUPT_STATUS_ABM1,
    INTERRUPT_STATUS_ABM2, INTERRUPT_STATUS_ABM3, INTERRUPT_STATUS_OB, INTERRUPT_STATUS_SB,
    PagedRegister, WRITE_UNLOCK,
};

pub(crate) type DeviceResult<I> = core::result::Result<(), Error<I>>;

/// On/off state of an LED
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LedState {
    /// LED disabled
    #[default]
    Off,
    /// LED enabled
    On,
}

impl LedState {
    /// Bitmap byte with every LED in this state
    const fn fill_byte(self) -> u8 {
        match self {
            Self::Off => 0x00,
            Self::On => 0xFF,
        }
    }
}

impl From<bool> for LedState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

/// Result of the open/short detection for one LED
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedStatus {
    /// Neither open nor short
    Normal,
    /// LED is open
    Open,
    /// LED is shorted
    Short,
    /// Coordinates do not name an LED
    Unknown,
}

/// Interrupt sources enabled on the INTB pin
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InterruptMask {
    /// Clear the interrupt automatically after 8 ms
    pub auto_clear: bool,
    /// Interrupt when an auto breath loop finishes
    pub auto_breath: bool,
    /// Interrupt on dot short
    pub short: bool,
    /// Interrupt on dot open
    pub open: bool,
}

impl InterruptMask {
    /// Register value
    pub const fn bits(self) -> u8 {
        let mut bits = 0;
        if self.auto_clear {
            bits |= INTERRUPT_MASK_IAC;
        }
        if self.auto_breath {
            bits |= INTERRUPT_MASK_IAB;
        }
        if self.short {
            bits |= INTERRUPT_MASK_IS;
        }
        if self.open {
            bits |= INTERRUPT_MASK_IO;
        }
        bits
    }
}

/// Content of the interrupt status register
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterruptStatus(pub u8);

impl InterruptStatus {
    /// An open LED was detected
    pub const fn open(self) -> bool {
        self.0 & INTERRUPT_STATUS_OB != 0
    }

    /// A shorted LED was detected
    pub const fn short(self) -> bool {
        self.0 & INTERRUPT_STATUS_SB != 0
    }

    /// Auto breath generator 1 finished its loops
    pub const fn abm1_finished(self) -> bool {
        self.0 & INTERRUPT_STATUS_ABM1 != 0
    }

    /// Auto breath generator 2 finished its loops
    pub const fn abm2_finished(self) -> bool {
        self.0 & INTERRUPT_STATUS_ABM2 != 0
    }

    /// Auto breath generator 3 finished its loops
    pub const fn abm3_finished(self) -> bool {
        self.0 & INTERRUPT_STATUS_ABM3 != 0
    }
}

/// Core driver for the IS31FL3733
///
/// One instance per chip. All operations are blocking and take `&mut self`;
/// sharing the bus with other devices is the job of the interface.
pub struct Is31fl3733<I>
where
    I: RegisterInterface,
{
    /// Hardware interface
    interface: I,
    /// Device configuration
    config: Config,
    /// Brightness per LED, `sw * COLUMNS + cs`
    leds: [u8; LED_COUNT],
    /// On/off bitmap, bit `cs % 8` of byte `2 * sw + cs / 8`
    on_off: [u8; BITMAP_LEN],
    /// ABM mode per LED, same layout as `leds`
    pub(crate) modes: [u8; LED_COUNT],
    /// Last programmed global current control value
    global_current: u8,
    /// Last programmed configuration register value
    pub(crate) configuration: u8,
}

impl<I> Is31fl3733<I>
where
    I: RegisterInterface,
{
    /// Create a new driver instance with zeroed buffers
    ///
    /// No bus traffic happens until [`init`](Self::init).
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            leds: [0; LED_COUNT],
            on_off: [0; BITMAP_LEN],
            modes: [0; LED_COUNT],
            global_current: 0,
            configuration: 0,
        }
    }

    /// Reset the chip and bring it into normal operation
    ///
    /// Reads the reset register (which restores every register to its
    /// default), leaves software shutdown, switches all LEDs off, then
    /// programs global current and de-ghosting resistors from the
    /// configuration.
    pub fn init(&mut self) -> DeviceResult<I> {
        log::debug!("is31fl3733: reset");
        self.read_paged_register(register::RESET)?;
        self.leds.fill(0);
        self.modes.fill(0);
        self.global_current = 0;

        self.set_configuration(self.config.configuration_register())?;
        self.set_led_state(Selection::All, LedState::Off)?;

        self.set_global_current(self.config.global_current)?;
        self.set_sw_pull_up(self.config.sw_pull_up)?;
        self.set_cs_pull_down(self.config.cs_pull_down)?;

        log::debug!(
            "is31fl3733: ready, configuration {:#04x}, gcc {:#04x}",
            self.configuration,
            self.global_current
        );
        Ok(())
    }

    /// Unlock the command register and select `page`
    ///
    /// Always exactly two writes: the unlock sentinel to the write lock
    /// register, then the page number to the command register.
    pub fn select_page(&mut self, page: u8) -> DeviceResult<I> {
        select_page(&mut self.interface, page)
    }

    /// Select the register's page and read one byte
    pub fn read_paged_register(&mut self, reg: PagedRegister) -> core::result::Result<u8, Error<I>> {
        select_page(&mut self.interface, reg.page())?;
        let mut value = [0u8; 1];
        self.interface
            .read(reg.offset(), &mut value)
            .map_err(Error::<I>::Interface)?;
        log::trace!("is31fl3733: read {:#06x} -> {:#04x}", reg.address(), value[0]);
        Ok(value[0])
    }

    /// Select the register's page and write one byte
    pub fn write_paged_register(&mut self, reg: PagedRegister, value: u8) -> DeviceResult<I> {
        write_paged(&mut self.interface, reg, &[value])
    }

    /// Select the page once and write `values` starting at `reg`
    pub fn write_paged_registers(&mut self, reg: PagedRegister, values: &[u8]) -> DeviceResult<I> {
        write_paged(&mut self.interface, reg, values)
    }

    /// Read a common (non-paged) register
    pub fn read_common_register(&mut self, reg: u8) -> core::result::Result<u8, Error<I>> {
        let mut value = [0u8; 1];
        self.interface
            .read(reg, &mut value)
            .map_err(Error::<I>::Interface)?;
        Ok(value[0])
    }

    /// Write a common (non-paged) register
    pub fn write_common_register(&mut self, reg: u8, value: u8) -> DeviceResult<I> {
        self.interface
            .write(reg, &[value])
            .map_err(Error::Interface)
    }

    /// Set the global current control value (0-255)
    pub fn set_global_current(&mut self, gcc: u8) -> DeviceResult<I> {
        self.write_paged_register(register::GLOBAL_CURRENT, gcc)?;
        self.global_current = gcc;
        Ok(())
    }

    /// Select the SW pull-up resistor
    pub fn set_sw_pull_up(&mut self, resistor: Resistor) -> DeviceResult<I> {
        self.write_paged_register(register::SW_PULL_UP, resistor as u8)
    }

    /// Select the CS pull-down resistor
    pub fn set_cs_pull_down(&mut self, resistor: Resistor) -> DeviceResult<I> {
        self.write_paged_register(register::CS_PULL_DOWN, resistor as u8)
    }

    /// Write the raw configuration register
    pub fn set_configuration(&mut self, configuration: u8) -> DeviceResult<I> {
        self.write_paged_register(register::CONFIGURATION, configuration)?;
        self.configuration = configuration;
        Ok(())
    }

    /// Start open/short detection
    ///
    /// Results land in the open and short bitmaps after two scan cycles and
    /// can then be read with [`led_status`](Self::led_status). SSD is
    /// always set in the written value.
    pub fn trigger_open_short_detection(&mut self) -> DeviceResult<I> {
        log::debug!("is31fl3733: open/short detection");
        self.write_paged_register(
            register::CONFIGURATION,
            self.configuration | CONFIGURATION_SSD | CONFIGURATION_OSD,
        )
    }

    /// Select interrupt sources
    pub fn set_interrupt_mask(&mut self, mask: InterruptMask) -> DeviceResult<I> {
        self.write_common_register(register::INTERRUPT_MASK, mask.bits())
    }

    /// Read the interrupt status register
    pub fn interrupt_status(&mut self) -> core::result::Result<InterruptStatus, Error<I>> {
        self.read_common_register(register::INTERRUPT_STATUS)
            .map(InterruptStatus)
    }

    /// Switch LEDs on or off and write the change through
    ///
    /// Writes the fewest bitmap bytes the selection needs: one byte for a
    /// single LED, one 2-byte write for a row, one byte per row for a
    /// column, one 24-byte write for everything. Brightness is untouched.
    pub fn set_led_state(&mut self, selection: Selection, state: LedState) -> DeviceResult<I> {
        match selection.normalized() {
            Selection::Single { cs, sw } => {
                let offset = bitmap_offset(cs, sw);
                apply_state(&mut self.on_off[offset as usize], bitmap_mask(cs), state);
                write_paged(
                    &mut self.interface,
                    register::LED_ON_OFF.offset_by(offset),
                    &[self.on_off[offset as usize]],
                )
            }
            Selection::Row(sw) => {
                let start = bitmap_offset(0, sw);
                let row = &mut self.on_off[start as usize..start as usize + BITMAP_ROW_LEN];
                row.fill(state.fill_byte());
                write_paged(
                    &mut self.interface,
                    register::LED_ON_OFF.offset_by(start),
                    row,
                )
            }
            Selection::Column(cs) => {
                for sw in 0..ROWS {
                    let offset = bitmap_offset(cs, sw);
                    apply_state(&mut self.on_off[offset as usize], bitmap_mask(cs), state);
                    write_paged(
                        &mut self.interface,
                        register::LED_ON_OFF.offset_by(offset),
                        &[self.on_off[offset as usize]],
                    )?;
                }
                Ok(())
            }
            Selection::All => {
                self.on_off.fill(state.fill_byte());
                write_paged(&mut self.interface, register::LED_ON_OFF, &self.on_off)
            }
        }
    }

    /// Set brightness and write the change through
    ///
    /// Same write granularity as [`set_led_state`](Self::set_led_state):
    /// one byte, one 16-byte row, one byte per row, or the whole 192-byte
    /// page. On/off state is untouched, even for a value of 0.
    pub fn set_led_pwm(&mut self, selection: Selection, value: u8) -> DeviceResult<I> {
        write_levels(
            &mut self.interface,
            register::LED_PWM,
            &mut self.leds,
            selection,
            value,
        )
    }

    /// Set the on/off state of every LED from a byte-per-LED array
    ///
    /// Zero switches an LED off, anything else on. Indexed like the
    /// brightness buffer. The whole bitmap goes out in one write.
    pub fn set_led_states(&mut self, states: &[u8]) -> DeviceResult<I> {
        let states = full_matrix::<I>(states)?;
        pack_bitmap(states, &mut self.on_off);
        write_paged(&mut self.interface, register::LED_ON_OFF, &self.on_off)
    }

    /// Set the brightness of every LED and write the page in one go
    pub fn set_led_pwms(&mut self, values: &[u8]) -> DeviceResult<I> {
        let values = full_matrix::<I>(values)?;
        self.leds.copy_from_slice(values);
        write_paged(&mut self.interface, register::LED_PWM, &self.leds)
    }

    /// Set the brightness of one LED in RAM
    ///
    /// Coordinates outside the matrix are ignored. Nothing is written until
    /// [`update`](Self::update).
    pub fn set_led(&mut self, cs: u8, sw: u8, brightness: u8) {
        if in_bounds(cs, sw) {
            self.leds[level_offset(cs, sw) as usize] = brightness;
        }
    }

    /// Set the brightness of a selection in RAM
    pub fn set_selection(&mut self, selection: Selection, brightness: u8) {
        match selection.normalized() {
            Selection::Single { cs, sw } => self.set_led(cs, sw, brightness),
            Selection::Row(sw) => {
                let start = level_offset(0, sw) as usize;
                self.leds[start..start + COLUMNS as usize].fill(brightness);
            }
            Selection::Column(cs) => {
                for sw in 0..ROWS {
                    self.leds[level_offset(cs, sw) as usize] = brightness;
                }
            }
            Selection::All => self.fill(brightness),
        }
    }

    /// Set the brightness of every LED in RAM
    pub fn fill(&mut self, brightness: u8) {
        self.leds.fill(brightness);
    }

    /// Push the brightness buffer to the device
    ///
    /// Rebuilds the on/off bitmap from brightness (non-zero is on), writes
    /// the 24 bitmap bytes, then the 192 PWM bytes.
    pub fn update(&mut self) -> DeviceResult<I> {
        pack_bitmap(&self.leds, &mut self.on_off);
        write_paged(&mut self.interface, register::LED_ON_OFF, &self.on_off)?;
        write_paged(&mut self.interface, register::LED_PWM, &self.leds)
    }

    /// Set brightness through the configured discipline
    ///
    /// Immediate: same as [`set_led_pwm`](Self::set_led_pwm).
    /// Buffered: same as [`set_selection`](Self::set_selection).
    pub fn set_brightness(&mut self, selection: Selection, value: u8) -> DeviceResult<I> {
        match self.config.discipline {
            UpdateDiscipline::Immediate => self.set_led_pwm(selection, value),
            UpdateDiscipline::Buffered => {
                self.set_selection(selection, value);
                Ok(())
            }
        }
    }

    /// Finish a batch of [`set_brightness`](Self::set_brightness) calls
    ///
    /// Buffered: [`update`](Self::update). Immediate: nothing left to do.
    pub fn flush(&mut self) -> DeviceResult<I> {
        match self.config.discipline {
            UpdateDiscipline::Immediate => Ok(()),
            UpdateDiscipline::Buffered => self.update(),
        }
    }

    /// Read the open/short detection result of one LED
    ///
    /// Open wins over short. Coordinates outside the matrix report
    /// [`LedStatus::Unknown`] without touching the bus.
    pub fn led_status(&mut self, cs: u8, sw: u8) -> core::result::Result<LedStatus, Error<I>> {
        if !in_bounds(cs, sw) {
            return Ok(LedStatus::Unknown);
        }

        let offset = bitmap_offset(cs, sw);
        let mask = bitmap_mask(cs);

        if self.read_paged_register(register::LED_OPEN.offset_by(offset))? & mask != 0 {
            return Ok(LedStatus::Open);
        }
        if self.read_paged_register(register::LED_SHORT.offset_by(offset))? & mask != 0 {
            return Ok(LedStatus::Short);
        }
        Ok(LedStatus::Normal)
    }

    /// Brightness buffer, `sw * 16 + cs`
    pub fn leds(&self) -> &[u8; LED_COUNT] {
        &self.leds
    }

    /// On/off bitmap mirror
    pub fn on_off(&self) -> &[u8; BITMAP_LEN] {
        &self.on_off
    }

    /// Brightness of one LED in RAM, `None` outside the matrix
    pub fn brightness(&self, cs: u8, sw: u8) -> Option<u8> {
        in_bounds(cs, sw).then(|| self.leds[level_offset(cs, sw) as usize])
    }

    /// Whether the on/off mirror has the LED switched on
    pub fn is_on(&self, cs: u8, sw: u8) -> bool {
        in_bounds(cs, sw)
            && self.on_off[bitmap_offset(cs, sw) as usize] & bitmap_mask(cs) != 0
    }

    /// Last programmed global current control value
    pub fn global_current(&self) -> u8 {
        self.global_current
    }

    /// Last programmed configuration register value
    pub fn configuration(&self) -> u8 {
        self.configuration
    }

    /// Access the device configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Release the interface
    pub fn release(self) -> I {
        self.interface
    }

    /// Select the mode array page and write modes for a selection
    pub(crate) fn write_modes(&mut self, selection: Selection, mode: LedMode) -> DeviceResult<I> {
        write_levels(
            &mut self.interface,
            register::LED_ABM,
            &mut self.modes,
            selection,
            mode as u8,
        )
    }
}

fn select_page<I: RegisterInterface>(interface: &mut I, page: u8) -> DeviceResult<I> {
    interface
        .write(COMMAND_WRITE_LOCK, &[WRITE_UNLOCK])
        .map_err(Error::<I>::Interface)?;
    interface.write(COMMAND, &[page]).map_err(Error::Interface)
}

fn write_paged<I: RegisterInterface>(
    interface: &mut I,
    reg: PagedRegister,
    data: &[u8],
) -> DeviceResult<I> {
    select_page(interface, reg.page())?;
    log::trace!("is31fl3733: write {:#06x} <- {} bytes", reg.address(), data.len());
    interface.write(reg.offset(), data).map_err(Error::Interface)
}

/// Update a byte-per-LED mirror and write the touched registers
fn write_levels<I: RegisterInterface>(
    interface: &mut I,
    base: PagedRegister,
    levels: &mut [u8; LED_COUNT],
    selection: Selection,
    value: u8,
) -> DeviceResult<I> {
    match selection.normalized() {
        Selection::Single { cs, sw } => {
            let offset = level_offset(cs, sw);
            levels[offset as usize] = value;
            write_paged(interface, base.offset_by(offset), &[value])
        }
        Selection::Row(sw) => {
            let start = level_offset(0, sw);
            let row = &mut levels[start as usize..start as usize + COLUMNS as usize];
            row.fill(value);
            write_paged(interface, base.offset_by(start), row)
        }
        Selection::Column(cs) => {
            for sw in 0..ROWS {
                let offset = level_offset(cs, sw);
                levels[offset as usize] = value;
                write_paged(interface, base.offset_by(offset), &[value])?;
            }
            Ok(())
        }
        Selection::All => {
            levels.fill(value);
            write_paged(interface, base, levels)
        }
    }
}

fn apply_state(byte: &mut u8, mask: u8, state: LedState) {
    match state {
        LedState::On => *byte |= mask,
        LedState::Off => *byte &= !mask,
    }
}

fn full_matrix<I: RegisterInterface>(
    values: &[u8],
) -> core::result::Result<&[u8; LED_COUNT], Error<I>> {
    let too_small = || Error::<I>::BufferTooSmall {
        required: LED_COUNT,
        provided: values.len(),
    };
    values
        .get(..LED_COUNT)
        .and_then(|values| values.try_into().ok())
        .ok_or_else(too_small)
}
