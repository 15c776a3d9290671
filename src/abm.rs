//! Auto Breath Mode (ABM)
//!
//! The chip has three identical breathing generators. Each LED either shows
//! its static PWM value or follows one of the generators, selected through
//! the mode page with [`Is31fl3733::set_led_mode`].
//!
//! One breathing cycle runs through four phases:
//!
//! ```text
//!       T2
//!     _____
//! T1 /     \ T3
//!   /       \ ___ T4 ___
//! ```
//!
//! T1 fades in, T2 holds, T3 fades out and T4 stays dark. A generator loops
//! from [`LoopBegin`] to [`LoopEnd`] `times` times, or forever with
//! [`LOOP_FOREVER`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use is31fl3733::abm::{AbmConfig, AbmNumber, LedMode, LoopBegin, LoopEnd, T1, T2, T3, T4};
//! use is31fl3733::{Is31fl3733, RegisterInterface, Selection};
//! # #[derive(Debug)]
//! # struct NullInterface;
//! # impl RegisterInterface for NullInterface {
//! #     type Error = core::convert::Infallible;
//! #     fn write(&mut self, _register: u8, _data: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn read(&mut self, _register: u8, _data: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let mut device = Is31fl3733::new(NullInterface, Default::default());
//! let breath = AbmConfig {
//!     t1: T1::Ms840,
//!     t2: T2::Ms420,
//!     t3: T3::Ms840,
//!     t4: T4::Ms420,
//!     loop_begin: LoopBegin::T1,
//!     loop_end: LoopEnd::T3,
//!     times: 10,
//! };
//!
//! let _ = device.configure_abm(AbmNumber::Abm1, &breath);
//! let _ = device.set_led_mode(Selection::Row(0), LedMode::Abm1);
//! let _ = device.start_abm();
//! ```

use crate::device::{DeviceResult, Is31fl3733};
use crate::interface::RegisterInterface;
use crate::matrix::{Selection, in_bounds, level_offset};
use crate::register::{self, CONFIGURATION_BEN, CONFIGURATION_SSD, PagedRegister};

/// Loop count that keeps a generator running until stopped
pub const LOOP_FOREVER: u16 = 0x0000;

/// Largest finite loop count
pub const LOOP_TIMES_MAX: u16 = 0x0FFF;

/// What drives an LED
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum LedMode {
    /// Static PWM value
    #[default]
    Pwm = 0x00,
    /// Breathing generator 1
    Abm1 = 0x01,
    /// Breathing generator 2
    Abm2 = 0x02,
    /// Breathing generator 3
    Abm3 = 0x03,
}

impl LedMode {
    fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0x01 => Self::Abm1,
            0x02 => Self::Abm2,
            0x03 => Self::Abm3,
            _ => Self::Pwm,
        }
    }
}

/// One of the three breathing generators
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbmNumber {
    /// Generator 1, registers `0x0302..=0x0305`
    Abm1,
    /// Generator 2, registers `0x0306..=0x0309`
    Abm2,
    /// Generator 3, registers `0x030A..=0x030D`
    Abm3,
}

impl AbmNumber {
    /// First of the generator's four registers
    pub const fn register(self) -> PagedRegister {
        match self {
            Self::Abm1 => register::ABM1,
            Self::Abm2 => register::ABM2,
            Self::Abm3 => register::ABM3,
        }
    }
}

/// Fade-in time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum T1 {
    #[default]
    Ms210 = 0x00,
    Ms420 = 0x20,
    Ms840 = 0x40,
    Ms1680 = 0x60,
    Ms3360 = 0x80,
    Ms6720 = 0xA0,
    Ms13440 = 0xC0,
    Ms26880 = 0xE0,
}

/// Hold time at full brightness
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum T2 {
    #[default]
    Ms0 = 0x00,
    Ms210 = 0x02,
    Ms420 = 0x04,
    Ms840 = 0x06,
    Ms1680 = 0x08,
    Ms3360 = 0x0A,
    Ms6720 = 0x0C,
    Ms13440 = 0x0E,
    Ms26880 = 0x10,
}

/// Fade-out time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum T3 {
    #[default]
    Ms210 = 0x00,
    Ms420 = 0x20,
    Ms840 = 0x40,
    Ms1680 = 0x60,
    Ms3360 = 0x80,
    Ms6720 = 0xA0,
    Ms13440 = 0xC0,
    Ms26880 = 0xE0,
}

/// Off time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum T4 {
    #[default]
    Ms0 = 0x00,
    Ms210 = 0x02,
    Ms420 = 0x04,
    Ms840 = 0x06,
    Ms1680 = 0x08,
    Ms3360 = 0x0A,
    Ms6720 = 0x0C,
    Ms13440 = 0x0E,
    Ms26880 = 0x10,
    Ms53760 = 0x12,
    Ms107520 = 0x14,
}

/// Phase a loop starts from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum LoopBegin {
    #[default]
    T1 = 0x00,
    T2 = 0x10,
    T3 = 0x20,
    T4 = 0x30,
}

/// Phase a loop ends after
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum LoopEnd {
    /// End of fade-out, LED left dark
    #[default]
    T3 = 0x00,
    /// End of fade-in, LED left lit
    T1 = 0x40,
}

/// Timing and loop settings of one breathing generator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AbmConfig {
    /// Fade-in time
    pub t1: T1,
    /// Hold time
    pub t2: T2,
    /// Fade-out time
    pub t3: T3,
    /// Off time
    pub t4: T4,
    /// First phase of a loop
    pub loop_begin: LoopBegin,
    /// Last phase of a loop
    pub loop_end: LoopEnd,
    /// Loop count, [`LOOP_FOREVER`] or up to [`LOOP_TIMES_MAX`]
    ///
    /// Only the low 12 bits reach the device.
    pub times: u16,
}

impl AbmConfig {
    /// Register image for the generator's four registers
    pub const fn to_bytes(&self) -> [u8; 4] {
        [
            self.t1 as u8 | self.t2 as u8,
            self.t3 as u8 | self.t4 as u8,
            self.loop_end as u8 | self.loop_begin as u8 | ((self.times >> 8) as u8 & 0x0F),
            (self.times & 0xFF) as u8,
        ]
    }
}

impl<I> Is31fl3733<I>
where
    I: RegisterInterface,
{
    /// Select what drives the LEDs in `selection`
    ///
    /// Same write granularity as [`set_led_pwm`](Self::set_led_pwm), on the
    /// mode page.
    pub fn set_led_mode(&mut self, selection: Selection, mode: LedMode) -> DeviceResult<I> {
        self.write_modes(selection, mode)
    }

    /// Mode of one LED as last written, `None` outside the matrix
    pub fn led_mode(&self, cs: u8, sw: u8) -> Option<LedMode> {
        in_bounds(cs, sw).then(|| LedMode::from_bits(self.modes[level_offset(cs, sw) as usize]))
    }

    /// Program one breathing generator
    ///
    /// Takes effect on the next [`start_abm`](Self::start_abm).
    pub fn configure_abm(&mut self, abm: AbmNumber, config: &AbmConfig) -> DeviceResult<I> {
        let base = abm.register();
        for (n, byte) in config.to_bytes().into_iter().enumerate() {
            self.write_paged_register(base.offset_by(n as u8), byte)?;
        }
        Ok(())
    }

    /// Latch generator settings and start breathing
    ///
    /// Toggles B_EN off and on with SSD set, keeping the SYNC bits of the
    /// configuration register, then writes the time update register.
    pub fn start_abm(&mut self) -> DeviceResult<I> {
        log::debug!("is31fl3733: start auto breath");
        let configuration = (self.configuration | CONFIGURATION_SSD) & !CONFIGURATION_BEN;
        self.set_configuration(configuration)?;
        self.set_configuration(configuration | CONFIGURATION_BEN)?;
        self.write_paged_register(register::TIME_UPDATE, 0x00)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Builder, SyncMode};
    use crate::matrix::COLUMNS;
    use crate::test_utils::MockInterface;
    use alloc::vec;
    use alloc::vec::Vec;

    fn test_device() -> Is31fl3733<MockInterface> {
        Is31fl3733::new(MockInterface::new(), Default::default())
    }

    fn breath(times: u16) -> AbmConfig {
        AbmConfig {
            t1: T1::Ms840,
            t2: T2::Ms210,
            t3: T3::Ms420,
            t4: T4::Ms107520,
            loop_begin: LoopBegin::T2,
            loop_end: LoopEnd::T1,
            times,
        }
    }

    #[test]
    fn test_to_bytes() {
        assert_eq!(breath(0x0123).to_bytes(), [0x42, 0x34, 0x51, 0x23]);
    }

    #[test]
    fn test_loop_forever_encoding() {
        let bytes = breath(LOOP_FOREVER).to_bytes();
        assert_eq!(bytes[2] & 0x0F, 0x0);
        assert_eq!(bytes[3], 0x00);
    }

    #[test]
    fn test_loop_times_max_encoding() {
        let bytes = breath(LOOP_TIMES_MAX).to_bytes();
        assert_eq!(bytes[2] & 0x0F, 0xF);
        assert_eq!(bytes[3], 0xFF);
        // Flags survive a full loop count
        assert_eq!(bytes[2] & 0xF0, 0x50);
    }

    #[test]
    fn test_loop_times_masked_to_twelve_bits() {
        let bytes = breath(0xF001).to_bytes();
        assert_eq!(bytes[2], 0x50);
        assert_eq!(bytes[3], 0x01);
    }

    #[test]
    fn test_configure_abm_writes_four_registers() {
        let mut device = test_device();
        device
            .configure_abm(AbmNumber::Abm2, &breath(LOOP_TIMES_MAX))
            .unwrap();

        assert_eq!(
            device.release().data_writes(),
            vec![
                (0x06, vec![0x42]),
                (0x07, vec![0x34]),
                (0x08, vec![0x5F]),
                (0x09, vec![0xFF]),
            ]
        );
    }

    #[test]
    fn test_configure_abm_register_blocks() {
        for (abm, base) in [
            (AbmNumber::Abm1, 0x02),
            (AbmNumber::Abm2, 0x06),
            (AbmNumber::Abm3, 0x0A),
        ] {
            let mut device = test_device();
            device.configure_abm(abm, &AbmConfig::default()).unwrap();
            let interface = device.release();
            assert_eq!(interface.page_selects(), vec![3; 4]);
            let registers: Vec<u8> =
                interface.data_writes().into_iter().map(|(r, _)| r).collect();
            assert_eq!(registers, vec![base, base + 1, base + 2, base + 3]);
        }
    }

    #[test]
    fn test_start_abm_sequence() {
        let mut device = test_device();
        device.set_configuration(0x01).unwrap();
        device.start_abm().unwrap();

        let interface = device.release();
        assert_eq!(
            interface.data_writes()[1..],
            [(0x00, vec![0x01]), (0x00, vec![0x03]), (0x0E, vec![0x00])]
        );
        assert_eq!(interface.page(3)[0x00], 0x03);
    }

    #[test]
    fn test_start_abm_without_init_leaves_shutdown() {
        let mut device = test_device();
        device.start_abm().unwrap();
        assert_eq!(
            device.release().data_writes(),
            vec![(0x00, vec![0x01]), (0x00, vec![0x03]), (0x0E, vec![0x00])]
        );
    }

    #[test]
    fn test_start_abm_after_zero_configuration() {
        let mut device = test_device();
        device.set_configuration(0x00).unwrap();
        device.start_abm().unwrap();
        assert_eq!(device.configuration(), 0x03);
        assert_eq!(device.release().page(3)[0x00], 0x03);
    }

    #[test]
    fn test_start_abm_keeps_sync_bits() {
        let config = Builder::new().sync(SyncMode::Slave).build();
        let mut device = Is31fl3733::new(MockInterface::new(), config);
        device.init().unwrap();
        device.start_abm().unwrap();
        // Restarting clears B_EN before setting it again
        device.start_abm().unwrap();

        let writes = device.release().data_writes();
        let tail = &writes[writes.len() - 3..];
        assert_eq!(
            tail,
            [(0x00, vec![0x81]), (0x00, vec![0x83]), (0x0E, vec![0x00])]
        );
    }

    #[test]
    fn test_set_led_mode_dispatch() {
        let mut device = test_device();
        device
            .set_led_mode(Selection::Single { cs: 2, sw: 3 }, LedMode::Abm3)
            .unwrap();
        device.set_led_mode(Selection::Row(1), LedMode::Abm1).unwrap();
        device.set_led_mode(Selection::Column(15), LedMode::Abm2).unwrap();

        assert_eq!(device.led_mode(2, 3), Some(LedMode::Abm3));
        assert_eq!(device.led_mode(0, 1), Some(LedMode::Abm1));
        assert_eq!(device.led_mode(15, 1), Some(LedMode::Abm2));
        assert_eq!(device.led_mode(15, 11), Some(LedMode::Abm2));
        assert_eq!(device.led_mode(0, 0), Some(LedMode::Pwm));
        assert_eq!(device.led_mode(COLUMNS, 0), None);

        let interface = device.release();
        let writes = interface.data_writes();
        // Single byte, one 16-byte row, twelve column bytes
        assert_eq!(writes.len(), 1 + 1 + 12);
        assert_eq!(writes[0], (50, vec![0x03]));
        assert_eq!(writes[1], (16, vec![0x01; 16]));
        assert_eq!(writes[2], (15, vec![0x02]));
        assert!(interface.page_selects().iter().all(|page| *page == 2));
        assert_eq!(interface.page(2)[16 + 15], 0x02);
    }

    #[test]
    fn test_set_led_mode_all() {
        let mut device = test_device();
        device.set_led_mode(Selection::All, LedMode::Abm2).unwrap();
        let interface = device.release();
        assert_eq!(interface.data_writes(), vec![(0, vec![0x02; 192])]);
    }

    #[test]
    fn test_abm_number_registers() {
        assert_eq!(AbmNumber::Abm1.register().address(), 0x0302);
        assert_eq!(AbmNumber::Abm2.register().address(), 0x0306);
        assert_eq!(AbmNumber::Abm3.register().address(), 0x030A);
    }
}
