//! embedded-hal adapters
//!
//! Binds four digital pins (SCL drive, SDA drive, SCL sense, SDA sense) and a
//! delay provider to the [`Wire`] and [`Wait`] capabilities.
//!
//! # Hardware requirements
//!
//! 1. Configure the drive pins as open-drain outputs with pull-ups.
//! 2. The sense pins may be the same physical pads configured as inputs.
//! 3. Choose `ns_per_unit` so that one bit-period (`divider * 5` units) is
//!    the intended SCL period.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, InputPin, OutputPin};

use crate::line::{Line, Wait, Wire};

/// Failure of one of the bound pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinError {
    /// Line whose pin failed
    pub line: Line,
    /// What the pin reported
    pub kind: ErrorKind,
}

/// SCL/SDA pair backed by embedded-hal pins
pub struct PinWire<SCL, SDA, SCLI, SDAI> {
    scl: SCL,
    sda: SDA,
    scl_sense: SCLI,
    sda_sense: SDAI,
}

impl<SCL, SDA, SCLI, SDAI> PinWire<SCL, SDA, SCLI, SDAI>
where
    SCL: OutputPin,
    SDA: OutputPin,
    SCLI: InputPin,
    SDAI: InputPin,
{
    /// Bind drive and sense pins for both lines
    pub fn new(scl: SCL, sda: SDA, scl_sense: SCLI, sda_sense: SDAI) -> Self {
        Self {
            scl,
            sda,
            scl_sense,
            sda_sense,
        }
    }

    /// Give the pins back
    pub fn free(self) -> (SCL, SDA, SCLI, SDAI) {
        (self.scl, self.sda, self.scl_sense, self.sda_sense)
    }
}

fn pin_error<E: embedded_hal::digital::Error>(line: Line) -> impl FnOnce(E) -> PinError {
    move |e| PinError {
        line,
        kind: e.kind(),
    }
}

impl<SCL, SDA, SCLI, SDAI> Wire for PinWire<SCL, SDA, SCLI, SDAI>
where
    SCL: OutputPin,
    SDA: OutputPin,
    SCLI: InputPin,
    SDAI: InputPin,
{
    type Error = PinError;

    fn drive(&mut self, line: Line, high: bool) -> Result<(), PinError> {
        match line {
            Line::Scl => self.scl.set_state(high.into()).map_err(pin_error(line)),
            Line::Sda => self.sda.set_state(high.into()).map_err(pin_error(line)),
        }
    }

    fn sample(&mut self, line: Line) -> Result<bool, PinError> {
        match line {
            Line::Scl => self.scl_sense.is_high().map_err(pin_error(line)),
            Line::Sda => self.sda_sense.is_high().map_err(pin_error(line)),
        }
    }
}

/// [`Wait`] on top of an embedded-hal delay
pub struct DelayWait<D> {
    delay: D,
    ns_per_unit: u32,
}

impl<D: DelayNs> DelayWait<D> {
    /// Wrap a delay provider, scaling each unit to `ns_per_unit` nanoseconds
    pub fn new(delay: D, ns_per_unit: u32) -> Self {
        Self { delay, ns_per_unit }
    }

    /// Nanoseconds per wait unit
    pub fn ns_per_unit(&self) -> u32 {
        self.ns_per_unit
    }

    /// Give the delay provider back
    pub fn free(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> Wait for DelayWait<D> {
    fn wait(&mut self, units: u32) {
        let mut remaining = u64::from(units) * u64::from(self.ns_per_unit);
        while remaining > 0 {
            let chunk = remaining.min(u64::from(u32::MAX));
            self.delay.delay_ns(chunk as u32);
            remaining -= chunk;
        }
    }
}
