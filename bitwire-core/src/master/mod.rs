//! I2C bus-master engine
//!
//! Primitives are layered the way the bus is: transactions call byte
//! transfers, byte transfers call single clock pulses, and clock pulses call
//! the wire and the timing helper.
//!
//! # SCL contract
//!
//! | Primitive      | SCL before | SCL after |
//! |----------------|------------|-----------|
//! | `idle`         | any        | high      |
//! | `start`        | any        | low       |
//! | `stop`         | low        | high      |
//! | `continuation` | low        | high      |
//! | `bit_start`    | low        | high      |
//! | `bit_stop`     | high       | low       |
//! | `ack`          | low        | low       |
//! | `byte_output`  | low        | low       |
//! | `byte_input`   | low        | low       |
//!
//! The engine remembers the SCL level it last drove and refuses to run a
//! primitive whose "before" column does not match, returning
//! [`Error::BusState`] without touching the bus.

mod bus;
mod transaction;

use bitwire_hal::{Line, PinWire, Wait, Wire};
use embedded_hal::digital::{InputPin, OutputPin};

use crate::bits::{byte_bits, byte_from_bits, BYTE_WIDTH};
use crate::config::{BusConfig, NackPolicy};
use crate::error::{Error, Primitive};
use crate::report::FailureReport;
use crate::timing::{self, IDLE_BIT_PERIODS};

pub use transaction::MAX_READ_LEN;

/// Bit-banging I2C master
///
/// Owns the wire, the wait capability and the failure reporter for as long
/// as it lives. See the module docs for the SCL contract of each primitive.
pub struct I2cMaster<W, T, R> {
    wire: W,
    delay: T,
    report: R,
    config: BusConfig,
    nack_policy: NackPolicy,
    /// Last SCL level driven, `None` until known
    scl: Option<bool>,
    /// Engine is currently pulling SDA low
    sda_low: bool,
    /// Wait units spent since construction
    elapsed: u64,
}

impl<W: Wire, T: Wait, R: FailureReport> I2cMaster<W, T, R> {
    /// Create an engine over the given capabilities
    ///
    /// Nothing is driven until the first primitive runs; call [`idle`] to put
    /// the bus into a known state.
    ///
    /// [`idle`]: Self::idle
    pub fn new(wire: W, delay: T, report: R, config: BusConfig) -> Self {
        Self {
            wire,
            delay,
            report,
            config,
            nack_policy: NackPolicy::default(),
            scl: None,
            sda_low: false,
            elapsed: 0,
        }
    }

    /// Use the given nack policy
    pub fn with_nack_policy(mut self, policy: NackPolicy) -> Self {
        self.nack_policy = policy;
        self
    }

    /// Current nack policy
    pub fn nack_policy(&self) -> NackPolicy {
        self.nack_policy
    }

    /// Change the nack policy for subsequent transactions
    pub fn set_nack_policy(&mut self, policy: NackPolicy) {
        self.nack_policy = policy;
    }

    /// Current configuration
    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Replace the configuration for subsequent transactions
    pub fn set_config(&mut self, config: BusConfig) {
        self.config = config;
    }

    /// Wait units spent since construction
    pub fn now(&self) -> u64 {
        self.elapsed
    }

    /// SCL level last driven, `None` before the first drive
    pub fn scl_level(&self) -> Option<bool> {
        self.scl
    }

    /// Borrow the wire
    pub fn wire(&self) -> &W {
        &self.wire
    }

    /// Mutably borrow the wire
    pub fn wire_mut(&mut self) -> &mut W {
        &mut self.wire
    }

    /// Borrow the failure reporter
    pub fn report(&self) -> &R {
        &self.report
    }

    /// Mutably borrow the failure reporter
    pub fn report_mut(&mut self) -> &mut R {
        &mut self.report
    }

    /// Take the capabilities back
    pub fn free(self) -> (W, T, R) {
        (self.wire, self.delay, self.report)
    }

    /// Wait for `bit_periods` bit-periods
    pub fn wait(&mut self, bit_periods: u32) {
        let units = timing::wait_units(self.config.divider, bit_periods);
        self.delay.wait(units);
        self.elapsed += u64::from(units);
    }

    fn drive(&mut self, line: Line, high: bool) -> Result<(), Error<W::Error>> {
        match self.wire.drive(line, high) {
            Ok(()) => {
                match line {
                    Line::Scl => self.scl = Some(high),
                    Line::Sda => self.sda_low = !high,
                }
                Ok(())
            }
            Err(e) => {
                if line == Line::Scl {
                    self.scl = None;
                }
                Err(Error::Line(e))
            }
        }
    }

    fn require_scl(&self, primitive: Primitive, high: bool) -> Result<(), Error<W::Error>> {
        if self.scl == Some(high) {
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "I2C: {} needs SCL high={} but SCL is {}",
            primitive,
            high,
            self.scl
        );
        Err(Error::BusState {
            primitive,
            expected_scl_high: high,
        })
    }

    /// Release both lines and let the bus settle
    ///
    /// Usable from any state. Leaves SCL and SDA high.
    pub fn idle(&mut self) -> Result<(), Error<W::Error>> {
        self.drive(Line::Scl, true)?;
        self.drive(Line::Sda, true)?;
        self.wait(IDLE_BIT_PERIODS);
        Ok(())
    }

    /// Start condition: SDA falls while SCL is high
    ///
    /// Leaves SCL low, ready for the first bit.
    pub fn start(&mut self) -> Result<(), Error<W::Error>> {
        self.drive(Line::Sda, true)?;
        self.drive(Line::Scl, true)?;
        self.wait(1);
        self.drive(Line::Sda, false)?;
        self.wait(1);
        self.drive(Line::Scl, false)?;
        self.wait(1);
        Ok(())
    }

    /// Stop condition: SDA rises while SCL is high
    ///
    /// Requires SCL low. Leaves both lines high.
    pub fn stop(&mut self) -> Result<(), Error<W::Error>> {
        self.require_scl(Primitive::Stop, false)?;
        self.drive(Line::Sda, false)?;
        self.drive(Line::Scl, true)?;
        self.wait(1);
        self.drive(Line::Sda, true)?;
        self.wait(1);
        Ok(())
    }

    /// Prepare for a repeated start
    ///
    /// Requires SCL low. Leaves both lines high without a stop condition, so
    /// the next [`start`](Self::start) continues the same logical transaction.
    pub fn continuation(&mut self) -> Result<(), Error<W::Error>> {
        self.require_scl(Primitive::Continuation, false)?;
        self.drive(Line::Sda, true)?;
        self.drive(Line::Scl, false)?;
        self.wait(1);
        self.drive(Line::Scl, true)?;
        self.wait(1);
        Ok(())
    }

    /// First half of a clock pulse
    ///
    /// With `Some(level)`, SDA is set up to `level` for one bit-period first.
    /// With `None` the engine lets go of SDA (if it was holding it low) so the
    /// target's level is what gets sampled. SCL is then raised and SDA
    /// sampled.
    ///
    /// Requires SCL low, leaves SCL high. Returns the sampled SDA level.
    pub fn bit_start(&mut self, data: Option<bool>) -> Result<bool, Error<W::Error>> {
        self.require_scl(Primitive::BitStart, false)?;
        match data {
            Some(level) => {
                self.drive(Line::Sda, level)?;
                self.wait(1);
            }
            None if self.sda_low => self.drive(Line::Sda, true)?,
            None => {}
        }
        self.drive(Line::Scl, true)?;
        let sampled = self.wire.sample(Line::Sda).map_err(Error::Line)?;
        self.wait(1);
        Ok(sampled)
    }

    /// Second half of a clock pulse
    ///
    /// Requires SCL high, leaves SCL low.
    pub fn bit_stop(&mut self) -> Result<(), Error<W::Error>> {
        self.require_scl(Primitive::BitStop, true)?;
        self.drive(Line::Scl, false)?;
        self.wait(1);
        Ok(())
    }

    /// Acknowledge a received byte
    ///
    /// Clocks out a low bit, then releases SDA.
    pub fn ack(&mut self) -> Result<(), Error<W::Error>> {
        self.bit_start(Some(false))?;
        self.bit_stop()?;
        self.drive(Line::Sda, true)?;
        self.wait(1);
        Ok(())
    }

    /// Clock out one byte MSB first and read the acknowledgement
    ///
    /// Returns `true` if the target pulled SDA low on the ninth clock.
    pub fn byte_output(&mut self, byte: u8) -> Result<bool, Error<W::Error>> {
        for bit in byte_bits(byte) {
            self.bit_start(Some(bit))?;
            self.bit_stop()?;
        }
        let ack = self.bit_start(None)?;
        self.bit_stop()?;
        Ok(!ack)
    }

    /// Clock in one byte MSB first
    ///
    /// With `do_ack` the byte is acknowledged; otherwise no ninth clock is
    /// generated, which is how the last byte of a read is left unacknowledged.
    pub fn byte_input(&mut self, do_ack: bool) -> Result<u8, Error<W::Error>> {
        let mut bits = [false; BYTE_WIDTH];
        for bit in bits.iter_mut() {
            *bit = self.bit_start(None)?;
            self.bit_stop()?;
        }
        if do_ack {
            self.ack()?;
        }
        Ok(byte_from_bits(&bits))
    }
}

impl<SCL, SDA, SCLI, SDAI, T, R> I2cMaster<PinWire<SCL, SDA, SCLI, SDAI>, T, R>
where
    SCL: OutputPin,
    SDA: OutputPin,
    SCLI: InputPin,
    SDAI: InputPin,
    T: Wait,
    R: FailureReport,
{
    /// Create an engine straight from drive and sense pins
    pub fn from_pins(
        scl: SCL,
        sda: SDA,
        scl_sense: SCLI,
        sda_sense: SDAI,
        delay: T,
        report: R,
        config: BusConfig,
    ) -> Self {
        Self::new(
            PinWire::new(scl, sda, scl_sense, sda_sense),
            delay,
            report,
            config,
        )
    }
}
