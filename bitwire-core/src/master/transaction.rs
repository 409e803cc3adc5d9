//! Write and read transactions
//!
//! A transaction is framed by [`I2cMaster::start`] and ends with either
//! [`I2cMaster::stop`] or [`I2cMaster::continuation`]. Every written byte's
//! acknowledgement is checked; a missing one is reported and then handled
//! according to the engine's [`NackPolicy`].

use bitwire_hal::{Wait, Wire};
use heapless::Vec;

use super::I2cMaster;
use crate::config::NackPolicy;
use crate::error::Error;
use crate::report::{AckFailure, FailureReport, Stage};

/// Most bytes [`I2cMaster::read`] returns in one call
///
/// [`I2cMaster::read_into`] has no such limit.
pub const MAX_READ_LEN: usize = 32;

impl<W: Wire, T: Wait, R: FailureReport> I2cMaster<W, T, R> {
    /// Write a byte sequence
    ///
    /// Issues a start, clocks out every byte with an acknowledgement check,
    /// then issues a repeated start if `continuation` is set, else a stop.
    /// An empty sequence produces only the framing.
    pub fn write(&mut self, bytes: &[u8], continuation: bool) -> Result<(), Error<W::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("I2C write: {} bytes, cont={}", bytes.len(), continuation);

        self.start()?;
        self.transmit(bytes.iter().copied(), Stage::Write)?;
        self.finish(continuation)
    }

    /// Write a prefix, then read `num` bytes
    ///
    /// Every byte read except the last is acknowledged. Fails with
    /// [`Error::ReadTooLong`] before touching the bus if `num` exceeds
    /// [`MAX_READ_LEN`].
    pub fn read(
        &mut self,
        prefix: &[u8],
        num: usize,
        continuation: bool,
    ) -> Result<Vec<u8, MAX_READ_LEN>, Error<W::Error>> {
        let mut data = Vec::new();
        data.resize(num, 0)
            .map_err(|_| Error::ReadTooLong { requested: num })?;
        self.read_into(prefix, &mut data, continuation)?;
        Ok(data)
    }

    /// Write a prefix, then fill `buf` from the bus
    ///
    /// Same sequence as [`read`](Self::read), reading `buf.len()` bytes.
    pub fn read_into(
        &mut self,
        prefix: &[u8],
        buf: &mut [u8],
        continuation: bool,
    ) -> Result<(), Error<W::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!(
            "I2C read: {} prefix bytes, {} data bytes, cont={}",
            prefix.len(),
            buf.len(),
            continuation
        );

        self.start()?;
        self.transmit(prefix.iter().copied(), Stage::ReadPrefix)?;
        self.receive(buf)?;
        self.finish(continuation)
    }

    /// Clock out bytes, checking each acknowledgement
    pub(super) fn transmit<I>(&mut self, bytes: I, stage: Stage) -> Result<(), Error<W::Error>>
    where
        I: IntoIterator<Item = u8>,
    {
        for (index, byte) in bytes.into_iter().enumerate() {
            if !self.byte_output(byte)? {
                self.nacked(AckFailure {
                    time: self.now(),
                    index,
                    byte,
                    stage,
                })?;
            }
        }
        Ok(())
    }

    /// Fill `buf`, acknowledging all but the last byte
    pub(super) fn receive(&mut self, buf: &mut [u8]) -> Result<(), Error<W::Error>> {
        let count = buf.len();
        for (i, slot) in buf.iter_mut().enumerate() {
            *slot = self.byte_input(i + 1 < count)?;
        }
        Ok(())
    }

    /// End a transaction with a repeated start or a stop
    pub(super) fn finish(&mut self, continuation: bool) -> Result<(), Error<W::Error>> {
        if continuation {
            self.continuation()
        } else {
            self.stop()
        }
    }

    fn nacked(&mut self, failure: AckFailure) -> Result<(), Error<W::Error>> {
        #[cfg(feature = "defmt")]
        defmt::warn!(
            "I2C: {} (byte {} = {=u8:#x}, t={})",
            failure.message(),
            failure.index,
            failure.byte,
            failure.time
        );

        self.report.report(&failure);
        match self.nack_policy {
            NackPolicy::Continue => Ok(()),
            NackPolicy::Abort => {
                self.stop()?;
                Err(Error::Nack(failure))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{master, Event::*};
    use super::*;
    use bitwire_hal::Line::*;

    #[test]
    fn test_empty_write_is_framing_only() {
        let (mut m, probe) = master(1);
        m.write(&[], false).unwrap();

        assert_eq!(
            probe.events(),
            [
                // start
                Drive(Sda, true),
                Drive(Scl, true),
                Delay(5),
                Drive(Sda, false),
                Delay(5),
                Drive(Scl, false),
                Delay(5),
                // stop
                Drive(Sda, false),
                Drive(Scl, true),
                Delay(5),
                Drive(Sda, true),
                Delay(5),
            ]
        );
        assert!(m.report().is_empty());
    }

    #[test]
    fn test_empty_write_with_continuation() {
        let (mut m, probe) = master(1);
        m.write(&[], true).unwrap();

        assert_eq!(probe.count(Sample(Sda)), 0);
        let events = probe.events();
        assert_eq!(
            &events[events.len() - 5..],
            [
                Drive(Sda, true),
                Drive(Scl, false),
                Delay(5),
                Drive(Scl, true),
                Delay(5),
            ]
        );
        assert_eq!(probe.levels(), (true, true));
    }

    #[test]
    fn test_single_byte_acked() {
        let (mut m, probe) = master(2);
        probe.written(true);
        m.write(&[0xAB], false).unwrap();

        assert!(m.report().is_empty());
        assert_eq!(probe.levels(), (true, true));
        assert_eq!(probe.count(Sample(Sda)), 9);
        // start 3 + 8 bits * 3 + ack 2 + stop 2, at 10 units per bit-period
        assert_eq!(m.now(), 310);
        assert_eq!(m.now(), probe.waited());
    }

    #[test]
    fn test_nack_continues_by_default() {
        let (mut m, probe) = master(1);
        probe.written(true);
        probe.written(false);
        probe.written(true);

        assert_eq!(m.write(&[0x20, 0x11, 0x22], false), Ok(()));

        // All three bytes clocked: 9 pulses each plus the stop's SCL rise
        // and the start's initial SCL high
        assert_eq!(probe.count(Drive(Scl, true)), 3 * 9 + 2);
        assert_eq!(probe.levels(), (true, true));

        let log = m.report();
        assert_eq!(log.total(), 1);
        let failure = log.entries()[0];
        assert_eq!(failure.index, 1);
        assert_eq!(failure.byte, 0x11);
        assert_eq!(failure.stage, Stage::Write);
        // Reported right after the second byte's ack clock
        assert_eq!(failure.time, (3 + 2 * 26) * 5);
    }

    #[test]
    fn test_nack_abort_stops_early() {
        let (m, probe) = master(1);
        let mut m = m.with_nack_policy(NackPolicy::Abort);
        probe.written(true);
        probe.written(false);

        let result = m.write(&[0x20, 0x11, 0x22], true);

        let failure = AckFailure {
            time: (3 + 2 * 26) * 5,
            index: 1,
            byte: 0x11,
            stage: Stage::Write,
        };
        assert_eq!(result, Err(Error::Nack(failure)));
        assert_eq!(m.report().entries(), [failure]);

        // Third byte never clocked; stop issued instead of the continuation
        assert_eq!(probe.count(Drive(Scl, true)), 2 * 9 + 2);
        let events = probe.events();
        assert_eq!(
            &events[events.len() - 5..],
            [
                Drive(Sda, false),
                Drive(Scl, true),
                Delay(5),
                Drive(Sda, true),
                Delay(5),
            ]
        );
    }

    #[test]
    fn test_read_acks_all_but_last() {
        let (mut m, probe) = master(1);
        probe.written(true);
        probe.supplies(0x01, true);
        probe.supplies(0x02, true);
        probe.supplies(0x03, false);

        let data = m.read(&[0x10], 3, false).unwrap();

        assert_eq!(data.as_slice(), &[0x01, 0x02, 0x03]);
        assert!(m.report().is_empty());
        // start + seven zero bits of 0x10 + two acks + stop
        assert_eq!(probe.count(Drive(Sda, false)), 1 + 7 + 2 + 1);
        // 9 prefix pulses, 8 per byte, 1 per ack
        assert_eq!(probe.count(Sample(Sda)), 9 + 3 * 8 + 2);
        assert_eq!(probe.levels(), (true, true));
    }

    #[test]
    fn test_read_prefix_nack_reported() {
        let (mut m, probe) = master(1);
        probe.written(false);
        probe.supplies(0xFF, false);

        let data = m.read(&[0x91], 1, false).unwrap();

        assert_eq!(data.as_slice(), &[0xFF]);
        let failure = m.report().entries()[0];
        assert_eq!(failure.index, 0);
        assert_eq!(failure.stage, Stage::ReadPrefix);
    }

    #[test]
    fn test_read_nothing() {
        let (mut m, probe) = master(1);
        probe.written(true);

        let data = m.read(&[0x10], 0, true).unwrap();

        assert!(data.is_empty());
        assert_eq!(probe.count(Sample(Sda)), 9);
        assert_eq!(probe.levels(), (true, true));
    }

    #[test]
    fn test_read_too_long() {
        let (mut m, probe) = master(1);

        assert_eq!(
            m.read(&[0x10], MAX_READ_LEN + 1, false),
            Err(Error::ReadTooLong {
                requested: MAX_READ_LEN + 1
            })
        );
        assert!(probe.events().is_empty());
    }

    #[test]
    fn test_read_into_has_no_limit() {
        let (mut m, probe) = master(0);
        probe.written(true);
        for _ in 0..MAX_READ_LEN {
            probe.supplies(0x5A, true);
        }
        probe.supplies(0xA5, false);

        let mut buf = [0u8; MAX_READ_LEN + 1];
        m.read_into(&[0x10], &mut buf, false).unwrap();

        assert!(buf[..MAX_READ_LEN].iter().all(|&b| b == 0x5A));
        assert_eq!(buf[MAX_READ_LEN], 0xA5);
    }

    #[test]
    fn test_write_then_read_with_repeated_start() {
        let (mut m, probe) = master(1);
        probe.written(true);
        probe.written(true);
        probe.written(true);
        probe.supplies(0x42, false);

        m.write(&[0xA0, 0x07], true).unwrap();
        assert_eq!(m.scl_level(), Some(true));
        let data = m.read(&[0xA1], 1, false).unwrap();

        assert_eq!(data.as_slice(), &[0x42]);
        assert!(m.report().is_empty());
    }
}
