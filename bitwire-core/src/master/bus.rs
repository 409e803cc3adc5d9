//! Addressed transfers through [`I2cBus`]
//!
//! The engine's own `write`/`read` take raw byte sequences. This adapter
//! prepends the address byte with the R/W bit, so device drivers written
//! against [`I2cBus`] can run on the bit-banged engine. Acknowledgement
//! failures follow the engine's nack policy as usual: under
//! `NackPolicy::Continue` they are reported and the call still succeeds.

use core::iter;

use bitwire_hal::i2c::{read_address, write_address};
use bitwire_hal::{I2cBus, Wait, Wire};

use super::I2cMaster;
use crate::error::Error;
use crate::report::{FailureReport, Stage};

impl<W: Wire, T: Wait, R: FailureReport> I2cBus for I2cMaster<W, T, R> {
    type Error = Error<W::Error>;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.start()?;
        let bytes = iter::once(write_address(address)).chain(data.iter().copied());
        self.transmit(bytes, Stage::Write)?;
        self.finish(false)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.start()?;
        self.transmit(iter::once(read_address(address)), Stage::ReadPrefix)?;
        self.receive(buf)?;
        self.finish(false)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.start()?;
        let bytes = iter::once(write_address(address)).chain(write_data.iter().copied());
        self.transmit(bytes, Stage::Write)?;
        self.finish(true)?;

        self.start()?;
        self.transmit(iter::once(read_address(address)), Stage::ReadPrefix)?;
        self.receive(read_buf)?;
        self.finish(false)
    }
}
