//! Engine errors

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

use crate::report::AckFailure;

/// Engine operations that check the SCL level before touching the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Primitive {
    /// Stop condition
    Stop,
    /// Repeated start
    Continuation,
    /// First half of a clock pulse
    BitStart,
    /// Second half of a clock pulse
    BitStop,
}

/// Errors that can occur while driving the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The injected wire failed
    Line(E),
    /// A written byte was not acknowledged and the nack policy is `Abort`
    ///
    /// The engine has already issued a stop when this is returned.
    Nack(AckFailure),
    /// A primitive was called with SCL at the wrong level
    ///
    /// Nothing was driven for the offending primitive. The transaction it
    /// belonged to is abandoned; the next `start` or `idle` recovers the bus.
    BusState {
        /// Primitive whose precondition failed
        primitive: Primitive,
        /// Level SCL had to be at
        expected_scl_high: bool,
    },
    /// More bytes requested than [`crate::MAX_READ_LEN`]
    ReadTooLong {
        /// Number of bytes asked for
        requested: usize,
    },
}

impl<E: core::fmt::Debug> embedded_hal::i2c::Error for Error<E> {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::Line(_) => ErrorKind::Bus,
            Error::Nack(failure) if failure.index == 0 => {
                ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
            }
            Error::Nack(_) => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data),
            Error::BusState { .. } => ErrorKind::Other,
            Error::ReadTooLong { .. } => ErrorKind::Overrun,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Stage;
    use embedded_hal::i2c::Error as _;

    fn failure(index: usize) -> AckFailure {
        AckFailure {
            time: 100,
            index,
            byte: 0xA0,
            stage: Stage::Write,
        }
    }

    #[test]
    fn test_nack_source() {
        let address: Error<()> = Error::Nack(failure(0));
        let data: Error<()> = Error::Nack(failure(2));
        assert_eq!(
            address.kind(),
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
        );
        assert_eq!(
            data.kind(),
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)
        );
    }

    #[test]
    fn test_other_kinds() {
        assert_eq!(Error::Line(()).kind(), ErrorKind::Bus);
        assert_eq!(
            Error::<()>::BusState {
                primitive: Primitive::Stop,
                expected_scl_high: false,
            }
            .kind(),
            ErrorKind::Other
        );
        assert_eq!(
            Error::<()>::ReadTooLong { requested: 64 }.kind(),
            ErrorKind::Overrun
        );
    }
}
