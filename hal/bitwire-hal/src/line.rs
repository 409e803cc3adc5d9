//! Two-line bus abstractions
//!
//! Provides the drive/sample/wait capabilities the I2C engine is built on.
//! Levels are plain `bool`s: `true` is a released (high) line, `false` is a
//! line pulled low.

/// One of the two I2C bus lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Serial clock
    Scl,
    /// Serial data
    Sda,
}

/// Drive and sense access to an SCL/SDA pair
///
/// Implementations own whatever sits behind the lines. Driving a line high
/// releases it; on an open-drain bus another party may still hold it low,
/// which is why sampling is a separate operation.
pub trait Wire {
    /// Error type for line access
    type Error;

    /// Drive a line to the given level
    fn drive(&mut self, line: Line, high: bool) -> Result<(), Self::Error>;

    /// Sample the current level of a line
    fn sample(&mut self, line: Line) -> Result<bool, Self::Error>;

    /// Release a line (drive it high)
    fn release(&mut self, line: Line) -> Result<(), Self::Error> {
        self.drive(line, true)
    }

    /// Pull a line low
    fn pull_low(&mut self, line: Line) -> Result<(), Self::Error> {
        self.drive(line, false)
    }
}

/// Blocking wait on an abstract time axis
///
/// The unit is whatever the implementation says it is: simulator ticks,
/// clock cycles, nanoseconds.
pub trait Wait {
    /// Block the caller for `units` time units
    fn wait(&mut self, units: u32);
}

impl<W: Wire + ?Sized> Wire for &mut W {
    type Error = W::Error;

    fn drive(&mut self, line: Line, high: bool) -> Result<(), Self::Error> {
        W::drive(self, line, high)
    }

    fn sample(&mut self, line: Line) -> Result<bool, Self::Error> {
        W::sample(self, line)
    }
}

impl<T: Wait + ?Sized> Wait for &mut T {
    fn wait(&mut self, units: u32) {
        T::wait(self, units)
    }
}
