//! Simulated open-drain bus
//!
//! Both lines are wired-AND: a line is high only while nobody pulls it low.
//! The master owns SCL (no clock stretching); SDA is the AND of the master's
//! and the target's outputs. Every level change is forwarded to the target
//! as an edge, and an SDA change while SCL is high as a start or stop.

use core::convert::Infallible;

use bitwire_hal::{Line, Wait, Wire};

use crate::target::Target;

/// Two-line bus shared by the master and one target
#[derive(Debug)]
pub struct SimBus<T> {
    target: T,
    /// Master's SCL output
    scl: bool,
    /// Master's SDA output
    sda: bool,
}

impl<T: Target> SimBus<T> {
    /// Create an idle bus (both lines released) with `target` attached
    pub fn new(target: T) -> Self {
        Self {
            target,
            scl: true,
            sda: true,
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Bus level of SCL
    pub fn scl(&self) -> bool {
        self.scl
    }

    /// Bus level of SDA
    pub fn sda(&self) -> bool {
        self.sda && self.target.sda()
    }

    /// Both lines released and high
    pub fn is_idle(&self) -> bool {
        self.scl() && self.sda()
    }

    /// Detach the target
    pub fn free(self) -> T {
        self.target
    }

    fn set_scl(&mut self, high: bool) {
        if self.scl == high {
            return;
        }
        self.scl = high;
        if high {
            let sda = self.sda();
            self.target.on_scl_rise(sda);
        } else {
            self.target.on_scl_fall();
        }
    }

    fn set_sda(&mut self, high: bool) {
        let before = self.sda();
        self.sda = high;
        let after = self.sda();

        if self.scl && before != after {
            if after {
                self.target.on_stop();
            } else {
                self.target.on_start();
            }
        }
    }
}

impl<T: Target> Wire for SimBus<T> {
    type Error = Infallible;

    fn drive(&mut self, line: Line, high: bool) -> Result<(), Infallible> {
        match line {
            Line::Scl => self.set_scl(high),
            Line::Sda => self.set_sda(high),
        }
        Ok(())
    }

    fn sample(&mut self, line: Line) -> Result<bool, Infallible> {
        Ok(match line {
            Line::Scl => self.scl(),
            Line::Sda => self.sda(),
        })
    }
}

/// Discrete simulated time
///
/// Waiting never blocks; it only advances the clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimClock {
    now: u64,
}

impl SimClock {
    pub const fn new() -> Self {
        Self { now: 0 }
    }

    /// Units waited so far
    pub fn now(&self) -> u64 {
        self.now
    }
}

impl Wait for SimClock {
    fn wait(&mut self, units: u32) {
        self.now += u64::from(units);
    }
}
