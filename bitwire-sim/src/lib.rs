//! Host simulation for the bitwire engine
//!
//! This crate provides a two-line bus and an I2C target to run the engine
//! against without hardware:
//!
//! - [`SimBus`] - wired-AND SCL/SDA with edge and start/stop detection
//! - [`SimClock`] - discrete time axis for the wait capability
//! - [`I2cTarget`] - target-side protocol state machine with an event log
//! - [`RegisterFile`] - register-pointer device model
//!
//! # Example
//!
//! ```ignore
//! let target = I2cTarget::new(0x50, RegisterFile::<16>::new());
//! let mut master = I2cMaster::new(SimBus::new(target), SimClock::new(), NoReport, BusConfig::new(1));
//! master.write(&[0xA0, 0x04, 0x99], false)?;
//! assert_eq!(master.wire().target().device().registers()[4], 0x99);
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod device;
pub mod target;

pub use bus::{SimBus, SimClock};
pub use device::{Device, RegisterFile};
pub use target::{BusEvent, I2cTarget, Target, EVENT_LOG_LEN};
