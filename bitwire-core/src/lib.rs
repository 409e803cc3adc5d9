//! Bit-level I2C bus-master engine
//!
//! This crate turns the two-line capability from bitwire-hal into I2C
//! framing and transfers:
//!
//! - Bit primitives (start, stop, repeated start, clock pulse, ack)
//! - Byte primitives (MSB-first output with ack check, input with optional ack)
//! - Write and read transactions
//! - Timing helper scaling bit-periods by the configured divider
//!
//! The engine does no I/O of its own. Every level change goes through
//! [`bitwire_hal::Wire`] and every delay through [`bitwire_hal::Wait`], so
//! the same code runs against GPIO pins or a host simulation.
//!
//! # Usage
//!
//! ```ignore
//! let mut master = I2cMaster::new(wire, delay, FailureLog::<8>::new(), BusConfig::new(3));
//! master.idle()?;
//! master.write(&[0xA0, 0x10, 0x55], false)?;
//! let data = master.read(&[0xA1], 2, false)?;
//! ```
//!
//! # Concurrency
//!
//! One engine owns one pair of lines. Every operation takes `&mut self`, so a
//! transaction always reaches its stop or repeated start before the next one
//! begins. Two engines driving the same physical lines is undefined and must
//! be serialized by the caller.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bits;
pub mod config;
pub mod error;
pub mod master;
pub mod report;
pub mod timing;

pub use config::{BusConfig, ConfigError, NackPolicy};
pub use error::{Error, Primitive};
pub use master::{I2cMaster, MAX_READ_LEN};
pub use report::{AckFailure, FailureLog, FailureReport, NoReport, Stage};
