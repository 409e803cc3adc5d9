//! bitwire Hardware Abstraction Layer
//!
//! This crate defines the capabilities the I2C engine consumes. The engine
//! never touches hardware itself: it drives and samples two lines and asks
//! for time to pass, and whatever implements these traits decides what that
//! means (GPIO pins, a simulator, a test recorder).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Caller (application, test harness)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bitwire-core (protocol engine)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bitwire-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  bitwire-sim  │
//! │ pins + delay  │       │  (host model) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`line::Wire`] - Drive and sample SCL/SDA
//! - [`line::Wait`] - Block for a number of abstract time units
//! - [`i2c::I2cBus`] - 7-bit addressed I2C master operations

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod line;
pub mod pins;

// Re-export key traits at crate root for convenience
pub use i2c::I2cBus;
pub use line::{Line, Wait, Wire};
pub use pins::{DelayWait, PinError, PinWire};
