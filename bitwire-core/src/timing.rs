//! Bit-period timing
//!
//! Each bit-period is split into five phase sub-steps of `divider` units, so
//! waiting `n` bit-periods costs `n * divider * 5` units of the injected
//! wait primitive.

/// Phase sub-steps per bit-period
pub const PHASES_PER_BIT: u32 = 5;

/// Bit-periods spent by [`crate::I2cMaster::idle`]
pub const IDLE_BIT_PERIODS: u32 = 3;

/// Wait units for `bit_periods` bit-periods at the given divider
///
/// Saturates at `u32::MAX` rather than wrapping.
pub const fn wait_units(divider: u32, bit_periods: u32) -> u32 {
    divider
        .saturating_mul(PHASES_PER_BIT)
        .saturating_mul(bit_periods)
}

/// Wait units in one bit-period at the given divider
pub const fn bit_period(divider: u32) -> u32 {
    wait_units(divider, 1)
}
