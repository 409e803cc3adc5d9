//! I2C bus abstractions
//!
//! Provides the addressed, byte-level view of an I2C master. The bit-level
//! engine in bitwire-core implements this trait on top of [`crate::Wire`].

/// Addressed I2C master
///
/// Implementations frame each call with start/stop and send the address
/// byte themselves; callers pass the bare 7-bit address.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read with a repeated start in between
    ///
    /// The bus is not released between the two phases, so no other master
    /// can slip in between selecting a register and reading it.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically register address)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

/// Address byte for a write to a 7-bit address (R/W bit clear)
pub const fn write_address(address: u8) -> u8 {
    (address & 0x7F) << 1
}

/// Address byte for a read from a 7-bit address (R/W bit set)
pub const fn read_address(address: u8) -> u8 {
    ((address & 0x7F) << 1) | 1
}
