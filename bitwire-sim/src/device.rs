//! Device models behind an I2C target
//!
//! [`crate::I2cTarget`] handles framing, addressing and acknowledgement
//! timing; a [`Device`] only decides what written bytes mean and what to
//! send back.

/// Byte-level behaviour of an addressed device
pub trait Device {
    /// The target was addressed; `read` is the R/W bit
    fn select(&mut self, _read: bool) {}

    /// A data byte was written; return `true` to acknowledge it
    fn write(&mut self, byte: u8) -> bool;

    /// Next byte to send to the master
    fn read(&mut self) -> u8;

    /// A stop condition ended the transfer
    fn stop(&mut self) {}
}

/// Register-pointer device
///
/// The first byte of every write selects a register; further bytes are
/// stored from there with auto-increment. Reads return from the current
/// pointer, also auto-incrementing. A pointer or data byte past the end is
/// not acknowledged, and reads past the end return `0xFF`.
#[derive(Debug, Clone)]
pub struct RegisterFile<const N: usize> {
    registers: [u8; N],
    pointer: usize,
    /// Next written byte is a register number
    expect_pointer: bool,
}

impl<const N: usize> Default for RegisterFile<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RegisterFile<N> {
    /// Create a device with all registers zeroed
    pub const fn new() -> Self {
        Self::with_registers([0; N])
    }

    /// Create a device with preset register contents
    pub const fn with_registers(registers: [u8; N]) -> Self {
        Self {
            registers,
            pointer: 0,
            expect_pointer: false,
        }
    }

    /// Register contents
    pub fn registers(&self) -> &[u8; N] {
        &self.registers
    }

    /// Current register pointer
    pub fn pointer(&self) -> usize {
        self.pointer
    }
}

impl<const N: usize> Device for RegisterFile<N> {
    fn select(&mut self, read: bool) {
        self.expect_pointer = !read;
    }

    fn write(&mut self, byte: u8) -> bool {
        if self.expect_pointer {
            self.expect_pointer = false;
            self.pointer = byte as usize;
            return self.pointer < N;
        }

        match self.registers.get_mut(self.pointer) {
            Some(register) => {
                *register = byte;
                self.pointer += 1;
                true
            }
            None => false,
        }
    }

    fn read(&mut self) -> u8 {
        let value = self.registers.get(self.pointer).copied().unwrap_or(0xFF);
        self.pointer = self.pointer.saturating_add(1);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_then_data() {
        let mut dev = RegisterFile::<4>::new();
        dev.select(false);

        assert!(dev.write(1));
        assert!(dev.write(0xAA));
        assert!(dev.write(0xBB));
        assert_eq!(dev.registers(), &[0, 0xAA, 0xBB, 0]);
        assert_eq!(dev.pointer(), 3);
    }

    #[test]
    fn test_nack_past_end() {
        let mut dev = RegisterFile::<2>::new();

        dev.select(false);
        assert!(!dev.write(2));

        dev.select(false);
        assert!(dev.write(1));
        assert!(dev.write(0x10));
        assert!(!dev.write(0x20));
        assert_eq!(dev.registers(), &[0, 0x10]);
    }

    #[test]
    fn test_read_auto_increments() {
        let mut dev = RegisterFile::with_registers([7, 8]);
        dev.select(true);

        assert_eq!(dev.read(), 7);
        assert_eq!(dev.read(), 8);
        assert_eq!(dev.read(), 0xFF);
    }

    #[test]
    fn test_read_select_keeps_pointer() {
        let mut dev = RegisterFile::with_registers([1, 2, 3]);
        dev.select(false);
        dev.write(2);

        dev.select(true);
        assert_eq!(dev.read(), 3);
    }
}
