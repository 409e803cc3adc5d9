//! Bit sequence conversion
//!
//! I2C puts the most significant bit on the wire first. Every helper here
//! takes the order explicitly so a call site always says which one it means.

use heapless::Vec;

/// Widest value the conversion helpers handle
pub const MAX_WIDTH: usize = 32;

/// Bits in one transferred byte
pub const BYTE_WIDTH: usize = 8;

/// Bit sequence produced by [`to_bits`]
pub type Bits = Vec<bool, MAX_WIDTH>;

/// Order in which a sequence lists the bits of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// Most significant bit first (I2C wire order)
    MsbFirst,
    /// Least significant bit first
    LsbFirst,
}

/// Expand the low `width` bits of `value` into a sequence
///
/// Returns `None` if `width` is zero or wider than [`MAX_WIDTH`].
pub fn to_bits(value: u32, width: usize, order: BitOrder) -> Option<Bits> {
    if width == 0 || width > MAX_WIDTH {
        return None;
    }

    let mut bits = Bits::new();
    for i in 0..width {
        let index = match order {
            BitOrder::MsbFirst => width - 1 - i,
            BitOrder::LsbFirst => i,
        };
        bits.push((value >> index) & 1 == 1).ok()?;
    }
    Some(bits)
}

/// Assemble a value from a bit sequence
///
/// The sequence length is the width. Returns `None` for an empty sequence or
/// one longer than [`MAX_WIDTH`].
pub fn from_bits(bits: &[bool], order: BitOrder) -> Option<u32> {
    if bits.is_empty() || bits.len() > MAX_WIDTH {
        return None;
    }

    let push = |acc: u32, &bit: &bool| (acc << 1) | u32::from(bit);
    Some(match order {
        BitOrder::MsbFirst => bits.iter().fold(0, push),
        BitOrder::LsbFirst => bits.iter().rev().fold(0, push),
    })
}

/// Bits of a byte in wire order (MSB first)
pub fn byte_bits(byte: u8) -> [bool; BYTE_WIDTH] {
    core::array::from_fn(|i| byte & (0x80 >> i) != 0)
}

/// Byte from bits in wire order (MSB first)
pub fn byte_from_bits(bits: &[bool; BYTE_WIDTH]) -> u8 {
    bits.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_byte_bits_msb_first() {
        assert_eq!(
            byte_bits(0xA1),
            [true, false, true, false, false, false, false, true]
        );
        assert!(byte_bits(0x01)[7]);
        assert!(byte_bits(0x80)[0]);
    }

    #[test]
    fn test_byte_round_trip_all_values() {
        for b in 0..=255u8 {
            assert_eq!(byte_from_bits(&byte_bits(b)), b);
        }
    }

    #[test]
    fn test_orders_are_mirrored() {
        let msb = to_bits(0b1101, 4, BitOrder::MsbFirst).unwrap();
        let lsb = to_bits(0b1101, 4, BitOrder::LsbFirst).unwrap();
        assert_eq!(msb.as_slice(), &[true, true, false, true]);
        assert_eq!(lsb.as_slice(), &[true, false, true, true]);

        let mut reversed = lsb.clone();
        reversed.reverse();
        assert_eq!(reversed, msb);
    }

    #[test]
    fn test_width_truncates_value() {
        let bits = to_bits(0xFF0F, 8, BitOrder::MsbFirst).unwrap();
        assert_eq!(from_bits(&bits, BitOrder::MsbFirst), Some(0x0F));
    }

    #[test]
    fn test_width_limits() {
        assert!(to_bits(1, 0, BitOrder::MsbFirst).is_none());
        assert!(to_bits(1, MAX_WIDTH + 1, BitOrder::LsbFirst).is_none());
        assert_eq!(from_bits(&[], BitOrder::MsbFirst), None);
        assert_eq!(from_bits(&[true; MAX_WIDTH + 1], BitOrder::MsbFirst), None);

        let full = to_bits(u32::MAX, MAX_WIDTH, BitOrder::MsbFirst).unwrap();
        assert_eq!(from_bits(&full, BitOrder::MsbFirst), Some(u32::MAX));
    }

    #[test]
    fn test_byte_helpers_match_generic() {
        for b in [0x00u8, 0x10, 0x5A, 0xAB, 0xFF] {
            let generic = to_bits(u32::from(b), BYTE_WIDTH, BitOrder::MsbFirst).unwrap();
            assert_eq!(generic.as_slice(), &byte_bits(b));
        }
    }

    proptest! {
        #[test]
        fn prop_round_trip(
            value in any::<u32>(),
            width in 1usize..=MAX_WIDTH,
            msb in any::<bool>()
        ) {
            let order = if msb { BitOrder::MsbFirst } else { BitOrder::LsbFirst };
            let mask = if width == MAX_WIDTH { u32::MAX } else { (1u32 << width) - 1 };
            let bits = to_bits(value, width, order).unwrap();
            prop_assert_eq!(bits.len(), width);
            prop_assert_eq!(from_bits(&bits, order), Some(value & mask));
        }
    }
}
