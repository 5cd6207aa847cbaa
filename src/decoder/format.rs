//! Format information: error-correction level and mask pattern.

use log::{debug, trace};

use super::bch;
use crate::error::{DecodeError, Result};
use crate::models::{BitMatrix, ECLevel, MaskPattern};

/// XOR mask applied to every format codeword
pub const FORMAT_MASK: u32 = 0x5412;

/// BCH(15,5) generator polynomial
pub const FORMAT_GENERATOR: u32 = 0x537;

/// Masked format codewords indexed by `(level_bits << 3) | mask`
pub const FORMAT_CODEWORDS: [u32; 32] = [
    0x5412, 0x5125, 0x5E7C, 0x5B4B, 0x45F9, 0x40CE, 0x4F97, 0x4AA0, 0x77C4, 0x72F3, 0x7DAA,
    0x789D, 0x662F, 0x6318, 0x6C41, 0x6976, 0x1689, 0x13BE, 0x1CE7, 0x19D0, 0x0762, 0x0255,
    0x0D0C, 0x083B, 0x355F, 0x3068, 0x3F31, 0x3A06, 0x24B4, 0x2183, 0x2EDA, 0x2BED,
];

/// Decoded format field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// Error correction level
    pub ec_level: ECLevel,
    /// Data mask pattern
    pub mask_pattern: MaskPattern,
}

/// Module coordinates `(x, y)` of format bit `i`, least significant first, for the copy
/// wrapped around the top-left finder
fn primary_position(i: usize) -> (usize, usize) {
    match i {
        0..=5 => (8, i),
        6 => (8, 7),
        7 => (8, 8),
        8 => (7, 8),
        _ => (14 - i, 8),
    }
}

/// Coordinates of format bit `i` for the copy split between the other two finders
fn secondary_position(i: usize, size: usize) -> (usize, usize) {
    if i < 8 {
        (size - 1 - i, 8)
    } else {
        (8, size - 15 + i)
    }
}

fn read_bits(matrix: &BitMatrix, position: impl Fn(usize) -> (usize, usize)) -> u32 {
    (0..15).fold(0, |acc, i| {
        let (x, y) = position(i);
        acc | (u32::from(matrix.get(x, y)) << i)
    })
}

impl FormatInfo {
    /// Read the primary copy, falling back to the secondary one
    pub fn extract(matrix: &BitMatrix) -> Result<Self> {
        let size = matrix.width();
        let primary = read_bits(matrix, primary_position);
        if let Some(info) = Self::decode(primary) {
            debug!("format from primary copy: {:?}", info);
            return Ok(info);
        }
        let secondary = read_bits(matrix, |i| secondary_position(i, size));
        trace!(
            "primary format 0x{:04X} unmatched, trying secondary 0x{:04X}",
            primary, secondary
        );
        Self::decode(secondary)
            .inspect(|info| debug!("format from secondary copy: {:?}", info))
            .ok_or(DecodeError::FormatUndecodable)
    }

    /// Match a raw 15-bit read against the codeword table
    pub fn decode(raw: u32) -> Option<Self> {
        let index = bch::nearest_codeword(raw, &FORMAT_CODEWORDS)?;
        let bits = FORMAT_CODEWORDS[index] ^ FORMAT_MASK;
        Some(Self {
            ec_level: ECLevel::from_format_bits((bits >> 13) as u8),
            mask_pattern: MaskPattern::from_bits((bits >> 10) as u8),
        })
    }

    /// Masked 15-bit codeword for this field
    pub fn codeword(&self) -> u32 {
        let index = ((self.ec_level.format_bits() as usize) << 3) | self.mask_pattern.bits() as usize;
        FORMAT_CODEWORDS[index]
    }

    /// Draw both copies into `matrix`, plus the fixed dark module
    pub fn place(&self, matrix: &mut BitMatrix) {
        let size = matrix.width();
        let bits = self.codeword();
        for i in 0..15 {
            let dark = (bits >> i) & 1 == 1;
            let (x, y) = primary_position(i);
            matrix.set(x, y, dark);
            let (x, y) = secondary_position(i, size);
            matrix.set(x, y, dark);
        }
        matrix.set(8, size - 8, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_generator() {
        for (i, &word) in FORMAT_CODEWORDS.iter().enumerate() {
            assert_eq!(bch::encode(i as u32, FORMAT_GENERATOR, 10) ^ FORMAT_MASK, word);
        }
    }

    #[test]
    fn test_decode_exact() {
        let info = FormatInfo::decode(0x5412).unwrap();
        assert_eq!(info.ec_level, ECLevel::M);
        assert_eq!(info.mask_pattern, MaskPattern::Pattern0);
        let info = FormatInfo::decode(0x3A06).unwrap();
        assert_eq!(info.ec_level, ECLevel::Q);
        assert_eq!(info.mask_pattern, MaskPattern::Pattern3);
    }

    #[test]
    fn test_place_then_extract_with_damaged_primary() {
        let info = FormatInfo {
            ec_level: ECLevel::H,
            mask_pattern: MaskPattern::Pattern6,
        };
        let mut matrix = BitMatrix::square(25);
        info.place(&mut matrix);
        assert_eq!(FormatInfo::extract(&matrix).unwrap(), info);

        for i in [0, 3, 7, 9, 12] {
            let (x, y) = primary_position(i);
            matrix.toggle(x, y);
        }
        assert_eq!(FormatInfo::extract(&matrix).unwrap(), info);
    }

    #[test]
    fn test_both_copies_damaged() {
        let info = FormatInfo {
            ec_level: ECLevel::L,
            mask_pattern: MaskPattern::Pattern1,
        };
        let mut matrix = BitMatrix::square(21);
        info.place(&mut matrix);
        for i in [1, 4, 10, 13] {
            let (x, y) = primary_position(i);
            matrix.toggle(x, y);
            let (x, y) = secondary_position(i, 21);
            matrix.toggle(x, y);
        }
        assert_eq!(FormatInfo::extract(&matrix), Err(DecodeError::FormatUndecodable));
    }
}
