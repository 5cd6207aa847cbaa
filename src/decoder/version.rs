//! Version information blocks carried by versions 7 through 40.

use log::{debug, trace};

use super::bch;
use crate::error::{DecodeError, Result};
use crate::models::{BitMatrix, Version};

/// BCH(18,6) generator polynomial
pub const VERSION_GENERATOR: u32 = 0x1F25;

/// Version codewords for versions 7..=40; the version is `codeword >> 12`
pub const VERSION_CODEWORDS: [u32; 34] = [
    0x07C94, 0x085BC, 0x09A99, 0x0A4D3, 0x0BBF6, 0x0C762, 0x0D847, 0x0E60D, 0x0F928, 0x10B78,
    0x1145D, 0x12A17, 0x13532, 0x149A6, 0x15683, 0x168C9, 0x177EC, 0x18EC4, 0x191E1, 0x1AFAB,
    0x1B08E, 0x1CC1A, 0x1D33F, 0x1ED75, 0x1F250, 0x209D5, 0x216F0, 0x228BA, 0x2379F, 0x24B0B,
    0x2542E, 0x26A64, 0x27541, 0x28C69,
];

/// Which of the two 6x3 blocks to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    /// Left of the top-right finder
    TopRight,
    /// Above the bottom-left finder
    BottomLeft,
}

fn position(i: usize, size: usize, copy: Block) -> (usize, usize) {
    let near = size - 11 + i % 3;
    let far = i / 3;
    match copy {
        Block::TopRight => (near, far),
        Block::BottomLeft => (far, near),
    }
}

fn read_copy(matrix: &BitMatrix, copy: Block) -> u32 {
    let size = matrix.width();
    (0..18).fold(0, |acc, i| {
        let (x, y) = position(i, size, copy);
        acc | (u32::from(matrix.get(x, y)) << i)
    })
}

/// Decode the version blocks, top-right copy first
pub fn extract(matrix: &BitMatrix) -> Result<Version> {
    for copy in [Block::TopRight, Block::BottomLeft] {
        let raw = read_copy(matrix, copy);
        match bch::nearest_codeword(raw, &VERSION_CODEWORDS) {
            Some(index) => {
                let number = (VERSION_CODEWORDS[index] >> 12) as i32;
                debug!("version {} from {:?} block", number, copy);
                return Version::new(number).ok_or(DecodeError::VersionOutOfRange(number));
            }
            None => trace!("version block {:?} read 0x{:05X}, no match", copy, raw),
        }
    }
    Err(DecodeError::VersionUndecodable)
}

/// Settle the version of a sampled symbol
///
/// Provisional versions up to 6 are trusted; larger ones defer to the version blocks.
pub fn resolve(provisional: i32, matrix: &BitMatrix) -> Result<Version> {
    let version = Version::new(provisional).ok_or(DecodeError::VersionOutOfRange(provisional))?;
    if version.has_version_info() {
        extract(matrix)
    } else {
        Ok(version)
    }
}

/// Draw both version blocks into `matrix`; no-op below version 7
pub fn place(version: Version, matrix: &mut BitMatrix) {
    if !version.has_version_info() {
        return;
    }
    let bits = VERSION_CODEWORDS[version.number() as usize - 7];
    let size = matrix.width();
    for i in 0..18 {
        let dark = (bits >> i) & 1 == 1;
        for copy in [Block::TopRight, Block::BottomLeft] {
            let (x, y) = position(i, size, copy);
            matrix.set(x, y, dark);
        }
    }
}
