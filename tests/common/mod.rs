//! Synthetic symbol renderer for end-to-end tests.

#![allow(dead_code)]

use image::{GrayImage, Luma};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_qr_codewords::decoder::codewords::ZigzagPath;
use rust_qr_codewords::decoder::format::FormatInfo;
use rust_qr_codewords::decoder::function_mask::FunctionMask;
use rust_qr_codewords::decoder::reed_solomon::encode_ecc;
use rust_qr_codewords::decoder::tables::{Capacity, alignment_pattern_positions};
use rust_qr_codewords::decoder::version;
use rust_qr_codewords::utils::geometry::{pad, rotate_about_center};
use rust_qr_codewords::{BitMatrix, ECLevel, MaskPattern, Version};

/// A rendered module grid and what went into it
pub struct Symbol {
    pub version: Version,
    pub level: ECLevel,
    pub mask: MaskPattern,
    pub modules: BitMatrix,
    /// Data codewords per block
    pub block_data: Vec<Vec<u8>>,
    /// Interleaved codeword stream as placed
    pub stream: Vec<u8>,
}

impl Symbol {
    /// Concatenated data codewords in block order
    pub fn data(&self) -> Vec<u8> {
        self.block_data.concat()
    }
}

pub fn version(n: i32) -> Version {
    Version::new(n).expect("valid version")
}

/// Render a complete symbol carrying random data codewords
pub fn render(version: Version, level: ECLevel, mask: MaskPattern, seed: u64) -> Symbol {
    let mut rng = StdRng::seed_from_u64(seed);
    let capacity = Capacity::lookup(version, level);
    let mut block_data = Vec::new();
    let mut block_ecc = Vec::new();
    for shape in capacity.block_shapes() {
        let data: Vec<u8> = (0..shape.data).map(|_| rng.r#gen()).collect();
        block_ecc.push(encode_ecc(&data, shape.ecc()));
        block_data.push(data);
    }
    let stream = interleave(&block_data, &block_ecc);
    let modules = place(version, level, mask, &stream);
    Symbol {
        version,
        level,
        mask,
        modules,
        block_data,
        stream,
    }
}

pub fn interleave(data: &[Vec<u8>], ecc: &[Vec<u8>]) -> Vec<u8> {
    let mut stream = Vec::new();
    for rows in [data, ecc] {
        let longest = rows.iter().map(Vec::len).max().unwrap_or(0);
        for i in 0..longest {
            stream.extend(rows.iter().filter_map(|r| r.get(i)));
        }
    }
    stream
}

/// Draw function patterns and the masked codeword stream
pub fn place(version: Version, level: ECLevel, mask: MaskPattern, stream: &[u8]) -> BitMatrix {
    let n = version.module_count();
    let mut m = BitMatrix::square(n);

    for (ox, oy) in [(0i32, 0i32), (n as i32 - 7, 0), (0, n as i32 - 7)] {
        for dy in 0..7 {
            for dx in 0..7 {
                let ring = (dx - 3i32).abs().max((dy - 3i32).abs());
                m.set((ox + dx) as usize, (oy + dy) as usize, ring != 2);
            }
        }
    }
    for i in 8..n - 8 {
        m.set(i, 6, i % 2 == 0);
        m.set(6, i, i % 2 == 0);
    }
    let centers = alignment_pattern_positions(version);
    for &cx in &centers {
        for &cy in &centers {
            if (cx < 9 && cy < 9) || (cx > n - 10 && cy < 9) || (cx < 9 && cy > n - 10) {
                continue;
            }
            for dy in -2i32..=2 {
                for dx in -2i32..=2 {
                    let dark = dx.abs().max(dy.abs()) != 1;
                    m.set((cx as i32 + dx) as usize, (cy as i32 + dy) as usize, dark);
                }
            }
        }
    }
    FormatInfo {
        ec_level: level,
        mask_pattern: mask,
    }
    .place(&mut m);
    version::place(version, &mut m);

    let function_mask = FunctionMask::new(version);
    for (i, (x, y)) in ZigzagPath::new(&function_mask).enumerate() {
        let bit = stream
            .get(i / 8)
            .is_some_and(|byte| (byte >> (7 - i % 8)) & 1 == 1);
        m.set(x, y, bit ^ mask.is_masked(x, y));
    }
    m
}

/// Paint modules as `module_px` squares behind a quiet zone of `quiet` modules
pub fn rasterize(modules: &BitMatrix, module_px: u32, quiet: u32) -> GrayImage {
    let n = modules.width() as u32;
    let side = (n + 2 * quiet) * module_px;
    GrayImage::from_fn(side, side, |x, y| {
        let col = (x / module_px) as i64 - i64::from(quiet);
        let row = (y / module_px) as i64 - i64::from(quiet);
        let dark = col >= 0 && row >= 0 && modules.get(col as usize, row as usize);
        Luma([if dark { 0 } else { 255 }])
    })
}

/// Grow the canvas by a quarter on each side, then rotate it
pub fn rotated(gray: &GrayImage, degrees: f32) -> GrayImage {
    let padded = pad(gray, gray.width() / 4, 255);
    rotate_about_center(&padded, degrees, 255)
}

/// Swap light and dark
pub fn invert(gray: &GrayImage) -> GrayImage {
    let mut out = gray.clone();
    image::imageops::invert(&mut out);
    out
}

/// Corrupt `count` distinct codewords of block `block` inside a rendered symbol
///
/// Works on the interleaved stream, so it must be re-placed afterwards.
pub fn corrupt_block(symbol: &Symbol, block: usize, count: usize, seed: u64) -> BitMatrix {
    let capacity = Capacity::lookup(symbol.version, symbol.level);
    let shapes: Vec<_> = capacity.block_shapes().collect();
    // stream offsets of every codeword belonging to `block`
    let mut offsets = Vec::new();
    let mut offset = 0;
    let max_data = shapes.iter().map(|s| s.data).max().unwrap_or(0);
    for i in 0..max_data {
        for (b, s) in shapes.iter().enumerate() {
            if i < s.data {
                if b == block {
                    offsets.push(offset);
                }
                offset += 1;
            }
        }
    }
    let max_ecc = shapes.iter().map(|s| s.ecc()).max().unwrap_or(0);
    for i in 0..max_ecc {
        for (b, s) in shapes.iter().enumerate() {
            if i < s.ecc() {
                if b == block {
                    offsets.push(offset);
                }
                offset += 1;
            }
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut stream = symbol.stream.clone();
    let mut hit = Vec::new();
    while hit.len() < count {
        let at = offsets[rng.gen_range(0..offsets.len())];
        if !hit.contains(&at) {
            hit.push(at);
            stream[at] ^= rng.gen_range(1..=255u8);
        }
    }
    place(symbol.version, symbol.level, symbol.mask, &stream)
}
