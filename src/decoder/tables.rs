//! Capacity tables: codeword totals and block structure per version and level.

use crate::models::{ECLevel, Version};

// Index: [ec_level][version], column 0 unused
const ECC_CODEWORDS_PER_BLOCK: [[u8; 41]; 4] = [
    [
        0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ],
    [
        0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
];

const NUM_BLOCKS: [[u8; 41]; 4] = [
    [
        0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ],
    [
        0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ],
    [
        0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ],
    [
        0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ],
];

/// A run of equally sized blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGroup {
    /// Number of blocks in the group
    pub count: usize,
    /// Codewords per block, data plus error correction
    pub total: usize,
    /// Data codewords per block
    pub data: usize,
}

impl BlockGroup {
    /// Error-correction codewords per block
    pub fn ecc(&self) -> usize {
        self.total - self.data
    }
}

/// Codeword layout of one (version, level) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capacity {
    /// Codewords in the whole symbol
    pub total_codewords: usize,
    /// At most two groups; the second holds blocks one codeword longer
    pub groups: Vec<BlockGroup>,
}

impl Capacity {
    /// Derive the block structure for `version` at `level`
    pub fn lookup(version: Version, level: ECLevel) -> Self {
        let v = version.number() as usize;
        let idx = level.table_index();
        let blocks = NUM_BLOCKS[idx][v] as usize;
        let ecc = ECC_CODEWORDS_PER_BLOCK[idx][v] as usize;
        let total_codewords = raw_data_modules(version) / 8;

        let short_len = total_codewords / blocks;
        let long_blocks = total_codewords % blocks;
        let mut groups = vec![BlockGroup {
            count: blocks - long_blocks,
            total: short_len,
            data: short_len - ecc,
        }];
        if long_blocks > 0 {
            groups.push(BlockGroup {
                count: long_blocks,
                total: short_len + 1,
                data: short_len + 1 - ecc,
            });
        }
        Self {
            total_codewords,
            groups,
        }
    }

    /// Block count across groups
    pub fn block_count(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }

    /// Data codewords across all blocks
    pub fn data_codewords(&self) -> usize {
        self.groups.iter().map(|g| g.count * g.data).sum()
    }

    /// One entry per block, in block order
    pub fn block_shapes(&self) -> impl Iterator<Item = BlockGroup> + '_ {
        self.groups
            .iter()
            .flat_map(|g| std::iter::repeat_n(*g, g.count))
    }
}

/// Modules available to data and error correction, remainder bits included
pub fn raw_data_modules(version: Version) -> usize {
    let v = version.number() as usize;
    let mut modules = (16 * v + 128) * v + 64;
    if v >= 2 {
        let align = v / 7 + 2;
        modules -= (25 * align - 10) * align - 55;
        if v >= 7 {
            modules -= 36;
        }
    }
    modules
}

/// Alignment pattern center coordinates, shared by rows and columns
pub fn alignment_pattern_positions(version: Version) -> Vec<usize> {
    let v = version.number() as usize;
    if v == 1 {
        return Vec::new();
    }
    let count = v / 7 + 2;
    let size = version.module_count();
    let step = (v * 8 + count * 3 + 5) / (count * 4 - 4) * 2;
    let mut positions: Vec<usize> = (0..count - 1).map(|i| size - 7 - i * step).collect();
    positions.push(6);
    positions.reverse();
    positions
}
