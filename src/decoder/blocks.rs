//! Splitting the interleaved codeword stream back into Reed-Solomon blocks.

use super::tables::Capacity;
use crate::error::{Result, TraversalFault};

/// One block in transmission order: data codewords then error-correction codewords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    /// Data followed by error correction
    pub codewords: Vec<u8>,
    /// Leading data codewords
    pub data_len: usize,
}

impl RawBlock {
    /// Error-correction codewords in the block
    pub fn ecc_len(&self) -> usize {
        self.codewords.len() - self.data_len
    }

    /// Data portion
    pub fn data(&self) -> &[u8] {
        &self.codewords[..self.data_len]
    }
}

/// Undo the column-wise interleave
///
/// Data codewords are dealt round-robin across blocks, skipping blocks whose data portion
/// is already full, then error-correction codewords the same way.
pub fn deinterleave(stream: &[u8], capacity: &Capacity) -> Result<Vec<RawBlock>> {
    if stream.len() != capacity.total_codewords {
        return Err(TraversalFault::Length {
            expected: capacity.total_codewords,
            actual: stream.len(),
        }
        .into());
    }

    let shapes: Vec<_> = capacity.block_shapes().collect();
    let mut blocks: Vec<RawBlock> = shapes
        .iter()
        .map(|shape| RawBlock {
            codewords: Vec::with_capacity(shape.total),
            data_len: shape.data,
        })
        .collect();

    let mut bytes = stream.iter().copied();
    let max_data = shapes.iter().map(|s| s.data).max().unwrap_or(0);
    for column in 0..max_data {
        for block in blocks.iter_mut().filter(|b| column < b.data_len) {
            block.codewords.extend(bytes.next());
        }
    }
    let max_ecc = shapes.iter().map(|s| s.ecc()).max().unwrap_or(0);
    for _ in 0..max_ecc {
        for (block, shape) in blocks.iter_mut().zip(&shapes) {
            if block.codewords.len() < shape.total {
                block.codewords.extend(bytes.next());
            }
        }
    }
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::models::{ECLevel, Version};

    #[test]
    fn test_v5_q_layout() {
        let capacity = Capacity::lookup(Version::new(5).unwrap(), ECLevel::Q);
        let stream: Vec<u8> = (0..134).map(|i| i as u8).collect();
        let blocks = deinterleave(&stream, &capacity).unwrap();
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0].data(), &(0..15).map(|i| i * 4).collect::<Vec<u8>>()[..]);
        assert_eq!(blocks[2].data()[..3], [2, 6, 10]);
        // only the long blocks take the 16th data column
        assert_eq!(blocks[2].data()[15], 60);
        assert_eq!(blocks[3].data()[15], 61);
        // error correction starts after all 62 data codewords
        assert_eq!(blocks[0].codewords[15], 62);
        assert_eq!(blocks[3].codewords[16], 65);
        assert_eq!(blocks[3].codewords.last(), Some(&133));
        assert!(blocks.iter().all(|b| b.ecc_len() == 18));
    }

    #[test]
    fn test_single_block_passthrough() {
        let capacity = Capacity::lookup(Version::new(1).unwrap(), ECLevel::H);
        let stream: Vec<u8> = (100..126).collect();
        let blocks = deinterleave(&stream, &capacity).unwrap();
        assert_eq!(blocks, vec![RawBlock { codewords: stream, data_len: 9 }]);
    }

    #[test]
    fn test_length_mismatch() {
        let capacity = Capacity::lookup(Version::new(1).unwrap(), ECLevel::L);
        assert!(matches!(
            deinterleave(&[0; 25], &capacity),
            Err(DecodeError::ModuleTraversal(TraversalFault::Length { expected: 26, actual: 25 }))
        ));
    }
}
