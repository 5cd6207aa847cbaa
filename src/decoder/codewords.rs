//! Zig-zag traversal of data modules and assembly of the raw codeword stream.

use log::trace;

use super::function_mask::FunctionMask;
use crate::error::{Result, TraversalFault};
use crate::models::ModuleGrid;

/// Data module positions in placement order
///
/// Two-column strips are walked right to left starting at the bottom-right corner,
/// alternating upward and downward; within a strip the right column comes first.
/// The vertical timing column is skipped.
pub struct ZigzagPath<'a> {
    mask: &'a FunctionMask,
    size: usize,
    /// Right column of the current strip; negative once the walk is done
    right: isize,
    upward: bool,
    /// Position within the strip, `2 * size` steps per strip
    step: usize,
}

impl<'a> ZigzagPath<'a> {
    /// Start at the bottom-right corner
    pub fn new(mask: &'a FunctionMask) -> Self {
        let size = mask.size();
        let mut right = size as isize - 1;
        if right == 6 {
            right = 5;
        }
        Self {
            mask,
            size,
            right,
            upward: true,
            step: 0,
        }
    }
}

impl Iterator for ZigzagPath<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        loop {
            if self.right < 1 {
                return None;
            }
            if self.step == 2 * self.size {
                self.right -= 2;
                if self.right == 6 {
                    self.right = 5;
                }
                self.upward = !self.upward;
                self.step = 0;
                continue;
            }
            let vert = self.step / 2;
            let x = self.right as usize - self.step % 2;
            let y = if self.upward {
                self.size - 1 - vert
            } else {
                vert
            };
            self.step += 1;
            if !self.mask.is_function(x, y) {
                return Some((x, y));
            }
        }
    }
}

/// Read `count` codewords, most significant bit first, along the zig-zag path
pub fn extract_codewords(grid: &ModuleGrid, mask: &FunctionMask, count: usize) -> Result<Vec<u8>> {
    let mut codewords = Vec::with_capacity(count);
    let mut path = ZigzagPath::new(mask);
    while codewords.len() < count {
        let mut byte = 0u8;
        for _ in 0..8 {
            let (x, y) = path.next().ok_or(TraversalFault::Exhausted {
                expected: count,
                extracted: codewords.len(),
            })?;
            let bit = grid
                .get(x, y)
                .bit()
                .ok_or(TraversalFault::FunctionModule { x, y })?;
            byte = (byte << 1) | u8::from(bit);
        }
        codewords.push(byte);
    }
    trace!(
        "extracted {} codewords, {} remainder modules left",
        codewords.len(),
        path.count()
    );
    Ok(codewords)
}
