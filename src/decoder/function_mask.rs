use super::tables::alignment_pattern_positions;
use crate::models::{BitMatrix, Version};

/// Layout of function modules for one version; `true` marks a function module
#[derive(Debug, Clone)]
pub struct FunctionMask {
    mask: BitMatrix,
    version: Version,
}

impl FunctionMask {
    /// Build the layout: finders with separators, format areas (dark module included),
    /// alignment patterns, version blocks and timing lines
    pub fn new(version: Version) -> Self {
        let size = version.module_count();
        let mut mask = BitMatrix::square(size);

        // Finder + separator squares
        fill(&mut mask, 0, 0, 8, 8);
        fill(&mut mask, size - 8, 0, 8, 8);
        fill(&mut mask, 0, size - 8, 8, 8);

        // Format areas; (8, size - 8) is the dark module
        fill(&mut mask, 8, 0, 1, 9);
        fill(&mut mask, 0, 8, 9, 1);
        fill(&mut mask, 8, size - 8, 1, 8);
        fill(&mut mask, size - 8, 8, 8, 1);

        let centers = alignment_pattern_positions(version);
        for &cx in &centers {
            for &cy in &centers {
                let near_top_left = cx < 9 && cy < 9;
                let near_top_right = cx > size - 10 && cy < 9;
                let near_bottom_left = cx < 9 && cy > size - 10;
                if near_top_left || near_top_right || near_bottom_left {
                    continue;
                }
                fill(&mut mask, cx - 2, cy - 2, 5, 5);
            }
        }

        if version.has_version_info() {
            fill(&mut mask, size - 11, 0, 3, 6);
            fill(&mut mask, 0, size - 11, 6, 3);
        }

        // Timing lines between the finders
        fill(&mut mask, 8, 6, size - 16, 1);
        fill(&mut mask, 6, 8, 1, size - 16);

        Self { mask, version }
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.mask.width()
    }

    /// Version this layout belongs to
    pub fn version(&self) -> Version {
        self.version
    }

    /// Whether `(x, y)` is a function module
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }

    /// Modules left for data and error correction
    pub fn data_module_count(&self) -> usize {
        let size = self.size();
        size * size - self.mask.count_dark()
    }
}

fn fill(mask: &mut BitMatrix, left: usize, top: usize, width: usize, height: usize) {
    for y in top..top + height {
        for x in left..left + width {
            mask.set(x, y, true);
        }
    }
}
