use crate::models::{MaskPattern, Module, ModuleGrid};

/// Invert every data module selected by `mask`; applying twice restores the grid
pub fn apply_mask(grid: &mut ModuleGrid, mask: MaskPattern) {
    let size = grid.size();
    for y in 0..size {
        for x in 0..size {
            if grid.get(x, y) != Module::Function && mask.is_masked(x, y) {
                grid.flip(x, y);
            }
        }
    }
}
