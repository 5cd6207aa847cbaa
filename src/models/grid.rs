use super::BitMatrix;
use crate::decoder::function_mask::FunctionMask;

/// Classification of one sampled module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Module {
    /// Data or error-correction module sampled light
    Light,
    /// Data or error-correction module sampled dark
    Dark,
    /// Finder, separator, timing, alignment, format or version module
    Function,
}

impl Module {
    /// Bit carried by a data module, `None` for function modules
    pub fn bit(self) -> Option<bool> {
        match self {
            Module::Light => Some(false),
            Module::Dark => Some(true),
            Module::Function => None,
        }
    }
}

/// Square grid of classified modules, indexed by column then row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    size: usize,
    cells: Vec<Module>,
}

impl ModuleGrid {
    /// Classify sampled modules against the function-pattern layout
    pub fn classify(modules: &BitMatrix, function_mask: &FunctionMask) -> Self {
        let size = function_mask.size();
        let mut cells = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                cells.push(if function_mask.is_function(x, y) {
                    Module::Function
                } else if modules.get(x, y) {
                    Module::Dark
                } else {
                    Module::Light
                });
            }
        }
        Self { size, cells }
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.size
    }

    /// Module at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Module {
        if x >= self.size || y >= self.size {
            return Module::Function;
        }
        self.cells[y * self.size + x]
    }

    /// Flip a data module between light and dark; function modules are left alone
    pub fn flip(&mut self, x: usize, y: usize) {
        if x >= self.size || y >= self.size {
            return;
        }
        let cell = &mut self.cells[y * self.size + x];
        *cell = match *cell {
            Module::Light => Module::Dark,
            Module::Dark => Module::Light,
            Module::Function => Module::Function,
        };
    }

    /// Count of non-function modules
    pub fn data_module_count(&self) -> usize {
        self.cells.iter().filter(|m| **m != Module::Function).count()
    }
}
