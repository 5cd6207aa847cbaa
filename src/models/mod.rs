/// Classified module grid
pub mod grid;
/// Packed bit matrix
pub mod matrix;
/// 2D point
pub mod point;
/// Rotated rectangle
pub mod rect;
/// Version, level, mask and decode results
pub mod symbol;

pub use grid::{Module, ModuleGrid};
pub use matrix::BitMatrix;
pub use point::Point;
pub use rect::RotatedRect;
pub use symbol::{CorrectedBlock, DecodedSymbol, ECLevel, MaskPattern, SymbolInfo, Version};
