//! Symbol decoding after sampling
//!
//! Format and version information, function-module layout, unmasking,
//! codeword extraction, block deinterleaving and Reed-Solomon correction.

/// Nearest-codeword matching for format and version fields
pub mod bch;
/// Deinterleaving of the codeword stream into blocks
pub mod blocks;
/// Zig-zag traversal and codeword assembly
pub mod codewords;
pub mod config;
/// Format information (EC level, mask pattern)
pub mod format;
/// Function module mask builder (finder/timing/format/alignment/version)
pub mod function_mask;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// Capacity and alignment tables
pub mod tables;
/// Data mask removal
pub mod unmask;
/// Version information (versions 7-40)
pub mod version;
