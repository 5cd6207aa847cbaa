//! RustQR codewords - geometric calibration and error-corrected codeword extraction
//!
//! Locates the three finder markers of a QR symbol in a raster image, turns the symbol
//! upright, samples its module grid, reads the format and version fields, removes the
//! data mask, walks the zig-zag placement path and runs Reed-Solomon correction over
//! every block. The result is the corrected data codewords; segment parsing (numeric,
//! alphanumeric, byte, kanji) is left to the caller.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Symbol decoding after sampling (format, version, unmasking, codewords, Reed-Solomon)
pub mod decoder;
/// Symbol detection and geometric calibration
pub mod detector;
/// Typed failures
pub mod error;
/// Core data structures (BitMatrix, Point, Version, ModuleGrid, etc.)
pub mod models;
/// Stage wiring from raster to corrected codewords
pub mod pipeline;
/// Binarization and geometry helpers
pub mod utils;

pub use decoder::config::DecoderConfig;
pub use error::{DecodeError, GeometryFault, Result, RsError, TraversalFault};
pub use models::{
    BitMatrix, CorrectedBlock, DecodedSymbol, ECLevel, MaskPattern, Point, SymbolInfo, Version,
};

use image::{DynamicImage, GrayImage};
use log::debug;
use rayon::prelude::*;

use pipeline::{PipelineState, calibrate_and_sample};

/// Decode a symbol with settings from the environment
pub fn decode(image: &DynamicImage) -> Result<DecodedSymbol> {
    decode_with_config(image, DecoderConfig::global())
}

/// Decode a symbol with explicit settings
pub fn decode_with_config(image: &DynamicImage, config: &DecoderConfig) -> Result<DecodedSymbol> {
    decode_luma(&image.to_luma8(), config)
}

/// Decode a symbol from an 8-bit luma raster
pub fn decode_luma(gray: &GrayImage, config: &DecoderConfig) -> Result<DecodedSymbol> {
    let sampled = calibrate_and_sample(gray, config)?;
    debug!(
        "sampled {}x{} modules (version {}, pitch {:.2}px, rotation {:.2} degrees)",
        sampled.modules.width(),
        sampled.modules.height(),
        sampled.version,
        sampled.geometry.pitch,
        sampled.rotation
    );
    PipelineState::from_modules(&sampled.modules, sampled.version)?.decode()
}

/// Decode an already sampled module grid, `true` = dark
///
/// The grid must be square with a valid side length. Versions 7 and above are checked
/// against their version blocks.
pub fn decode_grid(modules: &BitMatrix) -> Result<DecodedSymbol> {
    let size = modules.width();
    if size == 0 || modules.height() == 0 {
        return Err(DecodeError::EmptyImage);
    }
    let version = Version::from_module_count(size)
        .filter(|_| modules.height() == size)
        .ok_or(GeometryFault::ModuleGrid {
            pitch: 1.0,
            modules: size as f32,
        })?;
    let version = decoder::version::resolve(i32::from(version.number()), modules)?;
    if version.module_count() != size {
        return Err(DecodeError::VersionOutOfRange(i32::from(version.number())));
    }
    PipelineState::from_modules(modules, version)?.decode()
}

/// Decode many rasters in parallel
pub fn decode_batch(images: &[GrayImage], config: &DecoderConfig) -> Vec<Result<DecodedSymbol>> {
    images
        .par_iter()
        .map(|gray| decode_luma(gray, config))
        .collect()
}
