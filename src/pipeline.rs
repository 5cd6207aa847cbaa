//! Stage wiring: calibration and sampling, then format, unmasking, codeword extraction,
//! deinterleaving and block correction.

use image::GrayImage;
use log::{debug, warn};

use crate::decoder::blocks::{RawBlock, deinterleave};
use crate::decoder::codewords::extract_codewords;
use crate::decoder::config::DecoderConfig;
use crate::decoder::format::FormatInfo;
use crate::decoder::function_mask::FunctionMask;
use crate::decoder::reed_solomon::ReedSolomonDecoder;
use crate::decoder::tables::Capacity;
use crate::decoder::unmask::apply_mask;
use crate::decoder::version;
use crate::detector::orientation::calibrate;
use crate::detector::sampler::{SamplingGeometry, sample};
use crate::error::{DecodeError, Result};
use crate::models::{BitMatrix, CorrectedBlock, DecodedSymbol, ModuleGrid, SymbolInfo, Version};
use crate::utils::binarization::binarize_luma;

/// Module grid read from a raster
#[derive(Debug, Clone)]
pub struct SampledSymbol {
    /// Sampled modules, `true` = dark
    pub modules: BitMatrix,
    /// Settled version
    pub version: Version,
    /// Grid geometry used for the final sampling pass
    pub geometry: SamplingGeometry,
    /// Rotation applied before sampling, degrees
    pub rotation: f32,
}

/// Calibrate the raster and sample its module grid
///
/// When the version blocks disagree with the marker spacing the grid is sampled again at
/// the decoded size.
pub fn calibrate_and_sample(gray: &GrayImage, config: &DecoderConfig) -> Result<SampledSymbol> {
    if gray.width() == 0 || gray.height() == 0 {
        return Err(DecodeError::EmptyImage);
    }
    let calibrated = calibrate(gray, config)?;
    let binary = binarize_luma(&calibrated.gray);
    let dark = config.dark_value();

    let geometry = SamplingGeometry::from_orientation(&calibrated.orientation)?;
    let modules = sample(&binary, &geometry, dark);
    let version = version::resolve(geometry.provisional_version, &modules)?;
    let (modules, geometry) = if version.module_count() == geometry.module_count {
        (modules, geometry)
    } else {
        warn!(
            "version blocks say {} but markers suggest {}, resampling",
            version, geometry.provisional_version
        );
        let geometry = geometry.with_version(version);
        (sample(&binary, &geometry, dark), geometry)
    };
    Ok(SampledSymbol {
        modules,
        version,
        geometry,
        rotation: calibrated.rotation,
    })
}

/// Immutable stage results between sampling and block correction
#[derive(Debug, Clone)]
pub struct PipelineState {
    /// Version, level and mask
    pub info: SymbolInfo,
    /// Function-module layout of the version
    pub function_mask: FunctionMask,
    /// Block structure for the version and level
    pub capacity: Capacity,
    /// Classified modules with the data mask removed
    pub grid: ModuleGrid,
}

impl PipelineState {
    /// Read the format field, classify modules and remove the data mask
    pub fn from_modules(modules: &BitMatrix, version: Version) -> Result<Self> {
        let format = FormatInfo::extract(modules)?;
        let info = SymbolInfo {
            version,
            ec_level: format.ec_level,
            mask: format.mask_pattern,
        };
        let function_mask = FunctionMask::new(version);
        let mut grid = ModuleGrid::classify(modules, &function_mask);
        apply_mask(&mut grid, info.mask);
        Ok(Self {
            capacity: Capacity::lookup(version, info.ec_level),
            info,
            function_mask,
            grid,
        })
    }

    /// Raw interleaved codeword stream
    pub fn codewords(&self) -> Result<Vec<u8>> {
        extract_codewords(&self.grid, &self.function_mask, self.capacity.total_codewords)
    }

    /// Deinterleaved, uncorrected blocks
    pub fn raw_blocks(&self) -> Result<Vec<RawBlock>> {
        deinterleave(&self.codewords()?, &self.capacity)
    }

    /// Correct every block and assemble the data codewords
    pub fn decode(&self) -> Result<DecodedSymbol> {
        let blocks = correct_blocks(self.raw_blocks()?)?;
        let corrected_errors = blocks.iter().map(|b| b.corrected).sum();
        let data = blocks.iter().flat_map(|b| b.data.iter().copied()).collect();
        debug!(
            "version {} {:?} mask {}: {} blocks, {} codewords corrected",
            self.info.version,
            self.info.ec_level,
            self.info.mask.bits(),
            blocks.len(),
            corrected_errors
        );
        Ok(DecodedSymbol {
            info: self.info,
            data,
            blocks,
            corrected_errors,
        })
    }
}

/// Run Reed-Solomon over each block; the first failure aborts
pub fn correct_blocks(blocks: Vec<RawBlock>) -> Result<Vec<CorrectedBlock>> {
    blocks
        .into_iter()
        .enumerate()
        .map(|(index, mut block)| {
            let ecc_len = block.ecc_len();
            let corrected = ReedSolomonDecoder::new(ecc_len)
                .decode(&mut block.codewords)
                .map_err(|cause| DecodeError::BlockUncorrectable {
                    block: index,
                    cause,
                })?;
            block.codewords.truncate(block.data_len);
            Ok(CorrectedBlock {
                data: block.codewords,
                ecc_len,
                corrected,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::reed_solomon::encode_ecc;
    use crate::error::RsError;

    fn block(data: &[u8], ecc_len: usize) -> RawBlock {
        let mut codewords = data.to_vec();
        codewords.extend(encode_ecc(data, ecc_len));
        RawBlock {
            codewords,
            data_len: data.len(),
        }
    }

    #[test]
    fn test_correct_blocks_strips_ecc() {
        let mut noisy = block(&[1, 2, 3, 4, 5], 8);
        noisy.codewords[2] ^= 0x40;
        let out = correct_blocks(vec![block(&[9, 9, 9], 6), noisy]).unwrap();
        assert_eq!(out[0].data, vec![9, 9, 9]);
        assert_eq!(out[1].data, vec![1, 2, 3, 4, 5]);
        assert_eq!(out[1].corrected, 1);
        assert_eq!(out[1].ecc_len, 8);
    }

    #[test]
    fn test_correct_blocks_reports_index() {
        let mut noisy = block(&[7; 10], 4);
        for i in [0, 3, 6] {
            noisy.codewords[i] ^= 0x11;
        }
        let err = correct_blocks(vec![block(&[1; 10], 4), noisy]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::BlockUncorrectable {
                block: 1,
                cause: RsError::TooManyErrors {
                    degree: 3,
                    capacity: 2
                }
            }
        );
    }

    #[test]
    fn test_empty_image() {
        let gray = GrayImage::new(0, 10);
        assert_eq!(
            calibrate_and_sample(&gray, &DecoderConfig::default()).unwrap_err(),
            DecodeError::EmptyImage
        );
    }
}
