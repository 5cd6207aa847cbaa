//! End-to-end tests: rendered symbols through calibration, sampling and correction.
//!
//! Module grids are rendered from random data codewords, painted into rasters
//! (optionally rotated or inverted) and decoded back to the same data codewords.

mod common;

use common::{corrupt_block, invert, rasterize, render, rotated, version};
use image::{DynamicImage, GrayImage, Luma};
use rust_qr_codewords::{
    BitMatrix, DecodeError, DecoderConfig, ECLevel, GeometryFault, MaskPattern, RsError,
    decode_batch, decode_grid, decode_luma, decode_with_config,
};

/// 21x21 version 1-M symbol produced by an independent encoder, mask 7
const GOLDEN_V1_M: [&str; 21] = [
    "#######.....#.#######",
    "#.....#..#....#.....#",
    "#.###.#...##..#.###.#",
    "#.###.#...#...#.###.#",
    "#.###.#..####.#.###.#",
    "#.....#.#.#...#.....#",
    "#######.#.#.#.#######",
    ".........#...........",
    "#..#.##.######.#.....",
    "###.#..##..#.#.#.##..",
    "#..#.####.##..###...#",
    "..#.#..#....#####....",
    "..#...##.#.#.###.##..",
    "........#.#..####.##.",
    "#######...###.#.####.",
    "#.....#.#.....##....#",
    "#.###.#..##.###..#.##",
    "#.###.#.#.#..####..##",
    "#.###.#..###.###.#..#",
    "#.....#..####..##..#.",
    "#######.###..#.###...",
];

const GOLDEN_DATA: [u8; 16] = [
    0x10, 0x35, 0xB5, 0xA1, 0xC7, 0x36, 0x4E, 0x00, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC,
    0x11,
];

fn golden() -> BitMatrix {
    let rows: Vec<Vec<bool>> = GOLDEN_V1_M
        .iter()
        .map(|r| r.chars().map(|c| c == '#').collect())
        .collect();
    BitMatrix::from_rows(&rows)
}

fn config() -> DecoderConfig {
    DecoderConfig::default()
}

#[test]
fn test_golden_grid() {
    let decoded = decode_grid(&golden()).unwrap();
    assert_eq!(decoded.info.version.number(), 1);
    assert_eq!(decoded.info.ec_level, ECLevel::M);
    assert_eq!(decoded.info.mask, MaskPattern::Pattern7);
    assert_eq!(decoded.data, GOLDEN_DATA);
    assert_eq!(decoded.corrected_errors, 0);
}

#[test]
fn test_golden_grid_with_damage() {
    let mut grid = golden();
    // five codewords hit in the lower-right data area
    for (x, y) in [(20, 20), (18, 16), (16, 12), (20, 9), (12, 20)] {
        grid.toggle(x, y);
    }
    let decoded = decode_grid(&grid).unwrap();
    assert_eq!(decoded.data, GOLDEN_DATA);
    assert_eq!(decoded.corrected_errors, 5);
}

#[test]
fn test_golden_image() {
    let gray = rasterize(&golden(), 8, 4);
    let decoded = decode_luma(&gray, &config()).unwrap();
    assert_eq!(decoded.data, GOLDEN_DATA);
}

#[test]
fn test_grid_versions_and_levels() {
    let cases = [
        (1, ECLevel::L),
        (2, ECLevel::H),
        (5, ECLevel::Q),
        (7, ECLevel::M),
        (14, ECLevel::H),
        (22, ECLevel::L),
        (40, ECLevel::H),
    ];
    for (i, (n, level)) in cases.into_iter().enumerate() {
        let mask = MaskPattern::ALL[i % 8];
        let symbol = render(version(n), level, mask, n as u64);
        let decoded = decode_grid(&symbol.modules).unwrap();
        assert_eq!(decoded.info.version, symbol.version, "v{n}");
        assert_eq!(decoded.info.ec_level, level, "v{n}");
        assert_eq!(decoded.info.mask, mask, "v{n}");
        assert_eq!(decoded.data, symbol.data(), "v{n}");
        assert_eq!(decoded.blocks.len(), symbol.block_data.len());
    }
}

#[test]
fn test_every_level_at_smallest_middle_largest_version() {
    for n in [1, 7, 40] {
        for (i, level) in ECLevel::ALL.into_iter().enumerate() {
            let mask = MaskPattern::ALL[(n as usize + i) % 8];
            let symbol = render(version(n), level, mask, 1000 + n as u64 * 4 + i as u64);
            let decoded = decode_grid(&symbol.modules).unwrap();
            assert_eq!(decoded.info.version.module_count(), 17 + 4 * n as usize);
            assert_eq!((decoded.info.ec_level, decoded.info.mask), (level, mask));
            assert_eq!(decoded.data, symbol.data(), "v{n}-{level:?}");
        }
    }
}

#[test]
fn test_upright_images() {
    for (n, level, px) in [(1, ECLevel::M, 8), (3, ECLevel::Q, 6), (8, ECLevel::L, 5)] {
        let symbol = render(version(n), level, MaskPattern::Pattern2, 100 + n as u64);
        let gray = rasterize(&symbol.modules, px, 4);
        let decoded = decode_luma(&gray, &config()).unwrap();
        assert_eq!(decoded.info.version, symbol.version);
        assert_eq!(decoded.data, symbol.data(), "v{n}");
        assert_eq!(decoded.corrected_errors, 0);
    }
}

#[test]
fn test_largest_version_image() {
    let symbol = render(version(40), ECLevel::Q, MaskPattern::Pattern5, 40);
    let gray = rasterize(&symbol.modules, 3, 4);
    let decoded = decode_luma(&gray, &config()).unwrap();
    assert_eq!(decoded.info.version.number(), 40);
    assert_eq!(decoded.data, symbol.data());
}

#[test]
fn test_rotated_images() {
    let symbol = render(version(1), ECLevel::H, MaskPattern::Pattern4, 7);
    let upright = rasterize(&symbol.modules, 8, 4);
    for degrees in [30.0, -20.0, 90.0, 180.0, 135.0] {
        let gray = rotated(&upright, degrees);
        let decoded = decode_luma(&gray, &config())
            .unwrap_or_else(|e| panic!("{degrees} degrees: {e}"));
        assert_eq!(decoded.data, symbol.data(), "{degrees} degrees");
    }
}

#[test]
fn test_rotated_version_seven() {
    let symbol = render(version(7), ECLevel::M, MaskPattern::Pattern1, 77);
    let gray = rotated(&rasterize(&symbol.modules, 6, 4), 15.0);
    let decoded = decode_luma(&gray, &config()).unwrap();
    assert_eq!(decoded.info.version.number(), 7);
    assert_eq!(decoded.data, symbol.data());
}

#[test]
fn test_inverted_symbol() {
    let symbol = render(version(2), ECLevel::L, MaskPattern::Pattern6, 9);
    let gray = invert(&rasterize(&symbol.modules, 7, 4));
    let inverted = DecoderConfig {
        inverted: true,
        ..config()
    };
    let decoded = decode_luma(&gray, &inverted).unwrap();
    assert_eq!(decoded.data, symbol.data());
    assert!(decode_luma(&gray, &config()).is_err());
}

#[test]
fn test_dynamic_image_entry_point() {
    let symbol = render(version(4), ECLevel::M, MaskPattern::Pattern3, 4);
    let image = DynamicImage::ImageLuma8(rasterize(&symbol.modules, 6, 4)).to_rgb8();
    let decoded = decode_with_config(&DynamicImage::ImageRgb8(image), &config()).unwrap();
    assert_eq!(decoded.data, symbol.data());
}

#[test]
fn test_errors_up_to_capacity_are_corrected() {
    // version 5-Q: four blocks with 18 error-correction codewords each
    let symbol = render(version(5), ECLevel::Q, MaskPattern::Pattern0, 55);
    let damaged = corrupt_block(&symbol, 2, 9, 1);
    let decoded = decode_grid(&damaged).unwrap();
    assert_eq!(decoded.data, symbol.data());
    assert_eq!(decoded.blocks[2].corrected, 9);
    assert_eq!(decoded.corrected_errors, 9);

    let gray = rasterize(&damaged, 6, 4);
    assert_eq!(decode_luma(&gray, &config()).unwrap().data, symbol.data());
}

#[test]
fn test_errors_beyond_capacity_fail_the_block() {
    let symbol = render(version(5), ECLevel::Q, MaskPattern::Pattern0, 55);
    let damaged = corrupt_block(&symbol, 2, 10, 1);
    match decode_grid(&damaged) {
        Err(DecodeError::BlockUncorrectable { block, cause }) => {
            assert_eq!(block, 2);
            assert_ne!(cause, RsError::DegenerateLocator);
        }
        other => panic!("expected block failure, got {other:?}"),
    }
}

#[test]
fn test_single_block_capacity_edge() {
    let symbol = render(version(1), ECLevel::M, MaskPattern::Pattern7, 3);
    let decoded = decode_grid(&corrupt_block(&symbol, 0, 5, 2)).unwrap();
    assert_eq!(decoded.data, symbol.data());
    assert!(matches!(
        decode_grid(&corrupt_block(&symbol, 0, 6, 2)),
        Err(DecodeError::BlockUncorrectable { block: 0, .. })
    ));
}

#[test]
fn test_unreadable_format() {
    let mut grid = golden();
    for i in 0..4 {
        grid.toggle(8, i);
        grid.toggle(20 - i, 8);
    }
    assert_eq!(decode_grid(&grid).unwrap_err(), DecodeError::FormatUndecodable);
}

#[test]
fn test_unreadable_version_blocks() {
    let symbol = render(version(9), ECLevel::L, MaskPattern::Pattern1, 90);
    let mut grid = symbol.modules.clone();
    let n = grid.width();
    for i in 0..4 {
        grid.toggle(n - 11, i);
        grid.toggle(i, n - 11);
    }
    assert_eq!(decode_grid(&grid).unwrap_err(), DecodeError::VersionUndecodable);
}

#[test]
fn test_invalid_grid_size() {
    assert!(matches!(
        decode_grid(&BitMatrix::square(23)),
        Err(DecodeError::GeometryNotFound(GeometryFault::ModuleGrid { .. }))
    ));
    assert_eq!(decode_grid(&BitMatrix::square(0)).unwrap_err(), DecodeError::EmptyImage);
}

#[test]
fn test_blank_and_empty_images() {
    assert_eq!(
        decode_luma(&GrayImage::new(0, 0), &config()).unwrap_err(),
        DecodeError::EmptyImage
    );
    let blank = GrayImage::from_pixel(200, 200, Luma([255]));
    assert_eq!(
        decode_luma(&blank, &config()).unwrap_err(),
        DecodeError::GeometryNotFound(GeometryFault::CandidateCount(0))
    );
}

#[test]
fn test_batch_keeps_order() {
    let a = render(version(1), ECLevel::L, MaskPattern::Pattern0, 1);
    let b = render(version(2), ECLevel::M, MaskPattern::Pattern1, 2);
    let images = vec![
        rasterize(&a.modules, 6, 4),
        GrayImage::from_pixel(150, 150, Luma([255])),
        rasterize(&b.modules, 6, 4),
    ];
    let results = decode_batch(&images, &config());
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().data, a.data());
    assert!(results[1].is_err());
    assert_eq!(results[2].as_ref().unwrap().data, b.data());
}
