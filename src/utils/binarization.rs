use image::{GrayImage, Luma};

use crate::models::BitMatrix;

/// Luma values at or below this are dark
pub const MIDPOINT_THRESHOLD: u8 = 127;

/// Fixed midpoint threshold, `true` = dark
///
/// With `inverted` set, light pixels are reported dark instead.
pub fn binarize(gray: &GrayImage, inverted: bool) -> BitMatrix {
    BitMatrix::from_luma(gray, MIDPOINT_THRESHOLD, inverted)
}

/// Snap every pixel to 0 or 255 around the midpoint
pub fn binarize_luma(gray: &GrayImage) -> GrayImage {
    let mut out = gray.clone();
    for px in out.pixels_mut() {
        *px = Luma([snap(px.0[0])]);
    }
    out
}

/// 0 for dark luma, 255 for light
#[inline]
pub fn snap(value: u8) -> u8 {
    if value <= MIDPOINT_THRESHOLD { 0 } else { 255 }
}
