//! Module grid sampling on an upright raster.

use image::GrayImage;
use image::imageops::{self, FilterType};
use log::debug;

use super::orientation::Orientation;
use crate::error::{DecodeError, GeometryFault, Result};
use crate::models::{BitMatrix, Version};
use crate::utils::binarization::snap;

/// Axis-aligned module grid anchored at the top-left marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingGeometry {
    /// Module pitch in pixels
    pub pitch: f32,
    /// Left edge of module column 0
    pub left: f32,
    /// Top edge of module row 0
    pub top: f32,
    /// Modules per side
    pub module_count: usize,
    /// Version implied by the marker spacing
    pub provisional_version: i32,
}

impl SamplingGeometry {
    /// Derive pitch and module count from the two top markers
    ///
    /// A marker spans seven modules, so the pitch is the mean of both marker sides over 14.
    /// The symbol runs from the top-left marker's left edge to seven modules past the
    /// top-right marker's left edge.
    pub fn from_orientation(orientation: &Orientation) -> Result<Self> {
        let tl = orientation.top_left.rect;
        let tr = orientation.top_right.rect;
        let pitch = (tl.side() + tr.side()) / 14.0;
        let span = (tr.left() - tl.left()) / pitch;
        if !pitch.is_finite() || pitch <= 0.0 || !span.is_finite() {
            return Err(GeometryFault::ModuleGrid {
                pitch,
                modules: span + 7.0,
            }
            .into());
        }
        let provisional_version = ((span - 10.0) / 4.0).round() as i32;
        let version = Version::new(provisional_version)
            .ok_or(DecodeError::VersionOutOfRange(provisional_version))?;
        debug!(
            "pitch {:.3}px, {:.2} modules across, provisional version {}",
            pitch,
            span + 7.0,
            provisional_version
        );
        Ok(Self {
            pitch,
            left: tl.left(),
            top: tl.top(),
            module_count: version.module_count(),
            provisional_version,
        })
    }

    /// Same anchor and pitch with the side length of `version`
    pub fn with_version(self, version: Version) -> Self {
        Self {
            module_count: version.module_count(),
            ..self
        }
    }

    /// Pixel square `(x, y, side)` covering module (`col`, `row`)
    pub fn cell(&self, col: usize, row: usize) -> (i64, i64, u32) {
        let x = (self.left + col as f32 * self.pitch).round() as i64;
        let y = (self.top + row as f32 * self.pitch).round() as i64;
        (x, y, self.pitch.round().max(1.0) as u32)
    }
}

/// Classify every module of the grid
///
/// Each module's pixel square is cut from the binarized raster and reduced to one pixel
/// with Catmull-Rom filtering; the module is dark when that pixel snaps to `dark_value`.
/// Squares falling outside the raster read light.
pub fn sample(binary: &GrayImage, geometry: &SamplingGeometry, dark_value: u8) -> BitMatrix {
    let n = geometry.module_count;
    let (width, height) = binary.dimensions();
    let mut modules = BitMatrix::square(n);
    for row in 0..n {
        for col in 0..n {
            let (x, y, side) = geometry.cell(col, row);
            let x0 = x.clamp(0, i64::from(width));
            let y0 = y.clamp(0, i64::from(height));
            let x1 = (x + i64::from(side)).clamp(0, i64::from(width));
            let y1 = (y + i64::from(side)).clamp(0, i64::from(height));
            if x1 <= x0 || y1 <= y0 {
                continue;
            }
            let crop = imageops::crop_imm(
                binary,
                x0 as u32,
                y0 as u32,
                (x1 - x0) as u32,
                (y1 - y0) as u32,
            )
            .to_image();
            let reduced = imageops::resize(&crop, 1, 1, FilterType::CatmullRom);
            if snap(reduced.get_pixel(0, 0).0[0]) == dark_value {
                modules.set(col, row, true);
            }
        }
    }
    modules
}
