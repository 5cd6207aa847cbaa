//! Assigning marker roles and turning the raster upright.

use image::GrayImage;
use log::debug;

use super::finder::{FinderCandidate, FinderDetector, Located, Tolerance};
use crate::decoder::config::DecoderConfig;
use crate::error::{GeometryFault, Result};
use crate::utils::geometry::{rotate_about_center, wrap_radians};

/// Rotations smaller than this are left alone
const MIN_ROTATION_DEGREES: f32 = 0.05;

/// The three markers by role, plus the direction of the top edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// Corner marker
    pub top_left: FinderCandidate,
    /// Marker along the top edge
    pub top_right: FinderCandidate,
    /// Marker along the left edge
    pub bottom_left: FinderCandidate,
    /// Direction from top-left to top-right in degrees, y axis down
    pub angle: f32,
}

/// Identify the right-angle corner and the two arms
///
/// The corner is the marker whose distances to the others agree and whose arm length
/// times sqrt(2) matches the opposite side. The arm reached by a positive turn in image
/// coordinates is the left edge.
pub fn orient(markers: &[FinderCandidate; 3], tolerance: Tolerance) -> Result<Orientation> {
    let len = |a: usize, b: usize| markers[a].center().distance(&markers[b].center());
    for (a, b, c) in [(0, 1, 2), (1, 0, 2), (2, 0, 1)] {
        if !tolerance.matches(len(a, b), len(a, c))
            || !tolerance.matches(len(a, b) * std::f32::consts::SQRT_2, len(b, c))
        {
            continue;
        }
        let corner = markers[a].center();
        let to_b = corner.direction_to(&markers[b].center());
        let to_c = corner.direction_to(&markers[c].center());
        let (right, left) = if wrap_radians(to_c - to_b) > 0.0 {
            (b, c)
        } else {
            (c, b)
        };
        let angle = corner.direction_to(&markers[right].center()).to_degrees();
        return Ok(Orientation {
            top_left: markers[a],
            top_right: markers[right],
            bottom_left: markers[left],
            angle,
        });
    }
    Err(GeometryFault::NotRightIsosceles.into())
}

/// Upright raster with its markers
#[derive(Debug, Clone)]
pub struct Calibrated {
    /// Luma raster after rotation (the input when no rotation was needed)
    pub gray: GrayImage,
    /// Marker roles in `gray` coordinates
    pub orientation: Orientation,
    /// Rotation applied, in degrees
    pub rotation: f32,
}

/// Locate and orient the markers, rotating the raster upright once if needed
pub fn calibrate(gray: &GrayImage, config: &DecoderConfig) -> Result<Calibrated> {
    let Located { markers, tolerance } = FinderDetector::locate(gray, config)?;
    let orientation = orient(&markers, tolerance)?;
    debug!(
        "markers at ({:.1}, {:.1}) ({:.1}, {:.1}) ({:.1}, {:.1}), top edge {:.2} degrees",
        orientation.top_left.center().x,
        orientation.top_left.center().y,
        orientation.top_right.center().x,
        orientation.top_right.center().y,
        orientation.bottom_left.center().x,
        orientation.bottom_left.center().y,
        orientation.angle
    );

    if !config.rotate || orientation.angle.abs() < MIN_ROTATION_DEGREES {
        return Ok(Calibrated {
            gray: gray.clone(),
            orientation,
            rotation: 0.0,
        });
    }

    let light = if config.inverted { 0 } else { 255 };
    let rotated = rotate_about_center(gray, orientation.angle, light);
    let Located { markers, tolerance } = FinderDetector::locate(&rotated, config)?;
    let upright = orient(&markers, tolerance)?;
    debug!(
        "rotated by {:.2} degrees, residual {:.2}",
        orientation.angle, upright.angle
    );
    Ok(Calibrated {
        gray: rotated,
        orientation: upright,
        rotation: orientation.angle,
    })
}
