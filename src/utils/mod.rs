//! Image helpers shared by the detector
//!
//! - Binarization around a fixed midpoint
//! - Geometry (convex hulls, minimum-area rectangles, raster rotation)

pub mod binarization;
pub mod geometry;
