//! Symbol detection and geometric calibration
//!
//! - Connected dark regions (two-pass union-find)
//! - Finder marker location (square hull + 1:1:3:1:1 midline runs)
//! - Orientation and rotation to upright
//! - Module grid sampling

/// 8-connected dark region labelling
pub mod components;
/// Finder marker location and validation
pub mod finder;
/// Marker roles and raster rotation
pub mod orientation;
/// Pitch estimation and module sampling
pub mod sampler;
