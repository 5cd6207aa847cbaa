//! Finder pattern location: dark regions whose minimum-area rectangle is square and whose
//! midlines cross a 1:1:3:1:1 dark/light run sequence.

use std::cmp::Ordering;

use image::GrayImage;
use log::{debug, trace};

use super::components::find_dark_regions;
use crate::decoder::config::DecoderConfig;
use crate::error::{GeometryFault, Result};
use crate::models::{BitMatrix, Point, RotatedRect};
use crate::utils::binarization::binarize;
use crate::utils::geometry::{convex_hull, min_area_rect, pad};

/// Regions spanning fewer rows cannot hold a 7-module marker
const MIN_REGION_ROWS: usize = 7;

/// Absolute comparison slack derived from the raster size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance(f32);

impl Tolerance {
    /// One percent of the larger dimension, in whole pixels
    pub fn for_dimensions(width: u32, height: u32) -> Self {
        Tolerance((width.max(height) / 100) as f32)
    }

    /// Slack in pixels
    pub fn value(&self) -> f32 {
        self.0
    }

    /// `Equal` when `a` and `b` differ by less than the slack
    pub fn compare(&self, a: f32, b: f32) -> Ordering {
        if (a - b).abs() < self.0 {
            Ordering::Equal
        } else if a < b {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Whether `a` and `b` are equal within the slack
    pub fn matches(&self, a: f32, b: f32) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

/// A located finder marker in source image coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinderCandidate {
    /// Minimum-area rectangle around the marker's outer ring
    pub rect: RotatedRect,
}

impl FinderCandidate {
    /// Marker center
    pub fn center(&self) -> Point {
        self.rect.center
    }

    /// Mean side length in pixels
    pub fn side(&self) -> f32 {
        self.rect.side()
    }
}

/// Exactly three validated markers plus the tolerance they were judged with
#[derive(Debug, Clone, PartialEq)]
pub struct Located {
    /// Markers in discovery order
    pub markers: [FinderCandidate; 3],
    /// Comparison slack of the padded raster
    pub tolerance: Tolerance,
}

/// Dark/light run lengths along the segment `from -> to`
///
/// Pixels are stepped along the dominant axis; leading light pixels are skipped and
/// counting stops once five runs (dark, light, dark, light, dark) are complete.
pub fn scan_runs(dark: &BitMatrix, from: Point, to: Point) -> [usize; 5] {
    let mut runs = [0usize; 5];
    let steep = (from.x - to.x).abs() < (from.y - to.y).abs();
    // (major, minor) coordinates
    let project = |p: Point| if steep { (p.y, p.x) } else { (p.x, p.y) };
    let (start, end) = {
        let (a, b) = (project(from), project(to));
        if a.0 < b.0 { (a, b) } else { (b, a) }
    };
    if start.0 == end.0 {
        return runs;
    }
    let slope = (end.1 - start.1) / (end.0 - start.0);
    let intercept = start.1 - slope * start.0;

    let mut index = 0usize;
    let mut m = start.0.floor();
    while m < end.0 {
        let s = ((m + 0.5) * slope + intercept).floor();
        let (x, y) = if steep { (s, m) } else { (m, s) };
        let is_dark = x >= 0.0 && y >= 0.0 && dark.get(x as usize, y as usize);
        m += 1.0;
        // dark runs sit at even indices
        if is_dark != (index % 2 == 0) {
            if index == 0 && runs[0] == 0 {
                continue;
            }
            index += 1;
            if index == runs.len() {
                break;
            }
        }
        runs[index] += 1;
    }
    runs
}

/// Whether five runs fit the 1:1:3:1:1 finder proportions
pub fn is_finder_ratio(runs: &[usize; 5]) -> bool {
    if runs.contains(&0) {
        return false;
    }
    let r = runs.map(|v| v as f32);
    let unit = (r[0] + r[1] + r[2] / 3.0 + r[3] + r[4]) / 5.0;
    let outer_ok = [r[0], r[1], r[3], r[4]]
        .iter()
        .all(|v| (0.5..=1.5).contains(&(v / unit)));
    outer_ok && (2.5..=3.5).contains(&(r[2] / unit))
}

/// Finder marker search over a luma raster
pub struct FinderDetector;

impl FinderDetector {
    /// Every marker-shaped region, in source coordinates, with the comparison slack used
    pub fn detect(gray: &GrayImage, config: &DecoderConfig) -> (Vec<FinderCandidate>, Tolerance) {
        let quiet = config.quiet_zone_px;
        let light = if config.inverted { 0 } else { 255 };
        let padded = pad(gray, quiet, light);
        let (width, height) = padded.dimensions();
        let tolerance = Tolerance::for_dimensions(width, height);
        let max_side = (height / config.max_finder_fraction.max(1)) as f32;
        let dark = binarize(&padded, config.inverted);

        let mut candidates = Vec::new();
        for region in find_dark_regions(&dark) {
            if region.row_count() < MIN_REGION_ROWS {
                continue;
            }
            let hull = convex_hull(&region.outline_points());
            let Some(rect) = min_area_rect(&hull) else {
                continue;
            };
            if !tolerance.matches(rect.height, rect.width)
                || tolerance.compare(rect.height, max_side) == Ordering::Greater
            {
                continue;
            }
            let [across, down] = rect.midlines();
            let runs_a = scan_runs(&dark, across.0, across.1);
            let runs_b = scan_runs(&dark, down.0, down.1);
            trace!(
                "region at ({:.1}, {:.1}) side {:.1}: runs {:?} / {:?}",
                rect.center.x, rect.center.y, rect.side(), runs_a, runs_b
            );
            if is_finder_ratio(&runs_a) && is_finder_ratio(&runs_b) {
                candidates.push(FinderCandidate {
                    rect: rect.translate(-(quiet as f32), -(quiet as f32)),
                });
            }
        }
        debug!(
            "{} finder candidates (tolerance {}px)",
            candidates.len(),
            tolerance.value()
        );
        (candidates, tolerance)
    }

    /// Exactly three mutually consistent markers
    pub fn locate(gray: &GrayImage, config: &DecoderConfig) -> Result<Located> {
        let (candidates, tolerance) = Self::detect(gray, config);
        let markers: [FinderCandidate; 3] = candidates
            .as_slice()
            .try_into()
            .map_err(|_| GeometryFault::CandidateCount(candidates.len()))?;

        if let Some(i) = markers
            .iter()
            .position(|m| !tolerance.matches(m.rect.width, m.rect.height))
        {
            return Err(GeometryFault::NotSquare(i).into());
        }
        if !tolerance.matches(markers[0].rect.width, markers[1].rect.width)
            || !tolerance.matches(markers[1].rect.width, markers[2].rect.width)
        {
            return Err(GeometryFault::Incongruent.into());
        }
        for i in 0..3 {
            let diff = (markers[i].rect.angle - markers[(i + 1) % 3].rect.angle).abs();
            if !tolerance.matches(diff, 0.0) && !tolerance.matches(diff, 90.0) {
                return Err(GeometryFault::AngleMismatch(diff).into());
            }
        }
        Ok(Located {
            markers,
            tolerance,
        })
    }
}
