//! Planar geometry on pixel coordinates: hulls, bounding rectangles and raster rotation.

use image::{GrayImage, Luma};
use rayon::prelude::*;

use crate::models::{Point, RotatedRect};

/// Convex hull by Andrew's monotone chain, counter-clockwise in a y-up frame
///
/// Collinear points are dropped. Fewer than three distinct points are returned as-is.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let mut lower: Vec<Point> = Vec::with_capacity(pts.len());
    for &p in &pts {
        while lower.len() >= 2 && lower[lower.len() - 2].cross(&lower[lower.len() - 1], &p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }
    let mut upper: Vec<Point> = Vec::with_capacity(pts.len());
    for &p in pts.iter().rev() {
        while upper.len() >= 2 && upper[upper.len() - 2].cross(&upper[upper.len() - 1], &p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Minimum-area enclosing rectangle of a convex polygon
///
/// One side of the optimum is collinear with a hull edge, so every edge direction is tried.
pub fn min_area_rect(hull: &[Point]) -> Option<RotatedRect> {
    let mut best: Option<(f32, [Point; 4])> = None;
    for (i, a) in hull.iter().enumerate() {
        let b = &hull[(i + 1) % hull.len()];
        let len = a.distance(b);
        if len == 0.0 {
            continue;
        }
        let (ux, uy) = ((b.x - a.x) / len, (b.y - a.y) / len);
        let (vx, vy) = (-uy, ux);

        let (mut u0, mut u1, mut v0, mut v1) = (f32::MAX, f32::MIN, f32::MAX, f32::MIN);
        for p in hull {
            let u = p.x * ux + p.y * uy;
            let v = p.x * vx + p.y * vy;
            u0 = u0.min(u);
            u1 = u1.max(u);
            v0 = v0.min(v);
            v1 = v1.max(v);
        }
        let area = (u1 - u0) * (v1 - v0);
        if best.as_ref().is_none_or(|(a, _)| area < *a) {
            let corner = |u: f32, v: f32| Point::new(u * ux + v * vx, u * uy + v * vy);
            best = Some((
                area,
                [corner(u0, v0), corner(u1, v0), corner(u1, v1), corner(u0, v1)],
            ));
        }
    }
    best.map(|(_, corners)| RotatedRect::from_corners(corners))
}

/// Surround `gray` with a `border`-pixel frame of `fill`
pub fn pad(gray: &GrayImage, border: u32, fill: u8) -> GrayImage {
    let mut out = GrayImage::from_pixel(
        gray.width() + 2 * border,
        gray.height() + 2 * border,
        Luma([fill]),
    );
    image::imageops::replace(&mut out, gray, i64::from(border), i64::from(border));
    out
}

/// Rotate a luma raster about its center with bilinear interpolation
///
/// Each output pixel `d` samples the source at `c + R(degrees) * (d - c)`, which turns
/// a feature lying along `degrees` back onto the x axis. Samples outside the source
/// read as `fill`; the output keeps the input dimensions.
pub fn rotate_about_center(gray: &GrayImage, degrees: f32, fill: u8) -> GrayImage {
    let (w, h) = gray.dimensions();
    let (cx, cy) = (w as f32 / 2.0, h as f32 / 2.0);
    let (sin, cos) = degrees.to_radians().sin_cos();
    let source = |x: i64, y: i64| -> f32 {
        if x < 0 || y < 0 || x >= i64::from(w) || y >= i64::from(h) {
            f32::from(fill)
        } else {
            f32::from(gray.get_pixel(x as u32, y as u32).0[0])
        }
    };

    let mut out = GrayImage::new(w, h);
    if w == 0 {
        return out;
    }
    out.par_chunks_mut(w as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let dy = y as f32 - cy;
            for (x, px) in row.iter_mut().enumerate() {
                let dx = x as f32 - cx;
                let sx = cx + cos * dx - sin * dy;
                let sy = cy + sin * dx + cos * dy;
                let (x0, y0) = (sx.floor(), sy.floor());
                let (fx, fy) = (sx - x0, sy - y0);
                let (x0, y0) = (x0 as i64, y0 as i64);
                let top = source(x0, y0) * (1.0 - fx) + source(x0 + 1, y0) * fx;
                let bottom = source(x0, y0 + 1) * (1.0 - fx) + source(x0 + 1, y0 + 1) * fx;
                *px = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
            }
        });
    out
}

/// Fold an angle in radians into `(-pi, pi]`
pub fn wrap_radians(angle: f32) -> f32 {
    angle.sin().atan2(angle.cos())
}
