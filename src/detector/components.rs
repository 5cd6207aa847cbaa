//! 8-connected dark regions, labelled with a two-pass union-find.

use std::collections::HashMap;

use crate::models::{BitMatrix, Point};

/// Union-Find over provisional labels
struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        // label 0 is background
        Self { parent: vec![0] }
    }

    fn make_set(&mut self) -> u32 {
        let label = self.parent.len() as u32;
        self.parent.push(label);
        label
    }

    fn find(&mut self, mut x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        while self.parent[x as usize] != root {
            let next = self.parent[x as usize];
            self.parent[x as usize] = root;
            x = next;
        }
        root
    }

    fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x != root_y {
            self.parent[root_x.max(root_y) as usize] = root_x.min(root_y);
        }
    }
}

/// Leftmost and rightmost dark pixel of a region on one row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    /// Row
    pub y: usize,
    /// Leftmost dark column
    pub min_x: usize,
    /// Rightmost dark column
    pub max_x: usize,
}

/// One connected dark region
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DarkRegion {
    /// Row extents, top to bottom
    pub spans: Vec<RowSpan>,
    /// Dark pixel count
    pub area: usize,
}

impl DarkRegion {
    /// Rows the region touches
    pub fn row_count(&self) -> usize {
        self.spans.len()
    }

    /// Pixel-corner points of each row's extreme pixels
    ///
    /// The hull of these points is the hull of the region's pixel squares.
    pub fn outline_points(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.spans.len() * 4);
        for span in &self.spans {
            let top = span.y as f32;
            let left = span.min_x as f32;
            let right = (span.max_x + 1) as f32;
            points.extend([
                Point::new(left, top),
                Point::new(left, top + 1.0),
                Point::new(right, top),
                Point::new(right, top + 1.0),
            ]);
        }
        points
    }
}

/// Find connected dark regions, ordered by their first pixel in raster order
pub fn find_dark_regions(matrix: &BitMatrix) -> Vec<DarkRegion> {
    let width = matrix.width();
    let height = matrix.height();
    let mut labels = vec![0u32; width * height];
    let mut uf = UnionFind::new();

    // First pass: provisional labels from the already-visited neighbours
    for y in 0..height {
        for x in 0..width {
            if !matrix.get(x, y) {
                continue;
            }
            let mut neighbours = [0u32; 4];
            if x > 0 {
                neighbours[0] = labels[y * width + x - 1];
            }
            if y > 0 {
                let above = (y - 1) * width;
                neighbours[1] = labels[above + x];
                if x > 0 {
                    neighbours[2] = labels[above + x - 1];
                }
                if x + 1 < width {
                    neighbours[3] = labels[above + x + 1];
                }
            }
            let label = match neighbours.iter().copied().filter(|&l| l != 0).min() {
                Some(min) => {
                    for &l in neighbours.iter().filter(|&&l| l != 0 && l != min) {
                        uf.union(min, l);
                    }
                    min
                }
                None => uf.make_set(),
            };
            labels[y * width + x] = label;
        }
    }

    // Second pass: resolve roots and collect row spans
    let mut index_of: HashMap<u32, usize> = HashMap::new();
    let mut regions: Vec<DarkRegion> = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let label = labels[y * width + x];
            if label == 0 {
                continue;
            }
            let root = uf.find(label);
            let idx = *index_of.entry(root).or_insert_with(|| {
                regions.push(DarkRegion::default());
                regions.len() - 1
            });
            let region = &mut regions[idx];
            region.area += 1;
            match region.spans.last_mut() {
                Some(span) if span.y == y => span.max_x = x,
                _ => region.spans.push(RowSpan {
                    y,
                    min_x: x,
                    max_x: x,
                }),
            }
        }
    }
    regions
}
