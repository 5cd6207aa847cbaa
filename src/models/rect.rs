use super::Point;

/// Minimum-area bounding rectangle of a point set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedRect {
    /// Corners in traversal order, each adjacent to the next
    pub corners: [Point; 4],
    /// Centroid of the corners
    pub center: Point,
    /// Length of edge `corners[0] -> corners[1]`
    pub width: f32,
    /// Length of edge `corners[1] -> corners[2]`
    pub height: f32,
    /// Direction of the first edge in degrees, folded into `[0, 90)`
    pub angle: f32,
}

impl RotatedRect {
    /// Build from four consecutive corners
    pub fn from_corners(corners: [Point; 4]) -> Self {
        let center = Point::new(
            corners.iter().map(|p| p.x).sum::<f32>() / 4.0,
            corners.iter().map(|p| p.y).sum::<f32>() / 4.0,
        );
        let width = corners[0].distance(&corners[1]);
        let height = corners[1].distance(&corners[2]);
        let angle = corners[0]
            .direction_to(&corners[1])
            .to_degrees()
            .rem_euclid(90.0);
        Self {
            corners,
            center,
            width,
            height,
            angle,
        }
    }

    /// Mean side length
    pub fn side(&self) -> f32 {
        (self.width + self.height) / 2.0
    }

    /// Left edge of the axis-aligned square with this center and side
    pub fn left(&self) -> f32 {
        self.center.x - self.side() / 2.0
    }

    /// Top edge of the axis-aligned square with this center and side
    pub fn top(&self) -> f32 {
        self.center.y - self.side() / 2.0
    }

    /// The two segments joining midpoints of opposite edges
    pub fn midlines(&self) -> [(Point, Point); 2] {
        let c = &self.corners;
        [
            (c[0].midpoint(&c[1]), c[2].midpoint(&c[3])),
            (c[1].midpoint(&c[2]), c[3].midpoint(&c[0])),
        ]
    }

    /// Shift every coordinate by (dx, dy)
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::from_corners(self.corners.map(|p| p.translate(dx, dy)))
    }
}
