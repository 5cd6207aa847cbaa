/// 2D point with floating point coordinates, `y` grows downward
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance
    pub fn distance_squared(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Halfway point between `self` and `other`
    pub fn midpoint(&self, other: &Point) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Direction from `self` to `other` in radians, as `atan2(dy, dx)`
    pub fn direction_to(&self, other: &Point) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Translate point by (dx, dy)
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Z component of `(a - self) x (b - self)`
    pub fn cross(&self, a: &Point, b: &Point) -> f32 {
        (a.x - self.x) * (b.y - self.y) - (a.y - self.y) * (b.x - self.x)
    }
}
