/// Closed range of f32 values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Distance from x to the nearer bound.
    ///
    /// Positive when x lies inside the interval, negative outside.
    #[inline]
    pub fn depth(&self, x: f32) -> f32 {
        (x - self.min).min(self.max - x)
    }
}
