use crate::{Interval, Vec3};

/// Axis-aligned box used as a signed distance primitive.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create an AABB from its lower-left and upper-right corners.
    pub fn from_points(lower_left: Vec3, upper_right: Vec3) -> Self {
        Self {
            x: Interval::new(lower_left.x, upper_right.x),
            y: Interval::new(lower_left.y, upper_right.y),
            z: Interval::new(lower_left.z, upper_right.z),
        }
    }

    /// Signed distance from `p` to the box surface, negative inside.
    ///
    /// Inside the box this is exact (depth to the nearest face). Outside it
    /// is the largest per-axis overshoot, a lower bound of the true distance,
    /// which keeps sphere tracing conservative.
    #[inline]
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        -self
            .x
            .depth(p.x)
            .min(self.y.depth(p.y))
            .min(self.z.depth(p.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower_room() -> Aabb {
        Aabb::from_points(Vec3::new(-30.0, -0.5, -30.0), Vec3::new(30.0, 18.0, 30.0))
    }

    #[test]
    fn test_aabb_from_points() {
        let aabb = lower_room();
        assert_eq!(aabb.x, Interval::new(-30.0, 30.0));
        assert_eq!(aabb.y, Interval::new(-0.5, 18.0));
        assert_eq!(aabb.z, Interval::new(-30.0, 30.0));
    }

    #[test]
    fn test_signed_distance_inside_is_negative() {
        let aabb = lower_room();
        // Nearest face is the floor at y = -0.5
        assert_eq!(aabb.signed_distance(Vec3::new(0.0, 1.5, 0.0)), -2.0);
    }

    #[test]
    fn test_signed_distance_outside_is_positive() {
        let aabb = lower_room();
        assert_eq!(aabb.signed_distance(Vec3::new(0.0, 20.0, 0.0)), 2.0);
        assert_eq!(aabb.signed_distance(Vec3::new(35.0, 5.0, 0.0)), 5.0);
    }

    #[test]
    fn test_signed_distance_on_surface_is_zero() {
        let aabb = lower_room();
        assert_eq!(aabb.signed_distance(Vec3::new(30.0, 5.0, 0.0)), 0.0);
    }
}
