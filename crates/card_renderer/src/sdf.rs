//! Signed distance primitives that make up the card scene.
//!
//! Every primitive returns a signed distance: positive in free space,
//! negative inside solid material. Combining is done with `min` (union)
//! and negated `min` (carving a hollow out of solid space).

use card_math::{Aabb, Vec2, Vec3};

/// A signed distance field.
pub trait Sdf: Send + Sync {
    /// Signed distance from `p` to the nearest surface of this primitive.
    fn distance(&self, p: Vec3) -> f32;
}

/// The room: a hollow lower room with a vaulted recess above it, and a
/// lattice of ceiling planks repeating along x.
#[derive(Debug, Clone, Copy)]
pub struct RoomSdf {
    pub lower_room: Aabb,
    pub upper_room: Aabb,
    pub plank: Aabb,
    /// Spacing of the plank lattice along |x|.
    pub plank_period: f32,
}

impl RoomSdf {
    pub fn new(lower_room: Aabb, upper_room: Aabb, plank: Aabb, plank_period: f32) -> Self {
        Self {
            lower_room,
            upper_room,
            plank,
            plank_period,
        }
    }
}

impl Default for RoomSdf {
    fn default() -> Self {
        Self {
            lower_room: Aabb::from_points(Vec3::new(-30.0, -0.5, -30.0), Vec3::new(30.0, 18.0, 30.0)),
            upper_room: Aabb::from_points(Vec3::new(-25.0, 17.0, -25.0), Vec3::new(25.0, 20.0, 25.0)),
            plank: Aabb::from_points(Vec3::new(1.5, 18.5, -25.0), Vec3::new(6.5, 20.0, 25.0)),
            plank_period: 8.0,
        }
    }
}

impl Sdf for RoomSdf {
    fn distance(&self, p: Vec3) -> f32 {
        // Free space is the union of both boxes; negating carves it out of solid.
        let hollow = -self
            .lower_room
            .signed_distance(p)
            .min(self.upper_room.signed_distance(p));

        let folded = Vec3::new(p.x.abs() % self.plank_period, p.y, p.z);
        let planks = self.plank.signed_distance(folded);

        hollow.min(planks)
    }
}

/// Half-space light: everything above `height` is sky.
#[derive(Debug, Clone, Copy)]
pub struct SkyPlane {
    pub height: f32,
}

impl SkyPlane {
    pub fn new(height: f32) -> Self {
        Self { height }
    }
}

impl Default for SkyPlane {
    fn default() -> Self {
        Self { height: 19.9 }
    }
}

impl Sdf for SkyPlane {
    #[inline]
    fn distance(&self, p: Vec3) -> f32 {
        self.height - p.y
    }
}

/// Straight strokes of the "PIXAR" logo, two endpoints per stroke packed as
/// characters offset by 79 and scaled by 0.5.
const LOGO_STROKES: [&[u8; 4]; 15] = [
    b"5O5_", b"5W9W", b"5_9_", // P (without curve)
    b"AOEO", b"COC_", b"A_E_", // I
    b"IOQ_", b"I_QO", // X
    b"UOY_", b"Y_]O", b"WW[W", // A
    b"aOa_", b"aWeW", b"a_e_", b"cWiO", // R (without curve)
];

/// Centres of the bowls of the P and R.
const LOGO_BOWLS: [Vec2; 2] = [Vec2::new(-11.0, 6.0), Vec2::new(11.0, 6.0)];

/// Decorative extruded letters standing in the z = 0 plane.
#[derive(Debug, Clone)]
pub struct LetterLogo {
    strokes: Vec<(Vec2, Vec2)>,
    bowls: Vec<Vec2>,
    bowl_radius: f32,
    thickness: f32,
}

impl LetterLogo {
    /// The "PIXAR" logo.
    pub fn pixar() -> Self {
        let decode = |a: u8, b: u8| Vec2::new(a as f32 - 79.0, b as f32 - 79.0) * 0.5;
        let strokes = LOGO_STROKES
            .iter()
            .map(|s| (decode(s[0], s[1]), decode(s[2], s[3])))
            .collect();

        Self {
            strokes,
            bowls: LOGO_BOWLS.to_vec(),
            bowl_radius: 2.0,
            thickness: 0.5,
        }
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// 2D distance to the letter outlines in the xy plane.
    fn outline_distance(&self, f: Vec2) -> f32 {
        let mut closest_sq = f32::MAX;
        for &(begin, end) in &self.strokes {
            let e = end - begin;
            let t = ((f - begin).dot(e) / e.dot(e)).clamp(0.0, 1.0);
            let o = f - (begin + e * t);
            closest_sq = closest_sq.min(o.dot(o));
        }
        let mut distance = closest_sq.sqrt();

        // Bowls are half rings opening to the left, closed by the stroke ends.
        for &centre in &self.bowls {
            let mut o = f - centre;
            let d = if o.x > 0.0 {
                (o.length() - self.bowl_radius).abs()
            } else {
                o.y += if o.y > 0.0 { -self.bowl_radius } else { self.bowl_radius };
                o.length()
            };
            distance = distance.min(d);
        }
        distance
    }
}

impl Sdf for LetterLogo {
    fn distance(&self, p: Vec3) -> f32 {
        let d = self.outline_distance(Vec2::new(p.x, p.y));
        // Rounded extrusion along z using an 8-norm.
        (d.powi(8) + p.z.powi(8)).powf(0.125) - self.thickness
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_interior_is_free_space() {
        let room = RoomSdf::default();
        // One unit above the floor, far from walls and ceiling
        let d = room.distance(Vec3::new(0.0, 0.5, 0.0));
        assert!((d - 1.0).abs() < 1e-6, "d = {}", d);
    }

    #[test]
    fn test_room_walls_are_solid() {
        let room = RoomSdf::default();
        assert!(room.distance(Vec3::new(0.0, -1.5, 0.0)) < 0.0);
        assert!(room.distance(Vec3::new(31.0, 5.0, 0.0)) < 0.0);
        // Inside the recess walls but above the lower room
        assert!(room.distance(Vec3::new(27.0, 19.0, 0.0)) < 0.0);
    }

    #[test]
    fn test_planks_repeat_every_period() {
        let room = RoomSdf::default();
        let a = room.distance(Vec3::new(4.0, 19.0, 0.0));
        let b = room.distance(Vec3::new(12.0, 19.0, 0.0));
        let mirrored = room.distance(Vec3::new(-4.0, 19.0, 0.0));
        assert!(a < 0.0, "plank interior should be solid");
        assert_eq!(a, b);
        assert_eq!(a, mirrored);
        // Gap between planks is open
        assert!(room.distance(Vec3::new(0.0, 19.0, 0.0)) > 0.0);
    }

    #[test]
    fn test_sky_plane() {
        let sky = SkyPlane::default();
        assert!((sky.distance(Vec3::new(3.0, 9.9, -4.0)) - 10.0).abs() < 1e-5);
        assert!(sky.distance(Vec3::new(0.0, 20.0, 0.0)) < 0.0);
    }

    #[test]
    fn test_logo_strokes_decode() {
        let logo = LetterLogo::pixar();
        assert_eq!(logo.stroke_count(), 15);
        // First stroke is the stem of the P from (-13, 0) to (-13, 8)
        assert_eq!(logo.strokes[0], (Vec2::new(-13.0, 0.0), Vec2::new(-13.0, 8.0)));
    }

    #[test]
    fn test_logo_distance() {
        let logo = LetterLogo::pixar();
        // On the stem of the P: inside the extruded stroke
        assert!(logo.distance(Vec3::new(-13.0, 4.0, 0.0)) < 0.0);
        // Well in front of the letters
        assert!(logo.distance(Vec3::new(-13.0, 4.0, 5.0)) > 4.0);
    }
}
