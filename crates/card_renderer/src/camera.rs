//! Pinhole camera for primary ray generation.

use crate::sampling::gen_f32;
use card_math::{safe_normalize, Ray, Vec3};
use rand::RngCore;

/// Camera for generating rays into the scene.
///
/// Pixel (0, 0) is the top-left corner of the image.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,

    // Cached computed values (set by initialize())
    goal: Vec3,
    left: Vec3,
    up: Vec3,
}

impl Camera {
    /// Create a new camera framing the card scene.
    pub fn new() -> Self {
        Self {
            image_width: 240,
            image_height: 135,
            look_from: Vec3::new(-22.0, 5.0, 25.0),
            look_at: Vec3::new(-3.0, 4.0, 0.0),
            // Cached values (initialized to defaults)
            goal: Vec3::NEG_Z,
            left: Vec3::NEG_X,
            up: Vec3::Y,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.look_from
    }

    /// Initialize the camera (must be called before generating rays).
    ///
    /// `left` and `up` are scaled so one pixel spans 1/width of the view
    /// direction, giving a horizontal field of view of about 53 degrees.
    pub fn initialize(&mut self) {
        self.goal = safe_normalize(self.look_at - self.look_from);
        self.left = safe_normalize(Vec3::new(self.goal.z, 0.0, -self.goal.x))
            / self.image_width.max(1) as f32;
        self.up = self.goal.cross(self.left);
    }

    /// Generate a jittered ray through pixel (i, j).
    ///
    /// Consumes two random numbers, horizontal jitter first.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let w = self.image_width as i64;
        let h = self.image_height as i64;

        // Offsets grow leftwards and upwards from the image centre.
        let across = (w - i as i64 - w / 2) as f32 + gen_f32(rng);
        let above = (h - j as i64 - h / 2) as f32 + gen_f32(rng);

        let direction = safe_normalize(self.goal + self.left * across + self.up * above);
        Ray::new(self.look_from, direction)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
