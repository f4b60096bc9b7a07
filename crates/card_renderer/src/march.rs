//! Sphere tracing against the scene field.

use crate::scene::{SceneField, SurfaceKind};
use card_math::{safe_normalize, Ray, Vec3};

/// Marching tolerances and budgets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchConfig {
    /// Distance below which a sample counts as on the surface
    pub epsilon: f32,
    /// Maximum number of field evaluations per ray
    pub max_steps: u32,
    /// Travel distance after which the ray is considered escaped
    pub max_distance: f32,
    /// Offset used for the finite-difference normal
    pub normal_offset: f32,
}

impl Default for MarchConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.01,
            max_steps: 100,
            max_distance: 100.0,
            normal_offset: 0.01,
        }
    }
}

/// A converged march.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub kind: SurfaceKind,
    pub position: Vec3,
    /// Unit gradient of the field at `position`
    pub normal: Vec3,
}

/// Sphere tracer over a borrowed scene.
#[derive(Clone, Copy)]
pub struct RayMarcher<'a> {
    scene: &'a SceneField,
    config: MarchConfig,
}

impl<'a> RayMarcher<'a> {
    pub fn new(scene: &'a SceneField, config: MarchConfig) -> Self {
        Self { scene, config }
    }

    pub fn scene(&self) -> &'a SceneField {
        self.scene
    }

    pub fn config(&self) -> &MarchConfig {
        &self.config
    }

    /// March `ray` (unit direction) until it reaches a surface.
    ///
    /// Returns `None` when the ray travels past `max_distance` or the step
    /// budget runs out before converging.
    pub fn march(&self, ray: &Ray) -> Option<Hit> {
        let mut t = 0.0;
        for _ in 0..self.config.max_steps {
            if t >= self.config.max_distance {
                return None;
            }
            let position = ray.at(t);
            let sample = self.scene.query(position);
            if sample.distance < self.config.epsilon {
                return Some(Hit {
                    kind: sample.kind,
                    position,
                    normal: self.normal(position, sample.distance),
                });
            }
            t += sample.distance;
        }
        None
    }

    /// Forward-difference gradient of the field at `position`, where the
    /// field already evaluated to `distance`.
    pub fn normal(&self, position: Vec3, distance: f32) -> Vec3 {
        let h = self.config.normal_offset;
        let gradient = Vec3::new(
            self.scene.distance(position + Vec3::new(h, 0.0, 0.0)) - distance,
            self.scene.distance(position + Vec3::new(0.0, h, 0.0)) - distance,
            self.scene.distance(position + Vec3::new(0.0, 0.0, h)) - distance,
        );
        safe_normalize(gradient)
    }
}
