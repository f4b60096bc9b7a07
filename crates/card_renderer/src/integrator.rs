//! Path tracing integrator.
//!
//! Each path takes at most `max_bounces` marching steps. Walls scatter
//! diffusely and gather direct light from a fixed sun direction with a shadow
//! ray; the logo reflects like a mirror; reaching the sky ends the path.

use crate::march::{Hit, MarchConfig, RayMarcher};
use crate::sampling::{cosine_hemisphere, gen_f32};
use crate::scene::{SceneField, SurfaceKind};
use card_math::{reflect, safe_normalize, Ray, Vec3};
use rand::RngCore;

/// Color type alias (linear RGB radiance, unbounded)
pub type Color = Vec3;

/// Light transport constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceConfig {
    /// Maximum number of surface interactions per path
    pub max_bounces: u32,
    /// Reflectance applied at every bounce
    pub attenuation: f32,
    /// Distance new rays are pushed off the surface
    pub bias: f32,
    /// Unit direction towards the sun
    pub light_direction: Vec3,
    /// Direct sunlight reaching an unoccluded wall
    pub wall_light: Color,
    /// Radiance of the sky
    pub sky_color: Color,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            max_bounces: 3,
            attenuation: 0.2,
            bias: 0.1,
            light_direction: safe_normalize(Vec3::new(0.6, 0.6, 1.0)),
            wall_light: Color::new(500.0, 400.0, 100.0),
            sky_color: Color::new(50.0, 80.0, 100.0),
        }
    }
}

/// Surface response, chosen by surface kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    /// Perfect mirror, no light gathered
    Specular,
    /// Cosine-weighted scatter plus direct sun
    Diffuse,
    /// Terminates the path with the sky color
    Emissive,
}

impl From<SurfaceKind> for Material {
    fn from(kind: SurfaceKind) -> Self {
        match kind {
            SurfaceKind::Logo => Material::Specular,
            SurfaceKind::Wall => Material::Diffuse,
            SurfaceKind::Sky => Material::Emissive,
        }
    }
}

/// Monte Carlo path tracer over a scene field.
pub struct PathTracer<'a> {
    marcher: RayMarcher<'a>,
    config: TraceConfig,
}

impl<'a> PathTracer<'a> {
    pub fn new(scene: &'a SceneField, march: MarchConfig, config: TraceConfig) -> Self {
        Self {
            marcher: RayMarcher::new(scene, march),
            config,
        }
    }

    /// Tracer with the default marching and lighting constants.
    pub fn with_defaults(scene: &'a SceneField) -> Self {
        Self::new(scene, MarchConfig::default(), TraceConfig::default())
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    pub fn marcher(&self) -> &RayMarcher<'a> {
        &self.marcher
    }

    /// Radiance arriving along `ray` (unit direction).
    ///
    /// The result is linear and unclamped.
    pub fn trace(&self, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        let mut ray = *ray;
        let mut color = Color::ZERO;
        let mut attenuation = 1.0;

        for _ in 0..self.config.max_bounces {
            let Some(hit) = self.marcher.march(&ray) else {
                break;
            };

            match Material::from(hit.kind) {
                Material::Specular => {
                    let direction = reflect(ray.direction, hit.normal);
                    ray = Ray::new(hit.position + direction * self.config.bias, direction);
                    attenuation *= self.config.attenuation;
                }
                Material::Diffuse => {
                    let incidence = hit.normal.dot(self.config.light_direction);

                    // Azimuth is drawn before the cosine term.
                    let u1 = gen_f32(rng);
                    let u2 = gen_f32(rng);
                    let direction = cosine_hemisphere(hit.normal, u1, u2);
                    ray = Ray::new(hit.position + direction * self.config.bias, direction);
                    attenuation *= self.config.attenuation;

                    if incidence > 0.0 && self.sun_visible(&hit) {
                        color += attenuation * incidence * self.config.wall_light;
                    }
                }
                Material::Emissive => {
                    color += attenuation * self.config.sky_color;
                    break;
                }
            }
        }

        color
    }

    /// Shadow test towards the sun from just above the surface.
    fn sun_visible(&self, hit: &Hit) -> bool {
        let shadow = Ray::new(
            hit.position + hit.normal * self.config.bias,
            self.config.light_direction,
        );
        matches!(
            self.marcher.march(&shadow),
            Some(Hit {
                kind: SurfaceKind::Sky,
                ..
            })
        )
    }
}
