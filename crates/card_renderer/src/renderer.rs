//! Pixel sampling, tone mapping and the sequential render loop.
//!
//! Each pixel averages `samples_per_pixel` independent paths through
//! jittered primary rays, then a Reinhard-style curve maps the linear
//! average to bytes.

use crate::sampling::pixel_rng;
use crate::{Camera, Color, PathTracer};
use card_math::Interval;
use thiserror::Error;

/// Errors raised before any pixel is rendered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing and soft shadows
    pub samples_per_pixel: u32,
    /// Base seed for the per-pixel random streams
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 24,
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// Check the configuration against a camera before rendering.
    pub fn validate(&self, camera: &Camera) -> RenderResult<()> {
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig(
                "samples per pixel must be at least 1".to_string(),
            ));
        }
        if camera.image_width == 0 || camera.image_height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "image size must be non-zero, got {}x{}",
                camera.image_width, camera.image_height
            )));
        }
        if camera.image_width.checked_mul(camera.image_height).is_none() {
            return Err(RenderError::InvalidConfig(format!(
                "image size {}x{} exceeds {} pixels",
                camera.image_width,
                camera.image_height,
                u32::MAX
            )));
        }
        Ok(())
    }
}

/// Byte range the tone curve is clamped to.
const BYTE_RANGE: Interval = Interval::new(0.0, 255.0);

/// Map linear radiance to a display byte.
///
/// `255 * (v + 14/241) / (v + 255/241)`: lifts black slightly and
/// approaches 255 as `v` grows.
#[inline]
pub fn tone_map(v: f32) -> u8 {
    let mapped = 255.0 * (241.0 * v + 14.0) / (241.0 * v + 255.0);
    BYTE_RANGE.clamp(mapped) as u8
}

/// Convert a color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    [tone_map(color.x), tone_map(color.y), tone_map(color.z)]
}

/// Render a single pixel with multi-sampling.
///
/// The pixel owns its random stream, so the result does not depend on
/// render order.
pub fn render_pixel(
    camera: &Camera,
    tracer: &PathTracer,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> Color {
    let mut rng = pixel_rng(config.seed, x, y);
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let ray = camera.get_ray(x, y, &mut rng);
        pixel_color += tracer.trace(&ray, &mut rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel.max(1) as f32
}

/// Linear radiance image, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Tone-mapped RGB bytes, top row first.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }
}

/// Render the entire scene to an image buffer on the calling thread.
pub fn render(camera: &Camera, tracer: &PathTracer, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    config.validate(camera)?;
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);

    for y in 0..camera.image_height {
        for x in 0..camera.image_width {
            let color = render_pixel(camera, tracer, x, y, config);
            image.set(x, y, color);
        }
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SceneField;
    use card_math::Vec3;

    fn sky_camera(width: u32, height: u32) -> Camera {
        let mut camera = Camera::new()
            .with_resolution(width, height)
            .with_position(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.5, 20.0, 0.5));
        camera.initialize();
        camera
    }

    #[test]
    fn test_tone_map_curve() {
        // Black is lifted to 255 * 14 / 255 = 14
        assert_eq!(tone_map(0.0), 14);
        assert_eq!(tone_map(1.0), 131);
        assert!(tone_map(1.0e6) >= 254);
    }

    #[test]
    fn test_tone_map_is_monotonic() {
        let mut last = 0;
        for i in 0..1000 {
            let v = tone_map(i as f32 * 0.25);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_image_buffer_layout() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, Color::new(1.0, 0.0, 0.0));
        assert_eq!(image.get(2, 1), Color::new(1.0, 0.0, 0.0));

        let bytes = image.to_rgb8();
        assert_eq!(bytes.len(), 3 * 2 * 3);
        // Last pixel of the bottom row
        assert_eq!(&bytes[15..18], &[131, 14, 14]);
    }

    #[test]
    fn test_zero_samples_rejected() {
        let scene = SceneField::new();
        let tracer = PathTracer::with_defaults(&scene);
        let config = RenderConfig {
            samples_per_pixel: 0,
            seed: 0,
        };
        let result = render(&sky_camera(2, 2), &tracer, &config);
        assert!(matches!(result, Err(RenderError::InvalidConfig(_))));
    }

    #[test]
    fn test_oversized_image_rejected() {
        let scene = SceneField::new();
        let tracer = PathTracer::with_defaults(&scene);
        let camera = Camera::new().with_resolution(65536, 65537);
        let config = RenderConfig::default();

        let err = config.validate(&camera).unwrap_err();
        assert!(err.to_string().contains("65536x65537"), "{}", err);
        assert!(matches!(
            render(&camera, &tracer, &config),
            Err(RenderError::InvalidConfig(_))
        ));
        assert!(matches!(
            crate::render_parallel(&camera, &tracer, &config, 64),
            Err(RenderError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_image_buffer_indexes_past_u32_rows() {
        // Row offsets are computed in usize
        let mut image = ImageBuffer::new(70_000, 1);
        image.set(69_999, 0, Color::ONE);
        assert_eq!(image.get(69_999, 0), Color::ONE);
        assert_eq!(image.index(69_999, 0), 69_999);

        let tall = ImageBuffer { width: 70_000, height: 70_000, pixels: Vec::new() };
        assert_eq!(tall.index(5, 69_999), 69_999 * 70_000 + 5);
    }

    #[test]
    fn test_sky_pixel_converges_to_sky_color() {
        let scene = SceneField::new();
        let tracer = PathTracer::with_defaults(&scene);
        let camera = sky_camera(64, 64);

        let sky = tracer.config().sky_color;
        for samples in [1, 256] {
            let config = RenderConfig {
                samples_per_pixel: samples,
                seed: 3,
            };
            let color = render_pixel(&camera, &tracer, 32, 32, &config);
            assert!((color - sky).length() < 1e-3, "{} spp: {:?}", samples, color);
        }
    }

    /// Variance of the summed channels across seeds.
    fn seed_variance(camera: &Camera, tracer: &PathTracer, x: u32, y: u32, samples: u32) -> f32 {
        let values: Vec<f32> = (0..8u64)
            .map(|seed| {
                let config = RenderConfig {
                    samples_per_pixel: samples,
                    seed,
                };
                let color = render_pixel(camera, tracer, x, y, &config);
                color.x + color.y + color.z
            })
            .collect();
        let mean = values.iter().sum::<f32>() / values.len() as f32;
        values.iter().map(|v| (v - mean) * (v - mean)).sum::<f32>() / values.len() as f32
    }

    #[test]
    fn test_wall_pixel_variance_drops_with_samples() {
        let scene = SceneField::new();
        let tracer = PathTracer::with_defaults(&scene);
        let mut camera = Camera::new().with_resolution(16, 9);
        camera.initialize();

        let mut rng = pixel_rng(0, 8, 4);
        let hit = tracer
            .marcher()
            .march(&camera.get_ray(8, 4, &mut rng))
            .expect("center ray should hit the room");
        assert_eq!(hit.kind, crate::SurfaceKind::Wall);

        let noisy = seed_variance(&camera, &tracer, 8, 4, 1);
        let converged = seed_variance(&camera, &tracer, 8, 4, 256);
        assert!(noisy > 0.0);
        assert!(converged < noisy, "256 spp {} vs 1 spp {}", converged, noisy);
    }

    #[test]
    fn test_single_pixel_render_is_reproducible() {
        let scene = SceneField::new();
        let tracer = PathTracer::with_defaults(&scene);
        let mut camera = Camera::new().with_resolution(1, 1);
        camera.initialize();
        let config = RenderConfig {
            samples_per_pixel: 8,
            seed: 2024,
        };

        let first = render(&camera, &tracer, &config).unwrap().to_rgb8();
        let second = render(&camera, &tracer, &config).unwrap().to_rgb8();
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }
}
