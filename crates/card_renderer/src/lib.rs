//! Card Renderer - SDF Path Tracing
//!
//! A Monte Carlo path tracer over a signed distance field scene: a room
//! with a planked ceiling lit by the sky, optionally with mirrored letters.
//!
//! The pipeline is leaf-first: [`SceneField`] answers distance queries,
//! [`RayMarcher`] sphere-traces rays against it, [`PathTracer`] bounces
//! paths through the marcher, and the renderer averages jittered samples
//! per pixel before handing bytes to the image sink.

mod sdf;
mod scene;
mod march;
mod integrator;
mod sampling;
mod camera;
mod renderer;
mod bucket;
mod output;

pub use sdf::{LetterLogo, RoomSdf, Sdf, SkyPlane};
pub use scene::{SceneField, SceneSample, SurfaceKind};
pub use march::{Hit, MarchConfig, RayMarcher};
pub use integrator::{Color, Material, PathTracer, TraceConfig};
pub use sampling::{cosine_hemisphere, gen_f32, pixel_rng};
pub use camera::Camera;
pub use renderer::{
    color_to_rgb, render, render_pixel, tone_map, ImageBuffer, RenderConfig, RenderError,
    RenderResult,
};
pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use output::{write_rgb, OutputError, OutputResult};

/// Re-export common math types from card_math
pub use card_math::{Ray, Vec3};
