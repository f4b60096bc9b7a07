//! Simple path tracer example.
//!
//! Renders the card room with the mirrored logo and saves it as PNG.

use card_renderer::{render_parallel, Camera, PathTracer, RenderConfig, SceneField, DEFAULT_BUCKET_SIZE};

fn main() {
    println!("Card Path Tracer - Simple Example");
    println!("=================================");

    let scene = SceneField::new().with_logo();
    let tracer = PathTracer::with_defaults(&scene);

    // Set up camera
    let mut camera = Camera::new().with_resolution(480, 270);
    camera.initialize();

    let config = RenderConfig {
        samples_per_pixel: 16,
        seed: 7,
    };

    println!(
        "Rendering {}x{} @ {} spp...",
        camera.image_width, camera.image_height, config.samples_per_pixel
    );

    let start = std::time::Instant::now();
    let image = render_parallel(&camera, &tracer, &config, DEFAULT_BUCKET_SIZE).expect("Failed to render");
    println!("Rendered in {:?}", start.elapsed());

    let filename = "card.png";
    image.save(filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}
