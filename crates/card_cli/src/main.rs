use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use card_renderer::{render, render_parallel, PathTracer, SceneField};

mod settings;

use settings::Settings;

/// Render the card scene: a sky-lit room traced through a signed distance field.
#[derive(Parser, Debug)]
#[command(name = "card", version)]
struct Cli {
    /// JSON settings file; flags given on the command line take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Samples per pixel
    #[arg(short, long)]
    samples: Option<u32>,

    /// Seed for the per-pixel random streams
    #[arg(long)]
    seed: Option<u64>,

    /// Output image; the format follows the extension (.bmp, .png)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Add the mirrored letter logo to the room
    #[arg(long)]
    logo: bool,

    /// Render on the calling thread instead of the rayon pool
    #[arg(long)]
    sequential: bool,
}

impl Cli {
    /// Resolve file settings and flags into one set of settings.
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(samples) = self.samples {
            settings.samples = samples;
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(output) = &self.output {
            settings.output = output.clone();
        }
        settings.logo |= self.logo;
        settings.sequential |= self.sequential;

        settings.validate()?;
        Ok(settings)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = cli.settings()?;

    log::info!(
        "Rendering {}x{} @ {} spp (seed {}, logo {})",
        settings.width,
        settings.height,
        settings.samples,
        settings.seed,
        if settings.logo { "on" } else { "off" }
    );

    let scene = if settings.logo {
        SceneField::new().with_logo()
    } else {
        SceneField::new()
    };
    let tracer = PathTracer::with_defaults(&scene);
    let camera = settings.camera();
    let config = settings.render_config();

    let start = Instant::now();
    let image = if settings.sequential {
        render(&camera, &tracer, &config)?
    } else {
        render_parallel(&camera, &tracer, &config, settings.bucket_size)?
    };
    log::info!("Rendered in {:?}", start.elapsed());

    image
        .save(&settings.output)
        .with_context(|| format!("Failed to save {}", settings.output.display()))?;

    Ok(())
}
