//! Render settings: JSON file defaults overridden by command line flags.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use card_renderer::{Camera, RenderConfig, Vec3, DEFAULT_BUCKET_SIZE};
use serde::{Deserialize, Serialize};

/// Everything needed to run one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    pub samples: u32,
    pub seed: u64,
    pub logo: bool,
    pub sequential: bool,
    pub bucket_size: u32,
    pub look_from: [f32; 3],
    pub look_at: [f32; 3],
    pub output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 240,
            height: 135,
            samples: 24,
            seed: 0,
            logo: false,
            sequential: false,
            bucket_size: DEFAULT_BUCKET_SIZE,
            look_from: [-22.0, 5.0, 25.0],
            look_at: [-3.0, 4.0, 0.0],
            output: PathBuf::from("card.bmp"),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file; missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
        Ok(settings)
    }

    /// Reject settings that cannot produce an image.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.width >= 1, "width must be at least 1 pixel");
        ensure!(self.height >= 1, "height must be at least 1 pixel");
        ensure!(
            self.width.checked_mul(self.height).is_some(),
            "image size {}x{} has too many pixels",
            self.width,
            self.height
        );
        ensure!(self.samples >= 1, "samples per pixel must be at least 1");
        Ok(())
    }

    /// Initialized camera for these settings.
    pub fn camera(&self) -> Camera {
        let mut camera = Camera::new()
            .with_resolution(self.width, self.height)
            .with_position(Vec3::from_array(self.look_from), Vec3::from_array(self.look_at));
        camera.initialize();
        camera
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            samples_per_pixel: self.samples,
            seed: self.seed,
        }
    }
}
