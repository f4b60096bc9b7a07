//! Image sink: encodes tone-mapped pixels to disk.
//!
//! The container is chosen from the file extension (`.bmp`, `.png`, ...).
//! Rows are handed over top row first; formats that store rows bottom-up,
//! like BMP, are flipped by the encoder.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::renderer::ImageBuffer;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGB")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to write image {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Write `width * height` RGB triples, row-major from the top row, to `path`.
pub fn write_rgb(path: impl AsRef<Path>, width: u32, height: u32, rgb: &[u8]) -> OutputResult<()> {
    let path = path.as_ref();
    let expected = width as usize * height as usize * 3;
    if rgb.len() != expected {
        return Err(OutputError::SizeMismatch {
            width,
            height,
            expected,
            actual: rgb.len(),
        });
    }

    image::save_buffer(path, rgb, width, height, image::ColorType::Rgb8).map_err(|source| {
        OutputError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;

    log::info!("Wrote {}x{} image to {}", width, height, path.display());
    Ok(())
}

impl ImageBuffer {
    /// Tone map and save the image.
    pub fn save(&self, path: impl AsRef<Path>) -> OutputResult<()> {
        write_rgb(path, self.width, self.height, &self.to_rgb8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_bmp_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.bmp");

        // 3 pixels wide: 9 bytes per row, padded to 12
        let mut image = ImageBuffer::new(3, 2);
        image.set(0, 0, Color::new(1.0, 0.0, 0.0));
        image.save(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..2], b"BM");
        let pixel_offset = u32::from_le_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]) as usize;
        assert_eq!(pixel_offset, 54);
        assert_eq!(u32::from_le_bytes([bytes[14], bytes[15], bytes[16], bytes[17]]), 40);
        assert_eq!(bytes.len(), 54 + 2 * 12);

        // BMP stores the bottom row first, so the top-left pixel starts the
        // second stored row, in BGR order.
        assert_eq!(&bytes[pixel_offset + 12..pixel_offset + 15], &[14, 14, 131]);
    }

    #[test]
    fn test_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.png");

        let rgb: Vec<u8> = (0..2 * 2 * 3).map(|i| (i * 20) as u8).collect();
        write_rgb(&path, 2, 2, &rgb).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.into_raw(), rgb);
    }

    #[test]
    fn test_size_mismatch() {
        let err = write_rgb("unused.bmp", 2, 2, &[0; 5]).unwrap_err();
        assert!(matches!(err, OutputError::SizeMismatch { expected: 12, actual: 5, .. }));
    }

    #[test]
    fn test_unwritable_path_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("card.bmp");
        let err = write_rgb(&path, 1, 1, &[0, 0, 0]).unwrap_err();
        assert!(err.to_string().contains("card.bmp"), "{}", err);
    }
}
