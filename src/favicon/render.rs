//! Square resizing and PNG encoding

use super::error::{FaviconError, Result};
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use rayon::prelude::*;
use std::io::Cursor;

/// Every favicon edge length that gets generated, in pixels
pub const FAVICON_SIZES: [u32; 11] = [16, 32, 48, 64, 96, 128, 180, 192, 256, 512, 1000];

/// Archive entry name for a size
#[must_use]
pub fn favicon_file_name(size: u32) -> String {
    format!("favicon{size}.png")
}

/// One encoded favicon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaviconArtifact {
    pub size: u32,
    pub png: Vec<u8>,
}

impl FaviconArtifact {
    #[must_use]
    pub fn file_name(&self) -> String {
        favicon_file_name(self.size)
    }
}

/// Stretch `image` onto a `size`x`size` square and encode it as PNG
///
/// The aspect ratio is not preserved and nothing is letterboxed.
///
/// # Errors
///
/// Returns `FaviconError::InvalidSize` for a zero size and
/// `FaviconError::Image` if encoding fails.
pub fn render_size(image: &RgbaImage, size: u32) -> Result<FaviconArtifact> {
    if size == 0 {
        return Err(FaviconError::InvalidSize(size));
    }

    let resized = imageops::resize(image, size, size, FilterType::Triangle);
    let mut png = Vec::new();
    resized.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(FaviconArtifact { size, png })
}

/// Render all `sizes` in parallel
///
/// The first failing size fails the whole batch.
///
/// # Errors
///
/// Returns the error of a failed [`render_size`].
pub fn render_all(image: &RgbaImage, sizes: &[u32]) -> Result<Vec<FaviconArtifact>> {
    sizes
        .par_iter()
        .map(|&size| render_size(image, size))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn decode(png: &[u8]) -> RgbaImage {
        image::load_from_memory(png).unwrap().to_rgba8()
    }

    #[test]
    fn test_solid_color_stays_uniform() {
        let color = Rgba([200, 40, 90, 255]);
        let source = RgbaImage::from_pixel(100, 100, color);

        let artifact = render_size(&source, 32).unwrap();
        let decoded = decode(&artifact.png);

        assert_eq!(decoded.dimensions(), (32, 32));
        assert!(decoded.pixels().all(|p| *p == color));
    }

    #[test]
    fn test_stretches_without_letterbox() {
        // Left half red, right half blue: a stretched result keeps both
        // halves and has no transparent padding rows.
        let source = RgbaImage::from_fn(200, 50, |x, _| {
            if x < 100 { Rgba([255, 0, 0, 255]) } else { Rgba([0, 0, 255, 255]) }
        });

        let decoded = decode(&render_size(&source, 16).unwrap().png);

        assert_eq!(decoded.dimensions(), (16, 16));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(decoded.get_pixel(15, 15).0, [0, 0, 255, 255]);
        assert!(decoded.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn test_zero_size_rejected() {
        let source = RgbaImage::new(4, 4);
        assert!(matches!(render_size(&source, 0), Err(FaviconError::InvalidSize(0))));
    }

    #[test]
    fn test_render_all_sizes() {
        let source = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
        let artifacts = render_all(&source, &[16, 32, 48]).unwrap();

        let sizes: Vec<u32> = artifacts.iter().map(|a| a.size).collect();
        assert_eq!(sizes, vec![16, 32, 48]);
    }

    #[test]
    fn test_render_all_fails_as_a_group() {
        let source = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
        let result = render_all(&source, &[16, 0, 48]);
        assert!(matches!(result, Err(FaviconError::InvalidSize(0))));
    }

    #[test]
    fn test_file_names() {
        assert_eq!(favicon_file_name(16), "favicon16.png");
        assert_eq!(favicon_file_name(1000), "favicon1000.png");
    }
}
