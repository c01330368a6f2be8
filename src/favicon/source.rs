//! Favicon source images
//!
//! Raster formats are decoded with `image`; PSD documents are reduced to
//! their merged composite, layers are ignored.

use super::error::{FaviconError, Result};
use crate::upload::{UploadedFile, extension_of};
use image::{ImageFormat, RgbaImage};
use psd::Psd;
use std::io::Cursor;
use tracing::debug;

/// Extensions offered by the upload dialog
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "psd"];

/// Decoded source image, normalized to RGBA
#[derive(Debug, Clone)]
pub struct FaviconSource {
    name: String,
    image: RgbaImage,
}

impl FaviconSource {
    /// Decode an uploaded file
    ///
    /// # Errors
    ///
    /// Returns `FaviconError::Psd` for a broken PSD document,
    /// `FaviconError::TruncatedPsd` when its pixel data is cut short and
    /// `FaviconError::Image` if the raster data cannot be decoded.
    pub fn from_file(file: &UploadedFile) -> Result<Self> {
        let image = if file.extension() == "psd" {
            decode_psd(file.bytes())?
        } else {
            image::load_from_memory(file.bytes())?.to_rgba8()
        };

        debug!(
            file = file.name(),
            width = image.width(),
            height = image.height(),
            "decoded favicon source"
        );

        Ok(Self::from_image(file.name(), image))
    }

    /// Wrap an already decoded image
    #[must_use]
    pub fn from_image(name: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            name: name.into(),
            image,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Width and height in pixels
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Encode the source as PNG
    ///
    /// # Errors
    ///
    /// Returns `FaviconError::Image` if encoding fails.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut png = Vec::new();
        self.image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }
}

/// Whether the upload dialog lists this file name
#[must_use]
pub fn is_accepted(name: &str) -> bool {
    ACCEPTED_EXTENSIONS.contains(&extension_of(name).as_str())
}

fn decode_psd(bytes: &[u8]) -> Result<RgbaImage> {
    // The composite is padded when pixel data is missing, so check the
    // image data section before decoding.
    if bytes.starts_with(PSD_SIGNATURE) {
        match image_data_extent(bytes) {
            Some((needed, present)) if present >= needed => {}
            _ => return Err(FaviconError::TruncatedPsd),
        }
    }

    let psd = Psd::from_bytes(bytes)?;
    let (width, height) = (psd.width(), psd.height());
    RgbaImage::from_raw(width, height, psd.rgba()).ok_or(FaviconError::InvalidComposite { width, height })
}

const PSD_SIGNATURE: &[u8] = b"8BPS";
const PSD_HEADER_LEN: usize = 26;

fn be_u16(bytes: &[u8], at: usize) -> Option<usize> {
    let raw = bytes.get(at..at + 2)?;
    Some(usize::from(u16::from_be_bytes([raw[0], raw[1]])))
}

fn be_u32(bytes: &[u8], at: usize) -> Option<usize> {
    let raw = bytes.get(at..at + 4)?;
    usize::try_from(u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]])).ok()
}

/// Bytes the merged image data needs and bytes actually present
///
/// `None` when the sections before the image data are cut off. Only raw
/// and RLE data are measured; other compressions report zero needed.
fn image_data_extent(bytes: &[u8]) -> Option<(usize, usize)> {
    let channels = be_u16(bytes, 12)?;
    let height = be_u32(bytes, 14)?;
    let width = be_u32(bytes, 18)?;
    let depth = be_u16(bytes, 22)?;

    // color mode data, image resources, layer and mask info
    let mut offset = PSD_HEADER_LEN;
    for _ in 0..3 {
        offset = offset.checked_add(4)?.checked_add(be_u32(bytes, offset)?)?;
    }

    let compression = be_u16(bytes, offset)?;
    let data = bytes.get(offset + 2..)?;
    let rows = channels.checked_mul(height)?;

    let needed = match compression {
        0 => rows.checked_mul(width.checked_mul(depth)?.div_ceil(8))?,
        1 => {
            let table_len = rows.checked_mul(2)?;
            let table = data.get(..table_len)?;
            let packed: usize = table
                .chunks_exact(2)
                .map(|c| usize::from(u16::from_be_bytes([c[0], c[1]])))
                .sum();
            table_len + packed
        }
        _ => 0,
    };

    Some((needed, data.len()))
}
