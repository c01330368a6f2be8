//! Packing favicons into a zip archive

use super::error::{FaviconError, Result};
use super::render::{FAVICON_SIZES, FaviconArtifact, render_all};
use super::source::FaviconSource;
use std::collections::HashSet;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// File name of the saved archive
pub const ARCHIVE_NAME: &str = "favicons.zip";

/// Write artifacts into an in-memory zip archive
///
/// # Errors
///
/// Returns `FaviconError::DuplicateSize` if two artifacts share a size, or
/// `FaviconError::Archive` if writing fails.
pub fn pack_archive(artifacts: &[FaviconArtifact]) -> Result<Vec<u8>> {
    let mut seen = HashSet::new();
    if let Some(dup) = artifacts.iter().find(|a| !seen.insert(a.size)) {
        return Err(FaviconError::DuplicateSize(dup.size));
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for artifact in artifacts {
        writer.start_file(artifact.file_name(), options)?;
        writer.write_all(&artifact.png)?;
    }

    Ok(writer.finish()?.into_inner())
}

/// Render every favicon size and pack the complete set
///
/// # Errors
///
/// Fails on the first size that cannot be rendered; no archive is produced
/// in that case.
pub fn export(source: &FaviconSource) -> Result<Vec<u8>> {
    let (width, height) = source.dimensions();
    info!(source = source.name(), width, height, "exporting favicon set");

    let artifacts = render_all(source.image(), &FAVICON_SIZES)?;
    if artifacts.len() != FAVICON_SIZES.len() {
        return Err(FaviconError::IncompleteSet {
            expected: FAVICON_SIZES.len(),
            actual: artifacts.len(),
        });
    }

    pack_archive(&artifacts)
}

/// Save a finished archive as `favicons.zip` inside `dir`
///
/// # Errors
///
/// Returns `FaviconError::IoError` if the directory cannot be created or
/// the file cannot be written.
pub fn save_archive(archive: &[u8], dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(ARCHIVE_NAME);
    fs::write(&path, archive)?;
    info!(path = %path.display(), bytes = archive.len(), "saved favicon archive");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn entry_names(archive: &[u8]) -> Vec<String> {
        let zip = ZipArchive::new(Cursor::new(archive)).unwrap();
        let mut names: Vec<String> = zip.file_names().map(String::from).collect();
        names.sort();
        names
    }

    #[test]
    fn test_export_contains_every_size() {
        let source = FaviconSource::from_image("s.png", RgbaImage::from_pixel(64, 64, Rgba([1, 2, 3, 255])));
        let archive = export(&source).unwrap();

        let names = entry_names(&archive);
        let mut expected: Vec<String> = FAVICON_SIZES.iter().map(|s| format!("favicon{s}.png")).collect();
        expected.sort();

        assert_eq!(names.len(), 11);
        assert_eq!(names, expected);
    }

    #[test]
    fn test_entries_decode_to_their_size() {
        let source = FaviconSource::from_image("s.png", RgbaImage::from_pixel(10, 30, Rgba([5, 5, 5, 255])));
        let archive = export(&source).unwrap();
        let mut zip = ZipArchive::new(Cursor::new(archive)).unwrap();

        let mut png = Vec::new();
        zip.by_name("favicon180.png").unwrap().read_to_end(&mut png).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();

        assert_eq!((decoded.width(), decoded.height()), (180, 180));
    }

    #[test]
    fn test_duplicate_sizes_rejected() {
        let artifact = FaviconArtifact { size: 16, png: vec![1] };
        let err = pack_archive(&[artifact.clone(), artifact]).unwrap_err();
        assert!(matches!(err, FaviconError::DuplicateSize(16)));
    }

    #[test]
    fn test_save_archive() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out");

        let path = save_archive(b"zipdata", &target).unwrap();

        assert_eq!(path, target.join("favicons.zip"));
        assert_eq!(fs::read(path).unwrap(), b"zipdata");
    }
}
