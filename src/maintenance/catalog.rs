/// Photo directory scan for `manifest list`
///
/// Builds manifest entries for every image under the photos directory,
/// reading dimensions from file headers so the stack can size cards
/// without waiting for a load.

use std::path::Path;
use walkdir::WalkDir;

use crate::error::{GalleryError, Result};
use crate::state::data::ImageItem;

/// Extensions recognized as photos (compared lowercase)
pub const IMAGE_EXTENSIONS: [&str; 9] = [
    "jpg", "jpeg", "png", "gif", "webp", "avif", "bmp", "tiff", "tif",
];

/// Check if a file is a photo by extension
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Scan `photos_dir` recursively and return entries sorted by path
pub fn scan_photos(photos_dir: &Path) -> Result<Vec<ImageItem>> {
    if !photos_dir.is_dir() {
        return Err(GalleryError::PhotosDirMissing(photos_dir.to_path_buf()));
    }

    log::info!("🔍 Scanning folder: {}", photos_dir.display());

    let mut found: Vec<(String, std::path::PathBuf)> = Vec::new();

    // Walk the directory tree recursively
    for entry in WalkDir::new(photos_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() || !is_image_file(path) {
            continue;
        }

        let Ok(relative) = path.strip_prefix(photos_dir) else {
            continue;
        };

        // Manifest paths always use forward slashes
        let relative: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();

        found.push((format!("/photos/{}", relative.join("/")), path.to_path_buf()));
    }

    found.sort_by(|a, b| a.0.cmp(&b.0));

    log::info!("📐 Reading dimensions for {} images...", found.len());

    let items = found
        .into_iter()
        .map(|(manifest_path, file)| match image::image_dimensions(&file) {
            Ok((width, height)) if width > 0 && height > 0 => {
                ImageItem::with_dimensions(manifest_path, width, height)
            }
            Ok(_) => ImageItem::new(manifest_path),
            Err(e) => {
                log::warn!("⚠️  No dimensions for {}: {}", file.display(), e);
                ImageItem::new(manifest_path)
            }
        })
        .collect();

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("a.JPG")));
        assert!(is_image_file(Path::new("dir/b.webp")));
        assert!(!is_image_file(Path::new("notes.txt")));
        assert!(!is_image_file(Path::new("README")));
    }

    #[test]
    fn test_scan_photos() {
        let dir = tempfile::tempdir().unwrap();
        let photos = dir.path().join("photos");
        std::fs::create_dir_all(photos.join("day2")).unwrap();

        image::RgbImage::new(30, 20).save(photos.join("b.png")).unwrap();
        image::RgbImage::new(10, 40).save(photos.join("day2/a.png")).unwrap();
        std::fs::write(photos.join("notes.txt"), "not a photo").unwrap();
        std::fs::write(photos.join("corrupt.jpg"), "not a jpeg").unwrap();

        let items = scan_photos(&photos).unwrap();

        assert_eq!(
            items,
            vec![
                ImageItem::with_dimensions("/photos/b.png", 30, 20),
                ImageItem::new("/photos/corrupt.jpg"),
                ImageItem::with_dimensions("/photos/day2/a.png", 10, 40),
            ]
        );
    }

    #[test]
    fn test_missing_photos_dir() {
        let err = scan_photos(Path::new("/nonexistent/photos")).unwrap_err();
        assert!(matches!(err, GalleryError::PhotosDirMissing(_)));
    }
}
