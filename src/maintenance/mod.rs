/// Manifest maintenance jobs
///
/// Batch jobs over the photos directory and `photoPaths.json`:
/// - `catalog.rs` - scan photos and write the manifest with dimensions
/// - `renumber.rs` - interleave orientations, close gaps, rename to 001.jpg …
///
/// After any of them, manifest entries exist iff the files exist (except
/// `mix`, which keeps entries whose file was already missing).

pub mod catalog;
pub mod renumber;

use crate::config::{GalleryConfig, ManifestCommand};
use crate::error::Result;
use crate::state::manifest::Manifest;

/// Run one maintenance job against the configured site
pub fn run(command: ManifestCommand, config: &GalleryConfig) -> Result<()> {
    let photos_dir = config.photos_dir();

    match command {
        ManifestCommand::List => {
            let items = catalog::scan_photos(&photos_dir)?;
            let count = items.len();
            Manifest::from_items(items).save(&config.manifest)?;
            log::info!("✅ Wrote {} images to {}", count, config.manifest.display());
        }
        ManifestCommand::Mix => {
            let manifest = Manifest::load(&config.manifest)?;
            let mixed = renumber::interleave(manifest.into_items());
            let renamed = renumber::renumber(&photos_dir, &mixed.items)?;
            let count = renamed.len();
            Manifest::from_items(renamed).save(&config.manifest)?;

            log::info!(
                "✅ Renamed {} images to {}–{} and interleaved {} landscape with {} portrait",
                count,
                renumber::numbered_name(0, renumber::pad_width(count)),
                renumber::numbered_name(count.saturating_sub(1), renumber::pad_width(count)),
                mixed.landscape,
                mixed.portrait
            );
            log::info!("📁 Updated {}", config.manifest.display());
        }
        ManifestCommand::CloseGaps => {
            let manifest = Manifest::load(&config.manifest)?;
            let existing = renumber::existing_only(&photos_dir, manifest.into_items());
            let renamed = renumber::renumber(&photos_dir, &existing)?;
            let count = renamed.len();
            Manifest::from_items(renamed).save(&config.manifest)?;

            log::info!(
                "✅ Closed gaps: {} photos now {}–{}",
                count,
                renumber::numbered_name(0, renumber::pad_width(count)),
                renumber::numbered_name(count.saturating_sub(1), renumber::pad_width(count))
            );
            log::info!("📁 Updated {}", config.manifest.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StartView;
    use crate::state::data::ImageItem;
    use std::fs;

    fn site() -> (tempfile::TempDir, GalleryConfig) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("public/photos")).unwrap();
        let config = GalleryConfig {
            manifest: dir.path().join("photoPaths.json"),
            site_root: dir.path().join("public"),
            start_view: StartView::Stack,
            cover: None,
        };
        (dir, config)
    }

    #[test]
    fn test_list_then_mix() {
        let (_dir, config) = site();
        let photos = config.photos_dir();
        image::RgbImage::new(20, 10).save(photos.join("a.png")).unwrap();
        image::RgbImage::new(21, 11).save(photos.join("b.png")).unwrap();
        image::RgbImage::new(10, 20).save(photos.join("c.png")).unwrap();

        run(ManifestCommand::List, &config).unwrap();
        let listed = Manifest::load(&config.manifest).unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed.items()[2], ImageItem::with_dimensions("/photos/c.png", 10, 20));

        run(ManifestCommand::Mix, &config).unwrap();
        let mixed = Manifest::load(&config.manifest).unwrap();
        assert_eq!(
            mixed.items(),
            &[
                ImageItem::with_dimensions("/photos/001.jpg", 20, 10),
                ImageItem::with_dimensions("/photos/002.jpg", 10, 20),
                ImageItem::with_dimensions("/photos/003.jpg", 21, 11),
            ]
        );
        for name in ["001.jpg", "002.jpg", "003.jpg"] {
            assert!(photos.join(name).exists());
        }
    }

    #[test]
    fn test_close_gaps_rewrites_manifest() {
        let (_dir, config) = site();
        let photos = config.photos_dir();
        fs::write(photos.join("002.jpg"), "two").unwrap();
        Manifest::from_items(vec![
            ImageItem::new("/photos/001.jpg"),
            ImageItem::new("/photos/002.jpg"),
        ])
        .save(&config.manifest)
        .unwrap();

        run(ManifestCommand::CloseGaps, &config).unwrap();

        let manifest = Manifest::load(&config.manifest).unwrap();
        assert_eq!(manifest.items(), &[ImageItem::new("/photos/001.jpg")]);
        assert_eq!(fs::read_to_string(photos.join("001.jpg")).unwrap(), "two");
    }

    #[test]
    fn test_list_without_photos_dir_fails() {
        let (dir, mut config) = site();
        config.site_root = dir.path().join("missing");
        assert!(run(ManifestCommand::List, &config).is_err());
    }
}
