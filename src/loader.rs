/// Photo header loader
///
/// Reads a photo's natural size from its file header (no full decode) so
/// the stack can learn aspect ratios the manifest doesn't carry. This is the
/// native counterpart of waiting for an `<img>` to finish loading.

use std::path::{Path, PathBuf};
use tokio::task;

use crate::error::{GalleryError, Result};

/// Natural size of a loaded photo, keyed by its manifest path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    /// Manifest path the probe was started for
    pub src: String,
    pub natural_width: u32,
    pub natural_height: u32,
}

/// Map a site-root-relative manifest path onto the file system
///
/// "/photos/001.jpg" with site root "public" -> "public/photos/001.jpg".
pub fn resolve_file(site_root: &Path, src: &str) -> PathBuf {
    site_root.join(src.trim_start_matches('/'))
}

/// Probe a photo's dimensions in the background
///
/// Fire-and-forget: nothing cancels a probe, and a late result only updates
/// the table entry for its own key.
pub async fn probe_dimensions(site_root: PathBuf, src: String) -> std::result::Result<LoadedImage, String> {
    // Spawn blocking because header parsing touches the disk
    task::spawn_blocking(move || probe_dimensions_blocking(&site_root, &src))
        .await
        .map_err(|e| GalleryError::TaskJoin(e.to_string()).to_string())?
        .map_err(|e| e.to_string())
}

/// Blocking implementation of the dimension probe
pub fn probe_dimensions_blocking(site_root: &Path, src: &str) -> Result<LoadedImage> {
    let file = resolve_file(site_root, src);

    let (natural_width, natural_height) =
        image::image_dimensions(&file).map_err(|source| GalleryError::Dimensions {
            path: file.clone(),
            source,
        })?;

    Ok(LoadedImage {
        src: src.to_string(),
        natural_width,
        natural_height,
    })
}
