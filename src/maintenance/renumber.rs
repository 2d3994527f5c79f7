/// Renaming jobs for `manifest mix` and `manifest close-gaps`
///
/// Both rewrite the photos directory to 001.jpg … n.jpg in manifest order.
/// Renames go through temporary names first so no file is ever overwritten
/// by a later rename in the same run.

use std::fs;
use std::path::Path;

use crate::error::{GalleryError, Result};
use crate::state::data::ImageItem;

const TEMP_PREFIX: &str = "__ren_";

/// Outcome of an interleave
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interleaved {
    pub items: Vec<ImageItem>,
    pub landscape: usize,
    pub portrait: usize,
}

/// Alternate landscape and portrait photos, then append the remainder
pub fn interleave(items: Vec<ImageItem>) -> Interleaved {
    let (landscape, portrait): (Vec<ImageItem>, Vec<ImageItem>) =
        items.into_iter().partition(ImageItem::is_landscape);

    let counts = (landscape.len(), portrait.len());
    let mut mixed = Vec::with_capacity(counts.0 + counts.1);

    let mut landscape = landscape.into_iter();
    let mut portrait = portrait.into_iter();
    loop {
        let next_landscape = landscape.next();
        let next_portrait = portrait.next();
        if next_landscape.is_none() && next_portrait.is_none() {
            break;
        }
        mixed.extend(next_landscape);
        mixed.extend(next_portrait);
    }

    Interleaved {
        items: mixed,
        landscape: counts.0,
        portrait: counts.1,
    }
}

/// Zero-padding width: three digits below 1000 photos, else the digit count
pub fn pad_width(count: usize) -> usize {
    if count < 1000 {
        3
    } else {
        count.to_string().len()
    }
}

/// File name for the photo at `index` (0-based)
pub fn numbered_name(index: usize, pad: usize) -> String {
    format!("{:0width$}.jpg", index + 1, width = pad)
}

/// Keep only entries whose file exists under `photos_dir`
pub fn existing_only(photos_dir: &Path, items: Vec<ImageItem>) -> Vec<ImageItem> {
    items
        .into_iter()
        .filter(|item| {
            let exists = photos_dir.join(item.relative_file()).exists();
            if !exists {
                log::info!("🗑️  Dropping {} (file is gone)", item.path);
            }
            exists
        })
        .collect()
}

/// Rename files to 001.jpg … n.jpg in `items` order and return the new entries
///
/// Entries whose file is missing still get a number (their slot is kept).
/// Dimensions carry over only when both are present.
pub fn renumber(photos_dir: &Path, items: &[ImageItem]) -> Result<Vec<ImageItem>> {
    let pad = pad_width(items.len());

    // Phase 1: move every file to a temp name so nothing gets overwritten
    for (i, item) in items.iter().enumerate() {
        let old_path = photos_dir.join(item.relative_file());
        if old_path.exists() {
            let temp_path = photos_dir.join(format!("{}{}", TEMP_PREFIX, i));
            fs::rename(&old_path, &temp_path).map_err(|e| GalleryError::io(&old_path, e))?;
        }
    }

    // Phase 2: temp -> 001.jpg, 002.jpg, ...
    let mut renamed = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let new_name = numbered_name(i, pad);
        let temp_path = photos_dir.join(format!("{}{}", TEMP_PREFIX, i));
        if temp_path.exists() {
            let new_path = photos_dir.join(&new_name);
            fs::rename(&temp_path, &new_path).map_err(|e| GalleryError::io(&temp_path, e))?;
        }

        let path = format!("/photos/{}", new_name);
        renamed.push(match (item.width, item.height) {
            (Some(width), Some(height)) => ImageItem::with_dimensions(path, width, height),
            _ => ImageItem::new(path),
        });
    }

    Ok(renamed)
}
