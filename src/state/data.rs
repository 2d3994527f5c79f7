/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the manifest on disk and the UI layer.

use serde::{Deserialize, Serialize};

/// Represents a single photo in the album
///
/// Identity is `path`: it keys both the per-card transform and the
/// aspect-ratio table. Items are never mutated once the manifest is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageItem {
    /// Site-root-relative path (e.g., "/photos/001.jpg")
    pub path: String,
    /// Pixel width, when the manifest carries it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Pixel height, when the manifest carries it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ImageItem {
    /// Create an item with no known dimensions
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            width: None,
            height: None,
        }
    }

    /// Create an item with known pixel dimensions
    pub fn with_dimensions(path: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width: Some(width),
            height: Some(height),
        }
    }

    /// Aspect ratio declared by the manifest, if both dimensions are usable
    ///
    /// A zero width or height counts as "not declared" so the item falls
    /// back to lazy discovery instead of producing a degenerate ratio.
    pub fn declared_ratio(&self) -> Option<f32> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some(w as f32 / h as f32),
            _ => None,
        }
    }

    /// Landscape test used when interleaving the album
    ///
    /// Missing dimensions count as 0x0, which is landscape.
    pub fn is_landscape(&self) -> bool {
        self.width.unwrap_or(0) >= self.height.unwrap_or(0)
    }

    /// File name relative to the photos directory ("/photos/a/b.jpg" -> "a/b.jpg")
    pub fn relative_file(&self) -> &str {
        let trimmed = self.path.trim_start_matches('/');
        trimmed.strip_prefix("photos/").unwrap_or(trimmed)
    }
}
