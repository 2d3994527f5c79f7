use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

use super::data::ImageItem;
use crate::error::{GalleryError, Result};

/// One raw entry of `photoPaths.json`
///
/// The manifest comes in two shapes: the legacy plain list of path strings
/// and the list of `{path, width?, height?}` objects. Anything else is
/// captured as `Other` so a single bad entry never rejects the whole file.
/// Dimensions stay raw JSON so a malformed width cannot cost an entry its path.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ManifestEntry {
    Path(String),
    Object {
        path: Option<String>,
        width: Option<Value>,
        height: Option<Value>,
    },
    Other(Value),
}

/// The ordered, read-only list of photos driving the gallery
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    items: Vec<ImageItem>,
    /// Entries dropped because they had no usable `path`
    skipped: usize,
}

impl Manifest {
    pub fn from_items(items: Vec<ImageItem>) -> Self {
        Self { items, skipped: 0 }
    }

    /// Parse manifest JSON, normalizing both accepted shapes into `ImageItem`s
    pub fn parse(json: &str) -> serde_json::Result<Self> {
        let entries: Vec<ManifestEntry> = serde_json::from_str(json)?;

        let mut items = Vec::with_capacity(entries.len());
        let mut skipped = 0;

        for (index, entry) in entries.into_iter().enumerate() {
            match entry {
                ManifestEntry::Path(path) if !path.is_empty() => items.push(ImageItem::new(path)),
                ManifestEntry::Object {
                    path: Some(path),
                    width,
                    height,
                } if !path.is_empty() => {
                    let declared = width.is_some() || height.is_some();
                    let width = valid_dimension(width.as_ref());
                    let height = valid_dimension(height.as_ref());
                    if declared && (width.is_none() || height.is_none()) {
                        log::warn!("Manifest entry {} ({}) has unusable dimensions", index, path);
                    }
                    items.push(ImageItem { path, width, height });
                }
                other => {
                    log::warn!("Skipping manifest entry {} without a path: {:?}", index, other);
                    skipped += 1;
                }
            }
        }

        Ok(Self { items, skipped })
    }

    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| GalleryError::io(path, e))?;
        let manifest = Self::parse(&json).map_err(|source| GalleryError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!(
            "📁 Loaded {} photos from {} ({} entries skipped)",
            manifest.len(),
            path.display(),
            manifest.skipped()
        );

        Ok(manifest)
    }

    /// Write the manifest as pretty JSON (two-space indent)
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.items).map_err(|source| GalleryError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|e| GalleryError::io(path, e))
    }

    #[cfg(test)]
    pub fn items(&self) -> &[ImageItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ImageItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Keep a dimension only if it is a positive, finite pixel count
///
/// Anything that is not a JSON number (strings, null, objects) is absent.
fn valid_dimension(value: Option<&Value>) -> Option<u32> {
    match value.and_then(Value::as_f64) {
        Some(v) if v.is_finite() && v >= 1.0 && v <= u32::MAX as f64 => Some(v.round() as u32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_entries() {
        let manifest = Manifest::parse(
            r#"[{"path":"/photos/001.jpg","width":2048,"height":1365},{"path":"/photos/002.jpg"}]"#,
        )
        .unwrap();

        assert_eq!(
            manifest.items(),
            &[
                ImageItem::with_dimensions("/photos/001.jpg", 2048, 1365),
                ImageItem::new("/photos/002.jpg"),
            ]
        );
        assert_eq!(manifest.skipped(), 0);
    }

    #[test]
    fn test_parse_legacy_string_entries() {
        let manifest = Manifest::parse(r#"["/a.jpg","/b.jpg","/c.jpg"]"#).unwrap();
        let paths: Vec<&str> = manifest.items().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["/a.jpg", "/b.jpg", "/c.jpg"]);
        assert!(manifest.items().iter().all(|i| i.width.is_none() && i.height.is_none()));
    }

    #[test]
    fn test_parse_mixed_shapes_keep_order() {
        let manifest = Manifest::parse(r#"["/a.jpg",{"path":"/b.jpg","width":10,"height":20}]"#).unwrap();
        assert_eq!(manifest.items()[0].path, "/a.jpg");
        assert_eq!(manifest.items()[1].declared_ratio(), Some(0.5));
    }

    #[test]
    fn test_entries_without_path_are_skipped() {
        let manifest = Manifest::parse(r#"[{"width":10,"height":20},42,"/ok.jpg",{"path":""}]"#).unwrap();
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.items()[0].path, "/ok.jpg");
        assert_eq!(manifest.skipped(), 3);
    }

    #[test]
    fn test_invalid_dimensions_fall_back_to_none() {
        let manifest = Manifest::parse(
            r#"[{"path":"/a.jpg","width":800,"height":-1},{"path":"/b.jpg","width":0,"height":600}]"#,
        )
        .unwrap();

        assert_eq!(manifest.items()[0].width, Some(800));
        assert_eq!(manifest.items()[0].height, None);
        assert_eq!(manifest.items()[0].declared_ratio(), None);
        assert_eq!(manifest.items()[1].width, None);
        assert_eq!(manifest.items()[1].declared_ratio(), None);
    }

    #[test]
    fn test_non_numeric_dimensions_keep_the_entry() {
        let manifest = Manifest::parse(
            r#"[{"path":"/a.jpg","width":"800","height":600},{"path":"/b.jpg","width":null,"height":{"px":3}}]"#,
        )
        .unwrap();

        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.skipped(), 0);
        assert_eq!(manifest.items()[0].path, "/a.jpg");
        assert_eq!(manifest.items()[0].width, None);
        assert_eq!(manifest.items()[0].height, Some(600));
        assert_eq!(manifest.items()[0].declared_ratio(), None);
        assert_eq!(manifest.items()[1], ImageItem::new("/b.jpg"));
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = Manifest::parse("[]").unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_not_an_array_is_an_error() {
        assert!(Manifest::parse(r#"{"path":"/a.jpg"}"#).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photoPaths.json");

        let manifest = Manifest::from_items(vec![
            ImageItem::with_dimensions("/photos/001.jpg", 3, 2),
            ImageItem::new("/photos/002.jpg"),
        ]);
        manifest.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n  {\n    \"path\": \"/photos/001.jpg\""));

        let loaded = Manifest::load(&path).unwrap();
        assert_eq!(loaded, manifest);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Manifest::load(Path::new("/nonexistent/photoPaths.json")).unwrap_err();
        assert!(matches!(err, GalleryError::Io { .. }));
    }
}
