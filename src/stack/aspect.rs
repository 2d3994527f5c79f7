/// Aspect-ratio resolution for stack cards
///
/// Ratios come from the manifest when it carries dimensions, otherwise they
/// are discovered lazily once the photo's header has been read. Until then
/// a card is drawn square.

use std::collections::{HashMap, HashSet};

use crate::state::data::ImageItem;

/// Ratio used until the real one is known (square)
pub const FALLBACK_ASPECT_RATIO: f32 = 1.0;

/// First segment of every site-root photo path
const PHOTOS_SEGMENT: &str = "photos";

/// Mapping from resolved photo key to width/height
#[derive(Debug, Clone, Default)]
pub struct AspectRatioTable {
    ratios: HashMap<String, f32>,
    /// Keys with a probe in flight
    pending: HashSet<String>,
    /// Keys whose probe failed; never retried
    failed: HashSet<String>,
}

impl AspectRatioTable {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the table with every ratio the manifest already declares
    pub fn seed_from(items: &[ImageItem]) -> Self {
        let ratios = items
            .iter()
            .filter_map(|item| Some((resolve_key(&item.path), item.declared_ratio()?)))
            .collect();

        Self {
            ratios,
            ..Self::default()
        }
    }

    /// Ratio to lay out `item` with right now
    ///
    /// Declared dimensions win and never depend on a load; otherwise the
    /// recorded ratio, otherwise the square fallback.
    pub fn resolve(&self, item: &ImageItem) -> f32 {
        item.declared_ratio()
            .or_else(|| self.ratio_for(&item.path))
            .unwrap_or(FALLBACK_ASPECT_RATIO)
    }

    /// Recorded ratio for a source string, after key normalization
    pub fn ratio_for(&self, src: &str) -> Option<f32> {
        self.ratios.get(&resolve_key(src)).copied()
    }

    /// Record the natural size reported once a photo has loaded
    ///
    /// Returns `true` only when the table changed: an equal ratio is not
    /// rewritten, so nothing needs to re-layout.
    pub fn record(&mut self, src: &str, natural_width: u32, natural_height: u32) -> bool {
        let key = resolve_key(src);
        self.pending.remove(&key);

        if natural_width == 0 || natural_height == 0 {
            return false;
        }

        let ratio = natural_width as f32 / natural_height as f32;
        if self.ratios.get(&key) == Some(&ratio) {
            return false;
        }

        log::debug!("📐 Discovered aspect ratio {:.3} for {}", ratio, key);
        self.ratios.insert(key, ratio);
        true
    }

    /// Note that the photo could not be read; it keeps the fallback ratio
    pub fn record_failure(&mut self, src: &str) {
        let key = resolve_key(src);
        self.pending.remove(&key);
        self.failed.insert(key);
    }

    /// Whether a lazy probe should be started for `item`
    pub fn needs_probe(&self, item: &ImageItem) -> bool {
        if item.declared_ratio().is_some() {
            return false;
        }
        let key = resolve_key(&item.path);
        !self.ratios.contains_key(&key) && !self.pending.contains(&key) && !self.failed.contains(&key)
    }

    /// Mark a probe as in flight. Returns `false` if one already was.
    pub fn mark_pending(&mut self, item: &ImageItem) -> bool {
        self.pending.insert(resolve_key(&item.path))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }
}

/// Normalize an image source to its site-root path
///
/// `http://host/photos/a.jpg?x=1`, `photos/a.jpg`, `./photos//a.jpg`,
/// `/photos/b/../a.jpg` and `file:///srv/site/public/photos/a.jpg` all
/// resolve to `/photos/a.jpg`, so a ratio recorded for one spelling is found
/// by every other.
pub fn resolve_key(src: &str) -> String {
    let is_file_url = src.starts_with("file://");
    let without_scheme = match src.find("://") {
        Some(scheme_end) => {
            let rest = &src[scheme_end + 3..];
            match rest.find('/') {
                Some(path_start) => &rest[path_start..],
                None => "/",
            }
        }
        None => src,
    };

    let path = without_scheme
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    // A file URL carries the whole filesystem path; keep the site-root part
    if is_file_url {
        if let Some(site_start) = segments.iter().rposition(|segment| *segment == PHOTOS_SEGMENT) {
            segments.drain(..site_start);
        }
    }

    let mut key = String::with_capacity(path.len() + 1);
    for segment in &segments {
        key.push('/');
        key.push_str(segment);
    }
    if key.is_empty() {
        key.push('/');
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_dimensions_resolve_without_load() {
        let item = ImageItem::with_dimensions("/photos/001.jpg", 2048, 1365);
        let table = AspectRatioTable::new();

        assert_eq!(table.resolve(&item), 2048.0 / 1365.0);
        assert!(!table.needs_probe(&item));
    }

    #[test]
    fn test_fallback_until_loaded() {
        let item = ImageItem::new("/photos/002.jpg");
        let mut table = AspectRatioTable::new();

        assert_eq!(table.resolve(&item), FALLBACK_ASPECT_RATIO);
        assert!(table.needs_probe(&item));

        assert!(table.record("/photos/002.jpg", 1200, 1600));
        assert_eq!(table.resolve(&item), 1200.0 / 1600.0);
        assert!(!table.needs_probe(&item));
    }

    #[test]
    fn test_equal_ratio_is_not_rewritten() {
        let mut table = AspectRatioTable::new();
        assert!(table.record("/a.jpg", 400, 300));
        assert!(!table.record("/a.jpg", 400, 300));
        // Same ratio from a different resolution of the same photo
        assert!(!table.record("/a.jpg", 800, 600));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_changed_ratio_is_recorded() {
        let mut table = AspectRatioTable::new();
        assert!(table.record("/a.jpg", 400, 300));
        assert!(table.record("/a.jpg", 300, 400));
        assert_eq!(table.ratio_for("/a.jpg"), Some(0.75));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_zero_sized_load_is_ignored() {
        let mut table = AspectRatioTable::new();
        assert!(!table.record("/a.jpg", 0, 300));
        assert!(table.is_empty());
    }

    #[test]
    fn test_record_is_keyed_by_resolved_path() {
        let item = ImageItem::new("/photos/a.jpg");
        let mut table = AspectRatioTable::new();

        assert!(table.record("http://localhost:5173/photos/a.jpg?v=2", 3, 2));
        assert_eq!(table.resolve(&item), 1.5);
        assert_eq!(table.ratio_for("photos/a.jpg"), Some(1.5));
    }

    #[test]
    fn test_pending_and_failed_probes() {
        let item = ImageItem::new("/photos/broken.jpg");
        let mut table = AspectRatioTable::new();

        assert!(table.mark_pending(&item));
        assert!(!table.mark_pending(&item));
        assert!(!table.needs_probe(&item));

        table.record_failure(&item.path);
        assert!(!table.needs_probe(&item));
        assert_eq!(table.resolve(&item), FALLBACK_ASPECT_RATIO);
    }

    #[test]
    fn test_seed_from_manifest() {
        let items = vec![
            ImageItem::with_dimensions("/a.jpg", 16, 9),
            ImageItem::new("/b.jpg"),
            ImageItem::with_dimensions("/c.jpg", 10, 0),
        ];
        let table = AspectRatioTable::seed_from(&items);

        assert_eq!(table.len(), 1);
        assert_eq!(table.ratio_for("/a.jpg"), Some(16.0 / 9.0));
        assert_eq!(table.resolve(&items[2]), FALLBACK_ASPECT_RATIO);
    }

    #[test]
    fn test_resolve_key() {
        assert_eq!(resolve_key("/photos/a.jpg"), "/photos/a.jpg");
        assert_eq!(resolve_key("photos/a.jpg"), "/photos/a.jpg");
        assert_eq!(resolve_key("./photos//a.jpg"), "/photos/a.jpg");
        assert_eq!(resolve_key("/photos/day1/../a.jpg"), "/photos/a.jpg");
        assert_eq!(resolve_key("https://example.com/photos/a.jpg#top"), "/photos/a.jpg");
        assert_eq!(resolve_key("https://example.com"), "/");
        assert_eq!(resolve_key(""), "/");
    }

    #[test]
    fn test_resolve_key_file_url() {
        assert_eq!(resolve_key("file:///home/u/site/public/photos/a.jpg"), "/photos/a.jpg");
        assert_eq!(resolve_key("file:///srv/photos/public/photos/day1/a.jpg"), "/photos/day1/a.jpg");
        assert_eq!(resolve_key("file:///tmp/a.jpg"), "/tmp/a.jpg");
    }

    #[test]
    fn test_ratio_from_file_url_matches_manifest_key() {
        let item = ImageItem::new("/photos/a.jpg");
        let mut table = AspectRatioTable::new();

        assert!(table.record("file:///home/u/site/public/photos/a.jpg", 4, 3));
        assert_eq!(table.resolve(&item), 4.0 / 3.0);
    }
}
