/// State management module
///
/// This module handles the data that flows into the gallery:
/// - The image descriptor shared by every view (data.rs)
/// - The photo manifest (`photoPaths.json`) and its tolerant loader (manifest.rs)

pub mod data;
pub mod manifest;
