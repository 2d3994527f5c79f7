/// Command line and environment configuration
///
/// With no subcommand the gallery window opens; `manifest ...` runs one of
/// the maintenance jobs and exits.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "offsite-gallery", version, about = "Photo-stack gallery for the offsite album")]
pub struct Cli {
    /// Photo manifest (JSON array of paths or {path, width?, height?})
    #[arg(long, env = "GALLERY_MANIFEST", default_value = "src/photoPaths.json", global = true)]
    pub manifest: PathBuf,

    /// Directory that site-root paths such as /photos/001.jpg resolve into
    #[arg(long, env = "GALLERY_SITE_ROOT", default_value = "public", global = true)]
    pub site_root: PathBuf,

    /// View shown at startup
    #[arg(long, env = "GALLERY_VIEW", value_enum, default_value_t = StartView::Cover)]
    pub view: StartView,

    /// Manifest path of the photo shown on the album cover (default: first photo)
    #[arg(long, env = "GALLERY_COVER")]
    pub cover: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Maintain the photo manifest and the files it points at
    #[command(subcommand)]
    Manifest(ManifestCommand),
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ManifestCommand {
    /// Scan <site-root>/photos and write the manifest with dimensions
    List,
    /// Interleave landscape and portrait photos, renaming to 001.jpg … n.jpg
    Mix,
    /// Drop entries whose files are gone and renumber without gaps
    CloseGaps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StartView {
    #[default]
    Cover,
    Stack,
    Grid,
}

/// Settings the gallery window is built from
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    pub manifest: PathBuf,
    pub site_root: PathBuf,
    pub start_view: StartView,
    pub cover: Option<String>,
}

impl GalleryConfig {
    pub fn photos_dir(&self) -> PathBuf {
        self.site_root.join("photos")
    }
}

impl From<&Cli> for GalleryConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            manifest: cli.manifest.clone(),
            site_root: cli.site_root.clone(),
            start_view: cli.view,
            cover: cli.cover.clone(),
        }
    }
}
