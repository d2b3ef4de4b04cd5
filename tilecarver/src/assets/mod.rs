//! Atlas image supply.
//!
//! The planner never touches the filesystem for pixel data; it asks an
//! [`AssetProvider`] for the full atlas image matching a tileset's display
//! name. [`AssetCatalog`] is the standard implementation: an in-memory
//! name-to-image map, filled either directly (tests, embedding hosts) or
//! from a directory of PNG files named after the tilesets.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use thiserror::Error;
use tracing::{debug, warn};

/// Supplies the full in-memory pixel image for an atlas display name.
///
/// Implementations return `None` for unknown names; the planner turns that
/// into a [`MissingTextureAssetError`] carrying the cell being resolved.
pub trait AssetProvider {
    /// Look up the atlas image registered under `name`.
    fn atlas_image(&self, name: &str) -> Option<&RgbaImage>;
}

/// No usable image was supplied for a resolved tileset name.
#[derive(Debug, Error)]
pub enum MissingTextureAssetError {
    /// No image was registered under the tileset's display name.
    #[error("no image supplied for tileset `{name}`")]
    NotFound { name: String },

    /// An image was supplied but its pixel dimensions disagree with the
    /// tileset definition, so every extracted rectangle would be wrong.
    #[error(
        "image for tileset `{name}` is {actual_width}x{actual_height}, but the tileset declares {expected_width}x{expected_height}"
    )]
    DimensionMismatch {
        name: String,
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}

/// A supplied atlas image file could not be loaded.
#[derive(Debug, Error)]
#[error("failed to load atlas image {path}")]
pub struct AssetError {
    pub path: PathBuf,
    #[source]
    source: image::ImageError,
}

/// In-memory catalog of atlas images keyed by display name.
#[derive(Debug, Default)]
pub struct AssetCatalog {
    images: HashMap<String, RgbaImage>,
}

impl AssetCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image under a tileset display name.
    pub fn insert(&mut self, name: impl Into<String>, image: RgbaImage) {
        self.images.insert(name.into(), image);
    }

    /// Load `<name>.png` from `directory` for each requested name.
    ///
    /// Names with no matching file are skipped with a warning; the planner
    /// reports them per-cell if the map actually uses them. A file that
    /// exists but cannot be decoded is an error.
    pub fn from_directory<'a>(
        directory: &Path,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, AssetError> {
        let mut catalog = Self::new();
        for name in names {
            let path = directory.join(format!("{name}.png"));
            if !path.exists() {
                warn!(name, path = %path.display(), "No image file for tileset");
                continue;
            }
            let image = image::open(&path)
                .map_err(|source| AssetError { path: path.clone(), source })?
                .to_rgba8();
            debug!(
                name,
                width = image.width(),
                height = image.height(),
                "Loaded atlas image"
            );
            catalog.insert(name, image);
        }
        Ok(catalog)
    }

    /// Number of registered images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the catalog holds no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl AssetProvider for AssetCatalog {
    fn atlas_image(&self, name: &str) -> Option<&RgbaImage> {
        self.images.get(name)
    }
}
