//! Map document model.
//!
//! A [`MapDocument`] is the in-memory representation of one parsed map
//! description: the grid dimensions, the ordered tileset (atlas)
//! definitions, and the flat row-major grid of global tile identifiers.
//! It is built once from immutable input and never mutated afterwards;
//! all downstream components read it through the accessors here.
//!
//! # Example
//!
//! ```no_run
//! use tilecarver::document::MapDocument;
//!
//! let document = MapDocument::load("level1.tmx")?;
//! println!(
//!     "{}x{} cells, {} tilesets",
//!     document.width(),
//!     document.height(),
//!     document.atlases().len()
//! );
//! # Ok::<(), tilecarver::document::MalformedMapError>(())
//! ```

mod error;
mod parse;

pub use error::MalformedMapError;

use std::fs;
use std::path::Path;

use tracing::debug;

/// One tileset definition: a single atlas image holding many fixed-size
/// tiles arranged in a grid.
///
/// The `first_id` values of a document's atlases are strictly increasing;
/// together they partition the global identifier space into consecutive
/// half-open ranges (see [`crate::atlas::AtlasRegistry`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasDef {
    /// Smallest global identifier mapped into this atlas.
    pub first_id: u32,

    /// Display name; an externally supplied image must match this name.
    pub name: String,

    /// Pixel width of one tile in this atlas.
    pub tile_width: u32,

    /// Pixel height of one tile in this atlas.
    pub tile_height: u32,

    /// Pixel width of the full atlas image.
    pub image_width: u32,

    /// Pixel height of the full atlas image.
    pub image_height: u32,
}

impl AtlasDef {
    /// Number of tile columns in the atlas image.
    pub fn columns(&self) -> u32 {
        self.image_width / self.tile_width
    }

    /// Number of tile rows in the atlas image.
    pub fn rows(&self) -> u32 {
        self.image_height / self.tile_height
    }
}

/// Parsed map description: dimensions, tileset definitions, and the flat
/// cell-identifier grid.
///
/// Invariants upheld at construction:
/// - `width`, `height`, `cell_width`, `cell_height` are positive
/// - the cell grid holds exactly `width * height` identifiers
///
/// Identifier 0 means "empty cell" and never resolves to a tile.
#[derive(Debug, Clone)]
pub struct MapDocument {
    width: u32,
    height: u32,
    cell_width: u32,
    cell_height: u32,
    atlases: Vec<AtlasDef>,
    cells: Vec<u32>,
}

impl MapDocument {
    /// Load and parse a map description file.
    ///
    /// The file handle is scoped to this call; it is released as soon as
    /// parsing completes or fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MalformedMapError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MalformedMapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::from_xml(&text)?;
        debug!(
            path = %path.display(),
            width = document.width,
            height = document.height,
            atlases = document.atlases.len(),
            "Parsed map document"
        );
        Ok(document)
    }

    /// Parse a map description from its markup text.
    pub fn from_xml(text: &str) -> Result<Self, MalformedMapError> {
        parse::from_xml(text)
    }

    /// Map width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Map height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel width of one map cell.
    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    /// Pixel height of one map cell.
    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    /// Tileset definitions in document order (ascending `first_id`).
    pub fn atlases(&self) -> &[AtlasDef] {
        &self.atlases
    }

    /// The flat cell-identifier grid in row-major order.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Total number of cells (`width * height`).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}
