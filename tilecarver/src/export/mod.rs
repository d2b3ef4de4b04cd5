//! Tile export.
//!
//! The planner hands each extracted tile to a [`TileExporter`] exactly once
//! per non-empty cell, in grid order. [`PngDirectoryExporter`] is the
//! standard implementation, writing one PNG per tile named after its linear
//! cell index.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use thiserror::Error;
use tracing::debug;

use crate::planner::CellCoord;

/// Persisting a tile artifact failed.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The output directory could not be created.
    #[error("failed to create output directory {path}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A tile image could not be written.
    #[error("failed to write tile {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Accepts one extracted tile per non-empty cell.
///
/// `index` is the cell's linear position in the row-major grid; `cell` its
/// (row, column) coordinate. Implementations may name artifacts by either.
pub trait TileExporter {
    /// Persist or forward one extracted tile.
    fn export(
        &mut self,
        index: usize,
        cell: CellCoord,
        tile: &RgbaImage,
    ) -> Result<(), ExportError>;
}

/// Writes each tile as `<index>.png` into a directory.
#[derive(Debug)]
pub struct PngDirectoryExporter {
    directory: PathBuf,
}

impl PngDirectoryExporter {
    /// Create the output directory (and parents) and the exporter.
    pub fn create(directory: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|source| ExportError::CreateDirectory {
            path: directory.clone(),
            source,
        })?;
        Ok(Self { directory })
    }

    /// The directory tiles are written into.
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl TileExporter for PngDirectoryExporter {
    fn export(
        &mut self,
        index: usize,
        cell: CellCoord,
        tile: &RgbaImage,
    ) -> Result<(), ExportError> {
        let path = self.directory.join(format!("{index}.png"));
        tile.save(&path).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(index, %cell, path = %path.display(), "Exported tile");
        Ok(())
    }
}
