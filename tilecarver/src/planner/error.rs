//! Planner errors, each carrying the cell being resolved.

use thiserror::Error;

use super::CellCoord;
use crate::assets::MissingTextureAssetError;
use crate::atlas::UnresolvedIdentifierError;
use crate::export::ExportError;
use crate::region::RegionOutOfBoundsError;

/// A cell could not be resolved or its tile could not be exported.
///
/// Every variant names the offending cell so a wrong identifier can be
/// found in the map editor; the wrapped source carries the identifier,
/// tileset name, or rectangle involved.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The cell's identifier has no owning tileset.
    #[error("cell {cell}: {source}")]
    UnresolvedIdentifier {
        cell: CellCoord,
        #[source]
        source: UnresolvedIdentifierError,
    },

    /// The identifier maps outside its tileset's image.
    #[error("cell {cell}, identifier {gid}: {source}")]
    Region {
        cell: CellCoord,
        gid: u32,
        #[source]
        source: RegionOutOfBoundsError,
    },

    /// No usable image was supplied for the resolved tileset.
    #[error("cell {cell}, identifier {gid}: {source}")]
    MissingTexture {
        cell: CellCoord,
        gid: u32,
        #[source]
        source: MissingTextureAssetError,
    },

    /// The extracted tile could not be exported.
    #[error("cell {cell}: {source}")]
    Export {
        cell: CellCoord,
        #[source]
        source: ExportError,
    },
}
