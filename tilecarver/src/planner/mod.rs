//! Placement planning.
//!
//! [`PlacementPlan`] walks the cell grid in row-major order and, for each
//! non-empty cell, resolves the owning tileset, the source rectangle, and
//! the extracted sub-image, yielding one [`Placement`] per cell. The plan
//! is lazy and finite; it always starts from the first cell (build a new
//! plan to restart) and fuses after the first error, because a single
//! wrongly placed tile is worse than a halted run.
//!
//! The world cursor mirrors the map: it starts at the origin, advances
//! right by one spacing step per cell, and drops down one step when the
//! column index wraps, so the map grows downward in world space.

mod error;

pub use error::PlanError;

use std::fmt;

use image::{imageops, RgbaImage};
use tracing::trace;

use crate::assets::{AssetProvider, MissingTextureAssetError};
use crate::atlas::AtlasRegistry;
use crate::document::MapDocument;
use crate::export::TileExporter;
use crate::region::{resolve_region, TileRect};

/// Default scale applied to the tile pixel size to obtain the world-space
/// spacing between adjacent cells.
pub const DEFAULT_SPACING_SCALE: f32 = 0.01;

/// Planner tuning: the tile pixel size used for world spacing, and the
/// scale applied to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    /// Pixel size of one tile, as configured by the host.
    pub tile_size: u32,

    /// Scale applied to `tile_size` for the world-space spacing step.
    pub spacing_scale: f32,
}

impl PlannerConfig {
    /// Create a config with the default spacing scale.
    pub fn new(tile_size: u32) -> Self {
        Self {
            tile_size,
            spacing_scale: DEFAULT_SPACING_SCALE,
        }
    }

    /// Override the spacing scale.
    pub fn with_spacing_scale(mut self, spacing_scale: f32) -> Self {
        self.spacing_scale = spacing_scale;
        self
    }

    /// World-space distance between adjacent cell origins.
    pub fn spacing(&self) -> f32 {
        self.tile_size as f32 * self.spacing_scale
    }
}

/// A cell's (row, column) coordinate in the map grid, row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(row {}, col {})", self.row, self.col)
    }
}

/// A world-space position for one placed tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPosition {
    pub x: f32,
    pub y: f32,
}

/// The resolved placement for one non-empty cell: where it goes, which
/// atlas it came from, and the extracted pixels.
#[derive(Debug, Clone)]
pub struct Placement {
    /// Linear index of the cell in the row-major grid.
    pub index: usize,

    /// Grid coordinate of the cell.
    pub cell: CellCoord,

    /// World position the host should instantiate the tile at.
    pub position: WorldPosition,

    /// Display name of the owning tileset.
    pub atlas: String,

    /// Source rectangle within the atlas image.
    pub region: TileRect,

    /// The extracted sub-image, exactly `region.width` x `region.height`.
    pub tile: RgbaImage,
}

/// Lazy, row-major stream of placements over a map document.
pub struct PlacementPlan<'a, A: AssetProvider> {
    document: &'a MapDocument,
    registry: &'a AtlasRegistry,
    assets: &'a A,
    config: PlannerConfig,
    index: usize,
    cursor_x: f32,
    cursor_y: f32,
    failed: bool,
}

impl<'a, A: AssetProvider> PlacementPlan<'a, A> {
    /// Build a plan starting at the first cell of the grid.
    pub fn new(
        document: &'a MapDocument,
        registry: &'a AtlasRegistry,
        assets: &'a A,
        config: PlannerConfig,
    ) -> Self {
        Self {
            document,
            registry,
            assets,
            config,
            index: 0,
            cursor_x: 0.0,
            cursor_y: 0.0,
            failed: false,
        }
    }

    /// The document this plan iterates over.
    pub fn document(&self) -> &MapDocument {
        self.document
    }

    fn resolve_cell(
        &self,
        gid: u32,
        cell: CellCoord,
        position: WorldPosition,
        index: usize,
    ) -> Result<Placement, PlanError> {
        let atlas = self
            .registry
            .resolve(gid)
            .map_err(|source| PlanError::UnresolvedIdentifier { cell, source })?;
        let region = resolve_region(gid, atlas)
            .map_err(|source| PlanError::Region { cell, gid, source })?;

        let image = self.assets.atlas_image(&atlas.name).ok_or_else(|| {
            PlanError::MissingTexture {
                cell,
                gid,
                source: MissingTextureAssetError::NotFound {
                    name: atlas.name.clone(),
                },
            }
        })?;
        let (actual_width, actual_height) = image.dimensions();
        if (actual_width, actual_height) != (atlas.image_width, atlas.image_height) {
            return Err(PlanError::MissingTexture {
                cell,
                gid,
                source: MissingTextureAssetError::DimensionMismatch {
                    name: atlas.name.clone(),
                    expected_width: atlas.image_width,
                    expected_height: atlas.image_height,
                    actual_width,
                    actual_height,
                },
            });
        }

        let tile =
            imageops::crop_imm(image, region.x, region.y, region.width, region.height)
                .to_image();
        trace!(gid, %cell, atlas = %atlas.name, region = %region, "Resolved placement");

        Ok(Placement {
            index,
            cell,
            position,
            atlas: atlas.name.clone(),
            region,
            tile,
        })
    }
}

impl<'a, A: AssetProvider> Iterator for PlacementPlan<'a, A> {
    type Item = Result<Placement, PlanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let cells = self.document.cells();
        let width = self.document.width();
        let spacing = self.config.spacing();

        while self.index < cells.len() {
            let index = self.index;
            let gid = cells[index];
            let cell = CellCoord {
                row: index as u32 / width,
                col: index as u32 % width,
            };
            let position = WorldPosition {
                x: self.cursor_x,
                y: self.cursor_y,
            };

            // The cursor advances for every cell, empty or not.
            self.cursor_x += spacing;
            if (index + 1) % width as usize == 0 {
                self.cursor_x = 0.0;
                self.cursor_y -= spacing;
            }
            self.index += 1;

            if gid == 0 {
                trace!(%cell, "Skipped empty cell");
                continue;
            }
            return match self.resolve_cell(gid, cell, position, index) {
                Ok(placement) => Some(Ok(placement)),
                Err(e) => {
                    self.failed = true;
                    Some(Err(e))
                }
            };
        }
        None
    }
}

/// Counts reported after a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    /// Placements emitted and exported.
    pub placed: usize,

    /// Empty cells skipped.
    pub skipped_empty: usize,
}

/// Drive a plan to completion, exporting each tile exactly once in grid
/// order.
///
/// Stops at the first failure; there is no partial-success mode.
pub fn run_plan<A: AssetProvider, E: TileExporter>(
    plan: PlacementPlan<'_, A>,
    exporter: &mut E,
) -> Result<PlanSummary, PlanError> {
    let total = plan.document().cell_count();
    let mut placed = 0;
    for item in plan {
        let placement = item?;
        exporter
            .export(placement.index, placement.cell, &placement.tile)
            .map_err(|source| PlanError::Export {
                cell: placement.cell,
                source,
            })?;
        placed += 1;
    }
    Ok(PlanSummary {
        placed,
        skipped_empty: total - placed,
    })
}
