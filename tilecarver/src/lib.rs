//! Tilecarver - orthogonal tile-map resolution and export
//!
//! This library turns a tile-map description (grid dimensions, per-cell
//! global tile identifiers, and a set of tileset atlases) into a concrete
//! placement plan: for every non-empty cell, the owning atlas, the source
//! pixel rectangle within it, the extracted tile image, and a world
//! position.
//!
//! The pipeline is a single-threaded batch job built once per run: parse a
//! [`document::MapDocument`], build an [`atlas::AtlasRegistry`] from its
//! tileset list, then stream [`planner::Placement`]s to an exporter or a
//! host scene. Every failure is deterministic and reported with enough
//! context (cell coordinate, identifier, tileset name) to diagnose the
//! map; nothing is silently recovered, because a recovered error would
//! place a wrong tile at a visible position.

pub mod assets;
pub mod atlas;
pub mod config;
pub mod document;
pub mod export;
pub mod planner;
pub mod region;

pub use assets::{AssetCatalog, AssetProvider, MissingTextureAssetError};
pub use atlas::{AtlasRegistry, ConfigurationError, UnresolvedIdentifierError};
pub use document::{AtlasDef, MalformedMapError, MapDocument};
pub use export::{PngDirectoryExporter, TileExporter};
pub use planner::{
    run_plan, CellCoord, PlacementPlan, Placement, PlanError, PlannerConfig, PlanSummary,
};
pub use region::{resolve_region, RegionOutOfBoundsError, TileRect};

/// Crate version, as reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
