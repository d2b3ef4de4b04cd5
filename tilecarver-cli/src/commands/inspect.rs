//! Inspect command - summarize a map without exporting.

use std::path::Path;

use tilecarver::{AtlasRegistry, MapDocument};

use crate::error::CliError;

/// Run the inspect command.
pub fn run(map: &Path) -> Result<(), CliError> {
    let document = MapDocument::load(map)?;
    // Validates the tileset partition even though nothing is resolved here.
    AtlasRegistry::from_document(&document)?;

    println!("Map: {}", map.display());
    println!(
        "  {}x{} cells of {}x{} px",
        document.width(),
        document.height(),
        document.cell_width(),
        document.cell_height()
    );

    println!("  Tilesets:");
    for atlas in document.atlases() {
        println!(
            "    {:>5}  {} ({}x{} tiles of {}x{} px)",
            atlas.first_id,
            atlas.name,
            atlas.columns(),
            atlas.rows(),
            atlas.tile_width,
            atlas.tile_height
        );
    }

    let non_empty = document.cells().iter().filter(|&&gid| gid != 0).count();
    println!(
        "  Cells: {} total, {} non-empty, {} empty",
        document.cell_count(),
        non_empty,
        document.cell_count() - non_empty
    );
    Ok(())
}
