//! Build command - resolve a map and export its tiles.

use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use tilecarver::assets::AssetCatalog;
use tilecarver::config::ConfigFile;
use tilecarver::export::PngDirectoryExporter;
use tilecarver::{run_plan, AtlasRegistry, MapDocument, PlacementPlan, PlannerConfig};

use crate::error::CliError;

/// Arguments for the build command. Every argument overrides the matching
/// config file key.
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Path to the map description file (config: map.source)
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// Directory holding one <tileset-name>.png per tileset (config: assets.directory)
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Directory exported tiles are written into (config: output.directory)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Tile pixel size used for world spacing (config: tiles.size; default: the map's cell size)
    #[arg(long)]
    pub tile_size: Option<u32>,

    /// Scale applied to the tile size for world spacing (config: tiles.spacing_scale)
    #[arg(long)]
    pub spacing_scale: Option<f32>,
}

/// Run the build command.
pub fn run(args: BuildArgs) -> Result<(), CliError> {
    let config = ConfigFile::load()?;

    let map_path = args.map.or_else(|| config.map.source.clone()).ok_or_else(|| {
        CliError::Config("no map source; pass --map or set map.source".to_string())
    })?;
    let assets_dir = args
        .assets
        .or_else(|| config.assets.directory.clone())
        .ok_or_else(|| {
            CliError::Config(
                "no assets directory; pass --assets or set assets.directory".to_string(),
            )
        })?;
    let output_dir = args
        .output
        .or_else(|| config.output.directory.clone())
        .ok_or_else(|| {
            CliError::Config(
                "no output directory; pass --output or set output.directory".to_string(),
            )
        })?;

    let document = MapDocument::load(&map_path)?;
    let registry = AtlasRegistry::from_document(&document)?;

    // Tile size: CLI > config > the map's own cell size.
    let tile_size = args
        .tile_size
        .or(config.tiles.size)
        .unwrap_or_else(|| document.cell_width());
    let spacing_scale = args.spacing_scale.unwrap_or(config.tiles.spacing_scale);
    let planner_config = PlannerConfig::new(tile_size).with_spacing_scale(spacing_scale);

    let catalog = AssetCatalog::from_directory(
        &assets_dir,
        document.atlases().iter().map(|a| a.name.as_str()),
    )?;
    debug!(
        tilesets = document.atlases().len(),
        images = catalog.len(),
        tile_size,
        spacing_scale,
        "Resolved build inputs"
    );
    let mut exporter = PngDirectoryExporter::create(&output_dir)?;

    println!("Tilecarver v{}", tilecarver::VERSION);
    println!();
    println!("Map:      {}", map_path.display());
    println!("Assets:   {}", assets_dir.display());
    println!("Output:   {}", output_dir.display());
    println!(
        "Grid:     {}x{} cells of {}x{} px",
        document.width(),
        document.height(),
        document.cell_width(),
        document.cell_height()
    );
    println!("Tilesets: {}", document.atlases().len());
    println!();

    let plan = PlacementPlan::new(&document, &registry, &catalog, planner_config);
    let summary = run_plan(plan, &mut exporter)?;

    println!(
        "Exported {} tiles ({} empty cells skipped)",
        summary.placed, summary.skipped_empty
    );
    Ok(())
}
