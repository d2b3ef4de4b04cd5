//! Configuration file support.
//!
//! Settings live in an INI file under the platform config directory
//! (`~/.config/tilecarver/config.ini` on Linux). CLI arguments override
//! config file values when specified; missing keys fall back to defaults.
//!
//! Sections and keys:
//!
//! ```ini
//! [map]
//! source = /path/to/level.tmx
//!
//! [assets]
//! directory = /path/to/textures
//!
//! [output]
//! directory = /path/to/tiles
//!
//! [tiles]
//! size = 16
//! spacing_scale = 0.01
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;

use crate::planner::DEFAULT_SPACING_SCALE;

/// The configuration file could not be read, written, or understood.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but is not valid INI.
    #[error("failed to parse config file: {0}")]
    Parse(String),

    /// The file could not be read or written.
    #[error("failed to access config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A key holds a value of the wrong type.
    #[error("config key `{key}` has invalid value `{value}`")]
    InvalidValue { key: &'static str, value: String },
}

/// Map-source settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapSection {
    /// Path to the map description file.
    pub source: Option<PathBuf>,
}

/// Texture-supply settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetsSection {
    /// Directory holding one `<tileset-name>.png` per tileset.
    pub directory: Option<PathBuf>,
}

/// Export settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputSection {
    /// Directory exported tiles are written into.
    pub directory: Option<PathBuf>,
}

/// Tile geometry settings.
#[derive(Debug, Clone, PartialEq)]
pub struct TilesSection {
    /// Pixel size of one tile; defaults to the map's own cell size.
    pub size: Option<u32>,

    /// Scale applied to the tile size for world spacing.
    pub spacing_scale: f32,
}

impl Default for TilesSection {
    fn default() -> Self {
        Self {
            size: None,
            spacing_scale: DEFAULT_SPACING_SCALE,
        }
    }
}

/// Loaded configuration file contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub map: MapSection,
    pub assets: AssetsSection,
    pub output: OutputSection,
    pub tiles: TilesSection,
}

/// Path of the configuration file under the platform config directory.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tilecarver")
        .join("config.ini")
}

impl ConfigFile {
    /// Load the configuration from the default location.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load the configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let ini =
            Ini::load_from_file(path).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let mut config = Self::default();
        config.map.source = get_path(&ini, "map", "source");
        config.assets.directory = get_path(&ini, "assets", "directory");
        config.output.directory = get_path(&ini, "output", "directory");
        if let Some(value) = get_str(&ini, "tiles", "size") {
            let size = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "tiles.size",
                value: value.to_string(),
            })?;
            config.tiles.size = Some(size);
        }
        if let Some(value) = get_str(&ini, "tiles", "spacing_scale") {
            config.tiles.spacing_scale =
                value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "tiles.spacing_scale",
                    value: value.to_string(),
                })?;
        }
        Ok(config)
    }

    /// Save the configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save the configuration to an explicit path, creating parent
    /// directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut ini = Ini::new();
        if let Some(source) = &self.map.source {
            ini.set_to(
                Some("map"),
                "source".to_string(),
                source.to_string_lossy().into_owned(),
            );
        }
        if let Some(directory) = &self.assets.directory {
            ini.set_to(
                Some("assets"),
                "directory".to_string(),
                directory.to_string_lossy().into_owned(),
            );
        }
        if let Some(directory) = &self.output.directory {
            ini.set_to(
                Some("output"),
                "directory".to_string(),
                directory.to_string_lossy().into_owned(),
            );
        }
        if let Some(size) = self.tiles.size {
            ini.set_to(Some("tiles"), "size".to_string(), size.to_string());
        }
        ini.set_to(
            Some("tiles"),
            "spacing_scale".to_string(),
            self.tiles.spacing_scale.to_string(),
        );

        ini.write_to_file(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn get_str<'a>(ini: &'a Ini, section: &str, key: &str) -> Option<&'a str> {
    ini.section(Some(section)).and_then(|s| s.get(key))
}

fn get_path(ini: &Ini, section: &str, key: &str) -> Option<PathBuf> {
    get_str(ini, section, key).map(PathBuf::from)
}

/// A settable configuration key, in `section.key` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    MapSource,
    AssetsDirectory,
    OutputDirectory,
    TilesSize,
    TilesSpacingScale,
}

impl ConfigKey {
    /// Every known key, for listings.
    pub const ALL: [ConfigKey; 5] = [
        ConfigKey::MapSource,
        ConfigKey::AssetsDirectory,
        ConfigKey::OutputDirectory,
        ConfigKey::TilesSize,
        ConfigKey::TilesSpacingScale,
    ];

    /// The `section.key` name.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::MapSource => "map.source",
            ConfigKey::AssetsDirectory => "assets.directory",
            ConfigKey::OutputDirectory => "output.directory",
            ConfigKey::TilesSize => "tiles.size",
            ConfigKey::TilesSpacingScale => "tiles.spacing_scale",
        }
    }

    /// Read this key's current value as text; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        fn path_text(path: &Option<PathBuf>) -> String {
            path.as_ref()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default()
        }
        match self {
            ConfigKey::MapSource => path_text(&config.map.source),
            ConfigKey::AssetsDirectory => path_text(&config.assets.directory),
            ConfigKey::OutputDirectory => path_text(&config.output.directory),
            ConfigKey::TilesSize => config
                .tiles
                .size
                .map(|s| s.to_string())
                .unwrap_or_default(),
            ConfigKey::TilesSpacingScale => config.tiles.spacing_scale.to_string(),
        }
    }

    /// Set this key from text, validating numeric keys.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        match self {
            ConfigKey::MapSource => config.map.source = Some(PathBuf::from(value)),
            ConfigKey::AssetsDirectory => {
                config.assets.directory = Some(PathBuf::from(value));
            }
            ConfigKey::OutputDirectory => {
                config.output.directory = Some(PathBuf::from(value));
            }
            ConfigKey::TilesSize => {
                let size = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "tiles.size",
                    value: value.to_string(),
                })?;
                config.tiles.size = Some(size);
            }
            ConfigKey::TilesSpacingScale => {
                config.tiles.spacing_scale =
                    value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: "tiles.spacing_scale",
                        value: value.to_string(),
                    })?;
            }
        }
        Ok(())
    }
}

/// Unknown `section.key` name.
#[derive(Debug, Error)]
#[error("unknown configuration key `{0}`")]
pub struct UnknownConfigKey(pub String);

impl FromStr for ConfigKey {
    type Err = UnknownConfigKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| UnknownConfigKey(s.to_string()))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigFile::load_from(&dir.path().join("missing.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
        assert!((config.tiles.spacing_scale - DEFAULT_SPACING_SCALE).abs() < f32::EPSILON);
    }

    #[test]
    fn test_save_and_reload_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.map.source = Some(PathBuf::from("/maps/level1.tmx"));
        config.assets.directory = Some(PathBuf::from("/textures"));
        config.output.directory = Some(PathBuf::from("/tiles"));
        config.tiles.size = Some(32);
        config.tiles.spacing_scale = 0.5;
        config.save_to(&path).unwrap();

        let reloaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_invalid_tile_size_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "[tiles]\nsize = lots\n").unwrap();

        let err = ConfigFile::load_from(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "tiles.size", .. }
        ));
    }

    #[test]
    fn test_config_key_parse_and_get_set() {
        let key: ConfigKey = "tiles.size".parse().unwrap();
        assert_eq!(key, ConfigKey::TilesSize);
        assert!("tiles.nope".parse::<ConfigKey>().is_err());

        let mut config = ConfigFile::default();
        assert_eq!(key.get(&config), "");
        key.set(&mut config, "48").unwrap();
        assert_eq!(config.tiles.size, Some(48));
        assert_eq!(key.get(&config), "48");
        assert!(key.set(&mut config, "tiny").is_err());
    }

    #[test]
    fn test_all_keys_have_distinct_names() {
        let mut names: Vec<_> = ConfigKey::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ConfigKey::ALL.len());
    }
}
