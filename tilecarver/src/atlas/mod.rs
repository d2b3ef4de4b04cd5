//! Atlas registry: global-identifier to tileset resolution.
//!
//! Tilesets partition the global identifier space into consecutive
//! half-open ranges `[first_id_k, first_id_k+1)`; the last tileset owns
//! every identifier at or above its `first_id`. The registry validates
//! that partition once at construction and then answers lookups with a
//! binary search over the sorted `first_id` list.
//!
//! Identifier 0 means "empty cell" and is never a valid lookup; callers
//! skip empty cells before consulting the registry.

use thiserror::Error;

use crate::document::{AtlasDef, MapDocument};

/// The tileset list is unusable: empty, unordered, or internally
/// inconsistent.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The map defines no tilesets at all.
    #[error("map defines no tilesets")]
    EmptyAtlasList,

    /// A tileset claims first id 0, which is reserved for empty cells.
    #[error("tileset `{name}` has first id 0, which is reserved for empty cells")]
    ZeroFirstId { name: String },

    /// First ids must strictly increase in document order.
    #[error(
        "tileset `{name}` first id {first_id} does not increase over the previous first id {previous}"
    )]
    UnorderedFirstIds {
        name: String,
        first_id: u32,
        previous: u32,
    },

    /// The atlas image does not divide evenly into tiles.
    #[error(
        "tileset `{name}` image is {image_width}x{image_height}, not an exact multiple of its {tile_width}x{tile_height} tile size"
    )]
    ImageNotTileAligned {
        name: String,
        image_width: u32,
        image_height: u32,
        tile_width: u32,
        tile_height: u32,
    },
}

/// A cell identifier has no owning tileset.
#[derive(Debug, Error)]
#[error("identifier {gid} is below the first tileset id {first_id}")]
pub struct UnresolvedIdentifierError {
    /// The identifier that failed to resolve.
    pub gid: u32,
    /// The smallest identifier any tileset owns.
    pub first_id: u32,
}

/// Ordered collection of tileset definitions, resolving global
/// identifiers to their owning tileset.
///
/// Built once per run from a [`MapDocument`]'s tileset list and read-only
/// thereafter.
#[derive(Debug, Clone)]
pub struct AtlasRegistry {
    atlases: Vec<AtlasDef>,
}

impl AtlasRegistry {
    /// Build a registry, validating the interval partition.
    pub fn new(atlases: Vec<AtlasDef>) -> Result<Self, ConfigurationError> {
        if atlases.is_empty() {
            return Err(ConfigurationError::EmptyAtlasList);
        }
        let mut previous: Option<u32> = None;
        for atlas in &atlases {
            if atlas.first_id == 0 {
                return Err(ConfigurationError::ZeroFirstId {
                    name: atlas.name.clone(),
                });
            }
            if let Some(previous) = previous {
                if atlas.first_id <= previous {
                    return Err(ConfigurationError::UnorderedFirstIds {
                        name: atlas.name.clone(),
                        first_id: atlas.first_id,
                        previous,
                    });
                }
            }
            if atlas.image_width % atlas.tile_width != 0
                || atlas.image_height % atlas.tile_height != 0
            {
                return Err(ConfigurationError::ImageNotTileAligned {
                    name: atlas.name.clone(),
                    image_width: atlas.image_width,
                    image_height: atlas.image_height,
                    tile_width: atlas.tile_width,
                    tile_height: atlas.tile_height,
                });
            }
            previous = Some(atlas.first_id);
        }
        Ok(Self { atlases })
    }

    /// Build a registry from a parsed document's tileset list.
    pub fn from_document(document: &MapDocument) -> Result<Self, ConfigurationError> {
        Self::new(document.atlases().to_vec())
    }

    /// Resolve a non-zero global identifier to its owning tileset.
    ///
    /// The owning tileset is the one with the largest `first_id` not
    /// exceeding `gid`; the ordering invariant makes that unique, so a
    /// binary search over `first_id` suffices.
    pub fn resolve(&self, gid: u32) -> Result<&AtlasDef, UnresolvedIdentifierError> {
        let idx = self.atlases.partition_point(|a| a.first_id <= gid);
        if idx == 0 {
            return Err(UnresolvedIdentifierError {
                gid,
                first_id: self.atlases[0].first_id,
            });
        }
        Ok(&self.atlases[idx - 1])
    }

    /// Tileset definitions in ascending `first_id` order.
    pub fn atlases(&self) -> &[AtlasDef] {
        &self.atlases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atlas(first_id: u32, name: &str) -> AtlasDef {
        AtlasDef {
            first_id,
            name: name.to_string(),
            tile_width: 16,
            tile_height: 16,
            image_width: 64,
            image_height: 64,
        }
    }

    fn three_atlas_registry() -> AtlasRegistry {
        AtlasRegistry::new(vec![
            atlas(1, "ground"),
            atlas(17, "props"),
            atlas(33, "walls"),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_list_rejected() {
        let err = AtlasRegistry::new(Vec::new()).unwrap_err();
        assert!(matches!(err, ConfigurationError::EmptyAtlasList));
    }

    #[test]
    fn test_zero_first_id_rejected() {
        let err = AtlasRegistry::new(vec![atlas(0, "ground")]).unwrap_err();
        assert!(matches!(err, ConfigurationError::ZeroFirstId { .. }));
    }

    #[test]
    fn test_unordered_first_ids_rejected() {
        let err = AtlasRegistry::new(vec![atlas(10, "a"), atlas(10, "b")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::UnorderedFirstIds {
                first_id: 10,
                previous: 10,
                ..
            }
        ));

        let err = AtlasRegistry::new(vec![atlas(10, "a"), atlas(4, "b")]).unwrap_err();
        assert!(matches!(err, ConfigurationError::UnorderedFirstIds { .. }));
    }

    #[test]
    fn test_misaligned_image_rejected() {
        let mut bad = atlas(1, "ground");
        bad.image_width = 60;
        let err = AtlasRegistry::new(vec![bad]).unwrap_err();
        assert!(matches!(err, ConfigurationError::ImageNotTileAligned { .. }));
    }

    #[test]
    fn test_resolve_each_interval() {
        let registry = three_atlas_registry();
        // Each range [first_id, next_first_id) belongs to one tileset.
        for gid in 1..17 {
            assert_eq!(registry.resolve(gid).unwrap().name, "ground", "gid {gid}");
        }
        for gid in 17..33 {
            assert_eq!(registry.resolve(gid).unwrap().name, "props", "gid {gid}");
        }
        // The last tileset owns everything at or above its first id.
        for gid in [33, 48, 1000] {
            assert_eq!(registry.resolve(gid).unwrap().name, "walls", "gid {gid}");
        }
    }

    #[test]
    fn test_resolve_boundary_identifiers() {
        let registry = three_atlas_registry();
        assert_eq!(registry.resolve(16).unwrap().name, "ground");
        assert_eq!(registry.resolve(17).unwrap().name, "props");
        assert_eq!(registry.resolve(32).unwrap().name, "props");
        assert_eq!(registry.resolve(33).unwrap().name, "walls");
    }

    #[test]
    fn test_resolve_below_first_id_fails() {
        let registry = AtlasRegistry::new(vec![atlas(5, "ground")]).unwrap();
        let err = registry.resolve(4).unwrap_err();
        assert_eq!(err.gid, 4);
        assert_eq!(err.first_id, 5);
        // Identifier 0 never reaches the registry in normal operation,
        // but a stray lookup still fails cleanly.
        assert!(registry.resolve(0).is_err());
    }

    #[test]
    fn test_binary_search_matches_linear_scan() {
        let registry = three_atlas_registry();
        // Reference: first tileset whose interval contains the id, found by
        // walking the list.
        let linear = |gid: u32| -> Option<&str> {
            let atlases = registry.atlases();
            for (i, a) in atlases.iter().enumerate() {
                let next = atlases.get(i + 1).map(|n| n.first_id);
                if gid >= a.first_id && next.map_or(true, |n| gid < n) {
                    return Some(&a.name);
                }
            }
            None
        };
        for gid in 1..200 {
            assert_eq!(
                registry.resolve(gid).ok().map(|a| a.name.as_str()),
                linear(gid),
                "gid {gid}"
            );
        }
    }
}
