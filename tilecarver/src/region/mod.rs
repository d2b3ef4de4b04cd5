//! Region resolution: global identifier to atlas pixel rectangle.
//!
//! Given an identifier and its owning tileset, [`resolve_region`] computes
//! the pixel rectangle of that tile within the atlas image. The function is
//! pure: the same inputs always yield the same rectangle, and a rectangle
//! that would fall outside the atlas image is an error, never clamped.
//!
//! Tile numbering inside an atlas is 1-based and runs left-to-right,
//! top-to-bottom, while the row used for the pixel offset is counted from
//! the *bottom* edge of the atlas image. Changing that inversion relocates
//! every extracted tile, so the arithmetic here must stay as written.

use thiserror::Error;

use crate::document::AtlasDef;

/// A pixel rectangle within an atlas image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for TileRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.width, self.height)
    }
}

/// The requested tile does not exist inside the atlas image.
#[derive(Debug, Error)]
pub enum RegionOutOfBoundsError {
    /// The identifier precedes the tileset's first id.
    #[error("identifier {gid} precedes tileset `{atlas}` first id {first_id}")]
    IdentifierBeforeAtlas {
        atlas: String,
        gid: u32,
        first_id: u32,
    },

    /// The computed rectangle escapes the atlas image.
    #[error(
        "identifier {gid} maps outside tileset `{atlas}`: rectangle ({x}, {y}) {width}x{height} exceeds the {image_width}x{image_height} image"
    )]
    RectangleOutside {
        atlas: String,
        gid: u32,
        x: i64,
        y: i64,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },
}

/// Resolve a global identifier to its pixel rectangle within `atlas`.
///
/// # Errors
///
/// Returns [`RegionOutOfBoundsError`] when the identifier precedes the
/// tileset's first id, or when the tileset does not hold enough tiles for
/// the identifier and the rectangle would escape the image.
pub fn resolve_region(gid: u32, atlas: &AtlasDef) -> Result<TileRect, RegionOutOfBoundsError> {
    // 1-based index of the tile within this atlas.
    let local_id = i64::from(gid) - (i64::from(atlas.first_id) - 1);
    if local_id <= 0 {
        return Err(RegionOutOfBoundsError::IdentifierBeforeAtlas {
            atlas: atlas.name.clone(),
            gid,
            first_id: atlas.first_id,
        });
    }

    let columns = i64::from(atlas.columns());
    let rows = i64::from(atlas.rows());
    if columns == 0 || rows == 0 {
        // A tile larger than the image itself: no rectangle can fit.
        return Err(RegionOutOfBoundsError::RectangleOutside {
            atlas: atlas.name.clone(),
            gid,
            x: 0,
            y: 0,
            width: atlas.tile_width,
            height: atlas.tile_height,
            image_width: atlas.image_width,
            image_height: atlas.image_height,
        });
    }

    let mut column = local_id % columns;
    // Row counted from the bottom edge of the image; `rows - ceil + 1`
    // turns the top-down tile numbering into a bottom-up row.
    let row = if column != 0 {
        rows - ((local_id + (columns - column)) / columns) + 1
    } else {
        column = columns;
        rows - (local_id / columns) + 1
    };

    let x = (column - 1) * i64::from(atlas.tile_width);
    let y = (row - 1) * i64::from(atlas.tile_height);
    let within = x >= 0
        && y >= 0
        && x + i64::from(atlas.tile_width) <= i64::from(atlas.image_width)
        && y + i64::from(atlas.tile_height) <= i64::from(atlas.image_height);
    if !within {
        return Err(RegionOutOfBoundsError::RectangleOutside {
            atlas: atlas.name.clone(),
            gid,
            x,
            y,
            width: atlas.tile_width,
            height: atlas.tile_height,
            image_width: atlas.image_width,
            image_height: atlas.image_height,
        });
    }

    Ok(TileRect {
        x: x as u32,
        y: y as u32,
        width: atlas.tile_width,
        height: atlas.tile_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atlas(first_id: u32, tile: u32, image_width: u32, image_height: u32) -> AtlasDef {
        AtlasDef {
            first_id,
            name: "test".to_string(),
            tile_width: tile,
            tile_height: tile,
            image_width,
            image_height,
        }
    }

    #[test]
    fn test_two_by_two_atlas_quadrants() {
        // 32x32 image of 16px tiles: identifiers 1..=4 cover the four
        // quadrants, rows counted from the bottom.
        let atlas = atlas(1, 16, 32, 32);
        assert_eq!(
            resolve_region(1, &atlas).unwrap(),
            TileRect { x: 0, y: 16, width: 16, height: 16 }
        );
        assert_eq!(
            resolve_region(2, &atlas).unwrap(),
            TileRect { x: 16, y: 16, width: 16, height: 16 }
        );
        assert_eq!(
            resolve_region(3, &atlas).unwrap(),
            TileRect { x: 0, y: 0, width: 16, height: 16 }
        );
        assert_eq!(
            resolve_region(4, &atlas).unwrap(),
            TileRect { x: 16, y: 0, width: 16, height: 16 }
        );
    }

    #[test]
    fn test_single_row_atlas() {
        // One row of four 8px tiles: the bottom-up row is always 1, so the
        // vertical offset stays 0.
        let atlas = atlas(1, 8, 32, 8);
        for (gid, x) in [(1, 0), (2, 8), (3, 16), (4, 24)] {
            let rect = resolve_region(gid, &atlas).unwrap();
            assert_eq!(rect.x, x, "gid {gid}");
            assert_eq!(rect.y, 0, "gid {gid}");
        }
    }

    #[test]
    fn test_non_unit_first_id() {
        // first_id 17: gid 17 is local tile 1.
        let atlas = atlas(17, 16, 32, 32);
        assert_eq!(
            resolve_region(17, &atlas).unwrap(),
            TileRect { x: 0, y: 16, width: 16, height: 16 }
        );
        assert_eq!(
            resolve_region(20, &atlas).unwrap(),
            TileRect { x: 16, y: 0, width: 16, height: 16 }
        );
    }

    #[test]
    fn test_identifier_before_atlas() {
        let atlas = atlas(10, 16, 32, 32);
        let err = resolve_region(9, &atlas).unwrap_err();
        assert!(matches!(
            err,
            RegionOutOfBoundsError::IdentifierBeforeAtlas { gid: 9, first_id: 10, .. }
        ));
    }

    #[test]
    fn test_identifier_past_atlas_capacity() {
        // 2x2 atlas holds local tiles 1..=4; local tile 5 escapes the top.
        let atlas = atlas(1, 16, 32, 32);
        let err = resolve_region(5, &atlas).unwrap_err();
        match err {
            RegionOutOfBoundsError::RectangleOutside { gid, y, .. } => {
                assert_eq!(gid, 5);
                assert!(y < 0, "expected a negative row offset, got {y}");
            }
            other => panic!("expected RectangleOutside, got {other:?}"),
        }
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let atlas = atlas(1, 16, 64, 48);
        let first = resolve_region(7, &atlas).unwrap();
        let second = resolve_region(7, &atlas).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rectangle_display() {
        let rect = TileRect { x: 16, y: 0, width: 16, height: 16 };
        assert_eq!(rect.to_string(), "(16, 0) 16x16");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_valid_identifiers_stay_in_bounds(
                tile in 1u32..32,
                columns in 1u32..16,
                rows in 1u32..16,
                first_id in 1u32..10_000,
                local in 1u32..=256,
            ) {
                let capacity = columns * rows;
                prop_assume!(local <= capacity);
                let atlas = AtlasDef {
                    first_id,
                    name: "prop".to_string(),
                    tile_width: tile,
                    tile_height: tile,
                    image_width: columns * tile,
                    image_height: rows * tile,
                };
                let gid = first_id + local - 1;

                let rect = resolve_region(gid, &atlas).unwrap();
                prop_assert!(rect.x + rect.width <= atlas.image_width);
                prop_assert!(rect.y + rect.height <= atlas.image_height);
                prop_assert_eq!(rect.x % tile, 0);
                prop_assert_eq!(rect.y % tile, 0);
                prop_assert_eq!(rect.width, tile);
                prop_assert_eq!(rect.height, tile);
            }

            #[test]
            fn test_distinct_identifiers_get_distinct_rectangles(
                tile in 1u32..16,
                columns in 1u32..8,
                rows in 1u32..8,
            ) {
                let atlas = AtlasDef {
                    first_id: 1,
                    name: "prop".to_string(),
                    tile_width: tile,
                    tile_height: tile,
                    image_width: columns * tile,
                    image_height: rows * tile,
                };
                let mut seen = std::collections::HashSet::new();
                for gid in 1..=(columns * rows) {
                    let rect = resolve_region(gid, &atlas).unwrap();
                    prop_assert!(
                        seen.insert((rect.x, rect.y)),
                        "duplicate rectangle for gid {}", gid
                    );
                }
            }

            #[test]
            fn test_identifiers_past_capacity_fail(
                tile in 1u32..16,
                columns in 1u32..8,
                rows in 1u32..8,
                excess in 1u32..64,
            ) {
                let atlas = AtlasDef {
                    first_id: 1,
                    name: "prop".to_string(),
                    tile_width: tile,
                    tile_height: tile,
                    image_width: columns * tile,
                    image_height: rows * tile,
                };
                let gid = columns * rows + excess;
                prop_assert!(resolve_region(gid, &atlas).is_err());
            }
        }
    }
}
