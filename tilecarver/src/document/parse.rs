//! Markup-tree walking for map descriptions.
//!
//! The map description is an XML document in the layout produced by
//! orthogonal map editors: a `<map>` root carrying the grid dimensions,
//! `<tileset>` children each wrapping an `<image>` reference, and a single
//! `<layer>` whose `<data>` element lists one `<tile>` per cell.

use roxmltree::{Document, Node};

use super::{AtlasDef, MalformedMapError, MapDocument};

pub(super) fn from_xml(text: &str) -> Result<MapDocument, MalformedMapError> {
    let doc =
        Document::parse(text).map_err(|e| MalformedMapError::Markup(e.to_string()))?;
    let map = doc.root_element();

    let width = positive_attr(&map, "map", "width")?;
    let height = positive_attr(&map, "map", "height")?;
    let cell_width = positive_attr(&map, "map", "tilewidth")?;
    let cell_height = positive_attr(&map, "map", "tileheight")?;

    let mut atlases = Vec::new();
    for tileset in map.children().filter(|n| n.has_tag_name("tileset")) {
        atlases.push(parse_atlas(&tileset)?);
    }

    let layers: Vec<Node> = map.children().filter(|n| n.has_tag_name("layer")).collect();
    let layer = match layers.as_slice() {
        [] => return Err(MalformedMapError::MissingElement("layer")),
        [single] => *single,
        many => return Err(MalformedMapError::MultipleLayers(many.len())),
    };
    let data = layer
        .children()
        .find(|n| n.has_tag_name("data"))
        .ok_or(MalformedMapError::MissingElement("data"))?;

    let expected = width as usize * height as usize;
    let mut cells = Vec::with_capacity(expected);
    for tile in data.children().filter(|n| n.has_tag_name("tile")) {
        cells.push(numeric_attr(&tile, "tile", "gid")?);
    }
    if cells.len() != expected {
        return Err(MalformedMapError::CellCountMismatch {
            width,
            height,
            expected,
            actual: cells.len(),
        });
    }

    Ok(MapDocument {
        width,
        height,
        cell_width,
        cell_height,
        atlases,
        cells,
    })
}

fn parse_atlas(tileset: &Node) -> Result<AtlasDef, MalformedMapError> {
    let first_id = positive_attr(tileset, "tileset", "firstgid")?;
    let name = require_attr(tileset, "tileset", "name")?.to_string();
    let tile_width = positive_attr(tileset, "tileset", "tilewidth")?;
    let tile_height = positive_attr(tileset, "tileset", "tileheight")?;

    let image = tileset
        .children()
        .find(|n| n.has_tag_name("image"))
        .ok_or(MalformedMapError::MissingElement("image"))?;
    // The `source` path is informational only; atlases are matched to
    // supplied images by display name.
    require_attr(&image, "image", "source")?;
    let image_width = positive_attr(&image, "image", "width")?;
    let image_height = positive_attr(&image, "image", "height")?;

    Ok(AtlasDef {
        first_id,
        name,
        tile_width,
        tile_height,
        image_width,
        image_height,
    })
}

fn require_attr<'a>(
    node: &Node<'a, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<&'a str, MalformedMapError> {
    node.attribute(attribute)
        .ok_or(MalformedMapError::MissingAttribute { element, attribute })
}

fn numeric_attr(
    node: &Node,
    element: &'static str,
    attribute: &'static str,
) -> Result<u32, MalformedMapError> {
    let value = require_attr(node, element, attribute)?;
    value
        .parse()
        .map_err(|_| MalformedMapError::InvalidAttribute {
            element,
            attribute,
            value: value.to_string(),
        })
}

fn positive_attr(
    node: &Node,
    element: &'static str,
    attribute: &'static str,
) -> Result<u32, MalformedMapError> {
    let value = numeric_attr(node, element, attribute)?;
    if value == 0 {
        return Err(MalformedMapError::NonPositiveAttribute { element, attribute });
    }
    Ok(value)
}
