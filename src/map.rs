//! Maps.

use serde::Deserialize;

use crate::collection::Collection;
use crate::json::Link;
use crate::layer::Layer;
use crate::load::{Load, LoadError, Loader};

/// Rectangle covered by a map, as `[minx, miny, maxx, maxy]` in projection coordinates.
pub type Extent = [f64; 4];

/// Document served for a map.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MapDoc {
  pub name: String,
  #[serde(default)]
  pub extent: Option<Extent>,
  #[serde(default, alias = "tms_tile_base")]
  pub layer_tiles: Option<String>,
  #[serde(default)]
  pub srs: Option<String>,
  #[serde(default)]
  pub resources: MapLinks,
}

/// Resources a map document might link to.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct MapLinks {
  #[serde(default, alias = "layer_collection")]
  pub layers: Option<Link>,
}

/// A map.
#[derive(Debug)]
pub struct Map {
  pub name: String,
  pub extent: Option<Extent>,
  pub layer_tiles: Option<String>,
  pub srs: Option<String>,
  /// Layers of the map, when the map document links them.
  pub layers: Option<Collection<Layer>>,
}

impl Load for Map {
  type Document = MapDoc;

  fn load(doc: Self::Document, loader: &Loader) -> Result<Self, LoadError> {
    Ok(Map {
      name: doc.name,
      extent: doc.extent,
      layer_tiles: doc.layer_tiles,
      srs: doc.srs,
      layers: doc.resources.layers.map(|link| loader.start(link.url)),
    })
  }
}
