//! Users, the root of the resource graph.

use serde::Deserialize;

use crate::bucket::Bucket;
use crate::collection::Collection;
use crate::json::Link;
use crate::layer::Layer;
use crate::load::{Load, LoadError, Loader};
use crate::map::Map;

/// Document served for a user.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct UserDoc {
  pub username: String,
  pub resources: UserLinks,
}

/// Collections a user document links to.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct UserLinks {
  #[serde(alias = "map_collection")]
  pub maps: Link,
  #[serde(alias = "layer_collection")]
  pub layers: Link,
  #[serde(alias = "bucket_collection")]
  pub buckets: Link,
}

/// A user and the collections they own.
///
/// The three collections are created – and start loading – while the user itself loads. By the
/// time a user is loaded, its collections exist but are most likely still pending.
#[derive(Debug)]
pub struct User {
  pub username: String,
  pub maps: Collection<Map>,
  pub layers: Collection<Layer>,
  pub buckets: Collection<Bucket>,
}

impl Load for User {
  type Document = UserDoc;

  fn load(doc: Self::Document, loader: &Loader) -> Result<Self, LoadError> {
    let UserDoc {
      username,
      resources,
    } = doc;

    Ok(User {
      username,
      maps: loader.start(resources.maps.url),
      layers: loader.start(resources.layers.url),
      buckets: loader.start(resources.buckets.url),
    })
  }
}
