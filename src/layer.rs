//! Layers.

use serde::Deserialize;

use crate::load::{Load, LoadError, Loader};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct LayerDoc {
  pub name: String,
}

/// A layer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Layer {
  pub name: String,
}

impl Load for Layer {
  type Document = LayerDoc;

  fn load(doc: Self::Document, _: &Loader) -> Result<Self, LoadError> {
    Ok(Layer { name: doc.name })
  }
}
