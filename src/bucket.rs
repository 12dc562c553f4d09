//! Buckets.

use serde::Deserialize;

use crate::load::{Load, LoadError, Loader};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct BucketDoc {
  pub name: String,
}

/// A bucket, holding the raw data layers are made of.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bucket {
  pub name: String,
}

impl Load for Bucket {
  type Document = BucketDoc;

  fn load(doc: Self::Document, _: &Loader) -> Result<Self, LoadError> {
    Ok(Bucket { name: doc.name })
  }
}
