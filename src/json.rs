//! JSON documents.
//!
//! Every resource is served as a JSON document. This module holds the decoding shared by all
//! [`Load`] implementors, along with the small link types the foldbeam API uses to point at other
//! resources.
//!
//! [`Load`]: crate::load::Load

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::from_slice;

use crate::load::LoadError;

/// Decode a response body into a document.
///
/// Both malformed JSON and well-formed JSON of the wrong shape end up as [`LoadError::Decode`].
pub fn decode<D>(url: &str, body: &[u8]) -> Result<D, LoadError>
where D: DeserializeOwned {
  from_slice(body).map_err(|e| LoadError::Decode {
    url: url.to_owned(),
    reason: e.to_string(),
  })
}

/// A link to another resource, as found in documents.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Link {
  #[serde(alias = "link_url")]
  pub url: String,
}
