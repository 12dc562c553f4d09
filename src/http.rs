//! HTTP backend.
//!
//! [`ReqwestFetch`] answers queued requests over HTTP with a blocking [reqwest] client. Links
//! served by the API are often relative (`/alice/maps`); they’re resolved against a base URL,
//! usually the client [`url_root`].
//!
//! > This module is feature-gated with `"http"`.
//!
//! [reqwest]: https://crates.io/crates/reqwest
//! [`url_root`]: crate::client::ClientOpt::url_root

use reqwest::blocking::Client;
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

use crate::transport::{Fetch, TransportError};

/// Default timeout of a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("foldbeam-client/", env!("CARGO_PKG_VERSION"));

/// [`Fetch`] backend performing real HTTP GET requests.
#[derive(Clone, Debug)]
pub struct ReqwestFetch {
  client: Client,
  base: Url,
}

impl ReqwestFetch {
  /// Create a backend resolving relative URLs against `base`.
  pub fn new(base: &str) -> Result<Self, TransportError> {
    Self::with_timeout(base, DEFAULT_TIMEOUT)
  }

  /// Create a backend with a custom request timeout.
  pub fn with_timeout(base: &str, timeout: Duration) -> Result<Self, TransportError> {
    let base =
      Url::parse(base).map_err(|e| TransportError::InvalidUrl(format!("{}: {}", base, e)))?;
    let client = Client::builder()
      .timeout(timeout)
      .user_agent(USER_AGENT)
      .build()
      .map_err(|e| TransportError::Connection(format!("cannot create HTTP client: {}", e)))?;

    Ok(ReqwestFetch { client, base })
  }

  /// Base URL relative links are resolved against.
  pub fn base(&self) -> &Url {
    &self.base
  }

  fn resolve(&self, url: &str) -> Result<Url, TransportError> {
    self
      .base
      .join(url)
      .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", url, e)))
  }
}

impl Fetch for ReqwestFetch {
  fn fetch(&mut self, url: &str) -> Result<Vec<u8>, TransportError> {
    let url = self.resolve(url)?;
    debug!(%url, "HTTP GET");

    let response = self
      .client
      .get(url.clone())
      .send()
      .map_err(|e| TransportError::Connection(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      return Err(TransportError::Status(status.as_u16()));
    }

    response
      .bytes()
      .map(|b| b.to_vec())
      .map_err(|e| TransportError::Connection(format!("cannot read response from {}: {}", url, e)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn relative_links_are_resolved() {
    let fetch = ReqwestFetch::new("http://localhost:8888/").unwrap();

    assert_eq!(
      fetch.resolve("/alice/maps").unwrap().as_str(),
      "http://localhost:8888/alice/maps"
    );
    assert_eq!(
      fetch.resolve("http://other/alice").unwrap().as_str(),
      "http://other/alice"
    );
  }

  #[test]
  fn invalid_base() {
    match ReqwestFetch::new("not a url") {
      Err(TransportError::InvalidUrl(_)) => (),
      other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
  }
}
