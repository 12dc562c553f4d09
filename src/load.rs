//! Load resources.
//!
//! This module exposes the trait and types you need to describe how an object is built out of the
//! JSON document living at its URL, and the errors that can end a load.

use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{self, Display};
use std::rc::{Rc, Weak};
use tracing::debug;

use crate::json;
use crate::res::{Completion, Resource};
use crate::transport::{Transport, TransportError};

/// Class of types that can be loaded from a URL.
///
/// A type implementing [`Load`] picks the shape of the JSON document it expects with
/// [`Load::Document`] and builds itself out of it in [`Load::load`]. The [`Loader`] handed to
/// [`Load::load`] can be used to start nested resources; those begin loading right away and are
/// completely independent from the resource being built.
pub trait Load: 'static + Sized {
  /// Decoded form of the document served at the resource URL.
  type Document: DeserializeOwned;

  /// Build the object out of its decoded document.
  ///
  /// This is called once, when the response for the resource arrives. Returning an error puts the
  /// resource in its failed state.
  fn load(doc: Self::Document, loader: &Loader) -> Result<Self, LoadError>;
}

/// Handle used to start resources.
///
/// A [`Loader`] doesn’t keep the transport alive: once the owning [`Client`] is gone, any resource
/// started through a leftover [`Loader`] fails immediately with [`LoadError::Abandoned`].
///
/// [`Client`]: crate::client::Client
#[derive(Clone)]
pub struct Loader {
  transport: Weak<dyn Transport>,
}

impl Loader {
  pub(crate) fn new(transport: &Rc<dyn Transport>) -> Self {
    Loader {
      transport: Rc::downgrade(transport),
    }
  }

  /// Start loading a resource.
  ///
  /// The GET request for `url` is issued before this function returns; the returned handle is
  /// pending until the transport answers.
  pub fn start<T, U>(&self, url: U) -> Resource<T>
  where
    T: Load,
    U: Into<String>, {
    let resource = Resource::pending(url.into());
    let completion = Completion::new(resource.clone());

    let transport = match self.transport.upgrade() {
      Some(transport) => transport,
      None => {
        debug!(url = resource.url(), "transport gone, not issuing GET");
        return resource;
      }
    };

    debug!(url = resource.url(), "GET");

    let loader = self.clone();
    transport.get(
      resource.url(),
      Box::new(move |response: Result<Vec<u8>, TransportError>| {
        let url = completion.url().to_owned();
        let outcome = response
          .map_err(|e| LoadError::from_transport(&url, e))
          .and_then(|body| json::decode::<T::Document>(&url, &body))
          .and_then(|doc| T::load(doc, &loader));

        completion.finish(outcome);
      }),
    );

    resource
  }
}

/// Terminal outcome of a load, as handed to notification handlers.
pub type Outcome = Result<(), LoadError>;

/// Error that ends a resource load.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LoadError {
  /// The server doesn’t know the resource (HTTP 404).
  NotFound { url: String },
  /// The server answered with a non-success status other than 404.
  Status { url: String, status: u16 },
  /// The request couldn’t be carried out.
  Transport { url: String, reason: String },
  /// The response body is not valid JSON or doesn’t have the expected shape.
  Decode { url: String, reason: String },
  /// The request was dropped without ever being answered.
  Abandoned { url: String },
}

impl LoadError {
  /// URL of the resource that failed.
  pub fn url(&self) -> &str {
    match *self {
      LoadError::NotFound { ref url }
      | LoadError::Status { ref url, .. }
      | LoadError::Transport { ref url, .. }
      | LoadError::Decode { ref url, .. }
      | LoadError::Abandoned { ref url } => url,
    }
  }

  pub(crate) fn from_transport(url: &str, err: TransportError) -> Self {
    let url = url.to_owned();

    match err {
      TransportError::Status(404) => LoadError::NotFound { url },
      TransportError::Status(status) => LoadError::Status { url, status },
      TransportError::Connection(reason) | TransportError::InvalidUrl(reason) => {
        LoadError::Transport { url, reason }
      }
    }
  }
}

impl Display for LoadError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      LoadError::NotFound { ref url } => write!(f, "{} not found", url),
      LoadError::Status { ref url, status } => write!(f, "HTTP {} from {}", status, url),
      LoadError::Transport { ref url, ref reason } => {
        write!(f, "cannot fetch {}: {}", url, reason)
      }
      LoadError::Decode { ref url, ref reason } => write!(f, "cannot decode {}: {}", url, reason),
      LoadError::Abandoned { ref url } => write!(f, "request for {} was abandoned", url),
    }
  }
}

impl Error for LoadError {}

/// A notification handler was replaced before it had a chance to fire.
///
/// Resources hold a single notification handler. Registering a handler on a pending resource that
/// already has one drops the earlier handler, which will never be invoked; this error reports it.
/// The new handler is stored regardless.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Superseded {
  /// URL of the resource whose handler was replaced.
  pub url: String,
}

impl Display for Superseded {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    write!(f, "unfired notification handler of {} was replaced", self.url)
  }
}

impl Error for Superseded {}
