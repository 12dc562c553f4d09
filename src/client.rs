//! Entry point of the crate.

use serde::Deserialize;
use std::rc::Rc;

use crate::load::{Load, Loader};
use crate::res::Resource;
use crate::transport::Transport;
use crate::user::User;

/// Default root URL of the foldbeam API.
pub const DEFAULT_URL_ROOT: &str = "http://localhost:8888/";

/// Various options to customize a [`Client`].
///
/// Feel free to inspect all of its declared methods for further information.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct ClientOpt {
  url_root: String,
}

impl Default for ClientOpt {
  fn default() -> Self {
    ClientOpt {
      url_root: DEFAULT_URL_ROOT.to_owned(),
    }
  }
}

impl ClientOpt {
  /// Change the root URL users are looked up under.
  ///
  /// The URL of a user is the root URL directly followed by the username, so you most likely
  /// want a trailing `/`.
  ///
  /// # Default
  ///
  /// Defaults to `"http://localhost:8888/"`.
  #[inline]
  pub fn set_url_root<S>(self, url_root: S) -> Self
  where S: Into<String> {
    ClientOpt {
      url_root: url_root.into(),
    }
  }

  /// Get the root URL.
  #[inline]
  pub fn url_root(&self) -> &str {
    &self.url_root
  }
}

/// Client of the foldbeam API.
///
/// A [`Client`] owns the transport requests go through. Resources already started keep working
/// when it’s dropped – their responses still arrive – but they won’t be able to start any nested
/// resource.
pub struct Client {
  opt: ClientOpt,
  // keeps the transport alive; loaders only hold a weak reference
  _transport: Rc<dyn Transport>,
  loader: Loader,
}

impl Client {
  /// Create a new client issuing its requests on `transport`.
  pub fn new<T>(opt: ClientOpt, transport: T) -> Self
  where T: 'static + Transport {
    let transport: Rc<dyn Transport> = Rc::new(transport);
    let loader = Loader::new(&transport);

    Client {
      opt,
      _transport: transport,
      loader,
    }
  }

  /// Options the client was created with.
  pub fn opt(&self) -> &ClientOpt {
    &self.opt
  }

  /// URL of a user.
  pub fn user_url(&self, username: &str) -> String {
    format!("{}{}", self.opt.url_root, username)
  }

  /// Get a user.
  ///
  /// The user starts loading right away; the returned resource is pending.
  pub fn get_user(&self, username: &str) -> Resource<User> {
    self.load(self.user_url(username))
  }

  /// Start loading any kind of resource living at `url`.
  pub fn load<T, U>(&self, url: U) -> Resource<T>
  where
    T: Load,
    U: Into<String>, {
    self.loader.start(url)
  }

  /// Loader starting resources on this client’s transport.
  pub fn loader(&self) -> &Loader {
    &self.loader
  }
}
