//! Resource collections.
//!
//! A collection is a resource whose document is an index of links. Loading a collection starts one
//! resource per link, of the type given as type parameter, and keeps them in the order the index
//! lists them.
//!
//! Keep in mind that a collection being loaded only means its index was fetched and its items
//! were created: the items themselves are probably still loading at that point. Use
//! [`Collection::settled`] (or register on every item) if you need the whole thing.

use futures::future::join_all;
use serde::Deserialize;
use std::future::Future;
use std::ops::Deref;

use crate::json::Link;
use crate::load::{Load, LoadError, Loader};
use crate::res::Resource;

/// A collection of `T` resources.
pub type Collection<T> = Resource<Items<T>>;

/// Index document served for a collection.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Index {
  #[serde(alias = "linked_resources")]
  pub resources: Vec<Link>,
  #[serde(default)]
  pub window: Option<Window>,
}

/// Slice of the whole collection the index covers.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
pub struct Window {
  pub offset: u64,
  pub limit: u64,
}

/// Items of a loaded collection.
#[derive(Debug)]
pub struct Items<T> {
  items: Vec<Resource<T>>,
  window: Option<Window>,
}

impl<T> Items<T> {
  /// Window announced by the index, if any.
  pub fn window(&self) -> Option<Window> {
    self.window
  }
}

impl<T> Deref for Items<T> {
  type Target = [Resource<T>];

  fn deref(&self) -> &Self::Target {
    &self.items
  }
}

impl<T> Load for Items<T>
where T: Load
{
  type Document = Index;

  fn load(doc: Self::Document, loader: &Loader) -> Result<Self, LoadError> {
    let items: Vec<Resource<T>> = doc
      .resources
      .into_iter()
      .map(|link| loader.start(link.url))
      .collect();

    Ok(Items {
      items,
      window: doc.window,
    })
  }
}

impl<T> Resource<Items<T>> {
  /// Handles on the items, if the collection is loaded.
  pub fn items(&self) -> Option<Vec<Resource<T>>> {
    self.borrow().map(|items| items.to_vec())
  }

  /// Number of items, if the collection is loaded.
  pub fn len(&self) -> Option<usize> {
    self.borrow().map(|items| items.len())
  }

  /// Future resolving once the collection and every one of its items are loaded or failed.
  ///
  /// Resolves to the outcome of every item, in collection order, or to the error the collection
  /// itself failed with.
  pub fn settled(
    &self,
  ) -> impl Future<Output = Result<Vec<Result<Resource<T>, LoadError>>, LoadError>> {
    let ready = self.ready();

    async move {
      let collection = ready.await?;
      let waits = collection
        .items()
        .unwrap_or_default()
        .iter()
        .map(Resource::ready)
        .collect::<Vec<_>>();

      Ok(join_all(waits).await)
    }
  }
}
