//! Shareable, single-shot resources.
//!
//! A [`Resource`] is a handle on an object living at a URL. The object starts loading as soon as
//! the handle is created and ends up either loaded or failed; that transition happens exactly once
//! and never reverts.
//!
//! There are two ways to be told about that transition:
//!
//!   - [`Resource::notify_with`], which stores a single notification handler. Storing a handler
//!     replaces the previous one.
//!   - [`Resource::ready`], which returns a future. Any number of those can be awaited at the same
//!     time.
//!
//! A resource’s payload and its notification bookkeeping live apart: holding a [`Resource::borrow`]
//! guard never prevents storing or firing a handler, nor creating a [`Ready`] future.

use futures::channel::oneshot;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::task::{Context, Poll};
use tracing::{debug, warn};

use crate::load::{LoadError, Outcome, Superseded};

type Handler = Box<dyn FnMut(&Outcome)>;

enum State<T> {
  Pending,
  Loaded(T),
  Failed(LoadError),
}

impl<T> State<T> {
  fn outcome(&self) -> Option<Outcome> {
    match *self {
      State::Pending => None,
      State::Loaded(_) => Some(Ok(())),
      State::Failed(ref e) => Some(Err(e.clone())),
    }
  }
}

#[derive(Default)]
struct Observers {
  handler: Option<Handler>,
  waiters: Vec<oneshot::Sender<Outcome>>,
}

struct Inner<T> {
  url: String,
  // only mutably borrowed by `complete`, while pending; no payload guard can exist then
  state: RefCell<State<T>>,
  observers: RefCell<Observers>,
}

/// Shareable handle on a resource.
///
/// Cloning a [`Resource`] is cheap and yields a handle on the same resource.
pub struct Resource<T>(Rc<Inner<T>>);

impl<T> Clone for Resource<T> {
  fn clone(&self) -> Self {
    Resource(self.0.clone())
  }
}

impl<T> fmt::Debug for Resource<T> {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    let state = match *self.0.state.borrow() {
      State::Pending => "pending",
      State::Loaded(_) => "loaded",
      State::Failed(_) => "failed",
    };

    f.debug_struct("Resource")
      .field("url", &self.0.url)
      .field("state", &state)
      .finish()
  }
}

impl<T> Resource<T> {
  pub(crate) fn pending(url: String) -> Self {
    Resource(Rc::new(Inner {
      url,
      state: RefCell::new(State::Pending),
      observers: RefCell::new(Observers::default()),
    }))
  }

  /// URL the resource is loaded from.
  pub fn url(&self) -> &str {
    &self.0.url
  }

  /// Whether the resource has been successfully loaded.
  pub fn is_loaded(&self) -> bool {
    match *self.0.state.borrow() {
      State::Loaded(_) => true,
      _ => false,
    }
  }

  /// Whether the resource failed to load.
  pub fn is_failed(&self) -> bool {
    match *self.0.state.borrow() {
      State::Failed(_) => true,
      _ => false,
    }
  }

  /// Whether the resource is still waiting for its response.
  pub fn is_pending(&self) -> bool {
    match *self.0.state.borrow() {
      State::Pending => true,
      _ => false,
    }
  }

  /// Terminal outcome, if any.
  pub fn outcome(&self) -> Option<Outcome> {
    self.0.state.borrow().outcome()
  }

  /// Error the resource failed with, if it did.
  pub fn error(&self) -> Option<LoadError> {
    match *self.0.state.borrow() {
      State::Failed(ref e) => Some(e.clone()),
      _ => None,
    }
  }

  /// Borrow the loaded object.
  ///
  /// Returns [`None`] until the resource is loaded, and forever if it failed.
  pub fn borrow(&self) -> Option<Ref<T>> {
    Ref::filter_map(self.0.state.borrow(), |state| match *state {
      State::Loaded(ref t) => Some(t),
      _ => None,
    })
    .ok()
  }

  /// Weak handle on the resource.
  ///
  /// Handlers should capture one of those rather than a clone of the resource they’re stored on:
  /// the resource keeps its handler alive, so a handler owning the resource would keep it alive
  /// forever.
  pub fn downgrade(&self) -> WeakResource<T> {
    WeakResource(Rc::downgrade(&self.0))
  }

  /// Fire the stored notification handler with the terminal outcome.
  ///
  /// This is a no-op while the resource is pending or if no handler was ever stored. Calling it
  /// several times re-invokes the same handler each time.
  ///
  /// A handler calling this function on its own resource doesn’t get re-entered.
  pub fn notify(&self) {
    let outcome = match self.outcome() {
      Some(outcome) => outcome,
      None => return,
    };

    let mut handler = match self.0.observers.borrow_mut().handler.take() {
      Some(handler) => handler,
      None => return,
    };

    handler(&outcome);

    // the handler might have stored another one while running; the newest wins
    let mut observers = self.0.observers.borrow_mut();
    if observers.handler.is_none() {
      observers.handler = Some(handler);
    }
  }

  /// Store a notification handler.
  ///
  /// If the resource is already loaded or failed, `handler` is invoked before this function returns.
  /// Otherwise it is invoked once, when the resource completes.
  ///
  /// Only one handler is kept. Storing a handler while a previous one is still waiting to fire
  /// drops the previous one and returns [`Superseded`]; `handler` is stored either way.
  ///
  /// The handler is kept for later [`Resource::notify`] calls and lives as long as the resource.
  /// Capture a [`WeakResource`] (see [`Resource::downgrade`]) if it needs to reach its own resource;
  /// capturing a clone creates a reference cycle and the resource is never freed.
  pub fn notify_with<F>(&self, handler: F) -> Result<(), Superseded>
  where F: 'static + FnMut(&Outcome) {
    let pending = self.is_pending();
    let superseded = {
      let mut observers = self.0.observers.borrow_mut();
      let superseded = pending && observers.handler.is_some();

      observers.handler = Some(Box::new(handler));
      superseded
    };

    if !pending {
      self.notify();
    }

    if superseded {
      Err(Superseded {
        url: self.0.url.clone(),
      })
    } else {
      Ok(())
    }
  }

  /// Future resolving once the resource is loaded or failed.
  pub fn ready(&self) -> Ready<T> {
    let (tx, rx) = oneshot::channel();

    match self.outcome() {
      Some(outcome) => {
        let _ = tx.send(outcome);
      }
      None => self.0.observers.borrow_mut().waiters.push(tx),
    }

    Ready {
      resource: self.clone(),
      rx,
    }
  }

  /// Move the resource out of pending state and tell everyone about it.
  ///
  /// Only the first call has any effect.
  fn complete(&self, result: Result<T, LoadError>) {
    let outcome = {
      let mut state = self.0.state.borrow_mut();

      if state.outcome().is_some() {
        return;
      }

      *state = match result {
        Ok(t) => {
          debug!(url = %self.0.url, "loaded");
          State::Loaded(t)
        }

        Err(e) => {
          warn!(url = %self.0.url, error = %e, "load failed");
          State::Failed(e)
        }
      };

      state.outcome()
    };

    let waiters = mem::replace(&mut self.0.observers.borrow_mut().waiters, Vec::new());

    if let Some(outcome) = outcome {
      for waiter in waiters {
        // a dropped future is not an error
        let _ = waiter.send(outcome.clone());
      }
    }

    self.notify();
  }
}

/// Weak handle on a resource, obtained with [`Resource::downgrade`].
pub struct WeakResource<T>(Weak<Inner<T>>);

impl<T> Clone for WeakResource<T> {
  fn clone(&self) -> Self {
    WeakResource(self.0.clone())
  }
}

impl<T> fmt::Debug for WeakResource<T> {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    f.write_str("(WeakResource)")
  }
}

impl<T> WeakResource<T> {
  /// Get the resource back, if some handle on it is still alive.
  pub fn upgrade(&self) -> Option<Resource<T>> {
    self.0.upgrade().map(Resource)
  }
}

/// Future returned by [`Resource::ready`].
///
/// Resolves to the resource itself once it is loaded, or to the error it failed with.
pub struct Ready<T> {
  resource: Resource<T>,
  rx: oneshot::Receiver<Outcome>,
}

impl<T> Future for Ready<T> {
  type Output = Result<Resource<T>, LoadError>;

  fn poll(self: Pin<&mut Self>, cx: &mut Context) -> Poll<Self::Output> {
    let this = self.get_mut();

    match Pin::new(&mut this.rx).poll(cx) {
      Poll::Ready(Ok(Ok(()))) => Poll::Ready(Ok(this.resource.clone())),
      Poll::Ready(Ok(Err(e))) => Poll::Ready(Err(e)),
      Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Err(LoadError::Abandoned {
        url: this.resource.url().to_owned(),
      })),
      Poll::Pending => Poll::Pending,
    }
  }
}

/// Right to complete a pending resource.
///
/// The transport callback owns it. If it gets dropped without [`Completion::finish`] being called –
/// i.e. the request was never answered – the resource fails with [`LoadError::Abandoned`].
pub(crate) struct Completion<T> {
  resource: Option<Resource<T>>,
  url: String,
}

impl<T> Completion<T> {
  pub(crate) fn new(resource: Resource<T>) -> Self {
    Completion {
      url: resource.url().to_owned(),
      resource: Some(resource),
    }
  }

  pub(crate) fn url(&self) -> &str {
    &self.url
  }

  pub(crate) fn finish(mut self, result: Result<T, LoadError>) {
    if let Some(resource) = self.resource.take() {
      resource.complete(result);
    }
  }
}

impl<T> Drop for Completion<T> {
  fn drop(&mut self) {
    if let Some(resource) = self.resource.take() {
      let url = resource.url().to_owned();
      resource.complete(Err(LoadError::Abandoned { url }));
    }
  }
}
