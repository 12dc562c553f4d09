//! Transports.
//!
//! A transport is anything able to perform a GET request and call back with the response body
//! later on. Resources never block: they hand a [`Callback`] to the transport and carry on.
//!
//! The crate ships the [`Queue`] transport, which simply records requests until you decide to
//! answer them. You can answer them one by one with [`Queue::take`] or [`Queue::pop`], or let a
//! [`Fetch`] backend answer all of them with [`Queue::sync`] – typically once per iteration of your
//! event loop.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::error::Error;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// Function called with the outcome of a request.
pub type Callback = Box<dyn FnOnce(Result<Vec<u8>, TransportError>)>;

/// Class of types that can carry out GET requests.
pub trait Transport {
  /// Start a GET request for `url`.
  ///
  /// `callback` must be called at most once with the response body. Dropping it without calling
  /// it fails the resource that issued the request.
  fn get(&self, url: &str, callback: Callback);
}

/// Error a transport can report.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TransportError {
  /// The request couldn’t reach the server or the response couldn’t be read.
  Connection(String),
  /// The server answered with a non-success HTTP status.
  Status(u16),
  /// The URL cannot be turned into a request.
  InvalidUrl(String),
}

impl fmt::Display for TransportError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      TransportError::Connection(ref reason) => write!(f, "connection error: {}", reason),
      TransportError::Status(status) => write!(f, "HTTP status {}", status),
      TransportError::InvalidUrl(ref reason) => write!(f, "invalid URL: {}", reason),
    }
  }
}

impl Error for TransportError {}

/// Blocking backend used to answer queued requests.
pub trait Fetch {
  /// Fetch the body served at `url`.
  fn fetch(&mut self, url: &str) -> Result<Vec<u8>, TransportError>;
}

impl<F> Fetch for F
where F: FnMut(&str) -> Result<Vec<u8>, TransportError>
{
  fn fetch(&mut self, url: &str) -> Result<Vec<u8>, TransportError> {
    self(url)
  }
}

/// A request waiting for its response.
pub struct Pending {
  url: String,
  callback: Callback,
}

impl Pending {
  /// Requested URL.
  pub fn url(&self) -> &str {
    &self.url
  }

  /// Answer the request.
  pub fn resolve(self, response: Result<Vec<u8>, TransportError>) {
    trace!(url = %self.url, ok = response.is_ok(), "resolving request");
    (self.callback)(response)
  }
}

impl fmt::Debug for Pending {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    f.debug_struct("Pending").field("url", &self.url).finish()
  }
}

/// Transport recording requests in order until they’re answered.
///
/// Cloning a [`Queue`] yields a handle on the same queue, so that you can keep one around to drive
/// it while another one is given to a [`Client`].
///
/// Dropping the last handle drops every unanswered request, failing the matching resources.
///
/// [`Client`]: crate::client::Client
#[derive(Clone, Default)]
pub struct Queue {
  requests: Rc<RefCell<VecDeque<Pending>>>,
}

impl Queue {
  pub fn new() -> Self {
    Queue::default()
  }

  /// Number of unanswered requests.
  pub fn len(&self) -> usize {
    self.requests.borrow().len()
  }

  pub fn is_empty(&self) -> bool {
    self.requests.borrow().is_empty()
  }

  /// URLs of the unanswered requests, oldest first.
  pub fn urls(&self) -> Vec<String> {
    self.requests.borrow().iter().map(|p| p.url.clone()).collect()
  }

  /// Remove the oldest unanswered request.
  pub fn pop(&self) -> Option<Pending> {
    self.requests.borrow_mut().pop_front()
  }

  /// Remove the oldest unanswered request for `url`.
  pub fn take(&self, url: &str) -> Option<Pending> {
    let mut requests = self.requests.borrow_mut();
    let index = requests.iter().position(|p| p.url == url)?;
    requests.remove(index)
  }

  /// Drop every unanswered request.
  ///
  /// The resources waiting on them fail with [`LoadError::Abandoned`].
  ///
  /// [`LoadError::Abandoned`]: crate::load::LoadError::Abandoned
  pub fn clear(&self) {
    // callbacks must not run while the queue is borrowed
    let dropped = self.requests.replace(VecDeque::new());
    drop(dropped);
  }

  /// Answer requests with `fetch` until the queue is empty.
  ///
  /// Requests issued while answering – nested resources – are answered as well. Returns the number
  /// of answered requests.
  ///
  /// Nested resources are only issued while the [`Client`] the queue was given to is alive.
  ///
  /// [`Client`]: crate::client::Client
  pub fn sync<F>(&self, fetch: &mut F) -> usize
  where F: Fetch {
    let mut answered = 0;

    while let Some(pending) = self.pop() {
      let response = fetch.fetch(pending.url());
      pending.resolve(response);
      answered += 1;
    }

    answered
  }
}

impl Transport for Queue {
  fn get(&self, url: &str, callback: Callback) {
    trace!(url, "queuing request");

    self.requests.borrow_mut().push_back(Pending {
      url: url.to_owned(),
      callback,
    });
  }
}

impl fmt::Debug for Queue {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    f.debug_struct("Queue").field("requests", &self.urls()).finish()
  }
}
