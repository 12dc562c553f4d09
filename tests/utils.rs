//! Tooling for testing the crate.

#![allow(dead_code)]

use foldbeam_client::{Callback, Client, ClientOpt, Fetch, Outcome, Queue, Transport, TransportError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub const URL_ROOT: &str = "http://host/";

/// In-memory foldbeam server answering with canned documents.
///
/// Unknown URLs get a 404.
#[derive(Default)]
pub struct Server {
  docs: HashMap<String, String>,
  pub hits: Vec<String>,
}

impl Server {
  pub fn new() -> Self {
    Server::default()
  }

  pub fn serve(mut self, url: &str, body: &str) -> Self {
    self.docs.insert(url.to_owned(), body.to_owned());
    self
  }

  /// A user named alice with two maps, one layer and no bucket.
  pub fn alice() -> Self {
    Server::new()
      .serve(
        "http://host/alice",
        r#"{
          "username": "alice",
          "resources": {
            "maps": { "url": "/alice/maps" },
            "layers": { "url": "/alice/layers" },
            "buckets": { "url": "/alice/buckets" }
          }
        }"#,
      )
      .serve(
        "/alice/maps",
        r#"{ "resources": [ { "url": "/m/1" }, { "url": "/m/2" } ] }"#,
      )
      .serve(
        "/alice/layers",
        r#"{ "resources": [ { "url": "/l/1", "name": "roads", "uuid": "l1" } ] }"#,
      )
      .serve("/alice/buckets", r#"{ "resources": [] }"#)
      .serve(
        "/m/1",
        r#"{
          "name": "world",
          "extent": [-180.0, -90.0, 180.0, 90.0],
          "layer_tiles": "/m/1/tiles",
          "srs": "EPSG:4326",
          "resources": { "layers": { "url": "/m/1/layers" } }
        }"#,
      )
      .serve("/m/2", r#"{ "name": "empty" }"#)
      .serve("/m/1/layers", r#"{ "resources": [ { "url": "/l/1" } ] }"#)
      .serve("/l/1", r#"{ "name": "roads" }"#)
  }
}

impl Fetch for Server {
  fn fetch(&mut self, url: &str) -> Result<Vec<u8>, TransportError> {
    self.hits.push(url.to_owned());

    self
      .docs
      .get(url)
      .map(|body| body.as_bytes().to_vec())
      .ok_or(TransportError::Status(404))
  }
}

/// Transport answering every request from a [`Server`] before [`Transport::get`] returns.
#[derive(Clone)]
pub struct Immediate {
  pub server: Rc<RefCell<Server>>,
}

impl Immediate {
  pub fn new(server: Server) -> Self {
    Immediate {
      server: Rc::new(RefCell::new(server)),
    }
  }
}

impl Transport for Immediate {
  fn get(&self, url: &str, callback: Callback) {
    // answering may issue nested requests, so the server must not stay borrowed
    let response = self.server.borrow_mut().fetch(url);
    callback(response);
  }
}

/// Run `f` with a client rooted at [`URL_ROOT`] and the queue it issues requests on.
pub fn with_client<F, B>(f: F) -> B
where F: FnOnce(Client, Queue) -> B {
  let queue = Queue::new();
  let opt = ClientOpt::default().set_url_root(URL_ROOT);
  let client = Client::new(opt, queue.clone());

  f(client, queue)
}

/// A notification handler recording every outcome it’s called with.
pub fn recorder() -> (Rc<RefCell<Vec<Outcome>>>, impl FnMut(&Outcome)) {
  let calls = Rc::new(RefCell::new(Vec::new()));
  let calls_ = calls.clone();

  (calls, move |outcome: &Outcome| calls_.borrow_mut().push(outcome.clone()))
}

pub fn ok(body: &str) -> Result<Vec<u8>, TransportError> {
  Ok(body.as_bytes().to_vec())
}
