//! Client resources for the foldbeam web API.
//!
//! # Foreword
//!
//! The foldbeam API serves a small graph of JSON documents: a *user* links to three *collections*
//! (maps, layers and buckets), and every collection is an index of links to the actual *maps*,
//! *layers* and *buckets*. This crate fetches that graph and tells you when each piece of it has
//! arrived.
//!
//! Everything living at a URL is a *resource* – see [`Resource`]. A resource starts loading the very
//! moment it’s created and then ends up either loaded or failed, exactly once. A loaded resource
//! might have created other resources while loading (a user creates its collections, a collection
//! creates its items); those load on their own, independently from their parent.
//!
//! The crate is single-threaded and never blocks. Requests are handed to a [`Transport`], which
//! answers them whenever it sees fit. The provided [`Queue`] transport keeps requests around until
//! you drive it, typically from your event loop.
//!
//! ## Feature-gates
//!
//! Here’s an exhaustive list of feature-gates available:
//!
//!   - `"http"`: provides [`ReqwestFetch`], a blocking HTTP backend able to answer the requests of
//!     a [`Queue`].
//!   - `"toml-impl"`: enables reading [`ClientOpt`] from [TOML] configuration.
//!
//! # Getting a user
//!
//! You need a [`Client`], built out of a [`ClientOpt`] and a transport. Asking the client for a user
//! gives you a pending [`Resource`] right away.
//!
//! ```rust
//! use foldbeam_client::{Client, ClientOpt, Queue, TransportError};
//!
//! let queue = Queue::new();
//! let opt = ClientOpt::default().set_url_root("http://host/");
//! let client = Client::new(opt, queue.clone());
//!
//! let alice = client.get_user("alice");
//! assert!(alice.is_pending());
//! assert_eq!(queue.urls(), vec!["http://host/alice".to_owned()]);
//!
//! // answer every request; a real application would use an HTTP backend here
//! queue.sync(&mut |url: &str| -> Result<Vec<u8>, TransportError> {
//!   let body: &[u8] = match url {
//!     "http://host/alice" => br#"{
//!       "username": "alice",
//!       "resources": {
//!         "maps": { "url": "/alice/maps" },
//!         "layers": { "url": "/alice/layers" },
//!         "buckets": { "url": "/alice/buckets" }
//!       }
//!     }"#,
//!     _ => br#"{ "resources": [] }"#,
//!   };
//!
//!   Ok(body.to_vec())
//! });
//!
//! assert!(alice.is_loaded());
//! assert_eq!(alice.borrow().unwrap().username, "alice");
//! ```
//!
//! Keep the [`Client`] alive for as long as you drive its transport. Resources reach the transport
//! through the client, not the other way around: once the client is dropped, responses still
//! complete the resources they were issued for, but those resources can’t start anything nested.
//! A user answered after its client is gone is loaded with its three collections failed as
//! [`LoadError::Abandoned`].
//!
//! # Being notified
//!
//! Every resource holds a single notification handler, set with [`Resource::notify_with`]. It’s
//! called with the outcome of the load – `Ok(())` or the [`LoadError`] that ended it:
//!
//!   - If the resource is already loaded or failed, the handler is called before
//!     [`Resource::notify_with`] returns.
//!   - Otherwise, it’s called once, when the resource completes.
//!
//! Only one handler is kept. Setting a handler on a pending resource that already has one drops the
//! previous handler – it will never be called – and you get a [`Superseded`] error telling you so.
//!
//! ```rust
//! use foldbeam_client::{Client, ClientOpt, Layer, Queue};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let queue = Queue::new();
//! let client = Client::new(ClientOpt::default(), queue.clone());
//! let layer = client.load::<Layer, _>("http://host/alice/layers/1");
//!
//! let calls = Rc::new(Cell::new(0));
//! let calls_ = calls.clone();
//! layer.notify_with(move |outcome| {
//!   assert!(outcome.is_ok());
//!   calls_.set(calls_.get() + 1);
//! }).unwrap();
//!
//! queue.pop().unwrap().resolve(Ok(br#"{ "name": "roads" }"#.to_vec()));
//!
//! assert_eq!(calls.get(), 1);
//! assert_eq!(layer.borrow().unwrap().name, "roads");
//! ```
//!
//! The resource owns its handler, so a handler must not own its resource: capture
//! [`Resource::downgrade`] rather than a clone if it needs to get back to it. A clone forms a
//! reference cycle and the resource is never freed.
//!
//! ```rust
//! use foldbeam_client::{Client, ClientOpt, Layer, Queue};
//!
//! let queue = Queue::new();
//! let client = Client::new(ClientOpt::default(), queue.clone());
//! let layer = client.load::<Layer, _>("http://host/alice/layers/1");
//!
//! let weak = layer.downgrade();
//! layer.notify_with(move |_| {
//!   if let Some(layer) = weak.upgrade() {
//!     println!("loaded {}", layer.borrow().unwrap().name);
//!   }
//! }).unwrap();
//!
//! queue.pop().unwrap().resolve(Ok(br#"{ "name": "roads" }"#.to_vec()));
//! ```
//!
//! If you need several observers, use [`Resource::ready`] instead: it returns a future, and you can
//! have as many of them as you want.
//!
//! # Collections
//!
//! A [`Collection`] is a resource whose document lists links. It creates one resource per link, in
//! order, and is loaded as soon as the list is known – *not* when every item is. Register on the
//! items, or use [`Collection::settled`], if you need the whole collection.
//!
//! # Failures
//!
//! A resource fails when its request fails, when the server answers with a non-success status,
//! when its document can’t be decoded, or when the transport drops the request without answering.
//! In all cases the notification handler and the futures get the [`LoadError`]; nothing waits
//! forever.
//!
//! [`Collection::settled`]: crate::res::Resource::settled
//! [TOML]: https://github.com/toml-lang/toml

pub mod bucket;
pub mod client;
pub mod collection;
#[cfg(feature = "http")]
pub mod http;
pub mod json;
pub mod layer;
pub mod load;
pub mod map;
pub mod res;
#[cfg(feature = "toml-impl")]
pub mod toml;
pub mod transport;
pub mod user;

pub use crate::bucket::Bucket;
pub use crate::client::{Client, ClientOpt};
pub use crate::collection::{Collection, Items, Window};
#[cfg(feature = "http")]
pub use crate::http::ReqwestFetch;
pub use crate::layer::Layer;
pub use crate::load::{Load, LoadError, Loader, Outcome, Superseded};
pub use crate::map::Map;
pub use crate::res::{Ready, Resource, WeakResource};
pub use crate::transport::{Callback, Fetch, Pending, Queue, Transport, TransportError};
pub use crate::user::User;
