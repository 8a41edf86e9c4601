//! # level3-core - Hypermedia Resource Model
//!
//! This crate holds the in-memory representation of a HAL-style API
//! document before it is serialized (or after a request body was parsed):
//!
//! - [`Resource`] - self URI, structured data, links and embedded resources,
//!   each keyed by relation name and each relation holding 1..N entries
//! - [`Link`] - an `href` plus ordered extra attributes
//! - [`auth`] - the contract authentication methods implement
//!
//! Serialization lives in `level3-serde`; this crate has no knowledge of wire
//! formats.
//!
//! ## Building a resource
//!
//! ```rust
//! use std::sync::Arc;
//! use level3_core::{Link, Resource};
//! use serde_json::json;
//!
//! let mut comment = Resource::new();
//! comment.set_uri("/comments/3");
//! let comment = Arc::new(comment);
//!
//! let mut post = Resource::new();
//! post.set_uri("/posts/1")
//!     .add_link("collection", Link::new("/posts").with_attribute("title", "All posts"))
//!     .add_resource("comments", Arc::clone(&comment))
//!     .add_empty_resource("comments");
//! post.set_data(json!({"title": "Hello", "draft": false}).as_object().cloned().unwrap());
//!
//! assert_eq!(post.resources()["comments"].len(), 2);
//! ```
//!
//! ## Concurrency
//!
//! A resource is a single-writer builder. Once handed to a formatter it is
//! treated as frozen: embedded resources are shared through [`Arc`](std::sync::Arc)
//! and only ever read. Recursion depth while formatting follows the depth of
//! the embedded graph; bounding it is up to the caller.

pub mod auth;
pub mod error;
pub mod link;
pub mod resource;

pub use auth::{AuthenticationMethod, Credentials, Request};
pub use error::{AuthError, ResourceError};
pub use link::Link;
pub use resource::{EmbeddedResources, Resource};
