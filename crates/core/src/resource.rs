//! The hypermedia resource document model.
//!
//! A [`Resource`] is built up by a handler (URI, data, links, embedded
//! resources) and then handed once to a formatter. Formatters only read it;
//! nothing is expected to mutate a resource after it has been formatted.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::ResourceError;
use crate::link::Link;

/// Embedded resources of one relation, in insertion order.
///
/// `None` entries are placeholders: they reserve a slot for the relation and
/// render as an empty embedded resource.
pub type EmbeddedResources = Vec<Option<Arc<Resource>>>;

/// A hypermedia resource: self URI, structured data, links and embedded
/// resources keyed by relation.
///
/// # Example
///
/// ```rust
/// use level3_core::{Link, Resource};
/// use serde_json::json;
///
/// let mut author = Resource::new();
/// author.set_uri("/users/7");
///
/// let mut post = Resource::new();
/// post.set_uri("/posts/1")
///     .add_link("next", Link::new("/posts/2"));
/// post.link_resource("author", &author).unwrap();
/// post.set_data(json!({"title": "Hello"}).as_object().cloned().unwrap());
///
/// assert_eq!(post.links()["author"][0].href(), "/users/7");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Resource {
    uri: Option<String>,
    data: Option<Map<String, Value>>,
    links: IndexMap<String, Vec<Link>>,
    resources: IndexMap<String, EmbeddedResources>,
}

impl Resource {
    /// Creates an anonymous resource with no data, links or embeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets (or replaces) the URI of this resource.
    pub fn set_uri(&mut self, uri: impl Into<String>) -> &mut Self {
        self.uri = Some(uri.into());
        self
    }

    /// The URI of this resource, if any.
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Appends `link` to the links of relation `rel`.
    pub fn add_link(&mut self, rel: impl Into<String>, link: Link) -> &mut Self {
        self.links.entry(rel.into()).or_default().push(link);
        self
    }

    /// Links to `other` through its self link.
    ///
    /// Fails with [`ResourceError::InvalidReference`] when `other` has no URI.
    pub fn link_resource(
        &mut self,
        rel: impl Into<String>,
        other: &Resource,
    ) -> Result<&mut Self, ResourceError> {
        let rel = rel.into();
        match other.self_link() {
            Some(link) => Ok(self.add_link(rel, link)),
            None => {
                warn!(rel = %rel, "refusing to link a resource without URI");
                Err(ResourceError::InvalidReference { rel })
            }
        }
    }

    /// All links, keyed by relation, in insertion order.
    pub fn links(&self) -> &IndexMap<String, Vec<Link>> {
        &self.links
    }

    /// Appends an embedded resource to relation `rel`.
    ///
    /// The resource is shared, not copied: passing an `Arc` that the caller
    /// keeps a clone of is allowed. Duplicates are permitted.
    pub fn add_resource(
        &mut self,
        rel: impl Into<String>,
        resource: impl Into<Arc<Resource>>,
    ) -> &mut Self {
        self.resources
            .entry(rel.into())
            .or_default()
            .push(Some(resource.into()));
        self
    }

    /// Appends an empty placeholder to relation `rel`.
    pub fn add_empty_resource(&mut self, rel: impl Into<String>) -> &mut Self {
        self.resources.entry(rel.into()).or_default().push(None);
        self
    }

    /// Embedded resources keyed by relation, in insertion order.
    pub fn resources(&self) -> &IndexMap<String, EmbeddedResources> {
        &self.resources
    }

    /// Replaces the data payload.
    pub fn set_data(&mut self, data: Map<String, Value>) -> &mut Self {
        self.data = Some(data);
        self
    }

    /// The data payload, if one was set.
    pub fn data(&self) -> Option<&Map<String, Value>> {
        self.data.as_ref()
    }

    /// The data payload if it holds at least one entry.
    pub fn non_empty_data(&self) -> Option<&Map<String, Value>> {
        self.data.as_ref().filter(|data| !data.is_empty())
    }

    /// A link to this resource, or `None` when it has no URI.
    ///
    /// An empty URI counts as no URI.
    pub fn self_link(&self) -> Option<Link> {
        self.uri
            .as_deref()
            .filter(|uri| !uri.is_empty())
            .map(Link::new)
    }
}
