//! Hypermedia links.

use indexmap::IndexMap;

/// A reference to another resource, attached to a [`Resource`](crate::Resource)
/// under a relation name.
///
/// Besides the `href`, a link may carry extra attributes (`title`, `type`,
/// `templated`, ...). Their insertion order is kept and rendered as-is by the
/// formatters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    href: String,
    attributes: IndexMap<String, String>,
}

impl Link {
    /// Creates a link pointing at `href` with no extra attributes.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Adds an extra attribute.
    ///
    /// Setting a name twice overwrites the value but keeps the position of
    /// the first insertion.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// The link target.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Extra attributes in insertion order.
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }
}
