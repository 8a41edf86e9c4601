//! Resource to XML tree encoding.
//!
//! Every data key is classified once into an [`Entry`] and then dispatched.
//! The rules, applied to a mapping relative to the current element:
//!
//! | Key | Value | Result |
//! |-----|-------|--------|
//! | `@name` | scalar | attribute `name` on the current element |
//! | `value` (only key) | scalar | text of the current element |
//! | `name` | boolean | `<name>1</name>` / `<name>0</name>` |
//! | `name` | other scalar | `<name>text</name>` |
//! | `name` | list | one `<name>` per item, no wrapper element |
//! | `name` | object | `<name>` with the object encoded inside |
//! | numeric | any | a list item, named after the enclosing key |
//!
//! A value is a list when it is a non-empty array, or an object with a key
//! `"0"`.
//!
//! Keys are used as element names unchanged. Keys that are not valid XML
//! names (`"first name"`, `"1st"`, a structured `@meta`) make the writer
//! fail with a serialization error.

use level3_core::{EmbeddedResources, Link, Resource};
use serde_json::{Map, Value};
use tracing::warn;

use super::tree::XmlElement;
use super::utils::{self, ATTRIBUTE_PREFIX, COLLAPSED_VALUE_KEY};

/// Name of the root element and of every embedded resource element.
pub const RESOURCE_ELEMENT: &str = "resource";

/// Name of link elements.
pub const LINK_ELEMENT: &str = "link";

/// How a single data entry is rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry<'a> {
    /// `@name` with a scalar: an attribute on the current element.
    Attribute { name: &'a str, value: &'a Value },
    /// `value` as the only key: text of the current element.
    CollapsedValue(&'a Value),
    /// Named boolean: child element with `1`/`0` text.
    Boolean { name: &'a str, value: bool },
    /// Named scalar: child element with the scalar as text.
    NamedScalar { name: &'a str, value: &'a Value },
    /// Named list: its items repeat under the current element.
    NamedList { name: &'a str, items: &'a Value },
    /// Named object: child element encoding the object.
    NamedObject { name: &'a str, value: &'a Value },
    /// Numeric key: an item of the enclosing list.
    ListItem(&'a Value),
}

/// Classifies one entry of a mapping holding `len` entries.
pub fn classify<'a>(key: &'a str, value: &'a Value, len: usize) -> Entry<'a> {
    let structured = matches!(value, Value::Array(_) | Value::Object(_));

    if utils::is_numeric_key(key) {
        return Entry::ListItem(value);
    }

    if structured {
        return if utils::is_list(value) {
            Entry::NamedList { name: key, items: value }
        } else {
            Entry::NamedObject { name: key, value }
        };
    }

    if let Some(name) = key.strip_prefix(ATTRIBUTE_PREFIX) {
        Entry::Attribute { name, value }
    } else if key == COLLAPSED_VALUE_KEY && len == 1 {
        Entry::CollapsedValue(value)
    } else if let Value::Bool(b) = value {
        Entry::Boolean { name: key, value: *b }
    } else {
        Entry::NamedScalar { name: key, value }
    }
}

/// Encodes a resource into a `<resource>` tree.
///
/// Order of content: `href` attribute, links, data, embedded resources.
pub fn encode_resource(resource: &Resource) -> XmlElement {
    let mut root = XmlElement::new(RESOURCE_ELEMENT);

    if let Some(uri) = resource.uri() {
        root.add_attribute("href", uri);
    }

    encode_links(&mut root, resource.links());

    if let Some(data) = resource.non_empty_data() {
        encode_data(&mut root, data);
    }

    for (rel, resources) in resource.resources() {
        encode_embedded(&mut root, rel, resources);
    }

    root
}

/// Appends one `<link rel=".." href=".." ..>` per link.
pub fn encode_links<'a>(
    element: &mut XmlElement,
    links: impl IntoIterator<Item = (&'a String, &'a Vec<Link>)>,
) {
    for (rel, links) in links {
        for link in links {
            let child = element.add_child(LINK_ELEMENT);
            child.add_attribute("rel", rel.as_str());
            child.add_attribute("href", link.href());

            for (name, value) in link.attributes() {
                child.add_attribute(name.as_str(), value.as_str());
            }
        }
    }
}

/// Appends one `<resource rel="..">` per embedded entry.
///
/// Placeholders stay empty. For the others: `href`, links, nested embedded
/// resources, then data.
pub fn encode_embedded(element: &mut XmlElement, rel: &str, resources: &EmbeddedResources) {
    for entry in resources {
        let child = element.add_child(RESOURCE_ELEMENT);
        child.add_attribute("rel", rel);

        let Some(resource) = entry else {
            continue;
        };

        if let Some(uri) = resource.uri() {
            child.add_attribute("href", uri);
        }

        encode_links(child, resource.links());

        for (inner_rel, inner) in resource.resources() {
            encode_embedded(child, inner_rel, inner);
        }

        if let Some(data) = resource.non_empty_data() {
            encode_data(child, data);
        }
    }
}

/// Encodes a data mapping into `element`.
pub fn encode_data(element: &mut XmlElement, data: &Map<String, Value>) {
    encode_map(element, data, None);
}

fn encode_map(element: &mut XmlElement, map: &Map<String, Value>, parent: Option<&str>) {
    let len = map.len();
    for (key, value) in map {
        encode_entry(element, key, value, len, parent);
    }
}

fn encode_structured(element: &mut XmlElement, value: &Value, parent: Option<&str>) {
    match value {
        Value::Object(map) => encode_map(element, map, parent),
        Value::Array(items) => {
            let len = items.len();
            for (index, item) in items.iter().enumerate() {
                encode_entry(element, &index.to_string(), item, len, parent);
            }
        }
        _ => {}
    }
}

fn encode_entry(
    element: &mut XmlElement,
    key: &str,
    value: &Value,
    len: usize,
    parent: Option<&str>,
) {
    match classify(key, value, len) {
        Entry::Attribute { name, value } => {
            if name.is_empty() {
                warn!(element = %element.name(), "attribute key without a name skipped");
                return;
            }
            element.add_attribute(name, utils::scalar_text(value));
        }
        Entry::CollapsedValue(value) => element.push_text(utils::scalar_text(value)),
        Entry::Boolean { name, value } => {
            element.add_text_child(name, utils::bool_to_int_text(value));
        }
        Entry::NamedScalar { name, value } => {
            element.add_text_child(name, utils::scalar_text(value));
        }
        Entry::NamedList { name, items } => encode_structured(element, items, Some(name)),
        Entry::NamedObject { name, value } => {
            let child = element.add_child(name);
            encode_structured(child, value, Some(name));
        }
        Entry::ListItem(value) => {
            let Some(parent) = parent else {
                warn!(key = %key, "list item without an enclosing name skipped");
                return;
            };

            if value.is_array() || value.is_object() {
                let child = element.add_child(parent);
                encode_structured(child, value, Some(parent));
            } else {
                element.add_text_child(parent, utils::scalar_text(value));
            }
        }
    }
}
