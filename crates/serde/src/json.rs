//! HAL+JSON formatting.
//!
//! ```json
//! {
//!   "_links": {
//!     "self": {"href": "/orders/1"},
//!     "item": [{"href": "/items/1"}, {"href": "/items/2", "title": "Two"}]
//!   },
//!   "total": 30,
//!   "_embedded": {
//!     "customer": [{"_links": {"self": {"href": "/customers/7"}}, "name": "Ada"}],
//!     "basket": [null]
//!   }
//! }
//! ```
//!
//! A relation holding one link renders as an object, several links as an
//! array. Embedded relations always render as arrays; placeholders are `null`.

use std::sync::Arc;

use level3_core::{Link, Resource};
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::error::{FormatError, Result};
use crate::formatter::Formatter;

/// MIME type of HAL+JSON documents.
pub const CONTENT_TYPE: &str = "application/hal+json";

/// Member holding the links.
pub const LINKS_KEY: &str = "_links";

/// Member holding the embedded resources.
pub const EMBEDDED_KEY: &str = "_embedded";

const SELF_REL: &str = "self";
const HREF_KEY: &str = "href";

/// Formatter for HAL+JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Converts a resource into its HAL+JSON value.
    pub fn resource_to_value(resource: &Resource) -> Value {
        let mut document = Map::new();

        let mut links = Map::new();
        if !resource.links().contains_key(SELF_REL) {
            if let Some(link) = resource.self_link() {
                links.insert(SELF_REL.to_string(), link_to_value(&link));
            }
        }
        for (rel, rel_links) in resource.links() {
            let value = match rel_links.as_slice() {
                [single] => link_to_value(single),
                many => Value::Array(many.iter().map(link_to_value).collect()),
            };
            links.insert(rel.clone(), value);
        }
        if !links.is_empty() {
            document.insert(LINKS_KEY.to_string(), Value::Object(links));
        }

        if let Some(data) = resource.non_empty_data() {
            for (key, value) in data {
                if key == LINKS_KEY || key == EMBEDDED_KEY {
                    warn!(key = %key, "data member shadows a reserved HAL member, skipped");
                    continue;
                }
                document.insert(key.clone(), value.clone());
            }
        }

        let mut embedded = Map::new();
        for (rel, resources) in resource.resources() {
            let items = resources
                .iter()
                .map(|entry| match entry {
                    Some(resource) => Self::resource_to_value(resource),
                    None => Value::Null,
                })
                .collect();
            embedded.insert(rel.clone(), Value::Array(items));
        }
        if !embedded.is_empty() {
            document.insert(EMBEDDED_KEY.to_string(), Value::Object(embedded));
        }

        Value::Object(document)
    }

    /// Rebuilds a resource from a HAL+JSON value.
    ///
    /// `_links.self` becomes the URI, other `_links` become links, `_embedded`
    /// entries become embedded resources (`null` as placeholders) and the
    /// remaining members become the data.
    pub fn resource_from_value(value: &Value) -> Result<Resource> {
        let Value::Object(document) = value else {
            debug!("HAL document is not an object");
            return Err(FormatError::BadRequest);
        };

        let mut resource = Resource::new();
        let mut data = Map::new();

        for (key, member) in document {
            match key.as_str() {
                LINKS_KEY => read_links(&mut resource, member)?,
                EMBEDDED_KEY => read_embedded(&mut resource, member)?,
                _ => {
                    data.insert(key.clone(), member.clone());
                }
            }
        }

        if !data.is_empty() {
            resource.set_data(data);
        }

        Ok(resource)
    }
}

impl Formatter for JsonFormatter {
    fn content_type(&self) -> &'static str {
        CONTENT_TYPE
    }

    fn from_request(&self, raw: &[u8]) -> Result<Value> {
        trace!(bytes = raw.len(), "decoding JSON request body");
        let value: Value = serde_json::from_slice(raw).map_err(|e| {
            debug!(error = %e, "JSON body could not be parsed");
            FormatError::BadRequest
        })?;

        if !value.is_object() {
            debug!("JSON body is not an object");
            return Err(FormatError::BadRequest);
        }

        Ok(value)
    }

    fn to_response(&self, resource: &Resource, pretty: bool) -> Result<Vec<u8>> {
        trace!(uri = ?resource.uri(), pretty, "encoding resource as JSON");
        let value = Self::resource_to_value(resource);
        let output = if pretty {
            serde_json::to_vec_pretty(&value)
        } else {
            serde_json::to_vec(&value)
        };
        output.map_err(|e| FormatError::Serialization(format!("JSON write error: {}", e)))
    }
}

fn link_to_value(link: &Link) -> Value {
    let mut object = Map::new();
    object.insert(HREF_KEY.to_string(), Value::String(link.href().to_string()));
    for (name, value) in link.attributes() {
        object
            .entry(name.clone())
            .or_insert_with(|| Value::String(value.clone()));
    }
    Value::Object(object)
}

fn link_from_value(value: &Value) -> Result<Link> {
    let Some(object) = value.as_object() else {
        debug!("link is not an object");
        return Err(FormatError::BadRequest);
    };

    let Some(href) = object.get(HREF_KEY).and_then(Value::as_str) else {
        debug!("link without a string href");
        return Err(FormatError::BadRequest);
    };

    let mut link = Link::new(href);
    for (name, value) in object {
        if name == HREF_KEY {
            continue;
        }
        let value = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        link = link.with_attribute(name.clone(), value);
    }

    Ok(link)
}

fn read_links(resource: &mut Resource, member: &Value) -> Result<()> {
    let Some(relations) = member.as_object() else {
        debug!("_links is not an object");
        return Err(FormatError::BadRequest);
    };

    for (rel, value) in relations {
        let links = match value {
            Value::Array(items) => items.iter().map(link_from_value).collect::<Result<Vec<_>>>()?,
            single => vec![link_from_value(single)?],
        };

        for link in links {
            if rel == SELF_REL && resource.uri().is_none() && link.attributes().is_empty() {
                resource.set_uri(link.href());
            } else {
                resource.add_link(rel.clone(), link);
            }
        }
    }

    Ok(())
}

fn read_embedded(resource: &mut Resource, member: &Value) -> Result<()> {
    let Some(relations) = member.as_object() else {
        debug!("_embedded is not an object");
        return Err(FormatError::BadRequest);
    };

    for (rel, value) in relations {
        let entries: Vec<&Value> = match value {
            Value::Array(items) => items.iter().collect(),
            single => vec![single],
        };

        for entry in entries {
            if entry.is_null() {
                resource.add_empty_resource(rel.clone());
            } else {
                let embedded = JsonFormatter::resource_from_value(entry)?;
                resource.add_resource(rel.clone(), Arc::new(embedded));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_self_link_from_uri() {
        let mut resource = Resource::new();
        resource.set_uri("/a");
        assert_eq!(
            JsonFormatter::resource_to_value(&resource),
            json!({"_links": {"self": {"href": "/a"}}})
        );
    }

    #[test]
    fn test_single_and_multiple_links() {
        let mut resource = Resource::new();
        resource
            .add_link("next", Link::new("/2").with_attribute("title", "Next"))
            .add_link("item", Link::new("/i/1"))
            .add_link("item", Link::new("/i/2"));

        assert_eq!(
            JsonFormatter::resource_to_value(&resource),
            json!({"_links": {
                "next": {"href": "/2", "title": "Next"},
                "item": [{"href": "/i/1"}, {"href": "/i/2"}]
            }})
        );
    }

    #[test]
    fn test_reserved_data_members_are_skipped() {
        let mut resource = Resource::new();
        resource.set_data(
            json!({"_links": "bogus", "name": "x"})
                .as_object()
                .cloned()
                .unwrap(),
        );
        assert_eq!(
            JsonFormatter::resource_to_value(&resource),
            json!({"name": "x"})
        );
    }

    #[test]
    fn test_from_value_requires_object() {
        assert!(matches!(
            JsonFormatter::resource_from_value(&json!([1, 2])),
            Err(FormatError::BadRequest)
        ));
        assert!(matches!(
            JsonFormatter::resource_from_value(&json!({"_links": {"next": {"title": "no href"}}})),
            Err(FormatError::BadRequest)
        ));
    }

    #[test]
    fn test_from_value_link_attributes_keep_order() {
        let resource = JsonFormatter::resource_from_value(&json!({
            "_links": {"next": {"href": "/2", "title": "Next", "templated": true}}
        }))
        .unwrap();

        let link = &resource.links()["next"][0];
        assert_eq!(link.href(), "/2");
        let attributes: Vec<(&str, &str)> = link
            .attributes()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(attributes, vec![("title", "Next"), ("templated", "true")]);
    }
}
