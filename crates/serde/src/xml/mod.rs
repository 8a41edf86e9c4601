//! HAL+XML formatting.
//!
//! ## Document shape
//!
//! ```xml
//! <?xml version="1.0"?>
//! <resource href="/orders/1">
//!   <link rel="next" href="/orders/2"/>
//!   <total>30.00</total>
//!   <item><sku>A1</sku></item>
//!   <item><sku>B2</sku></item>
//!   <resource rel="customer" href="/customers/7">
//!     <name>Ada</name>
//!   </resource>
//!   <resource rel="basket"/>
//! </resource>
//! ```
//!
//! - the root is always `<resource>`, with `href` when the resource has a URI
//! - one `<link>` per link, carrying `rel`, `href` and the extra attributes
//! - the data, encoded with the rules documented in [`encode`]
//! - one nested `<resource rel="..">` per embedded resource; placeholders stay
//!   empty
//!
//! ## Architecture
//!
//! Encoding builds an intermediate [`tree::XmlElement`] first ([`encode`]),
//! which [`writer`] then serializes with quick-xml. Decoding ([`decode`])
//! goes through a roxmltree DOM and yields a generic `serde_json::Value`.
//!
//! ## Examples
//!
//! ```rust
//! use level3_core::{Link, Resource};
//! use level3_serde::{Formatter, XmlFormatter};
//! use serde_json::json;
//!
//! let mut resource = Resource::new();
//! resource.set_uri("/orders/1").add_link("next", Link::new("/orders/2"));
//! resource.set_data(json!({"paid": true}).as_object().cloned().unwrap());
//!
//! let xml = XmlFormatter::new().to_response_string(&resource, false).unwrap();
//! assert!(xml.contains("<paid>1</paid>"));
//! ```

pub mod decode;
pub mod encode;
pub mod tree;
pub mod utils;
pub mod writer;

use level3_core::Resource;
use serde_json::Value;
use tracing::trace;

use crate::error::Result;
use crate::formatter::Formatter;

pub use decode::xml_to_value;
pub use encode::{encode_data, encode_resource};
pub use writer::write_document;

/// MIME type of HAL+XML documents.
pub const CONTENT_TYPE: &str = "application/hal+xml";

/// Formatter for HAL+XML.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlFormatter;

impl XmlFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for XmlFormatter {
    fn content_type(&self) -> &'static str {
        CONTENT_TYPE
    }

    fn from_request(&self, raw: &[u8]) -> Result<Value> {
        trace!(bytes = raw.len(), "decoding XML request body");
        xml_to_value(raw)
    }

    fn to_response(&self, resource: &Resource, pretty: bool) -> Result<Vec<u8>> {
        trace!(uri = ?resource.uri(), pretty, "encoding resource as XML");
        write_document(&encode_resource(resource), pretty)
    }
}
