//! # Level3 Formatters
//!
//! Serializes [`level3_core::Resource`] graphs into HAL documents and parses
//! request bodies back into structured data.
//!
//! ## Formats
//!
//! - **HAL+XML** ([`XmlFormatter`]): `<resource>` documents with `<link>`
//!   children, the data as nested elements and embedded resources as nested
//!   `<resource rel="..">` elements.
//! - **HAL+JSON** ([`JsonFormatter`]): `_links` / `_embedded` objects.
//!
//! Both implement [`Formatter`]; [`Format`] maps media types to formatters.
//!
//! ## Data to XML mapping
//!
//! | Data | XML |
//! |------|-----|
//! | `{"@id": "7"}` | attribute `id="7"` on the enclosing element |
//! | `{"paid": true}` | `<paid>1</paid>` |
//! | `{"tag": {"value": "a"}}` | `<tag>a</tag>` |
//! | `{"item": [{"sku": "A"}, {"sku": "B"}]}` | `<item><sku>A</sku></item><item><sku>B</sku></item>` |
//! | `{"note": null}` | `<note/>` |
//!
//! ## Examples
//!
//! ```rust
//! use level3_core::Resource;
//! use level3_serde::{Format, Formatter};
//!
//! let mut resource = Resource::new();
//! resource.set_uri("/orders/1");
//!
//! let formatter = Format::parse("application/hal+xml").unwrap().formatter();
//! let body = formatter.to_response_string(&resource, false).unwrap();
//! assert_eq!(body, "<?xml version=\"1.0\"?>\n<resource href=\"/orders/1\"/>\n");
//!
//! let parsed = formatter.from_request(body.as_bytes()).unwrap();
//! assert_eq!(parsed["@attributes"]["href"], "/orders/1");
//! ```

pub mod error;
pub mod formatter;
pub mod json;
pub mod xml;

pub use error::{FormatError, Result};
pub use formatter::{Format, Formatter};
pub use json::JsonFormatter;
pub use xml::XmlFormatter;
