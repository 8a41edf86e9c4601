//! The formatter contract and the table of supported formats.

use level3_core::Resource;
use serde_json::Value;

use crate::error::Result;

/// Serializes resources into a wire format and parses request bodies out of it.
///
/// Implementations are stateless; one instance can serve any number of
/// requests. The formatter only reads the resource it is given.
pub trait Formatter {
    /// The MIME type this formatter produces and accepts.
    fn content_type(&self) -> &'static str;

    /// Parses a raw request body into structured data.
    ///
    /// Any parse failure is reported as [`FormatError::BadRequest`](crate::FormatError::BadRequest).
    fn from_request(&self, raw: &[u8]) -> Result<Value>;

    /// Serializes `resource`. `pretty` only changes whitespace, never the
    /// decoded meaning of the output.
    fn to_response(&self, resource: &Resource, pretty: bool) -> Result<Vec<u8>>;

    /// Like [`to_response`](Self::to_response), returned as a `String`.
    fn to_response_string(&self, resource: &Resource, pretty: bool) -> Result<String> {
        Ok(String::from_utf8(self.to_response(resource, pretty)?)?)
    }
}

/// Supported hypermedia formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// HAL+XML (application/hal+xml)
    Xml,
    /// HAL+JSON (application/hal+json)
    Json,
}

impl Format {
    /// Returns the MIME type string for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Format::Xml => crate::xml::CONTENT_TYPE,
            Format::Json => crate::json::CONTENT_TYPE,
        }
    }

    /// Parses a media type (or a short name like `xml`) into a Format.
    ///
    /// Parameters after `;` are ignored.
    pub fn parse(media_type: &str) -> Option<Self> {
        let media_type = media_type.split(';').next().unwrap_or_default().trim();

        match media_type.to_lowercase().as_str() {
            "xml" | "application/xml" | "text/xml" | "application/hal+xml" => Some(Format::Xml),
            "json" | "application/json" | "application/hal+json" => Some(Format::Json),
            _ => None,
        }
    }

    /// Returns a formatter for this format.
    pub fn formatter(&self) -> Box<dyn Formatter> {
        match self {
            Format::Xml => Box::new(crate::xml::XmlFormatter::new()),
            Format::Json => Box::new(crate::json::JsonFormatter::new()),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mime_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!(Format::parse("application/hal+xml"), Some(Format::Xml));
        assert_eq!(Format::parse("application/xml"), Some(Format::Xml));
        assert_eq!(Format::parse("XML"), Some(Format::Xml));
        assert_eq!(Format::parse("application/hal+json"), Some(Format::Json));
        assert_eq!(
            Format::parse("application/hal+json; charset=utf-8"),
            Some(Format::Json)
        );
        assert_eq!(Format::parse("text/plain"), None);
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(Format::Xml.mime_type(), "application/hal+xml");
        assert_eq!(Format::Json.mime_type(), "application/hal+json");
        assert_eq!(Format::Json.to_string(), "application/hal+json");
    }

    #[test]
    fn test_formatter_content_type_matches() {
        for format in [Format::Xml, Format::Json] {
            assert_eq!(format.formatter().content_type(), format.mime_type());
        }
    }
}
