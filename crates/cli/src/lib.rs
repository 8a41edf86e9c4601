//! Level3 command-line front end.
//!
//! The binary is a thin shell around the functions in this crate:
//! [`encode`] turns a HAL+JSON document into the configured format and
//! [`decode`] parses a request body into structured data.

pub mod config;
pub mod logging;

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use level3_core::Resource;
use level3_serde::{Format, Formatter, JsonFormatter};
use serde_json::Value;
use tracing::{debug, info};

pub use config::{CliConfig, Command};
pub use logging::init_logging;

/// Reads `file`, or stdin when it is `None`.
pub fn read_input(file: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match file {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut buffer = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// Rebuilds a resource from a HAL+JSON body.
pub fn parse_resource(body: &[u8]) -> anyhow::Result<Resource> {
    let value = JsonFormatter::new()
        .from_request(body)
        .context("Input is not a HAL+JSON document")?;
    let resource = JsonFormatter::resource_from_value(&value)
        .context("Input is not a valid HAL+JSON document")?;

    debug!(
        uri = ?resource.uri(),
        links = resource.links().len(),
        embedded = resource.resources().len(),
        "parsed resource"
    );
    Ok(resource)
}

/// Encodes a HAL+JSON body into `format`.
pub fn encode(body: &[u8], format: Format, pretty: bool) -> anyhow::Result<Vec<u8>> {
    let resource = parse_resource(body)?;
    let output = format
        .formatter()
        .to_response(&resource, pretty)
        .with_context(|| format!("Failed to write {}", format))?;

    info!(content_type = %format, bytes = output.len(), "encoded resource");
    Ok(output)
}

/// Decodes a request body in `format` and renders the data as JSON.
pub fn decode(body: &[u8], format: Format, pretty: bool) -> anyhow::Result<String> {
    let value: Value = format
        .formatter()
        .from_request(body)
        .with_context(|| format!("Failed to parse {} body", format))?;

    let output = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_to_xml() {
        let body = br#"{"_links": {"self": {"href": "/a"}, "up": {"href": "/"}}, "name": "x"}"#;
        let xml = String::from_utf8(encode(body, Format::Xml, false).unwrap()).unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\"?>\n\
             <resource href=\"/a\"><link rel=\"up\" href=\"/\"/><name>x</name></resource>\n"
        );
    }

    #[test]
    fn test_encode_rejects_non_hal_input() {
        let err = encode(b"[1, 2]", Format::Xml, false).unwrap_err();
        assert!(err.to_string().contains("HAL+JSON"));
    }

    #[test]
    fn test_decode_xml() {
        let json = decode(b"<resource><a>1</a><a>2</a></resource>", Format::Xml, false).unwrap();
        assert_eq!(json, r#"{"a":["1","2"]}"#);
    }

    #[test]
    fn test_decode_malformed_reports_bad_request() {
        let err = decode(b"<resource>", Format::Xml, false).unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("application/hal+xml"));
        assert!(chain.contains("Bad request"));
    }
}
