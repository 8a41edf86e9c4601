//! XML to structured data decoding.
//!
//! This is a best-effort, schema-less conversion. It does not try to undo
//! the encoder's choices (attributes are not turned back into `@` keys,
//! `1`/`0` are not turned back into booleans):
//!
//! - attributes are grouped under `@attributes`
//! - a child with neither attributes nor child elements becomes its text
//!   (`{}` when it is completely empty)
//! - any other child is decoded recursively
//! - repeated child names collapse into an array, placed where the first
//!   occurrence appeared
//! - text of an element with child elements is dropped; text of an element
//!   with attributes only is kept under `"0"`
//!
//! ```xml
//! <resource href="/a"><tag>x</tag><tag>y</tag><meta><v>1</v></meta><empty/></resource>
//! ```
//!
//! decodes to
//!
//! ```json
//! {"@attributes": {"href": "/a"}, "tag": ["x", "y"], "meta": {"v": "1"}, "empty": {}}
//! ```

use roxmltree::{Document, Node};
use serde_json::{Map, Value};
use tracing::debug;

use super::utils::{ATTRIBUTES_KEY, TEXT_KEY};
use crate::error::{FormatError, Result};

/// Parses `raw` and decodes its root element.
///
/// Fails with [`FormatError::BadRequest`] for anything that is not a single
/// well-formed UTF-8 document.
pub fn xml_to_value(raw: &[u8]) -> Result<Value> {
    let text = std::str::from_utf8(raw).map_err(|e| {
        debug!(error = %e, "XML body is not valid UTF-8");
        FormatError::BadRequest
    })?;

    let document = Document::parse(text).map_err(|e| {
        debug!(error = %e, "XML body could not be parsed");
        FormatError::BadRequest
    })?;

    Ok(Value::Object(element_to_map(document.root_element())))
}

fn element_to_map(node: Node<'_, '_>) -> Map<String, Value> {
    let mut map = Map::new();

    let attributes: Map<String, Value> = node
        .attributes()
        .map(|attr| (attr.name().to_string(), Value::String(attr.value().to_string())))
        .collect();
    if !attributes.is_empty() {
        map.insert(ATTRIBUTES_KEY.to_string(), Value::Object(attributes));
    }

    let mut has_children = false;
    for child in node.children().filter(Node::is_element) {
        has_children = true;
        insert_child(&mut map, child.tag_name().name(), child_value(child));
    }

    if !has_children {
        let text = direct_text(node);
        if !text.is_empty() {
            map.insert(TEXT_KEY.to_string(), Value::String(text));
        }
    }

    map
}

fn child_value(child: Node<'_, '_>) -> Value {
    let is_leaf =
        child.attributes().next().is_none() && !child.children().any(|node| node.is_element());

    if is_leaf {
        let text = direct_text(child);
        if text.is_empty() {
            Value::Object(Map::new())
        } else {
            Value::String(text)
        }
    } else {
        Value::Object(element_to_map(child))
    }
}

fn insert_child(map: &mut Map<String, Value>, name: &str, value: Value) {
    match map.get_mut(name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(name.to_string(), value);
        }
    }
}

/// Concatenated text and CDATA directly inside `node`.
fn direct_text(node: Node<'_, '_>) -> String {
    node.children()
        .filter(Node::is_text)
        .filter_map(|child| child.text())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(xml: &str) -> Value {
        xml_to_value(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_decode_nested_elements() {
        let value = decode("<resource><title>Hello</title><author><name>Bob</name></author></resource>");
        assert_eq!(value, json!({"title": "Hello", "author": {"name": "Bob"}}));
    }

    #[test]
    fn test_decode_attributes() {
        let value = decode(r#"<resource href="/a" rel="x"><title lang="en">Hi</title></resource>"#);
        assert_eq!(
            value,
            json!({
                "@attributes": {"href": "/a", "rel": "x"},
                "title": {"@attributes": {"lang": "en"}, "0": "Hi"}
            })
        );
    }

    #[test]
    fn test_decode_repeated_children() {
        let value = decode("<r><tag>a</tag><other>o</other><tag>b</tag><tag>c</tag></r>");
        assert_eq!(value, json!({"tag": ["a", "b", "c"], "other": "o"}));

        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["tag", "other"]);
    }

    #[test]
    fn test_decode_empty_child() {
        assert_eq!(decode("<r><a/><b></b></r>"), json!({"a": {}, "b": {}}));
    }

    #[test]
    fn test_text_beside_children_is_dropped() {
        assert_eq!(decode("<r>loose<a>x</a>text</r>"), json!({"a": "x"}));
    }

    #[test]
    fn test_text_only_root() {
        assert_eq!(decode("<r>hello</r>"), json!({"0": "hello"}));
        assert_eq!(decode("<r/>"), json!({}));
    }

    #[test]
    fn test_entities_and_cdata() {
        let value = decode("<r><a>x &lt; y &amp; &quot;z&quot;</a><b><![CDATA[<raw>]]></b></r>");
        assert_eq!(value, json!({"a": "x < y & \"z\"", "b": "<raw>"}));
    }

    #[test]
    fn test_whitespace_text_is_kept_for_leaves() {
        assert_eq!(decode("<r><a> padded </a></r>"), json!({"a": " padded "}));
    }

    #[test]
    fn test_comments_and_declaration_are_ignored() {
        let value = decode("<?xml version=\"1.0\"?>\n<!-- c --><r><!-- c --><a>1</a></r>");
        assert_eq!(value, json!({"a": "1"}));
    }

    #[test]
    fn test_malformed_input_is_bad_request() {
        for input in [
            "<resource><title>x</resource>",
            "<resource>",
            "",
            "not xml",
            "<a/><b/>",
            "<a b=\"1\" b=\"2\"/>",
        ] {
            assert!(
                matches!(xml_to_value(input.as_bytes()), Err(FormatError::BadRequest)),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_utf8_is_bad_request() {
        let result = xml_to_value(&[b'<', b'r', b'>', 0xff, b'<', b'/', b'r', b'>']);
        assert!(matches!(result, Err(FormatError::BadRequest)));
    }
}
